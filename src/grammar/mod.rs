pub mod expression;
pub mod first_follow;
pub mod grammar;
pub mod ll1_parsing_table;
pub mod pretty_print;
pub use grammar::{Grammar, GrammarError, Symbol, SymbolKind};

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";
