use super::{Grammar, GrammarError};

pub const EXPRESSION_START: &str = "E";

/// Arithmetic expressions without left recursion.
pub const EXPRESSION_RULES: &[(&str, &[&str])] = &[
    ("E", &["T R"]),
    ("R", &["+ T R", "ε"]),
    ("T", &["F Y"]),
    ("Y", &["* F Y", "ε"]),
    ("F", &["( E )", "id"]),
];

pub fn expression_grammar() -> Result<Grammar, GrammarError> {
    Grammar::new(EXPRESSION_RULES, EXPRESSION_START)
}
