use std::{collections::HashMap, fmt};

use super::{END_MARK, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(usize),
    NonTerminal(usize),
    Epsilon,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
    Epsilon,
    EndOfInput,
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::NonTerminal(_) => SymbolKind::NonTerminal,
            Symbol::Epsilon => SymbolKind::Epsilon,
            Symbol::EndOfInput => SymbolKind::EndOfInput,
        }
    }

    /// Whether the symbol can label a column of the parsing table.
    pub fn is_lookahead(&self) -> bool {
        matches!(self, Symbol::Terminal(_) | Symbol::EndOfInput)
    }
}

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub productions: Vec<Vec<Symbol>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    EmptyGrammar,
    InvalidNonTerminal {
        name: String,
    },
    InvalidTerminal {
        name: String,
    },
    ReservedName {
        name: String,
    },
    ReservedSymbol {
        non_terminal: String,
        production: String,
        symbol: String,
    },
    UndeclaredSymbol {
        non_terminal: String,
        production: String,
        symbol: String,
    },
    AmbiguousSymbol {
        name: String,
    },
    UnknownStartSymbol {
        name: String,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::EmptyGrammar => write!(f, "grammar has no rules"),
            GrammarError::InvalidNonTerminal { name } => {
                write!(f, "invalid nonterminal name \"{}\"", name)
            }
            GrammarError::InvalidTerminal { name } => {
                write!(f, "invalid terminal name \"{}\"", name)
            }
            GrammarError::ReservedName { name } => {
                write!(f, "\"{}\" is reserved and cannot be declared", name)
            }
            GrammarError::ReservedSymbol {
                non_terminal,
                production,
                symbol,
            } => write!(
                f,
                "{} -> {}: reserved symbol \"{}\" inside a production",
                non_terminal, production, symbol
            ),
            GrammarError::UndeclaredSymbol {
                non_terminal,
                production,
                symbol,
            } => write!(
                f,
                "{} -> {}: \"{}\" is neither a nonterminal nor a declared terminal",
                non_terminal, production, symbol
            ),
            GrammarError::AmbiguousSymbol { name } => write!(
                f,
                "\"{}\" is declared both as a terminal and as a nonterminal",
                name
            ),
            GrammarError::UnknownStartSymbol { name } => {
                write!(f, "start symbol \"{}\" is not a nonterminal", name)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// A context-free grammar whose productions are stored pre-tokenized.
///
/// Alternatives are split on whitespace, so a multi-character terminal such as
/// `id` is a single symbol. The token [`EPSILON`] stands for the empty string
/// and never survives into a stored production.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub non_terminals: Vec<NonTerminal>,
    pub terminals: Vec<String>,
    pub symbol_table: HashMap<String, Symbol>,
    pub start_symbol: usize,
}

impl Grammar {
    /// Builds a grammar where every token that is not a declared nonterminal
    /// is taken to be a terminal.
    pub fn new(rules: &[(&str, &[&str])], start: &str) -> Result<Self, GrammarError> {
        Self::build(rules, start, None)
    }

    /// Builds a grammar over a declared terminal alphabet. Tokens outside the
    /// alphabet that are not nonterminals are rejected.
    pub fn with_terminals(
        rules: &[(&str, &[&str])],
        start: &str,
        terminals: &[&str],
    ) -> Result<Self, GrammarError> {
        Self::build(rules, start, Some(terminals))
    }

    fn build(
        rules: &[(&str, &[&str])],
        start: &str,
        terminals: Option<&[&str]>,
    ) -> Result<Self, GrammarError> {
        if rules.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut g = Self {
            non_terminals: Vec::new(),
            terminals: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: 0,
        };
        g.symbol_table.insert(EPSILON.to_string(), Symbol::Epsilon);
        g.symbol_table.insert(END_MARK.to_string(), Symbol::EndOfInput);

        for (left, _) in rules {
            let left = left.trim();
            if left.split_whitespace().count() != 1 {
                return Err(GrammarError::InvalidNonTerminal {
                    name: left.to_string(),
                });
            }
            match g.get_symbol(left) {
                Some(Symbol::NonTerminal(_)) => {}
                Some(_) => {
                    return Err(GrammarError::ReservedName {
                        name: left.to_string(),
                    })
                }
                None => {
                    g.add_non_terminal(left);
                }
            }
        }

        if let Some(terminals) = terminals {
            for &name in terminals {
                if name.split_whitespace().count() != 1 || name.trim() != name {
                    return Err(GrammarError::InvalidTerminal {
                        name: name.to_string(),
                    });
                }
                match g.get_symbol(name) {
                    Some(Symbol::Terminal(_)) => {}
                    Some(Symbol::NonTerminal(_)) => {
                        return Err(GrammarError::AmbiguousSymbol {
                            name: name.to_string(),
                        })
                    }
                    Some(_) => {
                        return Err(GrammarError::ReservedName {
                            name: name.to_string(),
                        })
                    }
                    None => {
                        g.add_terminal(name);
                    }
                }
            }
        }

        for (left, rights) in rules {
            let left = left.trim();
            let left_idx = match g.get_symbol(left) {
                Some(Symbol::NonTerminal(idx)) => idx,
                _ => {
                    return Err(GrammarError::InvalidNonTerminal {
                        name: left.to_string(),
                    })
                }
            };

            for right in rights.iter() {
                let mut production = Vec::new();
                for token in right.split_whitespace() {
                    let symbol = match g.get_symbol(token) {
                        Some(symbol) => symbol,
                        None if terminals.is_some() => {
                            return Err(GrammarError::UndeclaredSymbol {
                                non_terminal: left.to_string(),
                                production: right.trim().to_string(),
                                symbol: token.to_string(),
                            })
                        }
                        None => g.add_terminal(token),
                    };
                    match symbol {
                        Symbol::Epsilon => continue,
                        Symbol::EndOfInput => {
                            return Err(GrammarError::ReservedSymbol {
                                non_terminal: left.to_string(),
                                production: right.trim().to_string(),
                                symbol: token.to_string(),
                            })
                        }
                        _ => production.push(symbol),
                    }
                }
                g.add_production(left_idx, production);
            }
        }

        g.start_symbol = match g.get_symbol(start.trim()) {
            Some(Symbol::NonTerminal(idx)) => idx,
            _ => {
                return Err(GrammarError::UnknownStartSymbol {
                    name: start.to_string(),
                })
            }
        };

        Ok(g)
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminals.iter()
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.iter()
    }

    /// Every table column in order: the terminals as first seen, then `$`.
    pub fn lookahead_iter(&self) -> impl Iterator<Item = Symbol> {
        (0..self.terminals.len())
            .map(Symbol::Terminal)
            .chain(std::iter::once(Symbol::EndOfInput))
    }

    pub fn productions(&self, non_terminal: usize) -> &[Vec<Symbol>] {
        &self.non_terminals[non_terminal].productions
    }

    pub fn get_symbol(&self, name: &str) -> Option<Symbol> {
        self.symbol_table.get(name).cloned()
    }

    pub fn classify(&self, token: &str) -> SymbolKind {
        self.get_symbol(token)
            .map(|s| s.kind())
            .unwrap_or(SymbolKind::Terminal)
    }

    fn add_non_terminal(&mut self, name: &str) -> Symbol {
        let idx = self.non_terminals.len();
        self.non_terminals
            .push(NonTerminal::new(idx, name.to_string()));
        let symbol = Symbol::NonTerminal(idx);
        self.symbol_table.insert(name.to_string(), symbol);
        symbol
    }

    fn add_terminal(&mut self, name: &str) -> Symbol {
        let symbol = Symbol::Terminal(self.terminals.len());
        self.terminals.push(name.to_string());
        self.symbol_table.insert(name.to_string(), symbol);
        symbol
    }

    fn add_production(&mut self, left: usize, right: Vec<Symbol>) {
        self.non_terminals[left].productions.push(right);
    }

    pub fn get_symbol_name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(idx) => self.terminals[idx].as_str(),
            Symbol::NonTerminal(idx) => self.non_terminals[idx].name.as_str(),
            Symbol::Epsilon => EPSILON,
            Symbol::EndOfInput => END_MARK,
        }
    }

    /// Names of a production's symbols, with the empty production shown as ε.
    pub fn production_to_vec_str(&self, production: &[Symbol]) -> Vec<&str> {
        if production.is_empty() {
            vec![EPSILON]
        } else {
            production
                .iter()
                .map(|s| self.get_symbol_name(*s))
                .collect()
        }
    }
}
