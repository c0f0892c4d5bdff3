use std::{collections::BTreeMap, fmt};

use super::{
    first_follow::{FirstSets, FollowSets},
    grammar::Symbol,
    Grammar, EPSILON,
};

/// The production chosen for one table cell.
///
/// `vanishing` is set when the cell was filled through FOLLOW because the
/// production derives the empty string; such cells display as `ε`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub production: usize,
    pub vanishing: bool,
}

/// LL(1) parsing table keyed by `(nonterminal, lookahead)`.
///
/// Filling a cell twice keeps the later entry. Use
/// [`Grammar::build_ll1_parsing_table_strict`] to reject such grammars instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTable {
    cells: BTreeMap<(usize, Symbol), TableEntry>,
}

impl ParseTable {
    pub fn get(&self, non_terminal: usize, lookahead: Symbol) -> Option<&TableEntry> {
        self.cells.get(&(non_terminal, lookahead))
    }

    /// Cells ordered by nonterminal, then terminals as first seen, then `$`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Symbol, &TableEntry)> {
        self.cells.iter().map(|(&(nt, t), entry)| (nt, t, entry))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn insert(&mut self, non_terminal: usize, lookahead: Symbol, entry: TableEntry) -> Option<TableEntry> {
        self.cells.insert((non_terminal, lookahead), entry)
    }

    pub fn entry_to_string(&self, grammar: &Grammar, non_terminal: usize, entry: &TableEntry) -> String {
        let right = if entry.vanishing {
            EPSILON.to_string()
        } else {
            grammar
                .production_to_vec_str(&grammar.productions(non_terminal)[entry.production])
                .join(" ")
        };
        format!("{} → {}", grammar.non_terminals[non_terminal].name, right)
    }

    /// One `M[A, a] = A → α` line per populated cell.
    pub fn to_trace(&self, grammar: &Grammar) -> String {
        self.iter()
            .map(|(nt, t, entry)| {
                format!(
                    "M[{}, {}] = {}",
                    grammar.non_terminals[nt].name,
                    grammar.get_symbol_name(t),
                    self.entry_to_string(grammar, nt, entry)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConflict {
    pub non_terminal: String,
    pub lookahead: String,
    pub existing: String,
    pub incoming: String,
}

impl fmt::Display for TableConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table conflict: nonterminal {}, terminal {}, competing productions {{{}, {}}}",
            self.non_terminal, self.lookahead, self.existing, self.incoming
        )
    }
}

impl std::error::Error for TableConflict {}

impl Grammar {
    /// Every cell write in the order it happens: productions in declaration
    /// order, FIRST entries before FOLLOW entries of the same production.
    fn ll1_placements(&self, first: &FirstSets, follow: &FollowSets) -> Vec<(usize, Symbol, TableEntry)> {
        let mut placements = Vec::new();
        for nt in self.non_terminal_iter() {
            for (i, production) in nt.productions.iter().enumerate() {
                let production_first = self.first_of_sequence(first, production);

                let mut lookaheads: Vec<Symbol> = production_first
                    .iter()
                    .filter(|s| s.is_lookahead())
                    .cloned()
                    .collect();
                lookaheads.sort();
                placements.extend(lookaheads.into_iter().map(|t| {
                    (
                        nt.index,
                        t,
                        TableEntry {
                            production: i,
                            vanishing: false,
                        },
                    )
                }));

                if production_first.contains(&Symbol::Epsilon) {
                    let mut lookaheads: Vec<Symbol> = follow.get(nt.index).iter().cloned().collect();
                    lookaheads.sort();
                    placements.extend(lookaheads.into_iter().map(|t| {
                        (
                            nt.index,
                            t,
                            TableEntry {
                                production: i,
                                vanishing: true,
                            },
                        )
                    }));
                }
            }
        }
        placements
    }

    pub fn build_ll1_parsing_table(&self, first: &FirstSets, follow: &FollowSets) -> ParseTable {
        let mut table = ParseTable::default();
        for (nt, t, entry) in self.ll1_placements(first, follow) {
            table.insert(nt, t, entry);
        }
        table
    }

    /// Like [`Grammar::build_ll1_parsing_table`], but fails on the first cell
    /// claimed by two different productions of the same nonterminal.
    pub fn build_ll1_parsing_table_strict(
        &self,
        first: &FirstSets,
        follow: &FollowSets,
    ) -> Result<ParseTable, TableConflict> {
        let mut table = ParseTable::default();
        for (nt, t, entry) in self.ll1_placements(first, follow) {
            if let Some(existing) = table.insert(nt, t, entry) {
                if existing.production != entry.production {
                    return Err(TableConflict {
                        non_terminal: self.non_terminals[nt].name.clone(),
                        lookahead: self.get_symbol_name(t).to_string(),
                        existing: table.entry_to_string(self, nt, &existing),
                        incoming: table.entry_to_string(self, nt, &entry),
                    });
                }
            }
        }
        Ok(table)
    }

    pub fn generate_ll1_parsing_table(&self) -> ParseTable {
        let ff = self.calculate_first_follow();
        self.build_ll1_parsing_table(&ff.first, &ff.follow)
    }

    pub fn generate_ll1_parsing_table_strict(&self) -> Result<ParseTable, TableConflict> {
        let ff = self.calculate_first_follow();
        self.build_ll1_parsing_table_strict(&ff.first, &ff.follow)
    }
}
