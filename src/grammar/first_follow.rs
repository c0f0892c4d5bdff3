use std::collections::HashSet;

use super::{grammar::Symbol, Grammar};

/// One set of symbols per nonterminal, indexed like [`Grammar::non_terminals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSets {
    sets: Vec<HashSet<Symbol>>,
}

/// FIRST sets. `Symbol::Epsilon` marks a nullable nonterminal.
pub type FirstSets = SymbolSets;
/// FOLLOW sets. Never contain `Symbol::Epsilon`.
pub type FollowSets = SymbolSets;

impl SymbolSets {
    pub fn new(len: usize) -> Self {
        Self {
            sets: vec![HashSet::new(); len],
        }
    }

    pub fn get(&self, non_terminal: usize) -> &HashSet<Symbol> {
        &self.sets[non_terminal]
    }

    pub fn nullable(&self, non_terminal: usize) -> bool {
        self.sets[non_terminal].contains(&Symbol::Epsilon)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashSet<Symbol>> {
        self.sets.iter()
    }

    pub fn is_superset(&self, other: &SymbolSets) -> bool {
        self.sets.len() == other.sets.len()
            && self
                .sets
                .iter()
                .zip(other.sets.iter())
                .all(|(a, b)| a.is_superset(b))
    }

    /// Returns whether the set grew.
    fn extend(&mut self, non_terminal: usize, symbols: impl IntoIterator<Item = Symbol>) -> bool {
        let set = &mut self.sets[non_terminal];
        let before = set.len();
        set.extend(symbols);
        set.len() > before
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstFollow {
    pub first: FirstSets,
    pub follow: FollowSets,
}

impl Grammar {
    pub fn calculate_first_follow(&self) -> FirstFollow {
        let first = self.calculate_first();
        let follow = self.calculate_follow(&first);
        FirstFollow { first, follow }
    }

    /// Nullability alone, without FIRST. Agrees with `FirstSets::nullable`.
    pub fn calculate_nullable(&self) -> Vec<bool> {
        let mut nullable = vec![false; self.non_terminals.len()];
        let mut changed = true;
        while changed {
            changed = false;
            for nt in self.non_terminal_iter() {
                if nullable[nt.index] {
                    continue;
                }
                if nt.productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::NonTerminal(idx) => nullable[*idx],
                        Symbol::Epsilon => true,
                        _ => false,
                    })
                }) {
                    nullable[nt.index] = true;
                    changed = true;
                }
            }
        }
        nullable
    }

    pub fn first_of_symbol(&self, first: &FirstSets, symbol: Symbol) -> HashSet<Symbol> {
        match symbol {
            Symbol::NonTerminal(idx) => first.get(idx).clone(),
            s => std::iter::once(s).collect(),
        }
    }

    /// FIRST of a symbol string. Contains `Symbol::Epsilon` when every symbol
    /// can vanish, including for the empty string.
    pub fn first_of_sequence(&self, first: &FirstSets, sequence: &[Symbol]) -> HashSet<Symbol> {
        let mut result: HashSet<Symbol> = HashSet::new();
        for symbol in sequence {
            match *symbol {
                Symbol::NonTerminal(idx) => {
                    let nt_first = first.get(idx);
                    result.extend(nt_first.iter().filter(|s| **s != Symbol::Epsilon).cloned());
                    if !nt_first.contains(&Symbol::Epsilon) {
                        return result;
                    }
                }
                Symbol::Epsilon => {}
                s => {
                    result.insert(s);
                    return result;
                }
            }
        }
        result.insert(Symbol::Epsilon);
        result
    }

    pub fn calculate_first(&self) -> FirstSets {
        self.calculate_first_observed(|_| {})
    }

    /// Runs the FIRST fixed point, handing `on_pass` the sets after every pass.
    pub fn calculate_first_observed(&self, mut on_pass: impl FnMut(&FirstSets)) -> FirstSets {
        let mut first = FirstSets::new(self.non_terminals.len());
        loop {
            let changed = self.first_pass(&mut first);
            on_pass(&first);
            if !changed {
                break;
            }
        }
        first
    }

    fn first_pass(&self, first: &mut FirstSets) -> bool {
        let mut changed = false;
        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                let production_first = self.first_of_sequence(first, production);
                changed |= first.extend(nt.index, production_first);
            }
        }
        changed
    }

    pub fn calculate_follow(&self, first: &FirstSets) -> FollowSets {
        self.calculate_follow_observed(first, |_| {})
    }

    /// Runs the FOLLOW fixed point over final FIRST sets, handing `on_pass`
    /// the sets after every pass.
    pub fn calculate_follow_observed(
        &self,
        first: &FirstSets,
        mut on_pass: impl FnMut(&FollowSets),
    ) -> FollowSets {
        let mut follow = FollowSets::new(self.non_terminals.len());
        follow.extend(self.start_symbol, std::iter::once(Symbol::EndOfInput));
        loop {
            let changed = self.follow_pass(first, &mut follow);
            on_pass(&follow);
            if !changed {
                break;
            }
        }
        follow
    }

    fn follow_pass(&self, first: &FirstSets, follow: &mut FollowSets) -> bool {
        let mut changed = false;
        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                for (i, symbol) in production.iter().enumerate() {
                    let b = match symbol {
                        Symbol::NonTerminal(idx) => *idx,
                        _ => continue,
                    };

                    // an empty rest yields {ε}, which pulls in FOLLOW(nt)
                    let rest_first = self.first_of_sequence(first, &production[i + 1..]);
                    changed |= follow.extend(
                        b,
                        rest_first
                            .iter()
                            .filter(|s| **s != Symbol::Epsilon)
                            .cloned(),
                    );
                    if rest_first.contains(&Symbol::Epsilon) {
                        let left_follow = follow.get(nt.index).clone();
                        changed |= follow.extend(b, left_follow);
                    }
                }
            }
        }
        changed
    }
}
