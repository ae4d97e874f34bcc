// src/analysis/table.rs
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::{
    Analysis,
    sets::{Lookahead, LookaheadSet, first_of_sequence},
};

/// Two or more alternatives of `nonterminal` predicted by the same lookahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub nonterminal: String,
    pub lookahead: Lookahead,
    pub alternatives: Vec<usize>,
}

/// (nonterminal, lookahead) -> index of the predicted alternative.
/// Conflicting cells keep the first alternative and are listed in `conflicts`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ll1Table {
    pub entries: IndexMap<String, BTreeMap<Lookahead, usize>>,
    pub conflicts: Vec<Conflict>,
}

impl Ll1Table {
    pub fn get(&self, nonterminal: &str, lookahead: &Lookahead) -> Option<usize> {
        self.entries.get(nonterminal)?.get(lookahead).copied()
    }

    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }

    fn record(&mut self, nonterminal: &str, lookahead: Lookahead, alt: usize) {
        let row = self.entries.entry(nonterminal.to_string()).or_default();
        let Some(&existing) = row.get(&lookahead) else {
            row.insert(lookahead, alt);
            return;
        };
        if existing == alt {
            return;
        }
        match self
            .conflicts
            .iter_mut()
            .find(|c| c.nonterminal == nonterminal && c.lookahead == lookahead)
        {
            Some(conflict) => conflict.alternatives.push(alt),
            None => self.conflicts.push(Conflict {
                nonterminal: nonterminal.to_string(),
                lookahead,
                alternatives: vec![existing, alt],
            }),
        }
    }
}

/// FIRST(alt), with FOLLOW(lhs) in place of EPSILON when alt can vanish.
pub fn first_plus(analysis: &Analysis, lhs: &str, alt: &[String]) -> LookaheadSet {
    let mut set = first_of_sequence(&analysis.first, alt);
    if set.remove(&Lookahead::Epsilon) {
        if let Some(follow) = analysis.follow.get(lhs) {
            set.extend(follow.iter().cloned());
        }
    }
    set
}

pub fn build_ll1_table(analysis: &Analysis) -> Ll1Table {
    let mut table = Ll1Table::default();
    for (lhs, alts) in &analysis.productions {
        table.entries.entry(lhs.clone()).or_default();
        for (i, alt) in alts.iter().enumerate() {
            for lookahead in first_plus(analysis, lhs, alt) {
                table.record(lhs, lookahead, i);
            }
        }
    }
    for c in &table.conflicts {
        log::warn!(
            "[analysis] LL(1) conflict: {} on {} between alternatives {:?}",
            c.nonterminal,
            c.lookahead,
            c.alternatives
        );
    }
    table
}
