// src/analysis/mod.rs
//! Grammar analysis over a parsed grammar: symbol classification,
//! production extraction, FIRST/FOLLOW sets and the LL(1) table built
//! from them.

pub mod classify;
pub mod sets;
pub mod table;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

pub use classify::{Classification, classify};
pub use sets::{END_MARKER, Lookahead, LookaheadSet, SetTable};
pub use table::{Conflict, Ll1Table, build_ll1_table};

use crate::parser::Node;

/// One alternative's right-hand side; empty for an EPSILON alternative.
pub type Production = Vec<String>;

/// Immutable result of analysing one grammar.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Left-hand side of the first production set.
    pub goal: Option<String>,
    pub nonterminals: IndexSet<String>,
    pub terminals: IndexSet<String>,
    pub productions: IndexMap<String, Vec<Production>>,
    pub first: SetTable,
    pub follow: SetTable,
    pub first_passes: usize,
    pub follow_passes: usize,
}

impl Analysis {
    pub fn first(&self, symbol: &str) -> Option<&LookaheadSet> {
        self.first.get(symbol)
    }

    pub fn follow(&self, symbol: &str) -> Option<&LookaheadSet> {
        self.follow.get(symbol)
    }

    pub fn first_of(&self, seq: &[String]) -> LookaheadSet {
        sets::first_of_sequence(&self.first, seq)
    }

    pub fn is_nullable(&self, symbol: &str) -> bool {
        self.first(symbol)
            .is_some_and(|set| set.contains(&Lookahead::Epsilon))
    }

    pub fn nullable(&self) -> impl Iterator<Item = &str> {
        self.nonterminals
            .iter()
            .map(String::as_str)
            .filter(|nt| self.is_nullable(nt))
    }

    pub fn ll1_table(&self) -> Ll1Table {
        build_ll1_table(self)
    }
}

pub fn analyze(tree: &Node) -> Analysis {
    let classification = classify(tree);
    let goal = classification.productions.keys().next().cloned();

    let (first, first_passes) = sets::compute_first(&classification);
    let (follow, follow_passes) =
        sets::compute_follow(&classification, &first, goal.as_deref());
    log::debug!(
        "[analysis] |NT|={} |T|={} goal={:?}",
        classification.nonterminals.len(),
        classification.terminals.len(),
        goal
    );

    Analysis {
        goal,
        nonterminals: classification.nonterminals,
        terminals: classification.terminals,
        productions: classification.productions,
        first,
        follow,
        first_passes,
        follow_passes,
    }
}
