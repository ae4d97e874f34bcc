// src/lexer/tables/mod.rs
pub mod build;
pub mod dfa;
pub mod io;
pub mod tokens;

use hashbrown::{HashMap, HashSet};

pub use build::compile;
pub use dfa::{Automaton, START, StateId, StateTag, bnf_automata};
pub use io::{load_lexicon_json_bytes, save_lexicon_json};
pub use tokens::{N_KINDS, TokenKind};

/// Runtime form of one automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTable {
    pub kind: TokenKind,
    pub char_to_class: HashMap<char, u32>,
    pub transitions: HashMap<(u32, StateId), StateId>, // (class, from) -> to
    pub token_of: HashMap<StateId, TokenKind>,         // accepting states only
    pub accepting: HashSet<StateId>,
    pub legal: HashSet<StateId>, // every state reached by the traversal
    pub n_classes: u32,
}

impl CompiledTable {
    #[inline]
    pub fn class_of(&self, c: char) -> Option<u32> {
        self.char_to_class.get(&c).copied()
    }

    /// `None` is the dead state.
    #[inline]
    pub fn step(&self, state: StateId, c: char) -> Option<StateId> {
        let class = self.class_of(c)?;
        self.transitions.get(&(class, state)).copied()
    }

    #[inline]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    pub fn token_at(&self, state: StateId) -> Option<TokenKind> {
        self.token_of.get(&state).copied()
    }
}

/// The compiled tables of every registered token kind, in priority order.
/// Built once and shared read-only by every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    tables: Vec<CompiledTable>,
}

impl Lexicon {
    pub fn new(automata: &[(TokenKind, Automaton)]) -> Self {
        let tables = automata
            .iter()
            .map(|(kind, dfa)| compile(*kind, dfa))
            .collect::<Vec<_>>();
        log::debug!("[tables] compiled {} automata", tables.len());
        Self { tables }
    }

    pub fn bnf() -> Self {
        Self::new(&bnf_automata())
    }

    pub fn from_tables(tables: Vec<CompiledTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[CompiledTable] {
        &self.tables
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::bnf()
    }
}
