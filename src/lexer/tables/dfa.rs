// src/lexer/tables/dfa.rs
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::tokens::TokenKind;

pub type StateId = u32;

/// Every automaton is rooted here.
pub const START: StateId = 0;

/// Terminal states accept; Nonterminal states only pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateTag {
    Nonterminal,
    Terminal,
}

/// A directed edge labelled by a set of input characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub to: StateId,
    pub label: String,
}

/// Small directed graph describing one token kind's automaton.
///
/// Edges keep insertion order, which fixes the order in which the table
/// compiler discovers labels. Determinism (no character on two outgoing
/// edges of the same state) is the builder's responsibility and is not checked.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    tags: HashMap<StateId, StateTag>,
    edges: HashMap<StateId, Vec<Edge>>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, id: StateId, tag: StateTag) -> &mut Self {
        self.tags.insert(id, tag);
        self
    }

    pub fn add_edge(&mut self, from: StateId, to: StateId, label: impl Into<String>) -> &mut Self {
        self.edges.entry(from).or_default().push(Edge {
            to,
            label: label.into(),
        });
        self
    }

    pub fn tag(&self, id: StateId) -> Option<StateTag> {
        self.tags.get(&id).copied()
    }

    pub fn is_terminal(&self, id: StateId) -> bool {
        self.tag(id) == Some(StateTag::Terminal)
    }

    /// Outgoing edges of `from`, in insertion order.
    pub fn edges(&self, from: StateId) -> &[Edge] {
        self.edges.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn neighbors(&self, from: StateId) -> impl Iterator<Item = StateId> + '_ {
        self.edges(from).iter().map(|e| e.to)
    }

    pub fn n_states(&self) -> usize {
        self.tags.len()
    }
}

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// 0 --c--> 1(T)
pub fn single_char(c: char) -> Automaton {
    let mut dfa = Automaton::new();
    dfa.add_state(0, StateTag::Nonterminal)
        .add_state(1, StateTag::Terminal)
        .add_edge(0, 1, c);
    dfa
}

/// Chain over the letters of `word`, one state per letter, each edge
/// carrying both cases of its letter.
pub fn keyword_ignore_case(word: &str) -> Automaton {
    let mut dfa = Automaton::new();
    dfa.add_state(START, StateTag::Nonterminal);
    let n = word.chars().count() as StateId;
    for (i, c) in word.chars().enumerate() {
        let (from, to) = (i as StateId, i as StateId + 1);
        let tag = if to == n {
            StateTag::Terminal
        } else {
            StateTag::Nonterminal
        };
        let mut label: String = c.to_uppercase().collect();
        for lower in c.to_lowercase() {
            if !label.contains(lower) {
                label.push(lower);
            }
        }
        dfa.add_state(to, tag).add_edge(from, to, label);
    }
    dfa
}

pub fn semicolon() -> Automaton {
    single_char(';')
}

pub fn derives() -> Automaton {
    single_char(':')
}

pub fn also_derives() -> Automaton {
    single_char('|')
}

pub fn epsilon() -> Automaton {
    keyword_ignore_case("EPSILON")
}

/// Maximal runs of ASCII letters and digits.
pub fn symbol() -> Automaton {
    let alnum = format!("{LOWER}{UPPER}{DIGITS}");
    let mut dfa = Automaton::new();
    dfa.add_state(0, StateTag::Nonterminal)
        .add_state(1, StateTag::Terminal)
        .add_edge(0, 1, alnum.clone())
        .add_edge(1, 1, alnum);
    dfa
}

/// The grammar language's automata in registration order. The keyword
/// automaton must precede the generic symbol automaton.
pub fn bnf_automata() -> Vec<(TokenKind, Automaton)> {
    vec![
        (TokenKind::Semicolon, semicolon()),
        (TokenKind::Derives, derives()),
        (TokenKind::AlsoDerives, also_derives()),
        (TokenKind::Epsilon, epsilon()),
        (TokenKind::Symbol, symbol()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_chain_shape() {
        let dfa = keyword_ignore_case("EPSILON");
        assert_eq!(dfa.n_states(), 8);
        assert_eq!(dfa.edges(0)[0].label, "Ee");
        assert_eq!(dfa.edges(6)[0].label, "Nn");
        assert!(dfa.is_terminal(7));
        assert!(!dfa.is_terminal(6));
        assert!(dfa.edges(7).is_empty());
    }

    #[test]
    fn symbol_loops_on_accepting_state() {
        let dfa = symbol();
        assert_eq!(dfa.neighbors(1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(dfa.edges(0)[0].label.len(), 62);
    }
}
