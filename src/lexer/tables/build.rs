// src/lexer/tables/build.rs
use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use super::{
    CompiledTable,
    dfa::{Automaton, START, StateId},
    tokens::TokenKind,
};

/// Breadth-first walk from state 0. Each label gets a class id the first
/// time it is seen; every character of that label maps to the class.
pub fn compile(kind: TokenKind, dfa: &Automaton) -> CompiledTable {
    let mut char_to_class: HashMap<char, u32> = HashMap::new();
    let mut label_class: HashMap<&str, u32> = HashMap::new();
    let mut transitions: HashMap<(u32, StateId), StateId> = HashMap::new();
    let mut token_of: HashMap<StateId, TokenKind> = HashMap::new();
    let mut accepting: HashSet<StateId> = HashSet::new();
    let mut legal: HashSet<StateId> = HashSet::new();

    let mut queue = VecDeque::from([START]);
    legal.insert(START);
    if dfa.is_terminal(START) {
        accepting.insert(START);
        token_of.insert(START, kind);
    }

    while let Some(state) = queue.pop_front() {
        for edge in dfa.edges(state) {
            let next_class = label_class.len() as u32;
            let class = *label_class.entry(edge.label.as_str()).or_insert_with(|| {
                for c in edge.label.chars() {
                    if let Some(prev) = char_to_class.insert(c, next_class) {
                        log::warn!(
                            "[tables] {kind}: {c:?} moved from class {prev} to {next_class}; \
                             automaton is not deterministic"
                        );
                    }
                }
                log::debug!("[tables] {kind}: class {next_class} = {:?}", edge.label);
                next_class
            });

            transitions.insert((class, state), edge.to);
            if dfa.is_terminal(edge.to) {
                accepting.insert(edge.to);
                token_of.insert(edge.to, kind);
            }
            if legal.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }

    CompiledTable {
        kind,
        char_to_class,
        transitions,
        token_of,
        accepting,
        legal,
        n_classes: label_class.len() as u32,
    }
}
