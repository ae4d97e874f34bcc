// src/analysis/classify.rs
use hashbrown::HashSet;
use indexmap::{IndexMap, IndexSet};

use super::Production;
use crate::{
    lexer::tables::tokens::TokenKind,
    parser::{Node, Rule, Tag},
};

/// Symbols split into nonterminals (left-hand sides) and terminals
/// (everything else that appears on a right-hand side).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub nonterminals: IndexSet<String>,
    pub terminals: IndexSet<String>,
    pub productions: IndexMap<String, Vec<Production>>,
}

#[derive(Default)]
struct Accumulator {
    lhs: String,
    rhs: Production,
    symbols: IndexSet<String>,
    nonterminals: IndexSet<String>,
    productions: IndexMap<String, Vec<Production>>,
}

impl Accumulator {
    fn visit(&mut self, node: &Node, parent: Tag) {
        match node.tag {
            Tag::Token(TokenKind::Symbol) if parent == Tag::Rule(Rule::ProductionSet) => {
                log::trace!("[classify] lhs {}", node.label);
                self.lhs = node.label.clone();
                self.nonterminals.insert(node.label.clone());
                self.productions.entry(node.label.clone()).or_default();
            }
            Tag::Token(TokenKind::Symbol) => {
                self.symbols.insert(node.label.clone());
                self.rhs.push(node.label.clone());
            }
            // Every alternative is followed by exactly one ProductionSet' node.
            Tag::Rule(Rule::ProductionSetP) => {
                let rhs = std::mem::take(&mut self.rhs);
                log::trace!("[classify] {} -> {:?}", self.lhs, rhs);
                self.productions.entry(self.lhs.clone()).or_default().push(rhs);
            }
            _ => {}
        }
    }
}

/// Pre-order walk with an explicit stack of (node, parent tag).
pub fn classify(tree: &Node) -> Classification {
    let mut acc = Accumulator::default();
    let mut visited: HashSet<*const Node> = HashSet::new();
    let mut stack: Vec<(&Node, Tag)> = vec![(tree, Tag::Rule(Rule::Grammar))];

    while let Some((node, parent)) = stack.pop() {
        if !visited.insert(std::ptr::from_ref(node)) {
            continue;
        }
        acc.visit(node, parent);
        stack.extend(node.children.iter().rev().map(|child| (child, node.tag)));
    }

    let terminals = acc
        .symbols
        .iter()
        .filter(|s| !acc.nonterminals.contains(*s))
        .cloned()
        .collect();

    Classification {
        nonterminals: acc.nonterminals,
        terminals,
        productions: acc.productions,
    }
}
