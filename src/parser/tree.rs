// src/parser/tree.rs
use std::{fmt, mem};

use serde::Serialize;

use super::descent::Rule;
use crate::lexer::tables::tokens::TokenKind;

/// What a node stands for: a consumed token or a grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    Token(TokenKind),
    Rule(Rule),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Token(kind) => write!(f, "{kind}"),
            Tag::Rule(rule) => write!(f, "{rule}"),
        }
    }
}

/// Syntax-tree node. Leaves carry the token text; rule nodes have an empty
/// label. Each node owns its children.
///
/// Tail rules nest one level per production or symbol, so traversals that
/// could see the whole tree (drop, equality, dump) use an explicit stack.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub label: String,
    pub tag: Tag,
    pub children: Vec<Node>,
}

impl Node {
    pub fn rule(rule: Rule) -> Self {
        Self {
            label: String::new(),
            tag: Tag::Rule(rule),
            children: Vec::new(),
        }
    }

    pub fn leaf(kind: TokenKind, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: Tag::Token(kind),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.tag, Tag::Token(_))
    }

    /// Pre-order traversal.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Token leaves in source order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.walk().filter(|n| n.is_leaf())
    }

    /// Indented rendering, two spaces per level; same as `Display`.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let indent = depth * 2;
            match node.tag {
                Tag::Token(_) => writeln!(f, "{:indent$}{} {:?}", "", node.tag, node.label)?,
                Tag::Rule(_) => writeln!(f, "{:indent$}{}", "", node.tag)?,
            }
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}

impl PartialEq for Node {
    /// Two trees are equal when their pre-order walks agree node for node,
    /// child counts included.
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.walk();
        let mut b = other.walk();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y))
                    if x.tag == y.tag
                        && x.label == y.label
                        && x.children.len() == y.children.len() => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
