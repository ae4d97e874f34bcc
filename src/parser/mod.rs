// src/parser/mod.rs
pub mod descent;
pub mod tree;

pub use descent::{ParseError, Parser, Rule, parse};
pub use tree::{Node, Tag};
