// src/lib.rs
//! Front end for a BNF-style grammar language: table-driven scanning,
//! recursive-descent parsing, and FIRST/FOLLOW analysis.
//!
//! Data flows one way: automata -> compiled tables -> tokens -> syntax tree
//! -> analysis.

pub mod analysis;
pub mod dev;
pub mod lexer;
pub mod parser;

use thiserror::Error;

pub use analysis::{Analysis, analyze};
pub use lexer::{LexError, Lexicon, Token, TokenKind, scan};
pub use parser::{Node, ParseError, parse};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Scans, parses and analyses `source` in one go.
pub fn analyze_source(lexicon: &Lexicon, source: &str) -> Result<Analysis, Error> {
    let tokens = scan(lexicon, source)?;
    let tree = parse(&tokens)?;
    Ok(analyze(&tree))
}
