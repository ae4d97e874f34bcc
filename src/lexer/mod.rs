// src/lexer/mod.rs
pub mod cpu;
pub mod tables;

pub use cpu::{LexError, Scanner, Token, scan};
pub use tables::{Lexicon, TokenKind};
