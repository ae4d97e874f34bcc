// src/lexer/tables/tokens.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Token kinds of the grammar-description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum TokenKind {
    Semicolon = 0,   // ;
    Derives = 1,     // :
    AlsoDerives = 2, // |
    Epsilon = 3,
    Symbol = 4,
    // synthetic, never produced by an automaton
    Eof = 5,
}

pub const N_KINDS: u32 = 6;

impl TokenKind {
    pub const ALL: [TokenKind; N_KINDS as usize] = [
        TokenKind::Semicolon,
        TokenKind::Derives,
        TokenKind::AlsoDerives,
        TokenKind::Epsilon,
        TokenKind::Symbol,
        TokenKind::Eof,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Derives => "DERIVES",
            TokenKind::AlsoDerives => "ALSODERIVES",
            TokenKind::Epsilon => "EPSILON",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl core::convert::TryFrom<u32> for TokenKind {
    type Error = ();
    fn try_from(v: u32) -> Result<Self, ()> {
        TokenKind::ALL.get(v as usize).copied().ok_or(())
    }
}
