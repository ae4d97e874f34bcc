// src/lexer/cpu.rs
// Maximal-munch scanner driven by the compiled per-kind tables.

use serde::Serialize;
use thiserror::Error;

use crate::lexer::tables::{
    CompiledTable, Lexicon,
    dfa::{START, StateId},
    tokens::TokenKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, line: u32) -> Self {
        Self {
            value: value.into(),
            kind,
            line,
        }
    }

    pub fn eof(line: u32) -> Self {
        Self::new("", TokenKind::Eof, line)
    }
}

/// No registered table matches at `cursor` (a char offset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input {text:?} at position {cursor}, line {line}")]
pub struct LexError {
    pub text: String,
    pub cursor: usize,
    pub line: u32,
}

#[inline]
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Single-pass scanner. Once it has handed out the EOF token it only
/// returns `None`.
pub struct Scanner<'l> {
    lexicon: &'l Lexicon,
    input: Vec<char>,
    cursor: usize,
    line: u32,
    done: bool,
}

impl<'l> Scanner<'l> {
    pub fn new(lexicon: &'l Lexicon, text: &str) -> Self {
        Self {
            lexicon,
            input: text.chars().collect(),
            cursor: 0,
            line: 1,
            done: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    fn skip_blanks(&mut self) {
        while let Some(&c) = self.input.get(self.cursor) {
            if !is_blank(c) {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.cursor += 1;
        }
    }

    /// Runs one table from `start` and returns the end of its longest
    /// accepted match. States entered since the last accepting one are kept
    /// on a stack so a failed extension can be unwound one char at a time.
    fn munch(&self, table: &CompiledTable, start: usize) -> Option<(usize, TokenKind)> {
        let mut state: Option<StateId> = Some(START);
        let mut rollback: Vec<StateId> = Vec::new();
        let mut end = start;

        while let Some(s) = state {
            let Some(&c) = self.input.get(end) else {
                break;
            };
            if table.is_accepting(s) {
                rollback.clear();
            }
            rollback.push(s);
            end += 1;
            state = table.step(s, c);
        }

        loop {
            if let Some(s) = state {
                if table.is_accepting(s) && end > start {
                    return table.token_at(s).map(|kind| (end, kind));
                }
            }
            let prev = rollback.pop()?;
            end -= 1;
            state = Some(prev);
        }
    }

    /// First table in registration order that matches wins.
    fn next_word(&self) -> Option<(usize, TokenKind)> {
        self.lexicon
            .tables()
            .iter()
            .find_map(|table| self.munch(table, self.cursor))
    }

    fn error_here(&self) -> LexError {
        let text = self.input[self.cursor..]
            .iter()
            .take_while(|c| !is_blank(**c))
            .collect();
        LexError {
            text,
            cursor: self.cursor,
            line: self.line,
        }
    }

    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        if self.done {
            return None;
        }
        self.skip_blanks();
        if self.cursor >= self.input.len() {
            self.done = true;
            return Some(Ok(Token::eof(self.line)));
        }
        match self.next_word() {
            Some((end, kind)) => {
                let value: String = self.input[self.cursor..end].iter().collect();
                log::trace!("[scan] line {} {kind} {value:?}", self.line);
                self.cursor = end;
                Some(Ok(Token::new(value, kind, self.line)))
            }
            None => {
                self.done = true;
                let err = self.error_here();
                log::debug!("[scan] {err}");
                Some(Err(err))
            }
        }
    }

    /// Scans the rest of the input, EOF token included.
    pub fn execute(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

pub fn scan(lexicon: &Lexicon, text: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(lexicon, text).execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_prefix_falls_back_to_symbol() {
        let lexicon = Lexicon::bnf();
        let toks = scan(&lexicon, "Epsi").unwrap();
        assert_eq!(toks[0], Token::new("Epsi", TokenKind::Symbol, 1));
    }

    #[test]
    fn exhausted_scanner_stays_exhausted() {
        let lexicon = Lexicon::bnf();
        let mut s = Scanner::new(&lexicon, ";");
        assert_eq!(s.next_token().unwrap().unwrap().kind, TokenKind::Semicolon);
        assert_eq!(s.next_token().unwrap().unwrap().kind, TokenKind::Eof);
        assert!(s.next_token().is_none());
    }
}
