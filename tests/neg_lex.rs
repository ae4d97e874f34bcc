//! Negative scanner tests: inputs no registered automaton can match.

use bnfront::{LexError, Lexicon, lexer::scan};

fn lex_err(src: &str) -> LexError {
    scan(&Lexicon::bnf(), src).expect_err("input should not scan")
}

#[test]
fn stray_punctuation() {
    let err = lex_err("Goal : a + b ;");
    assert_eq!(err.text, "+");
    assert_eq!(err.cursor, 9);
    assert_eq!(err.line, 1);
}

#[test]
fn error_reports_line_of_offending_text() {
    let err = lex_err("A : b ;\nB : c ;\n\nC : d#e ;");
    assert_eq!(err.text, "#e");
    assert_eq!(err.line, 4);
}

#[test]
fn non_ascii_letters_are_not_symbols() {
    let err = lex_err("Größe : a ;");
    assert_eq!(err.text, "öße");
    assert_eq!(err.cursor, 2);
}

#[test]
fn underscore_is_not_a_symbol_character() {
    let err = lex_err("snake_case : a ;");
    assert_eq!(err.text, "_case");
}

#[test]
fn error_message_is_one_line() {
    let msg = lex_err("a -> b").to_string();
    assert!(!msg.contains('\n'));
    assert!(msg.contains("\"->\""), "{msg}");
}
