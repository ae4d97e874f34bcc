//! Grammars far longer than anything hand-written. Test threads run on a
//! small stack, so these fail loudly if parsing or tree handling starts
//! recursing once per production or symbol.

use bnfront::{Lexicon, analyze_source, lexer::scan, parser::parse};

const N: usize = 10_000;

fn many_sets(n: usize) -> String {
    (0..n).map(|i| format!("A{i} : a ;\n")).collect()
}

fn long_rhs(n: usize) -> String {
    format!("A : {} ;\n", vec!["a"; n].join(" "))
}

#[test]
fn many_production_sets() {
    let a = analyze_source(&Lexicon::bnf(), &many_sets(N)).unwrap();
    assert_eq!(a.nonterminals.len(), N);
    assert_eq!(a.goal.as_deref(), Some("A0"));
    assert!(a.ll1_table().is_ll1());
}

#[test]
fn long_right_hand_side() {
    let a = analyze_source(&Lexicon::bnf(), &long_rhs(N)).unwrap();
    assert_eq!(a.productions["A"][0].len(), N);
    assert_eq!(a.terminals.len(), 1);
}

#[test]
fn many_alternatives() {
    let alts = (0..N).map(|i| format!("t{i}")).collect::<Vec<_>>().join(" | ");
    let a = analyze_source(&Lexicon::bnf(), &format!("A : {alts} ;")).unwrap();
    assert_eq!(a.productions["A"].len(), N);
}

#[test]
fn deep_trees_dump_compare_and_drop() {
    let tokens = scan(&Lexicon::bnf(), &long_rhs(N)).unwrap();
    let a = parse(&tokens).unwrap();
    let b = parse(&tokens).unwrap();
    assert!(a == b);
    assert_eq!(a.leaves().count(), tokens.len());

    let dump = a.dump();
    assert_eq!(dump.lines().count(), a.walk().count());
    assert!(dump.lines().last().is_some_and(|l| l.trim_start() == "EOF \"\""));
}

#[test]
fn late_failure_in_long_grammar_is_an_error() {
    let mut src = many_sets(N);
    src.push_str("B : : b ;\n");
    let err = analyze_source(&Lexicon::bnf(), &src).unwrap_err();
    assert!(matches!(err, bnfront::Error::Parse(ref e) if e.line as usize == N + 1));
}
