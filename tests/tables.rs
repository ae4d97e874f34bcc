use bnfront::lexer::{
    scan,
    tables::{
        Automaton, Lexicon, StateTag, TokenKind, bnf_automata, compile,
        io::lexicon_to_json, load_lexicon_json_bytes, save_lexicon_json,
    },
};
use hashbrown::{HashMap, HashSet};
use pretty_assertions::assert_eq;

/// r[0-9]+
fn register() -> Automaton {
    let mut dfa = Automaton::new();
    dfa.add_state(0, StateTag::Nonterminal)
        .add_state(1, StateTag::Nonterminal)
        .add_state(2, StateTag::Terminal)
        .add_edge(0, 1, "r")
        .add_edge(1, 2, "0123456789")
        .add_edge(2, 2, "0123456789");
    dfa
}

#[test]
fn register_table() {
    let t = compile(TokenKind::Symbol, &register());

    let mut classes: HashMap<char, u32> = ('0'..='9').map(|c| (c, 1)).collect();
    classes.insert('r', 0);
    assert_eq!(t.char_to_class, classes);
    assert_eq!(t.n_classes, 2);

    let transitions: HashMap<(u32, u32), u32> =
        [((0, 0), 1), ((1, 1), 2), ((1, 2), 2)].into_iter().collect();
    assert_eq!(t.transitions, transitions);

    assert_eq!(t.token_of, [(2, TokenKind::Symbol)].into_iter().collect::<HashMap<_, _>>());
    assert_eq!(t.accepting, [2].into_iter().collect::<HashSet<_>>());
    assert_eq!(t.legal, [0, 1, 2].into_iter().collect::<HashSet<_>>());
}

#[test]
fn step_follows_classes() {
    let t = compile(TokenKind::Symbol, &register());
    assert_eq!(t.step(0, 'r'), Some(1));
    assert_eq!(t.step(1, '7'), Some(2));
    assert_eq!(t.step(0, '7'), None);
    assert_eq!(t.step(2, 'x'), None);
}

#[test]
fn register_scan_rolls_back_to_last_accept() {
    let lexicon = Lexicon::new(&[(TokenKind::Symbol, register())]);
    let toks = scan(&lexicon, "r10 r7").unwrap();
    let values: Vec<_> = toks.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["r10", "r7", ""]);

    // "r" alone never reaches an accepting state.
    let err = scan(&lexicon, "r1 r").unwrap_err();
    assert_eq!(err.cursor, 3);
}

#[test]
fn labels_get_ids_in_discovery_order() {
    let t = compile(TokenKind::Epsilon, &bnf_automata()[3].1);
    assert_eq!(t.class_of('E'), Some(0));
    assert_eq!(t.class_of('e'), Some(0));
    assert_eq!(t.class_of('n'), Some(6));
    assert_eq!(t.accepting, [7].into_iter().collect::<HashSet<_>>());
    assert_eq!(t.legal.len(), 8);
}

#[test]
fn shared_label_shares_class() {
    let t = compile(TokenKind::Symbol, &bnf_automata()[4].1);
    assert_eq!(t.n_classes, 1);
    assert_eq!(t.class_of('a'), t.class_of('Z'));
    assert_eq!(t.class_of('0'), Some(0));
    assert_eq!(t.step(1, 'q'), Some(1));
}

#[test]
fn unreachable_states_are_not_legal() {
    let mut dfa = register();
    dfa.add_state(9, StateTag::Terminal);
    let t = compile(TokenKind::Symbol, &dfa);
    assert!(!t.legal.contains(&9));
    assert!(!t.is_accepting(9));
}

#[test]
fn lexicon_keeps_registration_order() {
    let lexicon = Lexicon::bnf();
    let order: Vec<_> = lexicon.tables().iter().map(|t| t.kind).collect();
    assert_eq!(
        order,
        vec![
            TokenKind::Semicolon,
            TokenKind::Derives,
            TokenKind::AlsoDerives,
            TokenKind::Epsilon,
            TokenKind::Symbol
        ]
    );
}

#[test]
fn lexicon_json_round_trip() {
    let lexicon = Lexicon::bnf();
    let json = lexicon_to_json(&lexicon).unwrap();
    let loaded = load_lexicon_json_bytes(json.as_bytes()).unwrap();
    assert_eq!(loaded, lexicon);

    let src = include_str!("../grammars/expr.bnf");
    assert_eq!(scan(&loaded, src).unwrap(), scan(&lexicon, src).unwrap());
}

#[test]
fn lexicon_json_file() {
    let path = std::env::temp_dir().join(format!("bnfront_lexicon_{}.json", std::process::id()));
    let lexicon = Lexicon::bnf();
    save_lexicon_json(&path, &lexicon).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(load_lexicon_json_bytes(&bytes).unwrap(), lexicon);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(load_lexicon_json_bytes(b"{\"tables\": 3}").is_err());
}
