// src/main.rs
// bnfront <grammar-file> [--tokens] [--tree] [--json]

use std::{env, fs, time::Instant};

use anyhow::{Context, Result, bail};
use bnfront::{
    Lexicon,
    analysis::{Analysis, Ll1Table, LookaheadSet, analyze},
    lexer::{Token, scan},
    parser::{Node, parse},
};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'a [Token]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a Node>,
    analysis: &'a Analysis,
    ll1: &'a Ll1Table,
}

fn fmt_set(set: &LookaheadSet) -> String {
    let items: Vec<String> = set.iter().map(ToString::to_string).collect();
    format!("{{{}}}", items.join(", "))
}

fn print_declarations(a: &Analysis, table: &Ll1Table) {
    println!("goal: {}", a.goal.as_deref().unwrap_or("-"));
    println!("NT: {}", a.nonterminals.iter().cloned().collect::<Vec<_>>().join(" "));
    println!("T:  {}", a.terminals.iter().cloned().collect::<Vec<_>>().join(" "));

    println!("\nproductions:");
    for (lhs, alts) in &a.productions {
        for (i, alt) in alts.iter().enumerate() {
            let rhs = if alt.is_empty() {
                "EPSILON".to_string()
            } else {
                alt.join(" ")
            };
            println!("  [{i}] {lhs} -> {rhs}");
        }
    }

    println!("\nFIRST:");
    for nt in &a.nonterminals {
        if let Some(set) = a.first(nt) {
            println!("  {nt:<16} {}", fmt_set(set));
        }
    }
    println!("\nFOLLOW:");
    for nt in &a.nonterminals {
        if let Some(set) = a.follow(nt) {
            println!("  {nt:<16} {}", fmt_set(set));
        }
    }

    println!("\nLL(1) table:");
    for (nt, row) in &table.entries {
        for (la, alt) in row {
            println!("  M[{nt}, {la}] = {alt}");
        }
    }
    for c in &table.conflicts {
        println!(
            "  conflict: {} on {} between {:?}",
            c.nonterminal, c.lookahead, c.alternatives
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut path = None;
    let (mut show_tokens, mut show_tree, mut json) = (false, false, false);
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--tokens" => show_tokens = true,
            "--tree" => show_tree = true,
            "--json" => json = true,
            _ if path.is_none() => path = Some(arg),
            _ => bail!("unexpected argument {arg:?}"),
        }
    }
    let Some(path) = path else {
        bail!("usage: bnfront <grammar-file> [--tokens] [--tree] [--json]");
    };

    let src = fs::read_to_string(&path).with_context(|| format!("failed to read grammar at {path}"))?;

    let t0 = Instant::now();
    let lexicon = Lexicon::bnf();
    let tokens = scan(&lexicon, &src)?;
    let tree = parse(&tokens)?;
    let analysis = analyze(&tree);
    let table = analysis.ll1_table();
    log::info!("{path}: {} tokens, analysed in {:?}", tokens.len(), t0.elapsed());

    if json {
        let report = Report {
            tokens: show_tokens.then_some(tokens.as_slice()),
            tree: show_tree.then_some(&tree),
            analysis: &analysis,
            ll1: &table,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if show_tokens {
        println!("TOKENS:");
        for t in &tokens {
            println!("  {:>4}  {:<12} {:?}", t.line, t.kind.name(), t.value);
        }
        println!();
    }
    if show_tree {
        println!("TREE:");
        print!("{}", tree.dump());
        println!();
    }
    print_declarations(&analysis, &table);
    Ok(())
}
