// src/bin/fuzz_scan.rs
// Generate random-but-valid grammars and push them through the whole pipeline.
// Checks per case:
//   - scanning succeeds and ends with exactly one EOF token
//   - rejoining the lexemes with single spaces rescans to the same tokens
//   - parsing succeeds and the tree leaves reproduce the token stream
//   - a second analysis of the same tree gives identical sets
//
// Env:
//   - FUZZ_SEED=<u64>   first seed (default 42)
//   - FUZZ_ITERS=<n>    number of cases (default 200)
//   - FUZZ_LEN=<n>      production sets per grammar (default 12)
//   - FUZZ_SAVE=1       save failing cases under FUZZ_DIR (default "fuzz-cases")

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use bnfront::{
    Lexicon, TokenKind, analysis::analyze, dev::generator::gen_valid_grammar, lexer::scan,
    parser::parse,
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn save_case(seed: u64, src: &str) {
    if env::var("FUZZ_SAVE").ok().as_deref() != Some("1") {
        return;
    }
    let dir = PathBuf::from(env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".into()));
    match write_case(&dir, seed, src) {
        Ok(path) => eprintln!("[fuzz] saved {}", path.display()),
        Err(e) => eprintln!("[fuzz] warning: {e:#}"),
    }
}

fn write_case(dir: &Path, seed: u64, src: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("case_seed{seed}.bnf"));
    fs::write(&path, src).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn check_case(lexicon: &Lexicon, src: &str) -> Result<()> {
    let tokens = scan(lexicon, src).context("scan")?;
    let n_eof = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    if n_eof != 1 || tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
        bail!("expected exactly one trailing EOF, got {n_eof}");
    }

    let rejoined = tokens
        .iter()
        .map(|t| t.value.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let again = scan(lexicon, &rejoined).context("rescan")?;
    let pairs = |ts: &[bnfront::Token]| {
        ts.iter()
            .map(|t| (t.kind, t.value.clone()))
            .collect::<Vec<_>>()
    };
    if pairs(&tokens) != pairs(&again) {
        bail!("rescan of rejoined lexemes diverged");
    }

    let tree = parse(&tokens).context("parse")?;
    let leaves = tree.leaves().map(|n| n.label.as_str()).collect::<Vec<_>>();
    let values = tokens.iter().map(|t| t.value.as_str()).collect::<Vec<_>>();
    if leaves != values {
        bail!("tree leaves do not match the token stream");
    }

    let a = analyze(&tree);
    let b = analyze(&tree);
    if a.first != b.first || a.follow != b.follow {
        bail!("analysis is not deterministic");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let seed0 = env_u64("FUZZ_SEED", 42);
    let iters = env_u64("FUZZ_ITERS", 200);
    let len = env_u64("FUZZ_LEN", 12) as usize;

    let lexicon = Lexicon::bnf();
    let mut failures = 0usize;
    for i in 0..iters {
        let seed = seed0.wrapping_add(i);
        let mut rng = StdRng::seed_from_u64(seed);
        let src = gen_valid_grammar(&mut rng, len);
        if let Err(e) = check_case(&lexicon, &src) {
            failures += 1;
            eprintln!("[fuzz] seed={seed} FAILED: {e:#}");
            save_case(seed, &src);
        }
    }

    println!("[fuzz] {iters} cases, {failures} failures");
    if failures > 0 {
        bail!("{failures} fuzz case(s) failed");
    }
    Ok(())
}
