// src/dev/generator.rs
// Random-but-valid grammar sources for fuzzing and property tests.

use rand::Rng;

const BLANKS: &[&str] = &[" ", "  ", "\t", "\n", "\r\n", " \n\t"];
const EPSILON_SPELLINGS: &[&str] = &["EPSILON", "epsilon", "Epsilon", "ePsIlOn"];

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Separator between two tokens; `required` forces at least one blank.
fn sep<R: Rng>(rng: &mut R, out: &mut String, required: bool) {
    if required || rng.random_bool(0.5) {
        out.push_str(pick(rng, BLANKS));
    }
}

fn symbol<R: Rng>(rng: &mut R, n_sets: usize) -> String {
    if rng.random_bool(0.4) {
        format!("N{}", rng.random_range(0..n_sets))
    } else {
        format!("t{}", rng.random_range(0..n_sets + 3))
    }
}

/// `n_sets` production sets named N0..N{n_sets-1}; right-hand sides draw from
/// those names, terminals `t*`, and the EPSILON keyword.
pub fn gen_valid_grammar<R: Rng>(rng: &mut R, n_sets: usize) -> String {
    let n_sets = n_sets.max(1);
    let mut out = String::new();
    for i in 0..n_sets {
        sep(rng, &mut out, false);
        out.push_str(&format!("N{i}"));
        sep(rng, &mut out, false);
        out.push(':');
        let n_alts = rng.random_range(1..=3);
        for a in 0..n_alts {
            if a > 0 {
                sep(rng, &mut out, false);
                out.push('|');
            }
            sep(rng, &mut out, false);
            if rng.random_bool(0.15) {
                out.push_str(pick(rng, EPSILON_SPELLINGS));
            } else {
                let len = rng.random_range(1..=4);
                for s in 0..len {
                    if s > 0 {
                        sep(rng, &mut out, true);
                    }
                    out.push_str(&symbol(rng, n_sets));
                }
            }
        }
        sep(rng, &mut out, false);
        out.push(';');
    }
    sep(rng, &mut out, false);
    out
}
