// src/analysis/sets.rs
// FIRST and FOLLOW by fixpoint iteration. Sets only ever grow, so a pass
// that adds nothing ends the loop.

use std::{collections::BTreeSet, fmt};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::classify::Classification;

/// Spelling of the end marker, both as the key of its FIRST entry and as the
/// rendered `Lookahead::Eof`. Symbols are alphanumeric, so it never collides
/// with a grammar symbol (`EOF` is an ordinary one).
pub const END_MARKER: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lookahead {
    Eof,
    Epsilon,
    Terminal(String),
}

impl Lookahead {
    pub fn terminal(name: impl Into<String>) -> Self {
        Lookahead::Terminal(name.into())
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Eof => f.write_str(END_MARKER),
            Lookahead::Epsilon => f.write_str("EPSILON"),
            Lookahead::Terminal(name) => f.write_str(name),
        }
    }
}

impl Serialize for Lookahead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type LookaheadSet = BTreeSet<Lookahead>;
pub type SetTable = IndexMap<String, LookaheadSet>;

/// Returns whether `dst` grew.
fn union_into(dst: &mut LookaheadSet, src: &LookaheadSet) -> bool {
    let before = dst.len();
    dst.extend(src.iter().cloned());
    dst.len() != before
}

/// FIRST of a symbol string. EPSILON is included only if every symbol
/// can derive empty (in particular for the empty string).
pub fn first_of_sequence(first: &SetTable, seq: &[String]) -> LookaheadSet {
    let mut out = LookaheadSet::new();
    for sym in seq {
        let Some(set) = first.get(sym) else {
            return out;
        };
        out.extend(set.iter().filter(|la| **la != Lookahead::Epsilon).cloned());
        if !set.contains(&Lookahead::Epsilon) {
            return out;
        }
    }
    out.insert(Lookahead::Epsilon);
    out
}

/// Returns the FIRST table and the number of passes it took.
pub fn compute_first(c: &Classification) -> (SetTable, usize) {
    let mut first = SetTable::new();
    for t in &c.terminals {
        first.insert(t.clone(), LookaheadSet::from([Lookahead::terminal(t.as_str())]));
    }
    first.insert(END_MARKER.to_string(), LookaheadSet::from([Lookahead::Eof]));
    for nt in &c.nonterminals {
        first.insert(nt.clone(), LookaheadSet::new());
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for (lhs, alts) in &c.productions {
            let mut rhs = LookaheadSet::new();
            for alt in alts {
                rhs.extend(first_of_sequence(&first, alt));
            }
            if let Some(set) = first.get_mut(lhs) {
                changed |= union_into(set, &rhs);
            }
        }
        if !changed {
            break;
        }
    }
    log::debug!("[analysis] FIRST converged after {passes} passes");
    (first, passes)
}

/// Returns the FOLLOW table and the number of passes it took. `goal`
/// starts with the end marker.
pub fn compute_follow(c: &Classification, first: &SetTable, goal: Option<&str>) -> (SetTable, usize) {
    let mut follow = SetTable::new();
    for nt in &c.nonterminals {
        follow.insert(nt.clone(), LookaheadSet::new());
    }
    if let Some(set) = goal.and_then(|g| follow.get_mut(g)) {
        set.insert(Lookahead::Eof);
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for (lhs, alts) in &c.productions {
            for alt in alts {
                let mut trailer = follow.get(lhs).cloned().unwrap_or_default();
                for sym in alt.iter().rev() {
                    let sym_first = first.get(sym).cloned().unwrap_or_default();
                    if c.nonterminals.contains(sym) {
                        if let Some(set) = follow.get_mut(sym) {
                            changed |= union_into(set, &trailer);
                        }
                        if sym_first.contains(&Lookahead::Epsilon) {
                            trailer.extend(sym_first.into_iter().filter(|la| *la != Lookahead::Epsilon));
                        } else {
                            trailer = sym_first;
                        }
                    } else {
                        trailer = sym_first;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    log::debug!("[analysis] FOLLOW converged after {passes} passes");
    (follow, passes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_first_stops_at_non_nullable() {
        let mut first = SetTable::new();
        first.insert("A".into(), LookaheadSet::from([Lookahead::terminal("a"), Lookahead::Epsilon]));
        first.insert("b".into(), LookaheadSet::from([Lookahead::terminal("b")]));
        first.insert("c".into(), LookaheadSet::from([Lookahead::terminal("c")]));

        let seq = ["A".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(
            first_of_sequence(&first, &seq),
            LookaheadSet::from([Lookahead::terminal("a"), Lookahead::terminal("b")])
        );
        assert_eq!(first_of_sequence(&first, &[]), LookaheadSet::from([Lookahead::Epsilon]));
    }

    #[test]
    fn union_reports_growth() {
        let mut a = LookaheadSet::from([Lookahead::Eof]);
        assert!(!union_into(&mut a, &LookaheadSet::from([Lookahead::Eof])));
        assert!(union_into(&mut a, &LookaheadSet::from([Lookahead::Epsilon])));
    }
}
