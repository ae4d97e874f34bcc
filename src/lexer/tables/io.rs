// src/lexer/tables/io.rs
use std::{
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{CompiledTable, Lexicon, dfa::StateId, tokens::TokenKind};

// -------------------- JSON (de)serialization --------------------

#[derive(Serialize, Deserialize)]
struct LexiconDisk {
    tables: Vec<TableDisk>,
}

#[derive(Serialize, Deserialize)]
struct TableDisk {
    kind: TokenKind,
    char_to_class: Vec<(char, u32)>,
    transitions: Vec<(u32, StateId, StateId)>,
    token_of: Vec<(StateId, TokenKind)>,
    accepting: Vec<StateId>,
    legal: Vec<StateId>,
    n_classes: u32,
}

// Sorted so the file is byte-stable across runs.
impl From<&CompiledTable> for TableDisk {
    fn from(t: &CompiledTable) -> Self {
        let mut char_to_class: Vec<_> = t.char_to_class.iter().map(|(&c, &k)| (c, k)).collect();
        char_to_class.sort_unstable();
        let mut transitions: Vec<_> = t
            .transitions
            .iter()
            .map(|(&(class, from), &to)| (class, from, to))
            .collect();
        transitions.sort_unstable();
        let mut token_of: Vec<_> = t.token_of.iter().map(|(&s, &k)| (s, k)).collect();
        token_of.sort_unstable();
        let mut accepting: Vec<_> = t.accepting.iter().copied().collect();
        accepting.sort_unstable();
        let mut legal: Vec<_> = t.legal.iter().copied().collect();
        legal.sort_unstable();
        Self {
            kind: t.kind,
            char_to_class,
            transitions,
            token_of,
            accepting,
            legal,
            n_classes: t.n_classes,
        }
    }
}

impl TableDisk {
    fn into_table(self) -> CompiledTable {
        CompiledTable {
            kind: self.kind,
            char_to_class: self.char_to_class.into_iter().collect(),
            transitions: self
                .transitions
                .into_iter()
                .map(|(class, from, to)| ((class, from), to))
                .collect(),
            token_of: self.token_of.into_iter().collect(),
            accepting: self.accepting.into_iter().collect(),
            legal: self.legal.into_iter().collect(),
            n_classes: self.n_classes,
        }
    }
}

pub fn lexicon_to_json(lexicon: &Lexicon) -> Result<String> {
    let disk = LexiconDisk {
        tables: lexicon.tables().iter().map(TableDisk::from).collect(),
    };
    serde_json::to_string_pretty(&disk).context("serialize lexicon")
}

pub fn save_lexicon_json(path: &Path, lexicon: &Lexicon) -> Result<()> {
    let f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    w.write_all(lexicon_to_json(lexicon)?.as_bytes())?;
    w.flush()?;
    log::debug!("[tables] wrote {}", path.display());
    Ok(())
}

pub fn load_lexicon_json_bytes(data: &[u8]) -> Result<Lexicon> {
    let disk: LexiconDisk =
        serde_json::from_slice(data).context("lexicon tables JSON is malformed")?;
    Ok(Lexicon::from_tables(
        disk.tables.into_iter().map(TableDisk::into_table).collect(),
    ))
}
