//! The lexicon store boundary: JSON entry model, batch enrichment, file I/O.
//!
//! The engine owns exactly one field of an entry, `morphology`; everything
//! else round-trips untouched, including fields this crate knows nothing
//! about.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::analyzer::{Morphology, analyze};
use crate::rules::RuleTable;
use crate::validator::PosTag;

/// One lexicon entry. `word`, `meaning`, `source`, and `POS` are kept as raw
/// JSON values: the engine writes exactly one field, `morphology`, and
/// everything else must survive a load/save cycle byte-for-byte, including
/// tags and shapes this crate does not recognize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub word: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meaning: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub source: Value,
    #[serde(rename = "POS", default, skip_serializing_if = "Value::is_null")]
    pub pos: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morphology: Option<Morphology>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    pub fn new(word: &str, meaning: &str) -> Self {
        Self {
            word: Value::String(word.to_string()),
            meaning: Value::String(meaning.to_string()),
            source: Value::Null,
            pos: Value::Null,
            morphology: None,
            extra: Map::new(),
        }
    }

    /// The word-form, if this entry has a usable one.
    pub fn word_str(&self) -> Option<&str> {
        self.word.as_str().filter(|w| !w.is_empty())
    }

    pub fn meaning_str(&self) -> Option<&str> {
        self.meaning.as_str()
    }

    /// The POS tag parsed into the closed set, without touching the stored
    /// value. Unrecognized strings come back as [`PosTag::Unknown`]; missing
    /// or non-string values as `None`.
    pub fn pos_tag(&self) -> Option<PosTag> {
        self.pos
            .as_str()
            .and_then(|_| serde_json::from_value(self.pos.clone()).ok())
    }
}

/// Load a lexicon from a JSON array on disk.
pub fn load(path: &Path) -> crate::Result<Vec<Entry>> {
    let data = fs::read_to_string(path)?;
    let entries: Vec<Entry> = serde_json::from_str(&data)?;
    info!(count = entries.len(), path = %path.display(), "loaded lexicon");
    Ok(entries)
}

/// Write a lexicon back to disk as pretty-printed JSON.
pub fn save(path: &Path, entries: &[Entry]) -> crate::Result<()> {
    let data = serde_json::to_string_pretty(entries)?;
    fs::write(path, data)?;
    info!(count = entries.len(), path = %path.display(), "saved lexicon");
    Ok(())
}

fn enrich_entry(entry: &mut Entry, table: &RuleTable) {
    if let Some(word) = entry.word_str() {
        let morphology = analyze(word, table);
        entry.morphology = Some(morphology);
    } else {
        debug!(word = %entry.word, "skipping entry without a usable word");
    }
}

/// Analyze every entry in place, sequentially.
pub fn enrich(entries: &mut [Entry], table: &RuleTable) {
    for entry in entries.iter_mut() {
        enrich_entry(entry, table);
    }
}

/// Analyze every entry in place via a parallel map. Analyses are independent
/// and the slice keeps its original order, so results land exactly where the
/// sequential pass would put them.
pub fn enrich_parallel(entries: &mut [Entry], table: &RuleTable) {
    entries
        .par_iter_mut()
        .for_each(|entry| enrich_entry(entry, table));
}
