use std::io;

use thiserror::Error;

/// Errors surfaced by the lexicon boundary and rule-table construction.
///
/// A word with no applicable rule is never an error: the analyzer returns an
/// empty process list instead.
#[derive(Error, Debug)]
pub enum PanlexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed rule table detected at construction time.
    #[error("rule table error: {0}")]
    RuleTable(String),
}

pub type Result<T> = std::result::Result<T, PanlexError>;
