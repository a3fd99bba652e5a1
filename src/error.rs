//! Crate error type
//!
//! Shot computation is total and never fails; these errors only come from
//! the edges (parsing names, decoding server messages, loading settings).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown difficulty '{0}' (expected easy, medium, medium-hard, hard or expert)")]
    UnknownDifficulty(String),

    #[error("invalid player number {0} (expected 1 or 2)")]
    InvalidPlayerNumber(u8),

    #[error("no cue ball on the table")]
    MissingCueBall,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
