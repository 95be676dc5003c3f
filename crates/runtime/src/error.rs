//! Unified error type surfaced by the runtime API.
//!
//! Wraps engine, map and log failures so the binary can bubble them up with
//! consistent context.
use thiserror::Error;

use tactics_core::{EngineError, Position};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),

    #[error("unknown map glyph {glyph:?} at {position}")]
    InvalidGlyph { glyph: char, position: Position },

    #[error("map rows differ in length (row {row} has {found} cells, expected {expected})")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{0} is outside the map")]
    OutOfBounds(Position),

    #[error("too many objects stacked on {0}")]
    ObjectStackFull(Position),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event log already exists: {0}")]
    LogAlreadyExists(String),
}
