// theory-core/src/lib.rs

//! The core logic for the Guitar Master learning tool.
//! This crate owns the circle-of-fifths catalog, pitch-class
//! arithmetic, and the fretboard locator. It is completely headless
//! and contains no GUI code.

pub mod catalog;
pub mod locator;
pub mod note;
pub mod settings;

use std::fmt;

/// Error taxonomy for the theory engine.
///
/// No variant is fatal. A catalog miss or an out-of-range touch
/// degrades to a no-op at the call site; an invalid pitch class is
/// surfaced as an informational message at most.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// A key name did not exactly match any catalog entry.
    NotFound(String),
    /// A pitch-class spelling outside the recognized 12-tone set.
    InvalidNote(String),
    /// A fret/string coordinate outside the playable grid.
    OutOfRange,
}

impl fmt::Display for TheoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TheoryError::NotFound(name) => {
                write!(f, "no key named '{name}' in the catalog")
            }
            TheoryError::InvalidNote(name) => {
                write!(f, "'{name}' is not a recognized pitch class")
            }
            TheoryError::OutOfRange => {
                write!(f, "position is outside the fretboard grid")
            }
        }
    }
}

impl std::error::Error for TheoryError {}
