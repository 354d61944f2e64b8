//! # Pitch-Class Arithmetic
//!
//! Twelve-tone chromatic bookkeeping shared by the catalog and the
//! fretboard locator. All note math happens on chromatic indices
//! (0 = C through 11 = B); spellings are resolved on the way in and
//! the canonical sharp spelling is produced on the way out.
//!
//! ## Features
//! - Fixed 12-tone chromatic ordering
//! - Enharmonic spelling resolution (flat keys use "Bb", "Eb", ...)
//! - Modular fret arithmetic for sounding-pitch lookup

use crate::TheoryError;

/// The fixed chromatic ordering every index in this crate refers to.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Resolves a pitch-class spelling to its chromatic index.
///
/// Accepts the canonical sharp spellings plus the enharmonic spellings
/// that appear in the catalog's flat keys ("Bb", "Eb", "Ab", "Db",
/// "Gb") and the theoretical spellings of F# major's scale ("E#").
///
/// # Arguments
/// * `name` - Pitch-class spelling (e.g. "C", "F#", "Bb")
///
/// # Returns
/// * `Ok(index)` - Chromatic index, 0 = C through 11 = B
/// * `Err(InvalidNote)` - Spelling outside the recognized set
pub fn chromatic_index(name: &str) -> Result<usize, TheoryError> {
    if let Some(index) = NOTE_NAMES.iter().position(|&n| n == name) {
        return Ok(index);
    }
    let index = match name {
        "Db" => 1,
        "Eb" => 3,
        "E#" => 5,
        "Gb" => 6,
        "Ab" => 8,
        "Bb" => 10,
        "Cb" => 11,
        "B#" => 0,
        _ => return Err(TheoryError::InvalidNote(name.to_string())),
    };
    Ok(index)
}

/// Sounding pitch class of a string stopped at `fret`.
///
/// Each fret raises the open pitch class by one semitone, so the
/// sounding note is `(chromatic_index(open) + fret) mod 12`. The
/// returned spelling is always the canonical sharp one.
///
/// # Arguments
/// * `open` - Open-string pitch class (e.g. "E")
/// * `fret` - Fret number, 0 = open string
///
/// # Returns
/// * `Ok(name)` - Canonical pitch-class name of the sounding note
/// * `Err(InvalidNote)` - `open` is not a recognized spelling
pub fn note_at(open: &str, fret: u8) -> Result<&'static str, TheoryError> {
    let open_index = chromatic_index(open)?;
    Ok(NOTE_NAMES[(open_index + fret as usize) % 12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_spellings_resolve_in_order() {
        for (i, name) in NOTE_NAMES.iter().enumerate() {
            assert_eq!(chromatic_index(name), Ok(i));
        }
    }

    #[test]
    fn enharmonic_spellings_match_their_sharp_equivalents() {
        for (flat, sharp) in [
            ("Db", "C#"),
            ("Eb", "D#"),
            ("Gb", "F#"),
            ("Ab", "G#"),
            ("Bb", "A#"),
            ("E#", "F"),
        ] {
            assert_eq!(chromatic_index(flat), chromatic_index(sharp));
        }
    }

    #[test]
    fn unknown_spelling_is_rejected() {
        assert_eq!(
            chromatic_index("H"),
            Err(TheoryError::InvalidNote("H".to_string()))
        );
        assert!(chromatic_index("").is_err());
    }

    #[test]
    fn fret_arithmetic_wraps_around_the_octave() {
        assert_eq!(note_at("E", 0), Ok("E"));
        assert_eq!(note_at("E", 5), Ok("A"));
        assert_eq!(note_at("B", 1), Ok("C"));
        assert_eq!(note_at("E", 12), Ok("E"));
        assert_eq!(note_at("Bb", 2), Ok("C"));
    }
}
