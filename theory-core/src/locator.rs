//! # Pitch-Class Locator
//!
//! Maps a pitch class to every place it can be played within the
//! first twelve frets. Pure modular arithmetic over the chromatic
//! indices; no state, no randomness, the same inputs always produce
//! the same sequence.

use crate::catalog::GuitarString;
use crate::note;
use crate::TheoryError;

/// Highest fret the locator searches, inclusive.
pub const MAX_FRET: u8 = 12;

/// One playable position of a pitch class. Derived and ephemeral:
/// recomputed per render pass, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FretPosition {
    /// String number, 1 = highest pitch.
    pub string_number: u8,
    /// Fret number, 0 = open string.
    pub fret: u8,
    /// Canonical spelling of the located pitch class.
    pub pitch_class: &'static str,
}

/// Finds every (string, fret) position sounding `pitch_class`.
///
/// The output follows the string table's order, and within a string,
/// ascending fret. A string sounds the target at fret `f` exactly
/// when `(chromatic_index(open) + f) mod 12` equals the target's
/// chromatic index.
///
/// # Arguments
/// * `pitch_class` - Target pitch class, sharp or flat spelling
/// * `strings` - The string table to search
/// * `max_fret` - Highest fret to test, inclusive (normally [`MAX_FRET`])
///
/// # Returns
/// * `Ok(positions)` - All matches, in stable order
/// * `Err(InvalidNote)` - `pitch_class` is not a recognized spelling
pub fn locate(
    pitch_class: &str,
    strings: &[GuitarString],
    max_fret: u8,
) -> Result<Vec<FretPosition>, TheoryError> {
    let target = note::chromatic_index(pitch_class)?;
    let canonical = note::NOTE_NAMES[target];
    let mut positions = Vec::new();

    for string in strings {
        let open = note::chromatic_index(string.open_pitch_class)?;
        for fret in 0..=max_fret {
            if (open + fret as usize) % 12 == target {
                positions.push(FretPosition {
                    string_number: string.string_number,
                    fret,
                    pitch_class: canonical,
                });
            }
        }
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GUITAR_STRINGS;

    #[test]
    fn e_positions_on_standard_tuning() {
        let positions = locate("E", &GUITAR_STRINGS, MAX_FRET).unwrap();
        let cells: Vec<(u8, u8)> =
            positions.iter().map(|p| (p.string_number, p.fret)).collect();
        assert_eq!(
            cells,
            vec![(1, 0), (1, 12), (2, 5), (3, 9), (4, 2), (5, 7), (6, 0), (6, 12)]
        );
        assert!(positions.iter().all(|p| p.pitch_class == "E"));
    }

    #[test]
    fn every_fretted_note_locates_its_own_cell() {
        for string in &GUITAR_STRINGS {
            for fret in 0..=MAX_FRET {
                let sounding = note::note_at(string.open_pitch_class, fret).unwrap();
                let positions = locate(sounding, &GUITAR_STRINGS, MAX_FRET).unwrap();
                assert!(
                    positions
                        .iter()
                        .any(|p| p.string_number == string.string_number && p.fret == fret),
                    "{sounding} missing ({}, {fret})",
                    string.string_number
                );
            }
        }
    }

    #[test]
    fn output_is_order_stable() {
        let first = locate("A", &GUITAR_STRINGS, MAX_FRET).unwrap();
        let second = locate("A", &GUITAR_STRINGS, MAX_FRET).unwrap();
        assert_eq!(first, second);
        // String-table order, ascending frets within a string.
        for pair in first.windows(2) {
            assert!(
                pair[0].string_number < pair[1].string_number
                    || (pair[0].string_number == pair[1].string_number
                        && pair[0].fret < pair[1].fret)
            );
        }
    }

    #[test]
    fn flat_spellings_locate_like_their_sharp_equivalents() {
        let flat = locate("Bb", &GUITAR_STRINGS, MAX_FRET).unwrap();
        let sharp = locate("A#", &GUITAR_STRINGS, MAX_FRET).unwrap();
        assert_eq!(flat, sharp);
    }

    #[test]
    fn unknown_pitch_class_is_invalid() {
        assert_eq!(
            locate("X", &GUITAR_STRINGS, MAX_FRET),
            Err(TheoryError::InvalidNote("X".to_string()))
        );
    }

    #[test]
    fn max_fret_bounds_the_search() {
        let positions = locate("E", &GUITAR_STRINGS, 4).unwrap();
        assert!(positions.iter().all(|p| p.fret <= 4));
        assert_eq!(
            positions
                .iter()
                .map(|p| (p.string_number, p.fret))
                .collect::<Vec<_>>(),
            vec![(1, 0), (4, 2), (6, 0)]
        );
    }
}
