//! # Music Theory Catalog
//!
//! The immutable tables the whole application reads from: the twelve
//! major keys of the circle of fifths and the six standard-tuning
//! guitar strings. The tables are process-wide and never mutated;
//! views hold references into them for their entire lifetime.
//!
//! ## Features
//! - 12 major keys with diatonic scales, triads, and ring angles
//! - Exact-name key lookup
//! - Related-key derivation (dominant, subdominant, relative minor)
//! - Standard-tuning open-string table

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::note::{self, NOTE_NAMES};
use crate::TheoryError;

/// One major key of the circle of fifths.
///
/// All fields are statically defined; the catalog owns the only
/// instances and hands out `&'static` references.
#[derive(Debug, PartialEq, Eq)]
pub struct Key {
    /// Display label (e.g. "C大调").
    pub name: &'static str,
    /// Pitch class of the tonic.
    pub root_note: &'static str,
    /// The diatonic scale, degree 1 through 7, index 0 = tonic.
    pub scale: [&'static str; 7],
    /// Diatonic triads aligned to the scale degrees.
    pub chords: [&'static str; 7],
    /// Signed accidental count: positive = sharps, negative = flats.
    pub accidentals: i8,
    /// Position on the ring, 0..=330 in 30-degree steps, ascending fifths.
    pub angle_degrees: u16,
}

impl Key {
    /// Number of sharps in the key signature.
    pub fn sharps(&self) -> u8 {
        self.accidentals.max(0) as u8
    }

    /// Number of flats in the key signature.
    pub fn flats(&self) -> u8 {
        (-self.accidentals).max(0) as u8
    }
}

/// One guitar string in standard tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuitarString {
    /// String number, 1 = highest pitch, 6 = lowest.
    pub string_number: u8,
    /// Pitch class of the open string.
    pub open_pitch_class: &'static str,
    /// Open-string pitch offset, used only for rendering (string gauge).
    pub baseline_offset: u8,
}

/// The twelve major keys, ordered by ascending `angle_degrees` so that
/// index + 1 (mod 12) is always a perfect fifth up. The related-key
/// arithmetic in [`related_keys`] depends on this ordering.
pub static CIRCLE_OF_FIFTHS: [Key; 12] = [
    Key {
        name: "C大调",
        root_note: "C",
        scale: ["C", "D", "E", "F", "G", "A", "B"],
        chords: ["C", "Dm", "Em", "F", "G", "Am", "Bdim"],
        accidentals: 0,
        angle_degrees: 0,
    },
    Key {
        name: "G大调",
        root_note: "G",
        scale: ["G", "A", "B", "C", "D", "E", "F#"],
        chords: ["G", "Am", "Bm", "C", "D", "Em", "F#dim"],
        accidentals: 1,
        angle_degrees: 30,
    },
    Key {
        name: "D大调",
        root_note: "D",
        scale: ["D", "E", "F#", "G", "A", "B", "C#"],
        chords: ["D", "Em", "F#m", "G", "A", "Bm", "C#dim"],
        accidentals: 2,
        angle_degrees: 60,
    },
    Key {
        name: "A大调",
        root_note: "A",
        scale: ["A", "B", "C#", "D", "E", "F#", "G#"],
        chords: ["A", "Bm", "C#m", "D", "E", "F#m", "G#dim"],
        accidentals: 3,
        angle_degrees: 90,
    },
    Key {
        name: "E大调",
        root_note: "E",
        scale: ["E", "F#", "G#", "A", "B", "C#", "D#"],
        chords: ["E", "F#m", "G#m", "A", "B", "C#m", "D#dim"],
        accidentals: 4,
        angle_degrees: 120,
    },
    Key {
        name: "B大调",
        root_note: "B",
        scale: ["B", "C#", "D#", "E", "F#", "G#", "A#"],
        chords: ["B", "C#m", "D#m", "E", "F#", "G#m", "A#dim"],
        accidentals: 5,
        angle_degrees: 150,
    },
    Key {
        name: "F#大调",
        root_note: "F#",
        scale: ["F#", "G#", "A#", "B", "C#", "D#", "E#"],
        chords: ["F#", "G#m", "A#m", "B", "C#", "D#m", "E#dim"],
        accidentals: 6,
        angle_degrees: 180,
    },
    Key {
        name: "Db大调",
        root_note: "Db",
        scale: ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"],
        chords: ["Db", "Ebm", "Fm", "Gb", "Ab", "Bbm", "Cdim"],
        accidentals: -5,
        angle_degrees: 210,
    },
    Key {
        name: "Ab大调",
        root_note: "Ab",
        scale: ["Ab", "Bb", "C", "Db", "Eb", "F", "G"],
        chords: ["Ab", "Bbm", "Cm", "Db", "Eb", "Fm", "Gdim"],
        accidentals: -4,
        angle_degrees: 240,
    },
    Key {
        name: "Eb大调",
        root_note: "Eb",
        scale: ["Eb", "F", "G", "Ab", "Bb", "C", "D"],
        chords: ["Eb", "Fm", "Gm", "Ab", "Bb", "Cm", "Ddim"],
        accidentals: -3,
        angle_degrees: 270,
    },
    Key {
        name: "Bb大调",
        root_note: "Bb",
        scale: ["Bb", "C", "D", "Eb", "F", "G", "A"],
        chords: ["Bb", "Cm", "Dm", "Eb", "F", "Gm", "Adim"],
        accidentals: -2,
        angle_degrees: 300,
    },
    Key {
        name: "F大调",
        root_note: "F",
        scale: ["F", "G", "A", "Bb", "C", "D", "E"],
        chords: ["F", "Gm", "Am", "Bb", "C", "Dm", "Edim"],
        accidentals: -1,
        angle_degrees: 330,
    },
];

/// The six standard-tuning strings, string 1 (high E) first.
pub static GUITAR_STRINGS: [GuitarString; 6] = [
    GuitarString { string_number: 1, open_pitch_class: "E", baseline_offset: 64 },
    GuitarString { string_number: 2, open_pitch_class: "B", baseline_offset: 59 },
    GuitarString { string_number: 3, open_pitch_class: "G", baseline_offset: 55 },
    GuitarString { string_number: 4, open_pitch_class: "D", baseline_offset: 50 },
    GuitarString { string_number: 5, open_pitch_class: "A", baseline_offset: 45 },
    GuitarString { string_number: 6, open_pitch_class: "E", baseline_offset: 40 },
];

/// Static map for quick key name to catalog index lookups.
static KEY_INDEX: Lazy<BTreeMap<&'static str, usize>> = Lazy::new(|| {
    CIRCLE_OF_FIFTHS
        .iter()
        .enumerate()
        .map(|(i, key)| (key.name, i))
        .collect()
});

/// The keys related to a selected one, derived from catalog position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedKeys {
    /// A perfect fifth up (tagged "V" in the UI).
    pub dominant: &'static Key,
    /// A perfect fifth down (tagged "IV" in the UI).
    pub subdominant: &'static Key,
    /// Pitch class of the relative minor. Name only: no minor-key
    /// scale or chord data exists in the catalog, and that
    /// simplification is intentional.
    pub relative_minor: &'static str,
}

/// Looks up a key by its exact display name.
///
/// # Arguments
/// * `name` - Display name (e.g. "G大调")
///
/// # Returns
/// * `Ok(&Key)` - The matching catalog entry
/// * `Err(NotFound)` - No entry with that exact name
pub fn get_key(name: &str) -> Result<&'static Key, TheoryError> {
    key_index(name)
        .map(|i| &CIRCLE_OF_FIFTHS[i])
        .ok_or_else(|| TheoryError::NotFound(name.to_string()))
}

/// Catalog index of a key name, if it exists.
pub fn key_index(name: &str) -> Option<usize> {
    KEY_INDEX.get(name).copied()
}

/// Display names of all twelve keys, in catalog order.
pub fn key_names() -> Vec<String> {
    CIRCLE_OF_FIFTHS.iter().map(|k| k.name.to_string()).collect()
}

/// Derives the keys related to `key` from its catalog position.
///
/// Dominant and subdominant are the neighbors on the fifths ring.
/// The relative minor is the pitch class three semitones below the
/// tonic, computed over the fixed chromatic ordering.
///
/// # Returns
/// * `Ok(RelatedKeys)` - Dominant, subdominant, and relative minor
/// * `Err(NotFound)` - `key` is not a catalog entry
pub fn related_keys(key: &Key) -> Result<RelatedKeys, TheoryError> {
    let index =
        key_index(key.name).ok_or_else(|| TheoryError::NotFound(key.name.to_string()))?;
    let tonic = note::chromatic_index(key.root_note)?;

    Ok(RelatedKeys {
        dominant: &CIRCLE_OF_FIFTHS[(index + 1) % 12],
        subdominant: &CIRCLE_OF_FIFTHS[(index + 11) % 12],
        relative_minor: NOTE_NAMES[(tonic + 9) % 12],
    })
}

/// The I - vi - IV - V practice progression for a key, as display text.
pub fn chord_progression(key: &Key) -> String {
    format!(
        "{} - {} - {} - {}",
        key.chords[0], key.chords[5], key.chords[3], key.chords[4]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_seven_scale_tones_and_seven_chords() {
        for key in &CIRCLE_OF_FIFTHS {
            assert_eq!(key.scale.len(), 7, "{}", key.name);
            assert_eq!(key.chords.len(), 7, "{}", key.name);
            assert_eq!(key.scale[0], key.root_note, "{}", key.name);
        }
    }

    #[test]
    fn accidental_counts_are_one_sided() {
        for key in &CIRCLE_OF_FIFTHS {
            let sharps = key.sharps();
            let flats = key.flats();
            if key.name == "C大调" {
                assert_eq!((sharps, flats), (0, 0));
            } else {
                assert!(
                    (sharps > 0) != (flats > 0),
                    "{} has {} sharps and {} flats",
                    key.name,
                    sharps,
                    flats
                );
            }
        }
    }

    #[test]
    fn angles_ascend_in_thirty_degree_steps() {
        for (i, key) in CIRCLE_OF_FIFTHS.iter().enumerate() {
            assert_eq!(key.angle_degrees as usize, i * 30);
        }
    }

    #[test]
    fn catalog_order_is_the_fifths_cycle() {
        // Each key's dominant root sits a perfect fifth (7 semitones) up.
        for i in 0..12 {
            let tonic = note::chromatic_index(CIRCLE_OF_FIFTHS[i].root_note).unwrap();
            let next =
                note::chromatic_index(CIRCLE_OF_FIFTHS[(i + 1) % 12].root_note).unwrap();
            assert_eq!((tonic + 7) % 12, next, "at index {i}");
        }
    }

    #[test]
    fn dominant_and_subdominant_are_inverse() {
        for key in &CIRCLE_OF_FIFTHS {
            let related = related_keys(key).unwrap();
            let back_down = related_keys(related.dominant).unwrap();
            assert_eq!(back_down.subdominant.name, key.name);
            let back_up = related_keys(related.subdominant).unwrap();
            assert_eq!(back_up.dominant.name, key.name);
        }
    }

    #[test]
    fn g_major_relations_match_theory() {
        let g = get_key("G大调").unwrap();
        let related = related_keys(g).unwrap();
        assert_eq!(related.dominant.name, "D大调");
        assert_eq!(related.subdominant.name, "C大调");
        assert_eq!(related.relative_minor, "E");
    }

    #[test]
    fn lookup_miss_is_not_found() {
        assert_eq!(
            get_key("H大调"),
            Err(TheoryError::NotFound("H大调".to_string()))
        );
        assert_eq!(get_key(""), Err(TheoryError::NotFound(String::new())));
    }

    #[test]
    fn progression_for_c_major() {
        let c = get_key("C大调").unwrap();
        assert_eq!(chord_progression(c), "C - Am - F - G");
    }
}
