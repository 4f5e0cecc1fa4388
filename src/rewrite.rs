//! Velocity rewriting over located `"notes"` sequences.

use serde_json::Value;

use crate::error::{NormalizeError, Result, json_type_name};
use crate::locate::KeyValues;

/// Key whose values hold sequences of note objects.
pub const NOTES_KEY: &str = "notes";
/// Field rewritten on every note.
pub const VELOCITY_KEY: &str = "velocity";
/// MIDI velocity ceiling; the divisor for normalization.
pub const MIDI_VELOCITY_MAX: f64 = 127.0;

/// Counters reported after a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// `"notes"` sequences visited.
    pub sequences: usize,
    /// Note objects whose velocity was rewritten.
    pub notes: usize,
}

/// Replaces a note's `"velocity"` with `velocity / 127.0` and returns the
/// new value.
///
/// Integer and float inputs are both accepted; the field always comes back as
/// a JSON float. No clamping: out-of-range inputs map proportionally outside
/// [0.0, 1.0]. A missing or non-numeric field is fatal.
pub fn rewrite_note(note: &mut Value) -> Result<f64> {
    let object = match note {
        Value::Object(map) => map,
        other => {
            return Err(NormalizeError::NoteShape {
                found: json_type_name(other),
            });
        }
    };
    let raw = match object.get(VELOCITY_KEY) {
        Some(value) => value.as_f64().ok_or_else(|| NormalizeError::Velocity {
            reason: format!("expected a number, found {}", json_type_name(value)),
        })?,
        None => {
            return Err(NormalizeError::Velocity {
                reason: "missing \"velocity\" field".into(),
            });
        }
    };
    let scaled = raw / MIDI_VELOCITY_MAX;
    object.insert(VELOCITY_KEY.to_owned(), Value::from(scaled));
    Ok(scaled)
}

/// Walks the whole document and rewrites every note under every `"notes"`
/// key. Each located value must be an array; each element must be a note
/// object with a numeric velocity. The first violation aborts the traversal.
///
/// Not idempotent: a second pass divides by 127.0 again, treating the
/// already-normalized floats as if they were still on the MIDI scale.
pub fn normalize_tree(doc: &mut Value) -> Result<NormalizeStats> {
    let mut stats = NormalizeStats::default();
    for notes in KeyValues::new(doc, NOTES_KEY) {
        let items = match notes {
            Value::Array(items) => items,
            other => {
                return Err(NormalizeError::NotesShape {
                    found: json_type_name(other),
                });
            }
        };
        for note in items {
            let velocity = rewrite_note(note)?;
            stats.notes += 1;
            tracing::debug!(velocity, "rewrote note velocity");
        }
        stats.sequences += 1;
    }
    tracing::debug!(
        sequences = stats.sequences,
        notes = stats.notes,
        "normalized document"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scales_every_midi_velocity() {
        for v in 0..=127_i64 {
            let mut note = json!({"velocity": v});
            let scaled = rewrite_note(&mut note).unwrap();
            assert_eq!(scaled, v as f64 / 127.0);
            // The field's type becomes floating-point, even for 0.
            assert!(note["velocity"].is_f64());
            assert_eq!(note["velocity"].as_f64().unwrap(), scaled);
        }
    }

    #[test]
    fn out_of_range_inputs_are_not_clamped() {
        let mut note = json!({"velocity": 254});
        assert_eq!(rewrite_note(&mut note).unwrap(), 2.0);
        let mut note = json!({"velocity": -127});
        assert_eq!(rewrite_note(&mut note).unwrap(), -1.0);
    }

    #[test]
    fn float_inputs_are_accepted() {
        let mut note = json!({"velocity": 63.5});
        assert_eq!(rewrite_note(&mut note).unwrap(), 63.5 / 127.0);
    }

    #[test]
    fn missing_velocity_is_fatal() {
        let mut note = json!({"number": 36});
        assert!(matches!(
            rewrite_note(&mut note),
            Err(NormalizeError::Velocity { .. })
        ));
    }

    #[test]
    fn non_numeric_velocity_is_fatal() {
        let mut note = json!({"velocity": "loud"});
        assert!(matches!(
            rewrite_note(&mut note),
            Err(NormalizeError::Velocity { .. })
        ));
    }

    #[test]
    fn non_object_note_is_fatal() {
        let mut note = json!(64);
        assert!(matches!(
            rewrite_note(&mut note),
            Err(NormalizeError::NoteShape { found: "a number" })
        ));
    }

    #[test]
    fn normalizes_notes_at_every_depth() {
        let mut doc = json!({
            "notes": [{"velocity": 127}],
            "tracks": [{"clips": [{"notes": [{"velocity": 64}, {"velocity": 0}]}]}]
        });
        let stats = normalize_tree(&mut doc).unwrap();
        assert_eq!(stats.sequences, 2);
        assert_eq!(stats.notes, 3);
        assert_eq!(doc["notes"][0]["velocity"], json!(1.0));
        assert_eq!(
            doc["tracks"][0]["clips"][0]["notes"][0]["velocity"],
            json!(64.0 / 127.0)
        );
        assert_eq!(doc["tracks"][0]["clips"][0]["notes"][1]["velocity"], json!(0.0));
    }

    #[test]
    fn document_without_notes_is_untouched() {
        let mut doc = json!({"name": "Rock beat", "bpm": 120.5, "parts": []});
        let before = doc.clone();
        let stats = normalize_tree(&mut doc).unwrap();
        assert_eq!(stats, NormalizeStats::default());
        assert_eq!(doc, before);
    }

    #[test]
    fn non_array_notes_value_is_fatal() {
        let mut doc = json!({"notes": {"velocity": 64}});
        assert!(matches!(
            normalize_tree(&mut doc),
            Err(NormalizeError::NotesShape { found: "an object" })
        ));
    }

    #[test]
    fn second_pass_divides_again() {
        // Intentional: the transform is not idempotent.
        let mut doc = json!({"notes": [{"velocity": 127}]});
        normalize_tree(&mut doc).unwrap();
        normalize_tree(&mut doc).unwrap();
        assert_eq!(doc["notes"][0]["velocity"], json!(1.0 / 127.0));
    }
}
