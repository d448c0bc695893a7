//! Voice catalogue — the fixed set of Kokoro voices offered by the demo UI.
//!
//! Voice ids follow the Kokoro convention: a two-letter prefix encoding
//! language and gender (`af` = American female, `bm` = British male, …)
//! followed by a name.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Voice selected when the settings store is created.
pub const DEFAULT_VOICE: &str = "af_heart";

/// One entry of the voice dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
    /// BCP-47-ish tag: `en-us` or `en-gb`.
    pub language: &'static str,
}

/// All voices, in dropdown order.
pub static VOICES: &[Voice] = &[
    Voice { id: "af_heart", name: "Heart", language: "en-us" },
    Voice { id: "af_bella", name: "Bella", language: "en-us" },
    Voice { id: "af_nicole", name: "Nicole", language: "en-us" },
    Voice { id: "af_sky", name: "Sky", language: "en-us" },
    Voice { id: "am_adam", name: "Adam", language: "en-us" },
    Voice { id: "am_michael", name: "Michael", language: "en-us" },
    Voice { id: "bf_emma", name: "Emma", language: "en-gb" },
    Voice { id: "bm_george", name: "George", language: "en-gb" },
];

static BY_ID: Lazy<HashMap<&'static str, &'static Voice>> =
    Lazy::new(|| VOICES.iter().map(|v| (v.id, v)).collect());

/// All voices in dropdown order.
pub fn all() -> &'static [Voice] {
    VOICES
}

/// Look a voice up by id.
pub fn get(id: &str) -> Option<&'static Voice> {
    BY_ID.get(id).copied()
}

/// Whether `id` is one of the offered voices.
pub fn is_known(id: &str) -> bool {
    BY_ID.contains_key(id)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_voice_exists() {
        assert!(is_known(DEFAULT_VOICE));
        assert_eq!(get(DEFAULT_VOICE).unwrap().name, "Heart");
    }

    #[test]
    fn test_unknown_voice() {
        assert!(!is_known("zz_nobody"));
        assert!(get("zz_nobody").is_none());
    }

    #[test]
    fn test_ids_unique() {
        let mut seen = std::collections::HashSet::new();
        for v in all() {
            assert!(seen.insert(v.id), "duplicate id {}", v.id);
        }
    }
}
