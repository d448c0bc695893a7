//! Generation settings store — the user-chosen parameters of the demo UI.
//!
//! A plain mutable record with field-level setters.  Nothing here talks to
//! the model: callers take an immutable [`SynthesisParams`] snapshot and hand
//! that to the gateway, so a settings change mid-request cannot affect a
//! generation already in flight.
//!
//! The streaming flag switches the input-length ceiling: short inputs
//! (≤ 500 chars) go through the single-shot path, long ones (≤ 5000 chars)
//! through the chunked streaming path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voices;

/// Input ceiling for the single-shot path.
pub const MAX_CHARS_SINGLE: usize = 500;
/// Input ceiling for the streaming path.
pub const MAX_CHARS_STREAMING: usize = 5_000;

/// Slider range for playback speed.
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_MAX: f32 = 2.0;

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Where the model runs.  Opaque to this crate — forwarded to whoever loads
/// the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Gpu,
    Cpu,
}

/// Model weight precision.  Opaque to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    Fp32,
    Fp16,
    Q8,
    Q4,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why a settings snapshot cannot be sent to the model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Input text is empty")]
    EmptyText,

    #[error("Input text is {len} characters; the limit is {limit} in this mode")]
    TextTooLong { len: usize, limit: usize },

    #[error("Unknown voice '{0}'")]
    UnknownVoice(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// GenerationSettings
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the two parameters the gateway contract actually takes.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub voice: String,
    pub speed: f32,
}

/// The settings store.  Fields are private: all mutation goes through the
/// setters, all reads through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    text: String,
    voice: String,
    device: Device,
    precision: Precision,
    speed: f32,
    streaming: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: voices::DEFAULT_VOICE.to_string(),
            device: Device::default(),
            precision: Precision::default(),
            speed: 1.0,
            streaming: false,
        }
    }
}

impl GenerationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn streaming(&self) -> bool {
        self.streaming
    }

    // ── Setters ──────────────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_voice(&mut self, voice: impl Into<String>) {
        self.voice = voice.into();
    }

    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.precision = precision;
    }

    /// Set playback speed, clamped to the slider range `[0.5, 2.0]`.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    }

    pub fn set_streaming(&mut self, streaming: bool) {
        self.streaming = streaming;
    }

    // ── Validation and snapshotting ──────────────────────────────────────────

    /// Character ceiling for the currently selected mode.
    pub fn char_limit(&self) -> usize {
        if self.streaming {
            MAX_CHARS_STREAMING
        } else {
            MAX_CHARS_SINGLE
        }
    }

    /// Check text and voice against the current mode.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.text.trim().is_empty() {
            return Err(SettingsError::EmptyText);
        }
        let len = self.text.chars().count();
        let limit = self.char_limit();
        if len > limit {
            return Err(SettingsError::TextTooLong { len, limit });
        }
        if !voices::is_known(&self.voice) {
            return Err(SettingsError::UnknownVoice(self.voice.clone()));
        }
        Ok(())
    }

    /// Immutable snapshot handed to the model gateway.
    pub fn synthesis_params(&self) -> SynthesisParams {
        SynthesisParams { voice: self.voice.clone(), speed: self.speed }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = GenerationSettings::new();
        assert_eq!(s.voice, voices::DEFAULT_VOICE);
        assert_eq!(s.speed, 1.0);
        assert_eq!(s.device, Device::Gpu);
        assert_eq!(s.precision, Precision::Fp32);
        assert!(!s.streaming);
    }

    #[test]
    fn test_speed_clamped() {
        let mut s = GenerationSettings::new();
        s.set_speed(3.0);
        assert_eq!(s.speed, SPEED_MAX);
        s.set_speed(0.1);
        assert_eq!(s.speed, SPEED_MIN);
        s.set_speed(1.25);
        assert_eq!(s.speed, 1.25);
    }

    #[test]
    fn test_validate_empty_text() {
        let mut s = GenerationSettings::new();
        s.set_text("   ");
        assert_eq!(s.validate(), Err(SettingsError::EmptyText));
    }

    #[test]
    fn test_single_shot_ceiling() {
        let mut s = GenerationSettings::new();
        s.set_text("a".repeat(MAX_CHARS_SINGLE));
        assert!(s.validate().is_ok());

        s.set_text("a".repeat(MAX_CHARS_SINGLE + 1));
        assert_eq!(
            s.validate(),
            Err(SettingsError::TextTooLong {
                len: MAX_CHARS_SINGLE + 1,
                limit: MAX_CHARS_SINGLE
            })
        );
    }

    #[test]
    fn test_streaming_raises_ceiling() {
        let mut s = GenerationSettings::new();
        s.set_text("a".repeat(MAX_CHARS_SINGLE + 1));
        s.set_streaming(true);
        assert!(s.validate().is_ok());

        s.set_text("a".repeat(MAX_CHARS_STREAMING + 1));
        assert!(matches!(s.validate(), Err(SettingsError::TextTooLong { .. })));
    }

    #[test]
    fn test_unknown_voice_rejected() {
        let mut s = GenerationSettings::new();
        s.set_text("hello");
        s.set_voice("zz_nobody");
        assert_eq!(s.validate(), Err(SettingsError::UnknownVoice("zz_nobody".into())));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut s = GenerationSettings::new();
        s.set_speed(1.5);
        let snap = s.synthesis_params();
        s.set_speed(0.5);
        s.set_voice("am_adam");
        assert_eq!(snap.voice, voices::DEFAULT_VOICE);
        assert_eq!(snap.speed, 1.5);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut s = GenerationSettings::new();
        s.set_text("Hello world");
        s.set_voice("bf_emma");
        s.set_device(Device::Cpu);
        s.set_precision(Precision::Q8);
        s.set_speed(1.7);
        s.set_streaming(true);

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"cpu\""), "got: {}", json);
        assert!(json.contains("\"q8\""), "got: {}", json);

        let back: GenerationSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
