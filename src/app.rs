//! Demo orchestration — settings → gateway → encoder → scheduler.
//!
//! [`TtsApp`] is the single owned state object behind the demo UI.  External
//! callers mutate it only through its methods (change a setting, request a
//! generation, issue a playback command) and read the current playback index
//! for display; the clip queue itself is owned by the scheduler.
//!
//! Two downstream paths, selected by the streaming flag:
//!
//! | Path        | Gateway call | Result                                    |
//! |-------------|--------------|-------------------------------------------|
//! | single-shot | `generate`   | one cached [`RenderedAudio`] (`<name>.wav`)|
//! | streaming   | `stream`     | clips appended to the scheduler, one per segment (`chunk-<i>.wav`) |
//!
//! Changing voice or speed discards the cached single-shot result, forcing a
//! regeneration before the next replay.  Model failures surface as a single
//! error with no automatic retry; a mid-stream failure aborts the remainder
//! but leaves the clips already produced playable.

use anyhow::{bail, Context, Result};

use crate::{
    gateway::ModelGateway,
    playback::{AudioClip, AudioSink, Scheduler},
    settings::{Device, GenerationSettings, Precision},
    wav,
};

/// Download filename for a streamed chunk.
pub fn chunk_file_name(index: usize) -> String {
    format!("chunk-{}.wav", index)
}

/// The cached single-shot result.
#[derive(Debug, Clone)]
pub struct RenderedAudio {
    pub file_name: String,
    pub pcm: wav::PcmBuffer,
    pub wav: Vec<u8>,
}

// ─────────────────────────────────────────────────────────────────────────────
// TtsApp
// ─────────────────────────────────────────────────────────────────────────────

pub struct TtsApp<G: ModelGateway, S: AudioSink> {
    settings: GenerationSettings,
    gateway: G,
    scheduler: Scheduler<S>,
    rendered: Option<RenderedAudio>,
}

impl<G: ModelGateway, S: AudioSink> TtsApp<G, S> {
    pub fn new(gateway: G, sink: S) -> Self {
        Self {
            settings: GenerationSettings::new(),
            gateway,
            scheduler: Scheduler::new(sink),
            rendered: None,
        }
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.settings.set_text(text);
    }

    /// Change voice.  Invalidates the cached single-shot result.
    pub fn set_voice(&mut self, voice: impl Into<String>) {
        self.settings.set_voice(voice);
        self.rendered = None;
    }

    /// Change speed.  Invalidates the cached single-shot result.
    pub fn set_speed(&mut self, speed: f32) {
        self.settings.set_speed(speed);
        self.rendered = None;
    }

    pub fn set_device(&mut self, device: Device) {
        self.settings.set_device(device);
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.settings.set_precision(precision);
    }

    pub fn set_streaming(&mut self, streaming: bool) {
        self.settings.set_streaming(streaming);
    }

    // ── Single-shot path ─────────────────────────────────────────────────────

    /// The cached single-shot result, if one exists and no invalidating
    /// setting changed since it was produced.
    pub fn rendered(&self) -> Option<&RenderedAudio> {
        self.rendered.as_ref()
    }

    /// Generate the whole input as one waveform and cache it as
    /// `<basename>.wav`.
    pub fn generate(&mut self, basename: &str) -> Result<&RenderedAudio> {
        if self.settings.streaming() {
            bail!("Streaming mode is enabled; use stream() instead");
        }
        self.settings.validate()?;

        let params = self.settings.synthesis_params();
        let pcm = self
            .gateway
            .generate(self.settings.text(), &params)
            .context("Speech generation failed")?;
        let bytes = wav::encode(&pcm)?;

        log::info!(
            "Generated {} samples ({:.2} s) as {}.wav",
            pcm.len(),
            pcm.duration_secs(),
            basename
        );

        Ok(self.rendered.insert(RenderedAudio {
            file_name: format!("{}.wav", basename),
            pcm,
            wav: bytes,
        }))
    }

    // ── Streaming path ───────────────────────────────────────────────────────

    /// Generate segment by segment, appending a clip to the scheduler as each
    /// waveform arrives.  Returns the number of clips produced.
    ///
    /// A per-segment failure aborts the remaining stream and is returned;
    /// clips appended before the failure stay in the queue and remain
    /// playable.
    pub fn stream(&mut self) -> Result<usize> {
        if !self.settings.streaming() {
            bail!("Streaming mode is disabled; use generate() instead");
        }
        self.settings.validate()?;

        // A new generation request supersedes the previous session's clips.
        self.scheduler.clear();

        let params = self.settings.synthesis_params();
        let segments = self.gateway.stream(self.settings.text(), &params);

        let mut produced = 0;
        for (id, item) in segments.enumerate() {
            let segment = item.with_context(|| {
                format!("Streaming synthesis failed at segment {}", id)
            })?;
            let bytes = wav::encode(&segment.pcm)?;
            log::debug!(
                "Chunk {}: {} samples for {:?}",
                id,
                segment.pcm.len(),
                segment.text
            );
            self.scheduler.append(AudioClip {
                id,
                source_text: segment.text,
                pcm: segment.pcm,
                wav: bytes,
            });
            produced += 1;
        }

        log::info!("Streamed {} chunks", produced);
        Ok(produced)
    }

    /// One combined WAV of all streamed clips: PCM payloads concatenated
    /// under a single corrected header.
    pub fn combined_wav(&self) -> Result<Vec<u8>> {
        wav::encode_concat(self.scheduler.clips().iter().map(|c| &c.pcm))
    }

    // ── Playback commands (forwarded to the scheduler) ───────────────────────

    pub fn play_all(&mut self) {
        self.scheduler.play_all();
    }

    pub fn play_clip(&mut self, id: usize) {
        self.scheduler.play_clip(id);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn on_clip_ended(&mut self, id: usize) {
        self.scheduler.on_clip_ended(id);
    }

    pub fn current_index(&self) -> Option<usize> {
        self.scheduler.current_index()
    }

    pub fn clips(&self) -> &[AudioClip] {
        self.scheduler.clips()
    }

    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    // ── Reset ────────────────────────────────────────────────────────────────

    /// Drop the cached result and release every clip.
    pub fn reset(&mut self) {
        self.rendered = None;
        self.scheduler.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
