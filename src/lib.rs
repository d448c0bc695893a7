//! # kokoro-demo
//!
//! The reducible core of a Kokoro text-to-speech demo: UI settings state,
//! WAV container encoding, and a sequential playback scheduler for streamed
//! clips.  The model itself — loading, phonemization, neural inference —
//! lives behind the [`ModelGateway`] trait and is never implemented here.
//!
//! ## Quick start
//!
//! ```
//! use kokoro_demo::{AudioClip, AudioSink, ModelGateway, PlaybackError, Segment,
//!                   SynthesisParams, PcmBuffer, TtsApp, SAMPLE_RATE};
//! use std::time::Duration;
//!
//! // A stand-in engine: one short tone per word.  A real integration wraps
//! // an actual TTS library here.
//! struct ToneGateway;
//!
//! impl ModelGateway for ToneGateway {
//!     fn generate(&self, text: &str, _params: &SynthesisParams) -> anyhow::Result<PcmBuffer> {
//!         Ok(PcmBuffer::new(vec![0.0; text.len() * 100], SAMPLE_RATE))
//!     }
//!
//!     fn stream<'a>(
//!         &'a self,
//!         text: &'a str,
//!         _params: &SynthesisParams,
//!     ) -> Box<dyn Iterator<Item = anyhow::Result<Segment>> + 'a> {
//!         Box::new(text.split_whitespace().map(|word| {
//!             Ok(Segment {
//!                 text: word.to_string(),
//!                 pcm: PcmBuffer::new(vec![0.0; word.len() * 100], SAMPLE_RATE),
//!             })
//!         }))
//!     }
//! }
//!
//! // A stand-in presentation layer.  A real one starts audio elements and
//! // reports their completion back to the scheduler.
//! struct NullSink;
//!
//! impl AudioSink for NullSink {
//!     fn start(&mut self, _clip: &AudioClip, _delay: Duration) -> Result<(), PlaybackError> {
//!         Ok(())
//!     }
//!     fn stop_all(&mut self) {}
//! }
//!
//! let mut app = TtsApp::new(ToneGateway, NullSink);
//! app.set_streaming(true);
//! app.set_text("Hello from the demo");
//! let chunks = app.stream()?;
//! assert_eq!(chunks, 4);
//! assert_eq!(app.current_index(), Some(0)); // first clip auto-started
//!
//! // Completion signals walk the chain; the queue plays back-to-back.
//! app.on_clip_ended(0);
//! assert_eq!(app.current_index(), Some(1));
//! # anyhow::Ok(())
//! ```
//!
//! ## Pipeline
//! 1. **Settings store** — voice, device, precision, speed, streaming flag;
//!    immutable snapshot per request.
//! 2. **Model gateway** — opaque engine producing PCM (whole-input or
//!    segment-by-segment).
//! 3. **WAV encoder** — PCM floats → minimal 44-byte-header 16-bit mono WAV.
//! 4. **Playback scheduler** — chains streamed clips gap-free, one playing at
//!    a time, with restart and stop.

pub mod app;
pub mod gateway;
pub mod playback;
pub mod settings;
pub mod voices;
pub mod wav;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use app::{chunk_file_name, RenderedAudio, TtsApp};
pub use gateway::{ModelGateway, Segment};
pub use playback::{AudioClip, AudioSink, PlaybackError, Scheduler, AUTOSTART_DELAY};
pub use settings::{Device, GenerationSettings, Precision, SettingsError, SynthesisParams};
pub use wav::{PcmBuffer, SAMPLE_RATE};
