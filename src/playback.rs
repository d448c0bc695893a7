//! Sequential clip playback — plays streamed clips back-to-back.
//!
//! Streaming mode produces an ordered, growing list of independently encoded
//! clips.  The scheduler chains them so they play gap-free without per-clip
//! user action, while supporting restart-from-beginning, mid-sequence stop,
//! and a single authoritative "now playing" index for UI highlighting.
//!
//! ## State machine
//!
//! | State        | Meaning                                  |
//! |--------------|------------------------------------------|
//! | Idle         | `current_index() == None`                |
//! | Playing(i)   | clip `i` actively playing                |
//!
//! Transitions are driven by discrete events delivered as method calls, in
//! arrival order, on one logical owner: a clip append, a clip's completion
//! signal, or a user command.  Nothing here blocks or spawns.
//!
//! The queue and index live in one owned struct and completion events carry
//! the id of the clip that ended; the scheduler advances only when that id is
//! still the current one.  A completion signal from a superseded clip (after
//! a stop, a restart, or a manual jump) is simply ignored, so the list can
//! grow mid-playback without double-advance or skipped-clip bugs.
//!
//! Actual audio output sits behind [`AudioSink`]: the presentation layer
//! starts and stops elements, the scheduler decides which and when.

use std::time::Duration;

use thiserror::Error;

use crate::wav::PcmBuffer;

/// Delay before the very first clip of a session starts, giving the
/// presentation layer time to attach its audio element.
pub const AUTOSTART_DELAY: Duration = Duration::from_millis(100);

// ─────────────────────────────────────────────────────────────────────────────
// AudioClip
// ─────────────────────────────────────────────────────────────────────────────

/// One playable streamed chunk.  Immutable once created; `id` is the stream
/// ordinal and doubles as the queue position.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub id: usize,
    pub source_text: String,
    pub pcm: PcmBuffer,
    /// Encoded WAV bytes, ready for an audio element or a download link.
    pub wav: Vec<u8>,
}

// ─────────────────────────────────────────────────────────────────────────────
// AudioSink
// ─────────────────────────────────────────────────────────────────────────────

/// A clip failed to begin playback.
#[derive(Debug, Error)]
#[error("Clip {id} failed to start: {reason}")]
pub struct PlaybackError {
    pub id: usize,
    pub reason: String,
}

/// Presentation-layer seam: starts and stops actual audio output.
///
/// Implementations must deliver a completion signal back to
/// [`Scheduler::on_clip_ended`] when a started clip finishes on its own.
pub trait AudioSink {
    /// Begin playback of `clip` after `delay`.
    fn start(&mut self, clip: &AudioClip, delay: Duration) -> Result<(), PlaybackError>;

    /// Halt whatever is playing.  Must be safe to call when nothing is.
    fn stop_all(&mut self);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scheduler
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the clip queue, the current index, and the sink.
pub struct Scheduler<S: AudioSink> {
    clips: Vec<AudioClip>,
    current: Option<usize>,
    sink: S,
}

impl<S: AudioSink> Scheduler<S> {
    pub fn new(sink: S) -> Self {
        Self { clips: Vec::new(), current: None, sink }
    }

    // ── Read access ──────────────────────────────────────────────────────────

    /// The single authoritative "now playing" index (`None` = idle).
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn clips(&self) -> &[AudioClip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    /// Make `index` the current clip and ask the sink to start it.
    ///
    /// On failure the index is kept: the chain stalls there until a manual
    /// command resumes it.  The failure is logged, never propagated — a
    /// completion event has no caller to answer to.
    fn start_clip(&mut self, index: usize, delay: Duration) {
        self.current = Some(index);
        if let Err(err) = self.sink.start(&self.clips[index], delay) {
            log::warn!("Playback stalled at clip {}: {}", index, err);
        }
    }

    // ── Events and commands ──────────────────────────────────────────────────

    /// A new clip arrived from the stream.
    ///
    /// Only the 0→1 queue-length transition auto-starts playback (after
    /// [`AUTOSTART_DELAY`]); every later clip is reached through the
    /// completion chain, never through the append itself.
    pub fn append(&mut self, clip: AudioClip) {
        let was_empty = self.clips.is_empty();
        self.clips.push(clip);
        if was_empty {
            self.start_clip(0, AUTOSTART_DELAY);
        }
    }

    /// Completion signal for clip `id`.
    ///
    /// Ignored unless `id` is still the current clip — a signal from a clip
    /// that was stopped, restarted past, or manually superseded must not
    /// advance the chain.
    pub fn on_clip_ended(&mut self, id: usize) {
        if self.current != Some(id) {
            log::debug!("Ignoring stale completion signal from clip {}", id);
            return;
        }
        let next = id + 1;
        if next < self.clips.len() {
            self.start_clip(next, Duration::ZERO);
        } else {
            self.current = None;
        }
    }

    /// "Play all": force-stop everything and restart from clip 0.
    pub fn play_all(&mut self) {
        self.sink.stop_all();
        if self.clips.is_empty() {
            self.current = None;
        } else {
            self.start_clip(0, Duration::ZERO);
        }
    }

    /// Manual out-of-sequence start: adopt `id` as current so the chain
    /// continues from there.  Everything else is stopped first, preserving
    /// the single-playing invariant.  Unknown ids are ignored.
    pub fn play_clip(&mut self, id: usize) {
        if id >= self.clips.len() {
            log::debug!("Ignoring play command for unknown clip {}", id);
            return;
        }
        self.sink.stop_all();
        self.start_clip(id, Duration::ZERO);
    }

    /// Stop playback.  Idempotent; any completion signal still in flight is
    /// ignored afterwards, so a pending auto-advance cannot override it.
    pub fn stop(&mut self) {
        self.sink.stop_all();
        self.current = None;
    }

    /// Stop and release every clip (new generation request or app reset).
    pub fn clear(&mut self) {
        self.stop();
        self.clips.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
