//! Model gateway — the seam behind which the TTS engine lives.
//!
//! Everything hard (model loading, phonemization, neural inference, waveform
//! synthesis) happens on the other side of this trait.  The demo core only
//! needs two call shapes:
//!
//! | Call       | Returns                                             |
//! |------------|-----------------------------------------------------|
//! | `generate` | one complete waveform                               |
//! | `stream`   | a pull-driven sequence of (text segment, waveform)  |
//!
//! The streaming sequence is finite once the input text is exhausted and is
//! consumed strictly in order; the consumer decides the pull rate, so
//! production is naturally decoupled from playback.  A mid-stream error ends
//! the sequence — callers keep whatever segments arrived before it.

use anyhow::Result;

use crate::{settings::SynthesisParams, wav::PcmBuffer};

/// One unit of streamed output: the text segment the model spoke and its
/// waveform.
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub pcm: PcmBuffer,
}

/// External TTS capability.  Implementations wrap a real engine; tests and
/// the demo use scripted stand-ins.
pub trait ModelGateway {
    /// Synthesise the whole input as a single waveform.
    fn generate(&self, text: &str, params: &SynthesisParams) -> Result<PcmBuffer>;

    /// Synthesise the input segment by segment, pull-driven.
    ///
    /// Yields segments in speech order.  The first `Err` ends the stream.
    fn stream<'a>(
        &'a self,
        text: &'a str,
        params: &SynthesisParams,
    ) -> Box<dyn Iterator<Item = Result<Segment>> + 'a>;
}
