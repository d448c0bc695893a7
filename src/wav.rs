//! WAV container encoding — PCM float samples → playable bytes.
//!
//! The model gateway produces mono `f32` samples in `[-1.0, 1.0]`; the
//! presentation layer wants a downloadable/playable byte buffer.  This module
//! bridges the two with a minimal RIFF/WAVE container: a 44-byte header
//! followed by 16-bit little-endian signed PCM, mono, no compression.
//!
//! 16-bit integer PCM is used rather than IEEE-float WAV because every
//! consumer decodes it, including platforms whose media stacks accept a
//! float-WAV header but render silence.
//!
//! Encoding is deterministic: the same samples always yield the same bytes,
//! and the output length is exactly `44 + 2 × sample_count` — including the
//! zero-sample case, which still produces a valid empty-data-chunk header.

use std::io::Cursor;

use anyhow::{bail, Context, Result};

/// Default audio sample rate of the Kokoro model (Hz).
pub const SAMPLE_RATE: u32 = 24_000;

// ─────────────────────────────────────────────────────────────────────────────
// PcmBuffer
// ─────────────────────────────────────────────────────────────────────────────

/// One mono waveform as produced by the model gateway.
///
/// Immutable after creation; per request in single-shot mode, per chunk in
/// streaming mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl PcmBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quantization
// ─────────────────────────────────────────────────────────────────────────────

/// Convert one float sample to 16-bit PCM.
///
/// The sample is clamped to `[-1.0, 1.0]`, then scaled asymmetrically:
/// negative values by 32768, non-negative by 32767.  The asymmetry keeps
/// `+1.0` from overflowing `i16::MAX` while still reaching `i16::MIN` at
/// `-1.0`.
pub fn quantize_sample(s: f32) -> i16 {
    let s = s.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0).round() as i16
    } else {
        (s * 32767.0).round() as i16
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

fn spec_for(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode one PCM buffer as a complete WAV byte sequence.
///
/// Total size is `44 + 2 × pcm.len()` bytes.  Encoding a well-formed buffer
/// cannot fail in practice — the `Result` only propagates the writer API.
pub fn encode(pcm: &PcmBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + 2 * pcm.len()));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec_for(pcm.sample_rate))
            .context("Failed to start WAV writer")?;
        for &s in &pcm.samples {
            writer.write_sample(quantize_sample(s)).context("WAV write error")?;
        }
        writer.finalize().context("WAV finalise error")?;
    }
    Ok(cursor.into_inner())
}

/// Encode several PCM buffers as one combined WAV file.
///
/// The payloads are concatenated under a single header whose size fields
/// reflect the summed data length.  This is NOT the same as concatenating
/// the per-chunk WAV files byte-for-byte — that would interleave N headers
/// into the data stream and is not a valid container.
///
/// All buffers must share the same sample rate; an empty input is an error.
pub fn encode_concat<'a>(buffers: impl IntoIterator<Item = &'a PcmBuffer>) -> Result<Vec<u8>> {
    let buffers: Vec<&PcmBuffer> = buffers.into_iter().collect();
    let first = match buffers.first() {
        Some(b) => *b,
        None => bail!("Nothing to combine: no PCM buffers"),
    };
    if let Some(b) = buffers.iter().find(|b| b.sample_rate != first.sample_rate) {
        bail!(
            "Sample rate mismatch: {} Hz vs {} Hz — refusing to combine",
            first.sample_rate,
            b.sample_rate
        );
    }

    let total: usize = buffers.iter().map(|b| b.len()).sum();
    let mut cursor = Cursor::new(Vec::with_capacity(44 + 2 * total));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec_for(first.sample_rate))
            .context("Failed to start WAV writer")?;
        for buffer in &buffers {
            for &s in &buffer.samples {
                writer.write_sample(quantize_sample(s)).context("WAV write error")?;
            }
        }
        writer.finalize().context("WAV finalise error")?;
    }
    Ok(cursor.into_inner())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: &[u8]) -> (hound::WavSpec, Vec<i16>) {
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        (spec, samples)
    }

    /// Deterministic pseudo-random floats in [-1, 1] (xorshift).
    fn noise(n: usize) -> Vec<f32> {
        let mut state = 0x9e3779b9u32;
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn test_quantize_extremes() {
        assert_eq!(quantize_sample(-1.0), i16::MIN);
        assert_eq!(quantize_sample(1.0), i16::MAX);
        assert_eq!(quantize_sample(0.0), 0);
        assert_eq!(quantize_sample(0.5), 16384); // round(0.5 * 32767)
        assert_eq!(quantize_sample(-0.5), -16384); // round(-0.5 * 32768)
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        assert_eq!(quantize_sample(2.0), i16::MAX);
        assert_eq!(quantize_sample(-2.0), i16::MIN);
        assert_eq!(quantize_sample(f32::INFINITY), i16::MAX);
        assert_eq!(quantize_sample(f32::NEG_INFINITY), i16::MIN);
    }

    #[test]
    fn test_output_length_invariant() {
        for n in [0usize, 1, 2, 441, 24_000] {
            let pcm = PcmBuffer::new(vec![0.0; n], SAMPLE_RATE);
            let bytes = encode(&pcm).unwrap();
            assert_eq!(bytes.len(), 44 + 2 * n, "n = {}", n);
        }
    }

    #[test]
    fn test_header_layout() {
        let pcm = PcmBuffer::new(vec![0.25; 100], 22_050);
        let bytes = encode(&pcm).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        let riff_size = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        assert_eq!(riff_size as usize, bytes.len() - 8);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1); // PCM
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 1); // mono
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 22_050);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 22_050 * 2);
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 2); // block align
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 200);
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let pcm = PcmBuffer::new(Vec::new(), SAMPLE_RATE);
        let bytes = encode(&pcm).unwrap();
        assert_eq!(bytes.len(), 44);
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 0);

        let (spec, samples) = decode(&bytes);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let cases: Vec<Vec<f32>> = vec![
            vec![0.0; 64],
            vec![1.0; 64],
            vec![-1.0; 64],
            noise(1_000),
        ];
        for samples in cases {
            let pcm = PcmBuffer::new(samples.clone(), SAMPLE_RATE);
            let bytes = encode(&pcm).unwrap();
            let (spec, decoded) = decode(&bytes);

            assert_eq!(spec.channels, 1);
            assert_eq!(spec.sample_rate, SAMPLE_RATE);
            assert_eq!(spec.bits_per_sample, 16);
            assert_eq!(decoded.len(), samples.len());
            for (i, (&f, &q)) in samples.iter().zip(&decoded).enumerate() {
                assert_eq!(q, quantize_sample(f), "sample {} (input {})", i, f);
            }
        }
    }

    #[test]
    fn test_concat_sums_data_length() {
        let parts = vec![
            PcmBuffer::new(noise(100), SAMPLE_RATE),
            PcmBuffer::new(noise(250), SAMPLE_RATE),
            PcmBuffer::new(vec![0.5; 50], SAMPLE_RATE),
        ];
        let bytes = encode_concat(&parts).unwrap();
        assert_eq!(bytes.len(), 44 + 2 * 400);
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 800);

        let (_, decoded) = decode(&bytes);
        let expected: Vec<i16> = parts
            .iter()
            .flat_map(|p| p.samples.iter().map(|&s| quantize_sample(s)))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_concat_rejects_rate_mismatch() {
        let parts = vec![
            PcmBuffer::new(vec![0.0; 10], 24_000),
            PcmBuffer::new(vec![0.0; 10], 16_000),
        ];
        assert!(encode_concat(&parts).is_err());
    }

    #[test]
    fn test_concat_rejects_empty_input() {
        assert!(encode_concat(std::iter::empty::<&PcmBuffer>()).is_err());
    }

    #[test]
    fn test_duration() {
        let pcm = PcmBuffer::new(vec![0.0; 12_000], 24_000);
        assert!((pcm.duration_secs() - 0.5).abs() < 1e-6);
    }
}
