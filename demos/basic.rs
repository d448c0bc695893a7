//! Basic kokoro-demo example — drives the demo core with a built-in tone
//! engine (no model, no network) and writes the resulting WAV files.
//!
//! Usage:
//!   cargo run --example basic
//!   cargo run --example basic -- --text "Hello from Rust!" --speed 1.2
//!   cargo run --example basic -- --stream --text "One sentence per chunk."
//!
//! In `--stream` mode every whitespace-separated word becomes one chunk;
//! the example walks the playback chain with simulated completion events and
//! writes `chunk-<i>.wav` files plus a combined `combined.wav`.

use std::time::Duration;

use kokoro_demo::{
    chunk_file_name, AudioClip, AudioSink, ModelGateway, PcmBuffer, PlaybackError, Segment,
    SynthesisParams, TtsApp, SAMPLE_RATE,
};

// ─────────────────────────────────────────────────────────────────────────────
// Tone gateway — a deterministic stand-in for a real TTS engine
// ─────────────────────────────────────────────────────────────────────────────

/// Synthesises each word as a short sine tone whose pitch depends on the
/// word; `speed` shortens or lengthens the tone like it would real speech.
struct ToneGateway;

impl ToneGateway {
    fn tone_for(word: &str, speed: f32) -> PcmBuffer {
        let base_ms = 120.0 + 20.0 * word.len() as f32;
        let n = ((base_ms / 1000.0) * SAMPLE_RATE as f32 / speed) as usize;
        let pitch = 220.0 + 20.0 * (word.len() % 8) as f32;
        let samples = (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                0.3 * (2.0 * std::f32::consts::PI * pitch * t).sin()
            })
            .collect();
        PcmBuffer::new(samples, SAMPLE_RATE)
    }
}

impl ModelGateway for ToneGateway {
    fn generate(&self, text: &str, params: &SynthesisParams) -> anyhow::Result<PcmBuffer> {
        let mut samples = Vec::new();
        for word in text.split_whitespace() {
            samples.extend(Self::tone_for(word, params.speed).samples);
        }
        Ok(PcmBuffer::new(samples, SAMPLE_RATE))
    }

    fn stream<'a>(
        &'a self,
        text: &'a str,
        params: &SynthesisParams,
    ) -> Box<dyn Iterator<Item = anyhow::Result<Segment>> + 'a> {
        let speed = params.speed;
        Box::new(text.split_whitespace().map(move |word| {
            Ok(Segment {
                text: word.to_string(),
                pcm: Self::tone_for(word, speed),
            })
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Console sink — prints what a browser audio element would do
// ─────────────────────────────────────────────────────────────────────────────

struct ConsoleSink;

impl AudioSink for ConsoleSink {
    fn start(&mut self, clip: &AudioClip, delay: Duration) -> Result<(), PlaybackError> {
        println!(
            "  ▶ clip {} ({:?}, {:.2} s, delay {} ms)",
            clip.id,
            clip.source_text,
            clip.pcm.duration_secs(),
            delay.as_millis()
        );
        Ok(())
    }

    fn stop_all(&mut self) {
        println!("  ■ stop all");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // ── Parse simple CLI arguments ───────────────────────────────────────────
    let mut args = std::env::args().skip(1);

    let mut voice = "af_heart".to_string();
    let mut text = "This lightweight demo core works without a model.".to_string();
    let mut output = "output".to_string();
    let mut speed = 1.0f32;
    let mut stream = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--voice"  => { if let Some(v) = args.next() { voice  = v; } }
            "--text"   => { if let Some(v) = args.next() { text   = v; } }
            "--output" => { if let Some(v) = args.next() { output = v; } }
            "--speed"  => { if let Some(v) = args.next() { speed  = v.parse().unwrap_or(1.0); } }
            "--stream" => { stream = true; }
            "--help"   => {
                println!(
                    "Usage: basic [--voice ID] [--text TEXT] [--output BASENAME] \
                     [--speed FLOAT] [--stream]"
                );
                return Ok(());
            }
            _ => {}
        }
    }

    println!("Voice  : {}", voice);
    println!("Text   : {:?}", text);
    println!("Speed  : {}", speed);
    println!("Mode   : {}", if stream { "streaming" } else { "single-shot" });
    println!();

    let available: Vec<&str> = kokoro_demo::voices::all().iter().map(|v| v.id).collect();
    println!("Available voices: {:?}", available);
    println!();

    let mut app = TtsApp::new(ToneGateway, ConsoleSink);
    app.set_voice(voice);
    app.set_speed(speed);
    app.set_streaming(stream);
    app.set_text(text);

    if stream {
        // ── Streaming path ───────────────────────────────────────────────────
        println!("Streaming…");
        let produced = app.stream()?;

        for clip in app.clips() {
            let name = chunk_file_name(clip.id);
            std::fs::write(&name, &clip.wav)?;
            println!("Saved {} ({} samples)", name, clip.pcm.len());
        }

        let combined = app.combined_wav()?;
        std::fs::write("combined.wav", &combined)?;
        println!("Saved combined.wav ({} bytes)", combined.len());

        // Walk the chain with simulated completion events.
        println!("\nPlayback chain:");
        for id in 0..produced {
            app.on_clip_ended(id);
        }
        assert_eq!(app.current_index(), None);
        println!("Chain complete.");
    } else {
        // ── Single-shot path ─────────────────────────────────────────────────
        println!("Synthesising…");
        let rendered = app.generate(&output)?;
        std::fs::write(&rendered.file_name, &rendered.wav)?;
        println!(
            "Saved {} ({} samples, {:.2} s)",
            rendered.file_name,
            rendered.pcm.len(),
            rendered.pcm.duration_secs()
        );
    }

    println!("Done!");
    Ok(())
}
