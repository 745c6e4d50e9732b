//! Jump, hit and point sound cues
//!
//! The output device is opened once. Each cue is decoded from its file once
//! and buffered for replay. No device, no file, or a bad file all end up as
//! silence (or a synthesized tone with `--synth-cues`), never as an error.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::cpal::SampleRate;
use rodio::source::{Buffered, SineWave, chirp};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::{HIT_FILES, JUMP_FILES, POINT_FILES, find_first};

const SYNTH_RATE: SampleRate = SampleRate(44_100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Hit,
    Point,
}

impl Cue {
    fn files(self) -> &'static [&'static str] {
        match self {
            Cue::Jump => JUMP_FILES,
            Cue::Hit => HIT_FILES,
            Cue::Point => POINT_FILES,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Cue::Jump => "jump sound",
            Cue::Hit => "hit sound",
            Cue::Point => "point sound",
        }
    }
}

type Clip = Buffered<Decoder<BufReader<File>>>;

/// What plays for one cue
enum Voice {
    Silent,
    Clip(Clip),
    Synth,
}

impl Voice {
    fn is_silent(&self) -> bool {
        matches!(self, Voice::Silent)
    }
}

pub struct SoundBoard {
    // The stream must outlive every sink created from the handle
    output: Option<(OutputStream, OutputStreamHandle)>,
    jump: Voice,
    hit: Voice,
    point: Voice,
}

impl SoundBoard {
    /// A board that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            jump: Voice::Silent,
            hit: Voice::Silent,
            point: Voice::Silent,
        }
    }

    /// Open the default device and resolve cue files under `dir`.
    pub fn open(dir: &Path, synth_fallback: bool) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("no audio output, playing without sound: {err}");
                return Self::silent();
            }
        };
        let load = |cue| load_voice(dir, cue, synth_fallback);
        Self {
            jump: load(Cue::Jump),
            hit: load(Cue::Hit),
            point: load(Cue::Point),
            output: Some(output),
        }
    }

    /// True when at least one cue can make a sound
    #[cfg(test)]
    fn is_audible(&self) -> bool {
        self.output.is_some()
            && !(self.jump.is_silent() && self.hit.is_silent() && self.point.is_silent())
    }

    pub fn play(&self, cue: Cue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let voice = match cue {
            Cue::Jump => &self.jump,
            Cue::Hit => &self.hit,
            Cue::Point => &self.point,
        };
        if voice.is_silent() {
            return;
        }
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::debug!("could not play {}: {err}", cue.label());
                return;
            }
        };
        match voice {
            Voice::Clip(clip) => sink.append(clip.clone()),
            Voice::Synth => append_synth(&sink, cue),
            Voice::Silent => {}
        }
        sink.detach(); // Play in background
    }
}

fn load_voice(dir: &Path, cue: Cue, synth_fallback: bool) -> Voice {
    let fallback = || if synth_fallback { Voice::Synth } else { Voice::Silent };
    let Some(path) = find_first(dir, cue.files()) else {
        log::debug!("no {} file in {}", cue.label(), dir.display());
        return fallback();
    };
    let decoded = File::open(&path)
        .map_err(|e| e.to_string())
        .and_then(|f| Decoder::new(BufReader::new(f)).map_err(|e| e.to_string()));
    match decoded {
        Ok(decoder) => {
            log::info!("{} loaded: {}", cue.label(), path.display());
            Voice::Clip(decoder.buffered())
        }
        Err(err) => {
            log::warn!("failed to load {} from {}: {err}", cue.label(), path.display());
            fallback()
        }
    }
}

/// Short procedural tones for cues with no file
fn append_synth(sink: &Sink, cue: Cue) {
    match cue {
        Cue::Jump => sink.append(
            chirp(SYNTH_RATE, 320.0, 760.0, Duration::from_millis(110))
                .take_duration(Duration::from_millis(110))
                .amplify(0.15)
                .fade_out(Duration::from_millis(110)),
        ),
        Cue::Point => sink.append(
            SineWave::new(988.0)
                .take_duration(Duration::from_millis(90))
                .amplify(0.12)
                .fade_in(Duration::from_millis(5)),
        ),
        Cue::Hit => sink.append(
            FallingSaw::new(SYNTH_RATE.0, 400.0, 80.0, Duration::from_millis(400))
                .take_duration(Duration::from_millis(500))
                .linear_gain_ramp(Duration::from_millis(500), 0.15, 0.0, true),
        ),
    }
}

/// Sawtooth whose pitch slides linearly from `from` to `to` over `sweep`,
/// then holds. Never ends on its own.
#[derive(Debug, Clone)]
struct FallingSaw {
    rate: u32,
    from: f32,
    to: f32,
    sweep_samples: u64,
    elapsed: u64,
    phase: f32,
}

impl FallingSaw {
    fn new(rate: u32, from: f32, to: f32, sweep: Duration) -> Self {
        Self {
            rate,
            from,
            to,
            sweep_samples: ((sweep.as_secs_f64() * rate as f64) as u64).max(1),
            elapsed: 0,
            phase: 0.0,
        }
    }

    fn frequency(&self) -> f32 {
        let t = (self.elapsed as f32 / self.sweep_samples as f32).min(1.0);
        self.from + (self.to - self.from) * t
    }
}

impl Iterator for FallingSaw {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.phase * 2.0 - 1.0;
        self.phase = (self.phase + self.frequency() / self.rate as f32).fract();
        self.elapsed += 1;
        Some(sample)
    }
}

impl Source for FallingSaw {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
