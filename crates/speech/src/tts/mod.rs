//! Text-to-speech: synthesis engine trait, Kokoro backend, and the blocking
//! speaker.

pub mod kokoro;
pub mod phonemize;
pub mod voice;

pub use kokoro::KokoroTts;

use crate::SpeechError;
use crate::audio_out::{AudioOut, AudioOutConfig};

/// A synthesis engine: text in, PCM out.
pub trait TtsEngine {
    fn synthesize(&mut self, text: &str) -> Result<Vec<i16>, SpeechError>;

    /// Sample rate of the synthesized PCM.
    fn sample_rate(&self) -> usize;
}

/// Speak text out loud, blocking until playback completes.
pub trait Speak {
    fn say(&mut self, text: &str) -> Result<(), SpeechError>;
}

/// A `TtsEngine` wired to audio output.
///
/// Voice and speaking rate are fixed when the engine is constructed; `say`
/// synthesizes and plays to completion, so back-to-back calls are serialized.
pub struct Speaker<E: TtsEngine> {
    engine: E,
    audio_out: AudioOut,
}

impl<E: TtsEngine> Speaker<E> {
    pub fn new(engine: E) -> Self {
        let audio_out = AudioOut::open(AudioOutConfig {
            device_name: None,
            sample_rate: engine.sample_rate(),
        });
        Self { engine, audio_out }
    }
}

impl<E: TtsEngine> Speak for Speaker<E> {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        let samples = self.engine.synthesize(text)?;
        self.audio_out.play(&samples)
    }
}
