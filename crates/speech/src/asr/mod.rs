//! Speech-to-text: features, token table, CTC engine and the one-shot
//! recognizer.

pub mod ctc;
pub mod features;
pub mod recognizer;
pub mod tokens;

pub use ctc::CtcEngine;
pub use recognizer::{ListenEvent, Recognize, Recognizer};

use crate::SpeechError;

/// A transcription engine: PCM in, text out.
pub trait SttEngine {
    /// Transcribe 16kHz mono s16 audio.
    ///
    /// Returns `SpeechError::NoMatch` when the audio cannot be matched to
    /// any text.
    fn transcribe(&mut self, pcm: &[i16]) -> Result<String, SpeechError>;
}
