//! Speech input and output for the gesty demo.
//!
//! Input: PulseAudio capture, Silero-VAD utterance endpointing and a CTC
//! acoustic model behind the `SttEngine` trait, wired together by the
//! blocking one-shot `Recognizer`.
//!
//! Output: text-to-speech behind the `TtsEngine` trait (Kokoro ONNX backend)
//! played through PulseAudio by `Speaker`, which blocks until playback
//! completes.

pub mod asr;
pub mod audio_in;
pub mod audio_out;
pub mod error;
pub mod tts;
pub mod vad;

pub use asr::{CtcEngine, ListenEvent, Recognize, Recognizer, SttEngine};
pub use audio_in::{AudioIn, AudioInConfig};
pub use audio_out::{AudioOut, AudioOutConfig};
pub use error::SpeechError;
pub use tts::{KokoroTts, Speak, Speaker, TtsEngine};
pub use vad::{EndpointConfig, Endpointer, SileroVad, Verdict};
