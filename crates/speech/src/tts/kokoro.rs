use crate::SpeechError;
use crate::tts::TtsEngine;
use crate::tts::phonemize::{espeak_init, phonemize};
use crate::tts::voice::{load_voice_style, style_slice, tokenize, vocab};
use ndarray::{ArrayD, IxDyn};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::collections::HashMap;
use std::path::Path;

const SAMPLE_RATE: usize = 24000;

/// Kokoro ONNX text-to-speech.
///
/// Text is phonemized with espeak-ng, mapped to token IDs, and synthesized
/// with a per-utterance style vector from the NPY voice file. Output is
/// 24kHz mono s16 PCM.
pub struct KokoroTts {
    session: Session,
    vocab: HashMap<char, i64>,
    style: Vec<f32>,
    speed: f32,
}

impl KokoroTts {
    /// Load the model and a voice.
    ///
    /// `espeak_data_path` points to the espeak-ng data directory (None for
    /// the system default).
    pub fn new(
        model_path: impl AsRef<Path>,
        voice_path: impl AsRef<Path>,
        espeak_data_path: Option<&str>,
    ) -> Result<Self, SpeechError> {
        espeak_init(espeak_data_path).map_err(SpeechError::Runtime)?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(model_path.as_ref())?;

        let style = load_voice_style(voice_path)?;

        Ok(Self {
            session,
            vocab: vocab(),
            style,
            speed: 1.0,
        })
    }

    /// Set the speaking rate (1.0 is the model's native pace).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

impl TtsEngine for KokoroTts {
    fn synthesize(&mut self, text: &str) -> Result<Vec<i16>, SpeechError> {
        let phonemes = phonemize(text).map_err(SpeechError::Runtime)?;

        // Token sequence padded with the pad token on both ends
        let mut token_ids = tokenize(&phonemes, &self.vocab);
        token_ids.insert(0, 0);
        token_ids.push(0);

        let token_count = token_ids.len();
        let style_row = style_slice(&self.style, token_count).to_vec();

        let tokens = ArrayD::from_shape_vec(IxDyn(&[1, token_count]), token_ids)
            .map_err(|e| SpeechError::Runtime(format!("failed to shape tokens: {}", e)))?;
        let style_len = style_row.len();
        let style = ArrayD::from_shape_vec(IxDyn(&[1, style_len]), style_row)
            .map_err(|e| SpeechError::Runtime(format!("failed to shape style: {}", e)))?;
        let speed = ArrayD::from_elem(IxDyn(&[1]), self.speed);

        let outputs = self.session.run(ort::inputs![
            "tokens" => TensorRef::from_array_view(tokens.view())?,
            "style" => TensorRef::from_array_view(style.view())?,
            "speed" => TensorRef::from_array_view(speed.view())?,
        ])?;

        let audio = outputs["audio"].try_extract_array::<f32>()?;

        Ok(audio
            .iter()
            .map(|&sample| (sample * 32768.0).clamp(-32768.0, 32767.0) as i16)
            .collect())
    }

    fn sample_rate(&self) -> usize {
        SAMPLE_RATE
    }
}
