use crate::SpeechError;
use crate::asr::SttEngine;
use crate::asr::features::{self, NUM_MEL_BINS};
use crate::asr::tokens::load_tokens;
use ndarray::{ArrayD, IxDyn};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::path::Path;

const SAMPLE_RATE: usize = 16000;

/// CTC acoustic model: log-mel features in, per-frame log-probabilities out,
/// greedily decoded against a token table (blank ID 0, SentencePiece `▁`
/// word boundaries).
pub struct CtcEngine {
    session: Session,
    tokens: Vec<String>,
    blank_id: usize,
    input_name: String,
    length_name: String,
    output_name: String,
}

impl CtcEngine {
    /// Load the acoustic model and its token table.
    pub fn new(
        model_path: impl AsRef<Path>,
        tokens_path: impl AsRef<Path>,
    ) -> Result<Self, SpeechError> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(model_path.as_ref())?;

        let tokens = load_tokens(tokens_path)?;

        Ok(Self {
            session,
            tokens,
            blank_id: 0,
            input_name: "x".to_string(),
            length_name: "x_lens".to_string(),
            output_name: "log_probs".to_string(),
        })
    }

    /// Override the model's tensor names.
    pub fn with_io_names(
        mut self,
        input: impl Into<String>,
        length: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.input_name = input.into();
        self.length_name = length.into();
        self.output_name = output.into();
        self
    }

    /// Override the blank token ID (default 0).
    pub fn with_blank_id(mut self, blank_id: usize) -> Self {
        self.blank_id = blank_id;
        self
    }
}

impl SttEngine for CtcEngine {
    fn transcribe(&mut self, pcm: &[i16]) -> Result<String, SpeechError> {
        let fbank = features::compute_fbank(pcm, SAMPLE_RATE)?;

        let x = ArrayD::from_shape_vec(IxDyn(&[1, fbank.frames, NUM_MEL_BINS]), fbank.data)
            .map_err(|e| SpeechError::Runtime(format!("failed to shape features: {}", e)))?;
        let x_lens = ArrayD::from_elem(IxDyn(&[1]), fbank.frames as i64);

        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => TensorRef::from_array_view(x.view())?,
            self.length_name.as_str() => TensorRef::from_array_view(x_lens.view())?,
        ])?;

        let log_probs = outputs[self.output_name.as_str()].try_extract_array::<f32>()?;
        let shape = log_probs.shape();
        if shape.len() != 3 {
            return Err(SpeechError::Model(format!(
                "expected [1, frames, vocab] log-probs, got {:?}",
                shape
            )));
        }
        let frames = shape[1];
        let vocab = shape[2];
        if vocab != self.tokens.len() {
            return Err(SpeechError::Model(format!(
                "model vocabulary {} does not match token table {}",
                vocab,
                self.tokens.len()
            )));
        }

        let data = log_probs.as_slice().ok_or_else(|| {
            SpeechError::Model("log-probs output is not contiguous".to_string())
        })?;

        let text = greedy_decode(data, frames, vocab, self.blank_id, &self.tokens);
        if text.is_empty() {
            return Err(SpeechError::NoMatch);
        }
        Ok(text)
    }
}

/// Greedy CTC decode: per-frame argmax, collapse repeats, drop blanks,
/// then turn SentencePiece `▁` markers into word boundaries.
pub(crate) fn greedy_decode(
    log_probs: &[f32],
    frames: usize,
    vocab: usize,
    blank_id: usize,
    tokens: &[String],
) -> String {
    let mut previous = None;
    let mut pieces = String::new();

    for t in 0..frames {
        let row = &log_probs[t * vocab..(t + 1) * vocab];
        let best = row
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(blank_id);

        if best != blank_id && previous != Some(best) {
            if let Some(token) = tokens.get(best) {
                pieces.push_str(token);
            }
        }
        previous = Some(best);
    }

    pieces
        .replace('▁', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<String> {
        ["<blk>", "▁he", "llo", "▁world", "!"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Build a log-prob matrix that argmaxes to the given ID sequence.
    fn probs_for(ids: &[usize], vocab: usize) -> Vec<f32> {
        let mut data = vec![-10.0f32; ids.len() * vocab];
        for (t, &id) in ids.iter().enumerate() {
            data[t * vocab + id] = 0.0;
        }
        data
    }

    #[test]
    fn test_greedy_decode_collapses_repeats() {
        let ids = [1, 1, 0, 2, 2, 2, 0, 0, 3];
        let data = probs_for(&ids, 5);
        let text = greedy_decode(&data, ids.len(), 5, 0, &tokens());
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_greedy_decode_blank_separates_repeats() {
        // the same token twice, separated by a blank, is emitted twice
        let ids = [2, 0, 2];
        let data = probs_for(&ids, 5);
        let text = greedy_decode(&data, ids.len(), 5, 0, &tokens());
        assert_eq!(text, "llollo");
    }

    #[test]
    fn test_greedy_decode_all_blank_is_empty() {
        let ids = [0, 0, 0, 0];
        let data = probs_for(&ids, 5);
        let text = greedy_decode(&data, ids.len(), 5, 0, &tokens());
        assert_eq!(text, "");
    }

    #[test]
    fn test_greedy_decode_leading_marker_trimmed() {
        let ids = [1];
        let data = probs_for(&ids, 5);
        let text = greedy_decode(&data, ids.len(), 5, 0, &tokens());
        assert_eq!(text, "he");
    }
}
