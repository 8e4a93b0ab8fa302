use crate::SpeechError;
use ndarray::{ArrayD, IxDyn};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::path::Path;

/// Samples per VAD frame (32ms at 16kHz).
pub const VAD_FRAME_SIZE: usize = 512;

const SAMPLE_RATE: i64 = 16000;
const CONTEXT_SIZE: usize = 64;

/// Silero VAD v5 session.
///
/// Feed 512-sample frames of f32 audio normalized to [-1, 1]; each call
/// returns the speech probability for that frame. The model is stateful
/// across calls until `reset`.
pub struct SileroVad {
    session: Session,
    state: ArrayD<f32>,
    context: Vec<f32>,
    sample_rate: ArrayD<i64>,
}

impl SileroVad {
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, SpeechError> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_file(model_path.as_ref())?;

        Ok(Self {
            session,
            state: ArrayD::zeros(IxDyn(&[2, 1, 128])),
            context: vec![0.0; CONTEXT_SIZE],
            sample_rate: ArrayD::from_elem(IxDyn(&[1]), SAMPLE_RATE),
        })
    }

    /// Process one frame and return its speech probability.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Runtime` for a wrong frame size and
    /// `SpeechError::Model` if inference fails.
    pub fn process(&mut self, frame: &[f32]) -> Result<f32, SpeechError> {
        if frame.len() != VAD_FRAME_SIZE {
            return Err(SpeechError::Runtime(format!(
                "VAD frame must be {} samples, got {}",
                VAD_FRAME_SIZE,
                frame.len()
            )));
        }

        // The v5 model takes the previous 64 samples as leading context
        let mut samples = Vec::with_capacity(CONTEXT_SIZE + VAD_FRAME_SIZE);
        samples.extend_from_slice(&self.context);
        samples.extend_from_slice(frame);

        let input =
            ArrayD::from_shape_vec(IxDyn(&[1, CONTEXT_SIZE + VAD_FRAME_SIZE]), samples)
                .map_err(|e| SpeechError::Runtime(format!("failed to shape VAD input: {}", e)))?;

        let outputs = self.session.run(ort::inputs![
            "input" => TensorRef::from_array_view(input.view())?,
            "state" => TensorRef::from_array_view(self.state.view())?,
            "sr" => TensorRef::from_array_view(self.sample_rate.view())?,
        ])?;

        let probability = outputs["output"]
            .try_extract_array::<f32>()?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| SpeechError::Model("empty VAD output".to_string()))?;

        self.state = outputs["stateN"].try_extract_array::<f32>()?.to_owned();
        self.context
            .copy_from_slice(&frame[VAD_FRAME_SIZE - CONTEXT_SIZE..]);

        Ok(probability)
    }

    /// Reset the model state and context to silence.
    pub fn reset(&mut self) {
        self.state = ArrayD::zeros(IxDyn(&[2, 1, 128]));
        self.context = vec![0.0; CONTEXT_SIZE];
    }
}
