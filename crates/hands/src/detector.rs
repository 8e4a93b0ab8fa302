use crate::decode::{self, CHANNELS, Letterbox, NUM_LANDMARKS};
use crate::{HandError, HandObservation, Landmark};
use camera::Frame;
use ndarray::{ArrayD, IxDyn};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::path::Path;

/// Square model input edge in pixels.
pub const MODEL_INPUT_SIZE: usize = 640;

/// Pad value for letterbox borders, normalized like the pixel data.
const PAD_VALUE: f32 = 114.0 / 255.0;

/// Hand detector running a single-shot ONNX hand-pose model.
///
/// The model takes a letterboxed `[1, 3, 640, 640]` RGB input and predicts,
/// per anchor, a box, a confidence and 21 keypoints. `detect` is synchronous
/// and blocks for the duration of one inference.
pub struct HandDetector {
    session: Session,
    input_name: String,
    output_name: String,
    conf_threshold: f32,
    nms_threshold: f32,
    max_hands: usize,
}

impl std::fmt::Debug for HandDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandDetector")
            .field("conf_threshold", &self.conf_threshold)
            .field("nms_threshold", &self.nms_threshold)
            .field("max_hands", &self.max_hands)
            .finish()
    }
}

impl HandDetector {
    /// Load the model from a file.
    ///
    /// # Errors
    ///
    /// Returns `HandError::Model` if the session cannot be created.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, HandError> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(model_path.as_ref())?;

        Ok(Self {
            session,
            input_name: "images".to_string(),
            output_name: "output0".to_string(),
            conf_threshold: 0.25,
            nms_threshold: 0.45,
            max_hands: 2,
        })
    }

    /// Set confidence and NMS thresholds.
    pub fn with_thresholds(mut self, conf: f32, nms: f32) -> Self {
        self.conf_threshold = conf;
        self.nms_threshold = nms;
        self
    }

    /// Cap the number of hands returned per frame (highest score first).
    pub fn with_max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Override the model's input and output tensor names.
    pub fn with_io_names(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input_name = input.into();
        self.output_name = output.into();
        self
    }

    /// Detect hands in a frame.
    ///
    /// Returns observations in descending score order, at most `max_hands`,
    /// with landmarks in frame-normalized coordinates.
    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<HandObservation>, HandError> {
        let letterbox = Letterbox::fit(frame.width(), frame.height(), MODEL_INPUT_SIZE);
        let input = preprocess(frame, &letterbox);

        let outputs = self.session.run(ort::inputs![
            self.input_name.as_str() => TensorRef::from_array_view(input.view())?
        ])?;

        let predictions = outputs[self.output_name.as_str()].try_extract_array::<f32>()?;
        let shape = predictions.shape();
        if shape.len() != 3 || shape[1] != CHANNELS {
            return Err(HandError::Shape(format!(
                "expected [1, {}, N] predictions, got {:?}",
                CHANNELS, shape
            )));
        }
        let num_anchors = shape[2];

        let data = predictions.as_slice().ok_or_else(|| {
            HandError::Shape("model output is not contiguous".to_string())
        })?;

        let candidates = decode::decode_candidates(data, num_anchors, self.conf_threshold);
        let kept = decode::nms(candidates, self.nms_threshold);

        let mut hands = Vec::new();
        for candidate in kept.into_iter().take(self.max_hands) {
            let mut landmarks = [Landmark::default(); NUM_LANDMARKS];
            for (lm, &(x, y, z)) in landmarks.iter_mut().zip(candidate.keypoints.iter()) {
                let (fx, fy) = letterbox.unmap(x, y);
                *lm = Landmark {
                    x: (fx / frame.width() as f32).clamp(0.0, 1.0),
                    y: (fy / frame.height() as f32).clamp(0.0, 1.0),
                    z,
                };
            }
            hands.push(HandObservation::new(landmarks, candidate.score));
        }

        Ok(hands)
    }
}

/// Letterbox a frame into the normalized CHW input tensor.
fn preprocess(frame: &Frame, letterbox: &Letterbox) -> ArrayD<f32> {
    let scaled = frame
        .clone()
        .resize_to(letterbox.scaled_w, letterbox.scaled_h);

    let mut input = ArrayD::from_elem(
        IxDyn(&[1, 3, MODEL_INPUT_SIZE, MODEL_INPUT_SIZE]),
        PAD_VALUE,
    );

    for y in 0..letterbox.scaled_h {
        for x in 0..letterbox.scaled_w {
            let (r, g, b) = scaled.pixel(x, y);
            let (ix, iy) = (x + letterbox.pad_x, y + letterbox.pad_y);
            input[[0, 0, iy, ix]] = r as f32 / 255.0;
            input[[0, 1, iy, ix]] = g as f32 / 255.0;
            input[[0, 2, iy, ix]] = b as f32 / 255.0;
        }
    }

    input
}
