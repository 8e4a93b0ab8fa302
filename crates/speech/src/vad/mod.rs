//! Voice activity detection and utterance endpointing.

pub mod silero;

pub use silero::{SileroVad, VAD_FRAME_SIZE};

/// Endpointing thresholds and limits, all in VAD frames (32ms at 16kHz).
#[derive(Clone, Copy, Debug)]
pub struct EndpointConfig {
    /// Speech probability that starts an utterance.
    pub on_threshold: f32,
    /// Speech probability below which a frame counts as silence.
    pub off_threshold: f32,
    /// Trailing silence frames that end an utterance.
    pub min_silence_frames: usize,
    /// Leading silence frames before giving up without speech.
    pub max_leading_frames: usize,
    /// Hard cap on utterance length.
    pub max_utterance_frames: usize,
    /// Frames kept before the trigger frame for soft onsets.
    pub padding_frames: usize,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            on_threshold: 0.5,
            off_threshold: 0.35,
            min_silence_frames: 25,   // ~800ms
            max_leading_frames: 250,  // ~8s
            max_utterance_frames: 600, // ~19s
            padding_frames: 6, // ~200ms
        }
    }
}

/// Outcome of feeding one speech probability to the endpointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Keep feeding frames.
    Pending,
    /// Speech onset detected on this frame.
    Started,
    /// Utterance complete; frame indices select the speech span.
    Complete {
        start_frame: usize,
        end_frame: usize,
    },
    /// No speech appeared within the leading-silence limit.
    NoSpeech,
}

/// Utterance boundary state machine over per-frame speech probabilities.
///
/// Pure bookkeeping; the probabilities come from `SileroVad` (or a test).
#[derive(Debug)]
pub struct Endpointer {
    config: EndpointConfig,
    frame: usize,
    speech_start: Option<usize>,
    silence_run: usize,
}

impl Endpointer {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            config,
            frame: 0,
            speech_start: None,
            silence_run: 0,
        }
    }

    /// Feed the speech probability of the next frame.
    pub fn step(&mut self, prob: f32) -> Verdict {
        let idx = self.frame;
        self.frame += 1;

        match self.speech_start {
            None => {
                if prob >= self.config.on_threshold {
                    self.speech_start = Some(idx.saturating_sub(self.config.padding_frames));
                    self.silence_run = 0;
                    Verdict::Started
                } else if idx + 1 >= self.config.max_leading_frames {
                    Verdict::NoSpeech
                } else {
                    Verdict::Pending
                }
            }
            Some(start) => {
                if prob < self.config.off_threshold {
                    self.silence_run += 1;
                } else {
                    self.silence_run = 0;
                }

                if self.silence_run >= self.config.min_silence_frames
                    || idx + 1 - start >= self.config.max_utterance_frames
                {
                    Verdict::Complete {
                        start_frame: start,
                        end_frame: idx + 1,
                    }
                } else {
                    Verdict::Pending
                }
            }
        }
    }
}
