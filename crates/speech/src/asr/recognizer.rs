use crate::SpeechError;
use crate::asr::SttEngine;
use crate::audio_in::{AudioIn, AudioInConfig};
use crate::vad::{EndpointConfig, Endpointer, SileroVad, VAD_FRAME_SIZE, Verdict};

/// Progress events emitted while a one-shot recognition runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenEvent {
    /// Microphone capture started, waiting for an utterance.
    Listening,
    /// Utterance captured, transcription in progress.
    Recognizing,
}

/// The blocking push-to-talk operation.
pub trait Recognize {
    /// Capture one utterance from the microphone and transcribe it.
    ///
    /// Blocks the calling thread from capture start to transcription result.
    /// `events` is invoked as the operation moves through its phases.
    fn recognize(
        &mut self,
        events: &mut dyn FnMut(ListenEvent),
    ) -> Result<String, SpeechError>;
}

/// One-shot recognizer: microphone capture, Silero-VAD endpointing, then a
/// single `SttEngine::transcribe` call on the detected utterance.
pub struct Recognizer<E: SttEngine> {
    engine: E,
    vad: SileroVad,
    audio_config: AudioInConfig,
    endpoint_config: EndpointConfig,
}

impl<E: SttEngine> Recognizer<E> {
    pub fn new(engine: E, vad: SileroVad) -> Self {
        Self {
            engine,
            vad,
            audio_config: AudioInConfig::default(),
            endpoint_config: EndpointConfig::default(),
        }
    }

    pub fn with_audio_config(mut self, config: AudioInConfig) -> Self {
        self.audio_config = config;
        self
    }

    pub fn with_endpoint_config(mut self, config: EndpointConfig) -> Self {
        self.endpoint_config = config;
        self
    }

    /// Block on the microphone until the endpointer reports an utterance
    /// boundary, then return the utterance samples.
    fn listen(&mut self) -> Result<Vec<i16>, SpeechError> {
        // a fresh stream per recognition, released when this returns
        let mut audio_in = AudioIn::open(self.audio_config.clone());

        self.vad.reset();
        let mut endpointer = Endpointer::new(self.endpoint_config);

        let mut captured: Vec<i16> = Vec::new();
        let mut pending: Vec<f32> = Vec::new();
        let mut frame = vec![0.0f32; VAD_FRAME_SIZE];

        loop {
            let chunk = audio_in
                .blocking_recv()
                .ok_or_else(|| SpeechError::Device("audio capture stopped".to_string()))?;

            pending.extend(chunk.iter().map(|&s| s as f32 / 32768.0));
            captured.extend_from_slice(&chunk);

            while pending.len() >= VAD_FRAME_SIZE {
                frame.copy_from_slice(&pending[..VAD_FRAME_SIZE]);
                pending.drain(..VAD_FRAME_SIZE);

                let prob = self.vad.process(&frame)?;
                match endpointer.step(prob) {
                    Verdict::Pending | Verdict::Started => {}
                    Verdict::Complete {
                        start_frame,
                        end_frame,
                    } => {
                        let start = (start_frame * VAD_FRAME_SIZE).min(captured.len());
                        let end = (end_frame * VAD_FRAME_SIZE).min(captured.len());
                        return Ok(captured[start..end].to_vec());
                    }
                    Verdict::NoSpeech => return Err(SpeechError::NoMatch),
                }
            }
        }
    }
}

impl<E: SttEngine> Recognize for Recognizer<E> {
    fn recognize(
        &mut self,
        events: &mut dyn FnMut(ListenEvent),
    ) -> Result<String, SpeechError> {
        events(ListenEvent::Listening);
        let utterance = self.listen()?;

        events(ListenEvent::Recognizing);
        let text = self.engine.transcribe(&utterance)?;
        if text.trim().is_empty() {
            return Err(SpeechError::NoMatch);
        }
        Ok(text)
    }
}
