use crate::SpeechError;
use libpulse_binding::sample::{Format, Spec};
use libpulse_binding::stream::Direction;
use libpulse_simple_binding::Simple;

/// Audio output configuration.
#[derive(Clone, Debug)]
pub struct AudioOutConfig {
    pub device_name: Option<String>,
    pub sample_rate: usize,
}

impl Default for AudioOutConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            sample_rate: 16000,
        }
    }
}

/// Blocking audio playback.
///
/// `play` writes the whole buffer to PulseAudio and drains the sink, so the
/// call returns only after playback has finished. The connection is made
/// lazily and remade after errors.
pub struct AudioOut {
    config: AudioOutConfig,
    pulse: Option<Simple>,
}

impl AudioOut {
    pub fn open(config: AudioOutConfig) -> Self {
        Self {
            config,
            pulse: None,
        }
    }

    pub fn config(&self) -> &AudioOutConfig {
        &self.config
    }

    /// Play the samples and block until the sink has drained.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Device` if the PulseAudio connection or write
    /// fails; the connection is dropped so the next call reconnects.
    pub fn play(&mut self, samples: &[i16]) -> Result<(), SpeechError> {
        if samples.is_empty() {
            return Ok(());
        }

        if self.pulse.is_none() {
            self.pulse = Some(Self::connect(&self.config)?);
        }
        let Some(pulse) = self.pulse.as_ref() else {
            return Err(SpeechError::Device("playback not connected".to_string()));
        };

        let mut bytes = Vec::with_capacity(samples.len() * 2);
        for sample in samples {
            bytes.extend_from_slice(&sample.to_ne_bytes());
        }

        let result = pulse
            .write(&bytes)
            .and_then(|_| pulse.drain())
            .map_err(|e| SpeechError::Device(format!("playback failed: {}", e)));

        if result.is_err() {
            self.pulse = None;
        }
        result
    }

    fn connect(config: &AudioOutConfig) -> Result<Simple, SpeechError> {
        let spec = Spec {
            format: Format::S16NE,
            channels: 1,
            rate: config.sample_rate as u32,
        };

        Simple::new(
            None,
            "gesty-audio",
            Direction::Playback,
            config.device_name.as_deref(),
            "speech-playback",
            &spec,
            None,
            None,
        )
        .map_err(|e| SpeechError::Device(format!("failed to connect to PulseAudio: {}", e)))
    }
}
