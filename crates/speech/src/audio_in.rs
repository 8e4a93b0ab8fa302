use libpulse_binding::def::BufferAttr;
use libpulse_binding::sample::{Format, Spec};
use libpulse_binding::stream::Direction;
use libpulse_simple_binding::Simple;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

// capacity of the audio input channel
const CHANNEL_CAPACITY: usize = 8;

// delay before reconnecting to PulseAudio
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Audio input configuration.
#[derive(Clone, Debug)]
pub struct AudioInConfig {
    pub device_name: Option<String>,
    pub sample_rate: usize,
    pub chunk_size: usize,
}

impl Default for AudioInConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            sample_rate: 16000,
            // 100ms at 16kHz
            chunk_size: 1600,
        }
    }
}

/// Microphone capture.
///
/// A dedicated thread reads s16 mono chunks from PulseAudio and feeds a
/// bounded channel, reconnecting on failure. Dropping the `AudioIn` closes
/// the channel and stops the thread.
pub struct AudioIn {
    input_rx: mpsc::Receiver<Vec<i16>>,
    config: AudioInConfig,
}

impl AudioIn {
    /// Open audio input. The PulseAudio connection is made (and remade) on
    /// the capture thread, so this never fails.
    pub fn open(config: AudioInConfig) -> Self {
        let (input_tx, input_rx) = mpsc::channel::<Vec<i16>>(CHANNEL_CAPACITY);

        thread::spawn({
            let config = config.clone();
            move || capture_loop(config, input_tx)
        });

        Self { input_rx, config }
    }

    pub fn config(&self) -> &AudioInConfig {
        &self.config
    }

    /// Receive the next audio chunk.
    pub async fn recv(&mut self) -> Option<Vec<i16>> {
        self.input_rx.recv().await
    }

    /// Receive the next audio chunk, blocking the calling thread.
    ///
    /// Must not be called from an async context.
    pub fn blocking_recv(&mut self) -> Option<Vec<i16>> {
        self.input_rx.blocking_recv()
    }
}

fn capture_loop(config: AudioInConfig, tx: mpsc::Sender<Vec<i16>>) {
    let spec = Spec {
        format: Format::S16NE,
        channels: 1,
        rate: config.sample_rate as u32,
    };
    let bytes_per_chunk = config.chunk_size * 2;
    let mut buffer = vec![0u8; bytes_per_chunk];
    let buffer_attr = BufferAttr {
        maxlength: bytes_per_chunk as u32 * 16,
        tlength: u32::MAX,
        prebuf: u32::MAX,
        minreq: u32::MAX,
        fragsize: bytes_per_chunk as u32,
    };

    // reconnect loop
    while !tx.is_closed() {
        let pulse = match Simple::new(
            None,
            "gesty-audio",
            Direction::Record,
            config.device_name.as_deref(),
            "speech-capture",
            &spec,
            None,
            Some(&buffer_attr),
        ) {
            Ok(pulse) => pulse,
            Err(error) => {
                log::warn!("failed to connect to PulseAudio, reconnecting: {}", error);
                thread::sleep(RECONNECT_DELAY);
                continue;
            }
        };

        // inner loop until a read error or the receiver goes away
        loop {
            match pulse.read(&mut buffer) {
                Ok(()) => {
                    let samples: Vec<i16> = buffer
                        .chunks_exact(2)
                        .map(|b| i16::from_ne_bytes([b[0], b[1]]))
                        .collect();

                    if tx.blocking_send(samples).is_err() {
                        // receiver dropped - stop capturing
                        return;
                    }
                }
                Err(error) => {
                    log::warn!("PulseAudio read error, reconnecting: {}", error);
                    thread::sleep(RECONNECT_DELAY);
                    break;
                }
            }
        }
    }
}
