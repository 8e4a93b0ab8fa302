use crate::{Camera, CameraConfig, CameraError, Frame};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<Frame, CameraError>;

/// V4L2 camera backend.
///
/// The device is opened and configured in `new`; a capture thread is spawned
/// lazily on the first `recv` and feeds decoded frames through a bounded
/// channel. Dropping the camera closes the channel and joins the thread.
pub struct V4l2Camera {
    config: CameraConfig,
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("device", &"<v4l::Device>")
            .field("running", &self.receiver.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("capture thread stopped".to_string()))?
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // Dropping the receiver signals the capture thread to stop
        drop(self.receiver.take());

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Open the device at `config.device` with MJPEG at the requested
    /// resolution and frame rate.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened, does not
    /// accept MJPEG, or rejects the stream parameters.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(&config.device)?;

        let mut format = Format::new(config.width, config.height, FourCC::new(b"MJPG"));
        format = Capture::set_format(&device, &format)?;

        // The device may silently substitute another format
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::Device(
                "MJPEG format not supported by device".to_string(),
            ));
        }

        let params = v4l::video::capture::Parameters::with_fps(config.fps);
        Capture::set_params(&device, &params)?;

        Ok(Self {
            config,
            device: Some(device),
            receiver: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread if not already running.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count as usize;
        let (tx, rx) = mpsc::channel(buffer_count);

        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(device, tx, buffer_count) {
                log::error!("camera capture thread exited: {}", e);
            }
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);

        Ok(())
    }

    /// Background capture loop: read MJPEG buffers, decode, send frames.
    fn capture_loop(
        device: Device,
        tx: mpsc::Sender<FrameResult>,
        buffer_count: usize,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count as u32)?;

        loop {
            let (buf, _metadata) = CaptureStream::next(&mut stream)?;

            // The mmap buffer is only valid until the next call
            let frame = Self::decode_mjpeg(buf);

            if tx.blocking_send(frame).is_err() {
                // Receiver dropped - exit thread
                break;
            }
        }

        Ok(())
    }

    fn decode_mjpeg(buf: &[u8]) -> Result<Frame, CameraError> {
        let rgb = image::load_from_memory(buf)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Frame::new(width as usize, height as usize, rgb.into_raw())
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
