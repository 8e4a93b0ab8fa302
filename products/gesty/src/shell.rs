//! Capture session lifecycle and the single status message.

use crate::pipeline;
use camera::{Camera, CameraConfig, CameraError, Frame, V4l2Camera};
use std::time::Duration;

/// Nominal delay between frame-pump ticks.
pub const PUMP_INTERVAL: Duration = Duration::from_millis(30);

/// An open camera, alive from the start action until stop or window close.
///
/// `read_frame` blocks the calling thread on the next frame; dropping the
/// session releases the device.
pub struct CaptureSession {
    camera: V4l2Camera,
    runtime: tokio::runtime::Handle,
}

impl CaptureSession {
    pub fn open(
        runtime: tokio::runtime::Handle,
        config: CameraConfig,
    ) -> Result<Self, CameraError> {
        let camera = V4l2Camera::new(config)?;
        Ok(Self { camera, runtime })
    }

    pub fn read_frame(&mut self) -> Result<Frame, CameraError> {
        self.runtime.block_on(self.camera.recv())
    }
}

/// UI-shell state: at most one capture session, one status message, and the
/// pump stall flag.
pub struct Shell {
    runtime: tokio::runtime::Handle,
    camera_config: CameraConfig,
    session: Option<CaptureSession>,
    status: String,
    stalled: bool,
}

impl Shell {
    pub fn new(runtime: tokio::runtime::Handle, camera_config: CameraConfig) -> Self {
        Self {
            runtime,
            camera_config,
            session: None,
            status: String::new(),
            stalled: false,
        }
    }

    /// Replace the status message; only the most recent message exists.
    pub fn set_status(&mut self, message: &str) {
        self.status.clear();
        self.status.push_str(message);
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Mutable access for the status widget; the widget itself is
    /// non-interactive, so only the program writes here.
    pub fn status_buffer(&mut self) -> &mut String {
        &mut self.status
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// True while the frame pump should tick.
    pub fn is_running(&self) -> bool {
        self.session.is_some() && !self.stalled
    }

    /// Open a capture session. A second press while running is a no-op; on
    /// failure the shell stays idle and reports the error status.
    pub fn start_camera(&mut self) {
        if self.session.is_some() {
            return;
        }

        match CaptureSession::open(self.runtime.clone(), self.camera_config.clone()) {
            Ok(session) => {
                self.session = Some(session);
                self.stalled = false;
                self.set_status(pipeline::MSG_CAMERA_STARTED);
            }
            Err(error) => {
                log::error!("unable to open camera: {}", error);
                self.set_status(pipeline::MSG_CAMERA_ERROR);
            }
        }
    }

    /// Read the next frame from the open session.
    ///
    /// A read failure reports the capture-failed status and stalls the pump:
    /// no further ticks run until a stop/start cycle, reproducing the
    /// original program's behavior.
    pub fn read_frame(&mut self) -> Option<Frame> {
        let session = self.session.as_mut()?;

        match session.read_frame() {
            Ok(frame) => Some(frame),
            Err(error) => {
                log::warn!("frame read failed: {}", error);
                self.set_status(pipeline::MSG_CAPTURE_FAILED);
                self.stalled = true;
                None
            }
        }
    }

    /// Close the capture session. Idempotent: without an open session this
    /// does nothing, and the status is only emitted on an actual close.
    pub fn stop_camera(&mut self) {
        if self.session.take().is_some() {
            self.set_status(pipeline::MSG_CAMERA_STOPPED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_with_missing_device() -> (tokio::runtime::Runtime, Shell) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let config = CameraConfig::default().with_device("/dev/video-gesty-missing");
        let shell = Shell::new(runtime.handle().clone(), config);
        (runtime, shell)
    }

    #[test]
    fn test_status_replaces_not_appends() {
        let (_rt, mut shell) = shell_with_missing_device();

        shell.set_status("A");
        assert_eq!(shell.status(), "A");
        shell.set_status("B");
        assert_eq!(shell.status(), "B");
    }

    #[test]
    fn test_start_camera_failure_stays_idle() {
        let (_rt, mut shell) = shell_with_missing_device();

        shell.start_camera();

        assert!(!shell.has_session());
        assert!(!shell.is_running());
        assert_eq!(shell.status(), pipeline::MSG_CAMERA_ERROR);
    }

    #[test]
    fn test_stop_without_session_is_noop() {
        let (_rt, mut shell) = shell_with_missing_device();

        shell.set_status("before");
        shell.stop_camera();
        // no session was open, so no status change either
        assert_eq!(shell.status(), "before");

        shell.stop_camera();
        assert_eq!(shell.status(), "before");
    }

    #[test]
    fn test_read_frame_without_session() {
        let (_rt, mut shell) = shell_with_missing_device();
        assert!(shell.read_frame().is_none());
        assert!(shell.status().is_empty());
    }
}
