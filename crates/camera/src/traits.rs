use crate::{CameraError, Frame};

/// Async camera trait for frame capture.
///
/// Implementations yield decoded RGB8 `Frame`s in capture order.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame from the camera.
    async fn recv(&mut self) -> Result<Frame, CameraError>;
}
