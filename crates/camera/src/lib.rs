//! Camera capture for the gesty demo.
//!
//! Provides the `Camera` trait for async frame capture, the owned RGB8
//! `Frame` buffer consumed by the rest of the pipeline, and a V4L2 backend.

pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use frame::Frame;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
