use camera::{Camera, CameraError, Frame};

// Mock implementation for testing
struct MockCamera {
    frame_count: usize,
}

impl Camera for MockCamera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.frame_count += 1;
        Ok(Frame::black(2, 2))
    }
}

#[tokio::test]
async fn test_camera_trait_mock_implementation() {
    let mut cam = MockCamera { frame_count: 0 };

    let frame = cam.recv().await.unwrap();
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 2);
    assert_eq!(cam.frame_count, 1);

    cam.recv().await.unwrap();
    assert_eq!(cam.frame_count, 2);
}

#[tokio::test]
async fn test_camera_trait_polymorphism() {
    async fn capture_frames(
        camera: &mut impl Camera,
        count: usize,
    ) -> Result<Vec<Frame>, CameraError> {
        let mut frames = Vec::new();
        for _ in 0..count {
            frames.push(camera.recv().await?);
        }
        Ok(frames)
    }

    let mut cam = MockCamera { frame_count: 0 };
    let frames = capture_frames(&mut cam, 3).await.unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(cam.frame_count, 3);
}
