use crate::CameraError;

/// An owned RGB8 video frame.
///
/// Pixels are stored row-major, 3 bytes per pixel, so `data.len()` is always
/// `width * height * 3`.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame from an RGB8 buffer.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Decode` if the buffer length does not match the
    /// dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, CameraError> {
        if data.len() != width * height * 3 {
            return Err(CameraError::Decode(format!(
                "RGB buffer length {} does not match {}x{} frame",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an all-black frame.
    pub fn black(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel as (r, g, b). Out-of-bounds coordinates return black.
    pub fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        let idx = (y * self.width + x) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Write one pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: (u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 3;
        self.data[idx] = rgb.0;
        self.data[idx + 1] = rgb.1;
        self.data[idx + 2] = rgb.2;
    }

    /// Resize with nearest-neighbor sampling. Returns a clone-free `self`
    /// when the frame already has the requested dimensions.
    pub fn resize_to(self, width: usize, height: usize) -> Frame {
        if width == self.width && height == self.height {
            return self;
        }

        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            let src_y = y * self.height / height;
            for x in 0..width {
                let src_x = x * self.width / width;
                let idx = (src_y * self.width + src_x) * 3;
                data.extend_from_slice(&self.data[idx..idx + 3]);
            }
        }

        Frame {
            width,
            height,
            data,
        }
    }

    /// Pack the frame as 0RGB u32 pixels for display surfaces.
    pub fn to_argb(&self) -> Vec<u32> {
        let mut argb = Vec::with_capacity(self.width * self.height);
        for px in self.data.chunks_exact(3) {
            argb.push(((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32);
        }
        argb
    }
}
