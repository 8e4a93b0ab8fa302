/// Landmark indices for the 21-point hand skeleton.
///
/// The model follows the common hand-landmark convention: wrist first, then
/// four joints per finger from the base outward.
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Bone connections between landmarks, used by the overlay renderer.
pub const CONNECTIONS: [(usize, usize); 21] = [
    // thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // index
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // middle
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    // ring
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    // pinky
    (13, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (0, 17),
];

/// A single hand landmark in frame-normalized coordinates (0.0 to 1.0).
///
/// `z` carries the model's third keypoint channel (depth or visibility,
/// depending on the export); the classifier only uses `x` and `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand: 21 landmarks plus a detection score.
#[derive(Clone, Debug)]
pub struct HandObservation {
    landmarks: [Landmark; 21],
    score: f32,
    handedness: Handedness,
}

impl HandObservation {
    pub fn new(landmarks: [Landmark; 21], score: f32) -> Self {
        // In the mirrored camera view the index-finger side of a right hand
        // sits left of the pinky side
        let handedness = if landmarks[index::INDEX_MCP].x < landmarks[index::PINKY_MCP].x {
            Handedness::Right
        } else {
            Handedness::Left
        };

        Self {
            landmarks,
            score,
            handedness,
        }
    }

    pub fn landmarks(&self) -> &[Landmark; 21] {
        &self.landmarks
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Per-finger extension states in thumb, index, middle, ring, pinky order.
    ///
    /// A non-thumb finger counts as extended when its tip sits above its PIP
    /// joint in image coordinates (y grows downward). The thumb counts as
    /// extended when its tip is farther from the pinky-side knuckle than its
    /// IP joint is, which works for either hand.
    pub fn fingers_up(&self) -> [bool; 5] {
        let lm = &self.landmarks;

        let thumb = dist2(lm[index::THUMB_TIP], lm[index::PINKY_MCP])
            > dist2(lm[index::THUMB_IP], lm[index::PINKY_MCP]);

        [
            thumb,
            lm[index::INDEX_TIP].y < lm[index::INDEX_PIP].y,
            lm[index::MIDDLE_TIP].y < lm[index::MIDDLE_PIP].y,
            lm[index::RING_TIP].y < lm[index::RING_PIP].y,
            lm[index::PINKY_TIP].y < lm[index::PINKY_PIP].y,
        ]
    }

    /// Landmark position in pixel coordinates for a frame of the given size.
    pub fn landmark_px(&self, i: usize, width: usize, height: usize) -> (f32, f32) {
        let lm = self.landmarks[i];
        (lm.x * width as f32, lm.y * height as f32)
    }
}

fn dist2(a: Landmark, b: Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
