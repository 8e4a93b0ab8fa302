//! Raw model output decoding: letterbox mapping, candidate extraction and
//! non-maximum suppression.

pub const NUM_LANDMARKS: usize = 21;

/// Channels per anchor: 4 box values, 1 score, 3 values per landmark.
pub const CHANNELS: usize = 4 + 1 + NUM_LANDMARKS * 3;

/// Mapping between source-frame pixels and the square model input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub scaled_w: usize,
    pub scaled_h: usize,
    pub pad_x: usize,
    pub pad_y: usize,
}

impl Letterbox {
    /// Fit a `src_w` x `src_h` frame into a `dst` x `dst` input, preserving
    /// aspect ratio and centering.
    pub fn fit(src_w: usize, src_h: usize, dst: usize) -> Self {
        let scale = (dst as f32 / src_w as f32).min(dst as f32 / src_h as f32);
        let scaled_w = ((src_w as f32 * scale).round() as usize).min(dst);
        let scaled_h = ((src_h as f32 * scale).round() as usize).min(dst);
        Self {
            scale,
            scaled_w,
            scaled_h,
            pad_x: (dst - scaled_w) / 2,
            pad_y: (dst - scaled_h) / 2,
        }
    }

    /// Map model-input coordinates back to source-frame pixels.
    pub fn unmap(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.pad_x as f32) / self.scale,
            (y - self.pad_y as f32) / self.scale,
        )
    }
}

/// One raw detection in model-input pixel space.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// x1, y1, x2, y2
    pub bbox: [f32; 4],
    pub score: f32,
    /// x, y, third channel per landmark
    pub keypoints: [(f32, f32, f32); NUM_LANDMARKS],
}

/// Extract candidates above `conf_threshold` from a `[CHANNELS, num_anchors]`
/// prediction buffer (channel-major, the usual single-shot pose layout with
/// center-x, center-y, width, height box encoding).
pub fn decode_candidates(data: &[f32], num_anchors: usize, conf_threshold: f32) -> Vec<Candidate> {
    debug_assert_eq!(data.len(), CHANNELS * num_anchors);

    let at = |channel: usize, anchor: usize| data[channel * num_anchors + anchor];

    let mut candidates = Vec::new();
    for i in 0..num_anchors {
        let score = at(4, i);
        if score < conf_threshold {
            continue;
        }

        let cx = at(0, i);
        let cy = at(1, i);
        let w = at(2, i);
        let h = at(3, i);

        let mut keypoints = [(0.0, 0.0, 0.0); NUM_LANDMARKS];
        for (k, kp) in keypoints.iter_mut().enumerate() {
            *kp = (at(5 + k * 3, i), at(6 + k * 3, i), at(7 + k * 3, i));
        }

        candidates.push(Candidate {
            bbox: [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0],
            score,
            keypoints,
        });
    }

    candidates
}

/// Intersection-over-union of two x1,y1,x2,y2 boxes.
pub fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let ix = (a[2].min(b[2]) - a[0].max(b[0])).max(0.0);
    let iy = (a[3].min(b[3]) - a[1].max(b[1])).max(0.0);
    let intersection = ix * iy;

    let area_a = (a[2] - a[0]).max(0.0) * (a[3] - a[1]).max(0.0);
    let area_b = (b[2] - b[0]).max(0.0) * (b[3] - b[1]).max(0.0);
    let union = area_a + area_b - intersection;

    if union <= 0.0 {
        return 0.0;
    }
    intersection / union
}

/// Greedy non-maximum suppression. Returns survivors in descending score
/// order.
pub fn nms(mut candidates: Vec<Candidate>, nms_threshold: f32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if kept
            .iter()
            .all(|k| iou(&k.bbox, &candidate.bbox) <= nms_threshold)
        {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_frame() {
        // 640x480 into 640x640: scale 1.0, vertical padding only
        let lb = Letterbox::fit(640, 480, 640);
        assert_eq!(lb.scale, 1.0);
        assert_eq!(lb.scaled_w, 640);
        assert_eq!(lb.scaled_h, 480);
        assert_eq!(lb.pad_x, 0);
        assert_eq!(lb.pad_y, 80);
    }

    #[test]
    fn test_letterbox_unmap_roundtrip() {
        let lb = Letterbox::fit(640, 480, 640);
        let (x, y) = lb.unmap(320.0, 80.0);
        assert!((x - 320.0).abs() < 1e-3);
        assert!(y.abs() < 1e-3);

        let (x, y) = lb.unmap(0.0, 560.0);
        assert!(x.abs() < 1e-3);
        assert!((y - 480.0).abs() < 1e-3);
    }

    #[test]
    fn test_iou_disjoint_and_identical() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [20.0, 20.0, 30.0, 30.0];
        assert_eq!(iou(&a, &b), 0.0);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_half_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [5.0, 0.0, 15.0, 10.0];
        // intersection 50, union 150
        assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-6);
    }

    fn candidate(bbox: [f32; 4], score: f32) -> Candidate {
        Candidate {
            bbox,
            score,
            keypoints: [(0.0, 0.0, 0.0); NUM_LANDMARKS],
        }
    }

    #[test]
    fn test_nms_suppresses_overlaps() {
        let candidates = vec![
            candidate([0.0, 0.0, 10.0, 10.0], 0.9),
            candidate([1.0, 1.0, 11.0, 11.0], 0.8), // overlaps the first
            candidate([100.0, 100.0, 110.0, 110.0], 0.7),
        ];

        let kept = nms(candidates, 0.45);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].score, 0.9);
        assert_eq!(kept[1].score, 0.7);
    }

    #[test]
    fn test_nms_orders_by_score() {
        let candidates = vec![
            candidate([100.0, 100.0, 110.0, 110.0], 0.3),
            candidate([0.0, 0.0, 10.0, 10.0], 0.9),
        ];

        let kept = nms(candidates, 0.45);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].score, 0.9);
    }

    #[test]
    fn test_decode_candidates_threshold_and_layout() {
        // Two anchors, one above threshold
        let num_anchors = 2;
        let mut data = vec![0.0f32; CHANNELS * num_anchors];

        // Anchor 1: centered 100,100 box 20x10, score 0.9
        data[1] = 100.0; // cx
        data[num_anchors + 1] = 100.0; // cy
        data[2 * num_anchors + 1] = 20.0; // w
        data[3 * num_anchors + 1] = 10.0; // h
        data[4 * num_anchors + 1] = 0.9; // score
        data[5 * num_anchors + 1] = 42.0; // first landmark x
        data[6 * num_anchors + 1] = 24.0; // first landmark y

        // Anchor 0 stays at score 0.0
        let candidates = decode_candidates(&data, num_anchors, 0.25);
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.bbox, [90.0, 95.0, 110.0, 105.0]);
        assert_eq!(c.score, 0.9);
        assert_eq!(c.keypoints[0].0, 42.0);
        assert_eq!(c.keypoints[0].1, 24.0);
    }
}
