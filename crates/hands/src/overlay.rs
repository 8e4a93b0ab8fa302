use crate::landmark::{CONNECTIONS, HandObservation};
use camera::Frame;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

const BONE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const JOINT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const JOINT_RADIUS: i32 = 3;

/// Draw landmark overlays for every observation onto the frame.
pub fn draw_hands(frame: &mut Frame, hands: &[HandObservation]) {
    if hands.is_empty() {
        return;
    }

    let (width, height) = (frame.width(), frame.height());
    let Some(mut img) = RgbImage::from_raw(width as u32, height as u32, frame.data().to_vec())
    else {
        return;
    };

    for hand in hands {
        draw_hand(&mut img, hand, width, height);
    }

    frame.data_mut().copy_from_slice(img.as_raw());
}

fn draw_hand(img: &mut RgbImage, hand: &HandObservation, width: usize, height: usize) {
    for &(a, b) in CONNECTIONS.iter() {
        let (ax, ay) = hand.landmark_px(a, width, height);
        let (bx, by) = hand.landmark_px(b, width, height);
        draw_line_segment_mut(img, (ax, ay), (bx, by), BONE_COLOR);
    }

    for i in 0..hand.landmarks().len() {
        let (x, y) = hand.landmark_px(i, width, height);
        draw_filled_circle_mut(img, (x as i32, y as i32), JOINT_RADIUS, JOINT_COLOR);
    }
}
