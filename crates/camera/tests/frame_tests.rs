use camera::Frame;

#[test]
fn test_new_rejects_wrong_length() {
    assert!(Frame::new(2, 2, vec![0u8; 11]).is_err());
    assert!(Frame::new(2, 2, vec![0u8; 12]).is_ok());
}

#[test]
fn test_black_frame() {
    let frame = Frame::black(4, 3);
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.height(), 3);
    assert_eq!(frame.data().len(), 4 * 3 * 3);
    assert!(frame.data().iter().all(|&b| b == 0));
}

#[test]
fn test_pixel_roundtrip() {
    let mut frame = Frame::black(4, 4);
    frame.set_pixel(2, 1, (10, 20, 30));
    assert_eq!(frame.pixel(2, 1), (10, 20, 30));
    assert_eq!(frame.pixel(0, 0), (0, 0, 0));

    // Out of bounds is ignored / reads black
    frame.set_pixel(100, 100, (1, 2, 3));
    assert_eq!(frame.pixel(100, 100), (0, 0, 0));
}

#[test]
fn test_resize_identity() {
    let mut frame = Frame::black(2, 2);
    frame.set_pixel(1, 1, (9, 9, 9));
    let data_before = frame.data().to_vec();

    let resized = frame.resize_to(2, 2);
    assert_eq!(resized.data(), &data_before[..]);
}

#[test]
fn test_resize_downscale() {
    // 4x4 frame with distinct quadrant colors, downscaled to 2x2 picks one
    // source pixel per quadrant
    let mut frame = Frame::black(4, 4);
    for y in 0..4 {
        for x in 0..4 {
            let v = match (x < 2, y < 2) {
                (true, true) => 10,
                (false, true) => 20,
                (true, false) => 30,
                (false, false) => 40,
            };
            frame.set_pixel(x, y, (v, v, v));
        }
    }

    let small = frame.resize_to(2, 2);
    assert_eq!(small.width(), 2);
    assert_eq!(small.height(), 2);
    assert_eq!(small.pixel(0, 0), (10, 10, 10));
    assert_eq!(small.pixel(1, 0), (20, 20, 20));
    assert_eq!(small.pixel(0, 1), (30, 30, 30));
    assert_eq!(small.pixel(1, 1), (40, 40, 40));
}

#[test]
fn test_resize_upscale_dimensions() {
    let frame = Frame::black(2, 2);
    let big = frame.resize_to(640, 480);
    assert_eq!(big.width(), 640);
    assert_eq!(big.height(), 480);
    assert_eq!(big.data().len(), 640 * 480 * 3);
}

#[test]
fn test_to_argb_packing() {
    let frame = Frame::new(2, 1, vec![255, 0, 0, 0, 128, 64]).unwrap();
    let argb = frame.to_argb();
    assert_eq!(argb, vec![0x00FF0000, 0x00008040]);
}
