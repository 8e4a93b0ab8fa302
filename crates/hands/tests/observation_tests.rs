use hands::landmark::index;
use hands::{Gesture, HandObservation, Handedness, Landmark, classify};

/// Build a synthetic mirrored-view right hand with the requested finger
/// extension states. The palm faces the camera, knuckles around y=0.6,
/// index on the left, pinky on the right.
fn hand(fingers: [bool; 5]) -> HandObservation {
    let mut lm = [Landmark::default(); 21];

    lm[index::WRIST] = Landmark {
        x: 0.5,
        y: 0.9,
        z: 0.0,
    };

    // Thumb chain reaches away from the pinky side when extended
    lm[index::THUMB_CMC] = Landmark {
        x: 0.35,
        y: 0.8,
        z: 0.0,
    };
    lm[index::THUMB_MCP] = Landmark {
        x: 0.3,
        y: 0.72,
        z: 0.0,
    };
    lm[index::THUMB_IP] = Landmark {
        x: 0.27,
        y: 0.66,
        z: 0.0,
    };
    lm[index::THUMB_TIP] = if fingers[0] {
        Landmark {
            x: 0.15,
            y: 0.6,
            z: 0.0,
        }
    } else {
        // curled back toward the palm
        Landmark {
            x: 0.4,
            y: 0.65,
            z: 0.0,
        }
    };

    // Four fingers: MCP / PIP / DIP / TIP columns
    let columns = [
        (index::INDEX_MCP, 0.40),
        (index::MIDDLE_MCP, 0.47),
        (index::RING_MCP, 0.54),
        (index::PINKY_MCP, 0.61),
    ];
    for (finger, &(mcp, x)) in columns.iter().enumerate() {
        lm[mcp] = Landmark { x, y: 0.6, z: 0.0 };
        lm[mcp + 1] = Landmark { x, y: 0.5, z: 0.0 };
        lm[mcp + 2] = Landmark { x, y: 0.45, z: 0.0 };
        let tip_y = if fingers[finger + 1] { 0.3 } else { 0.6 };
        lm[mcp + 3] = Landmark { x, y: tip_y, z: 0.0 };
    }

    HandObservation::new(lm, 0.9)
}

#[test]
fn test_fingers_up_all_patterns() {
    for bits in 0u8..32 {
        let fingers = [
            bits & 16 != 0,
            bits & 8 != 0,
            bits & 4 != 0,
            bits & 2 != 0,
            bits & 1 != 0,
        ];
        assert_eq!(hand(fingers).fingers_up(), fingers, "pattern {:?}", fingers);
    }
}

#[test]
fn test_handedness_from_knuckle_order() {
    let right = hand([false; 5]);
    assert_eq!(right.handedness(), Handedness::Right);

    // Mirror the x axis to get the other hand
    let mut mirrored = *right.landmarks();
    for lm in mirrored.iter_mut() {
        lm.x = 1.0 - lm.x;
    }
    let left = HandObservation::new(mirrored, 0.9);
    assert_eq!(left.handedness(), Handedness::Left);
}

#[test]
fn test_landmark_px_scaling() {
    let obs = hand([false; 5]);
    let (x, y) = obs.landmark_px(index::WRIST, 640, 480);
    assert!((x - 320.0).abs() < 1e-3);
    assert!((y - 432.0).abs() < 1e-3);
}

#[test]
fn test_observed_gestures_classify() {
    let cases = [
        ([true, false, false, false, false], Gesture::ThumbsUp),
        ([false, true, true, true, true], Gesture::PeaceSign),
        ([true, true, true, true, true], Gesture::AllFingersUp),
        ([true, true, false, false, true], Gesture::GoodBye),
        ([false, false, false, false, false], Gesture::Unknown),
    ];

    for (fingers, expected) in cases {
        let obs = hand(fingers);
        assert_eq!(classify(obs.fingers_up()), expected, "fingers {:?}", fingers);
    }
}
