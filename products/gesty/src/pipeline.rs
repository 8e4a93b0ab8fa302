//! The gesture announcement pipeline and the status messages the shell
//! displays.

use hands::classify;
use speech::{ListenEvent, Recognize, Speak, SpeechError};

pub const MSG_CAMERA_STARTED: &str = "Camera started. Use gestures!";
pub const MSG_CAMERA_ERROR: &str = "Error: Unable to access the camera.";
pub const MSG_CAPTURE_FAILED: &str = "Failed to capture image";
pub const MSG_CAMERA_STOPPED: &str = "Camera stopped.";
pub const MSG_LISTENING: &str = "Listening...";
pub const MSG_RECOGNIZING: &str = "Recognizing...";
pub const MSG_NO_MATCH: &str = "Sorry, I did not understand the audio.";
pub const MSG_SERVICE_ERROR: &str = "Sorry, there was an error with the speech recognition service.";

/// Classify each hand's finger states in detection order; every known
/// gesture becomes the status message and is spoken before the next hand is
/// handled. Speech failures are logged, never fatal.
pub fn announce_gestures(
    fingers: &[[bool; 5]],
    speaker: &mut dyn Speak,
    status: &mut impl FnMut(&str),
) {
    for &states in fingers {
        let gesture = classify(states);
        if !gesture.is_known() {
            continue;
        }

        status(gesture.label());
        if let Err(error) = speaker.say(gesture.label()) {
            log::warn!("speech output failed: {}", error);
        }
    }
}

/// Map a recognition outcome to the status message shown to the user.
pub fn speech_status(outcome: &Result<String, SpeechError>) -> String {
    match outcome {
        Ok(text) => format!("You said: {}", text),
        Err(SpeechError::NoMatch) => MSG_NO_MATCH.to_string(),
        Err(_) => MSG_SERVICE_ERROR.to_string(),
    }
}

/// The blocking push-to-talk flow: recognition phases become status
/// messages, then the outcome replaces them.
pub fn run_speech_input(recognizer: &mut dyn Recognize, status: &mut impl FnMut(&str)) {
    let result = recognizer.recognize(&mut |event| {
        status(match event {
            ListenEvent::Listening => MSG_LISTENING,
            ListenEvent::Recognizing => MSG_RECOGNIZING,
        })
    });

    status(&speech_status(&result));
}
