use std::fmt;

#[derive(Debug)]
pub enum SpeechError {
    Device(String),
    Model(String),
    Io(String),
    Runtime(String),
    /// The recognizer could not match the audio to any text.
    NoMatch,
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Device(msg) => write!(f, "device error: {msg}"),
            SpeechError::Model(msg) => write!(f, "model error: {msg}"),
            SpeechError::Io(msg) => write!(f, "io error: {msg}"),
            SpeechError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            SpeechError::NoMatch => write!(f, "no speech recognized"),
        }
    }
}

impl std::error::Error for SpeechError {}

impl From<ort::Error> for SpeechError {
    fn from(err: ort::Error) -> Self {
        SpeechError::Model(err.to_string())
    }
}

impl From<std::io::Error> for SpeechError {
    fn from(err: std::io::Error) -> Self {
        SpeechError::Io(err.to_string())
    }
}
