use std::fmt;

#[derive(Debug)]
pub enum HandError {
    Model(String),
    Shape(String),
    Io(String),
    Runtime(String),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Model(msg) => write!(f, "model error: {msg}"),
            HandError::Shape(msg) => write!(f, "shape error: {msg}"),
            HandError::Io(msg) => write!(f, "io error: {msg}"),
            HandError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for HandError {}

impl From<ort::Error> for HandError {
    fn from(err: ort::Error) -> Self {
        HandError::Model(err.to_string())
    }
}

impl From<std::io::Error> for HandError {
    fn from(err: std::io::Error) -> Self {
        HandError::Io(err.to_string())
    }
}
