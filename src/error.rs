use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ZupuError {
    Validation(String),
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl Error for ZupuError {}

impl fmt::Display for ZupuError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZupuError::Validation(message) => write!(f, "{message}"),
            ZupuError::Io(e) => write!(f, "I/O error: {e}"),
            ZupuError::Serde(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl From<String> for ZupuError {
    fn from(err: String) -> Self {
        ZupuError::Validation(err)
    }
}

impl From<std::io::Error> for ZupuError {
    fn from(err: std::io::Error) -> Self {
        ZupuError::Io(err)
    }
}

impl From<serde_json::Error> for ZupuError {
    fn from(err: serde_json::Error) -> Self {
        ZupuError::Serde(err)
    }
}
