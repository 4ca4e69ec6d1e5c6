use std::fmt;

#[derive(Debug)]
pub enum AlarmError {
    Transport(String),
    Server(String),
    Document(String),
    NotFound(String),
}

impl fmt::Display for AlarmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlarmError::Transport(e) => write!(f, "AlarmError::Transport: {}", e),
            AlarmError::Server(e) => write!(f, "AlarmError::Server: {}", e),
            AlarmError::Document(e) => write!(f, "AlarmError::Document: {}", e),
            AlarmError::NotFound(e) => write!(f, "AlarmError::NotFound: {}", e),
        }
    }
}
impl From<reqwest::Error> for AlarmError {
    fn from(e: reqwest::Error) -> Self {
        AlarmError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for AlarmError {
    fn from(e: serde_json::Error) -> Self {
        AlarmError::Document(e.to_string())
    }
}
