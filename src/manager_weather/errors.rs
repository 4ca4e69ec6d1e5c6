use std::fmt;

#[derive(Debug)]
pub enum WeatherError {
    Transport(String),
    ProviderStatus(String),
    Parse(String),
    NotFound(String),
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeatherError::Transport(e) => write!(f, "WeatherError::Transport: {}", e),
            WeatherError::ProviderStatus(e) => write!(f, "WeatherError::ProviderStatus: {}", e),
            WeatherError::Parse(e) => write!(f, "WeatherError::Parse: {}", e),
            WeatherError::NotFound(e) => write!(f, "WeatherError::NotFound: {}", e),
        }
    }
}
impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Parse(e.to_string())
    }
}
