use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};

/// Status code of a provider document, sent either as a string or as a number
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Code {
    Number(i64),
    Text(String),
}

impl Code {
    pub fn is_ok(&self) -> bool {
        match self {
            Code::Number(n) => *n == 200,
            Code::Text(s) => s.trim() == "200",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Code::Number(n) => write!(f, "{}", n),
            Code::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Deserialize)]
pub struct Main {
    pub temp: f64,
}

#[derive(Deserialize)]
pub struct Condition {
    pub icon: String,
}

#[derive(Deserialize)]
pub struct FullSample {
    pub dt: i64,
    pub main: Main,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub cod: Code,
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub list: Vec<FullSample>,
}

/// One 3-hour forecast data point
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature: f64,
    pub icon_code: String,
}

/// Weather glyphs available on the page
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Rain,
    Snow,
    Fog,
}

/// One slot of the weather strip
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSlot {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub time: DateTime<Utc>,
    pub icon: Option<DisplayIcon>,
    pub temperature: f64,
}
