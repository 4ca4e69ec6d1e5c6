pub mod errors;
pub mod models;

use std::future::Future;
use std::time::Duration;
use chrono::DateTime;
use log::warn;
use reqwest::{Client, StatusCode};
use crate::manager_weather::errors::WeatherError;
use crate::manager_weather::models::{DisplayIcon, ForecastSample, FullForecast, WeatherSlot};

/// Spacing between forecast samples in seconds
const BUCKET_SECS: i64 = 3 * 60 * 60;

/// Number of slots in the weather strip
pub const WINDOW_SLOTS: usize = 8;

/// Where the forecast series comes from
pub trait ForecastSource: Send + Sync {
    /// Fetches the whole forecast series, ascending in time
    fn fetch(&self) -> impl Future<Output = Result<Vec<ForecastSample>, WeatherError>> + Send;
}

/// Struct for fetching 3-hour forecasts from OpenWeatherMap
pub struct OpenWeatherMap {
    client: Client,
    base_url: String,
    city_id: u64,
    api_key: Option<String>,
}

impl OpenWeatherMap {
    /// Returns an OpenWeatherMap struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'base_url' - url of the forecast endpoint
    /// * 'city_id' - OpenWeatherMap city id
    /// * 'api_key' - optional api key, sent as `appid`
    pub fn new(
        base_url: &str,
        city_id: u64,
        api_key: Option<String>,
    ) -> Result<OpenWeatherMap, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            city_id,
            api_key,
        })
    }
}

impl ForecastSource for OpenWeatherMap {
    /// Retrieves the forecast series for the configured city in metric units
    ///
    async fn fetch(&self) -> Result<Vec<ForecastSample>, WeatherError> {
        let mut query = vec![
            ("id", self.city_id.to_string()),
            ("units", "metric".to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("appid", key.clone()));
        }

        let req = self.client
            .get(&self.base_url)
            .query(&query)
            .send().await?;

        let status = req.status();
        let json = req.text().await?;

        forecast_response(status, &json)
    }
}

/// Turns a forecast response into samples
///
/// The provider explains most failures in a json body carrying `cod`, so a
/// failed status only becomes a transport error when the body isn't such a document.
///
/// # Arguments
///
/// * 'status' - http status of the response
/// * 'json' - the raw response body
pub fn forecast_response(status: StatusCode, json: &str) -> Result<Vec<ForecastSample>, WeatherError> {
    match parse_forecast(json) {
        Err(WeatherError::Parse(_)) if !status.is_success() => {
            Err(WeatherError::Transport(format!("Error while fetching forecast: {}", status)))
        }
        result => result,
    }
}

/// Parses a forecast document into samples
///
/// # Arguments
///
/// * 'json' - the raw response body
pub fn parse_forecast(json: &str) -> Result<Vec<ForecastSample>, WeatherError> {
    let forecast: FullForecast = serde_json::from_str(json)?;

    if !forecast.cod.is_ok() {
        let message = forecast.message
            .map(|m| match m {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_default();
        return Err(WeatherError::ProviderStatus(format!("Error {} ({})", forecast.cod, message)));
    }

    let samples = forecast.list
        .into_iter()
        .map(|s| ForecastSample {
            timestamp: s.dt,
            temperature: s.main.temp,
            icon_code: s.weather.into_iter().next().map(|c| c.icon).unwrap_or_default(),
        })
        .collect();

    Ok(samples)
}

/// Returns the 3-hour boundary the weather strip starts at
///
/// That is the next boundary after `now`, or the one after that when `now`
/// is past the middle of its bucket.
///
/// # Arguments
///
/// * 'now' - epoch seconds
pub fn rounded_boundary(now: i64) -> i64 {
    let rem = now.rem_euclid(BUCKET_SECS);
    let mut rounded = now - rem + BUCKET_SECS;
    if rem > BUCKET_SECS / 2 {
        rounded += BUCKET_SECS;
    }

    rounded
}

/// Resolves the weather strip for the given time
///
/// Scans the series forward for the sample exactly at the rounded boundary and
/// returns it with the seven samples that follow.
///
/// # Arguments
///
/// * 'now' - epoch seconds
/// * 'series' - ascending forecast samples
pub fn resolve(now: i64, series: &[ForecastSample]) -> Result<Vec<WeatherSlot>, WeatherError> {
    let rounded = rounded_boundary(now);

    let start = series.iter()
        .take_while(|s| s.timestamp <= rounded)
        .position(|s| s.timestamp == rounded)
        .ok_or(WeatherError::NotFound(format!("no forecast sample at {}", rounded)))?;

    let window = series.get(start..start + WINDOW_SLOTS)
        .ok_or(WeatherError::NotFound(
            format!("only {} forecast samples from {}", series.len() - start, rounded)))?;

    window.iter()
        .map(|s| {
            let time = DateTime::from_timestamp(s.timestamp, 0)
                .ok_or(WeatherError::Parse(format!("timestamp out of range: {}", s.timestamp)))?;
            Ok(WeatherSlot {
                time,
                icon: display_icon(&s.icon_code),
                temperature: s.temperature,
            })
        })
        .collect()
}

/// Maps a provider icon code to a display icon
///
/// # Arguments
///
/// * 'code' - OpenWeatherMap icon code, e.g. "10n"
pub fn display_icon(code: &str) -> Option<DisplayIcon> {
    match code {
        "01d" => Some(DisplayIcon::ClearDay),
        "01n" => Some(DisplayIcon::ClearNight),
        "02d" => Some(DisplayIcon::PartlyCloudyDay),
        "02n" => Some(DisplayIcon::PartlyCloudyNight),
        "03d" | "03n" | "04d" | "04n" => Some(DisplayIcon::Cloudy),
        "09d" | "09n" | "10d" | "10n" | "11d" | "11n" => Some(DisplayIcon::Rain),
        "13d" | "13n" => Some(DisplayIcon::Snow),
        "50d" | "50n" => Some(DisplayIcon::Fog),
        _ => {
            warn!("icon {} not recognised", code);
            None
        }
    }
}
