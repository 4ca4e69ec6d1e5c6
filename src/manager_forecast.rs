use chrono::Utc;
use log::{error, info};
use crate::manager_weather::errors::WeatherError;
use crate::manager_weather::models::ForecastSample;
use crate::manager_weather::{resolve, ForecastSource};
use crate::view::Renderer;

/// Fetches the forecast once and renders the weather strip for the current time
///
/// Any failure is shown to the user as an alert. There is no retry.
///
/// # Arguments
///
/// * 'source' - the forecast provider
/// * 'renderer' - where to render the strip and alerts
pub async fn run_weather<F: ForecastSource, R: Renderer>(source: &F, renderer: &R) {
    match source.fetch().await {
        Ok(series) => render_window(Utc::now().timestamp(), &series, renderer),
        Err(e) => {
            error!("failed to get forecast: {}", e);
            renderer.alert(&alert_message(&e));
        }
    }
}

/// Resolves the window for `now` out of a fetched series and renders it
///
/// # Arguments
///
/// * 'now' - epoch seconds
/// * 'series' - the forecast series
/// * 'renderer' - where to render the strip and alerts
pub fn render_window<R: Renderer>(now: i64, series: &[ForecastSample], renderer: &R) {
    match resolve(now, series) {
        Ok(slots) => {
            info!("rendering weather strip from {}", slots[0].time);
            renderer.render_weather(&slots);
        }
        Err(e) => {
            error!("failed to resolve weather window: {}", e);
            renderer.alert(&alert_message(&e));
        }
    }
}

fn alert_message(e: &WeatherError) -> String {
    match e {
        WeatherError::Transport(_) => "Something went wrong fetching the weather data.".to_string(),
        WeatherError::Parse(_) => "Error parsing the JSON string from server.".to_string(),
        WeatherError::ProviderStatus(m) => m.clone(),
        WeatherError::NotFound(_) => "No weather forecast available for the current time.".to_string(),
    }
}
