mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_alarm;
mod manager_weather;
mod manager_polling;
mod manager_forecast;
mod manager_chart;
mod solar_altitude;
mod themes;
mod view;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::handlers::configure;
use crate::initialization::config;
use crate::manager_alarm::{AlarmServer, AlarmStore};
use crate::manager_forecast::run_weather;
use crate::manager_polling::run_alarm_polling;
use crate::manager_weather::OpenWeatherMap;
use crate::view::ViewState;

struct AppState<S> {
    alarms: Arc<AlarmStore<S>>,
    view: Arc<ViewState>,
    latitude: f64,
    longitude: f64,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    info!("starting with alarm server {} and forecast city {}",
        config.alarm_server.base_url, config.weather.city_id);

    let store = Arc::new(AlarmStore::new(AlarmServer::new(&config.alarm_server.base_url)?));
    let view = Arc::new(ViewState::new());

    tokio::spawn(run_alarm_polling(store.clone(), config.alarm_server.poll_interval_secs));

    let owm = OpenWeatherMap::new(
        &config.weather.base_url, config.weather.city_id, config.weather.api_key.clone())?;
    let weather_view = view.clone();
    tokio::spawn(async move {
        run_weather(&owm, weather_view.as_ref()).await;
    });

    let latitude = config.weather.latitude;
    let longitude = config.weather.longitude;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                alarms: store.clone(),
                view: view.clone(),
                latitude,
                longitude,
            }))
            .configure(configure::<AlarmServer>)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
