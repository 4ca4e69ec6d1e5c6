use actix_web::{web, HttpResponse, Responder};
use chrono::{Local, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::manager_alarm::errors::AlarmError;
use crate::manager_alarm::format::{enabled_button_text, formatted_repeat, formatted_time};
use crate::manager_alarm::models::Alarm;
use crate::manager_alarm::AlarmSource;
use crate::manager_chart::sun_chart;
use crate::themes::{find_theme, THEMES};
use crate::view::Renderer;

#[derive(Deserialize, Debug)]
struct ToggleParams {
    id: u32,
}

#[derive(Deserialize, Debug)]
struct ThemeParams {
    theme: String,
}

/// One alarm panel as shown on the page
#[derive(Serialize)]
struct AlarmPanel {
    #[serde(flatten)]
    alarm: Alarm,
    time: String,
    repeat: String,
    button_text: &'static str,
}

#[derive(Serialize)]
struct AlarmsResponse {
    server_error: bool,
    alarms: Vec<AlarmPanel>,
}

/// Registers all view routes for an app backed by the given alarm source
pub fn configure<S: AlarmSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/alarms", web::get().to(alarms::<S>))
        .route("/alarms/toggle", web::get().to(toggle_alarm::<S>))
        .route("/weather", web::get().to(weather::<S>))
        .route("/theme", web::get().to(theme::<S>))
        .route("/themes", web::get().to(themes))
        .route("/chart", web::get().to(chart::<S>));
}

fn alarms_response(alarms: Vec<Alarm>, server_error: bool) -> AlarmsResponse {
    let alarms = alarms.into_iter()
        .map(|alarm| AlarmPanel {
            time: formatted_time(&alarm),
            repeat: formatted_repeat(&alarm),
            button_text: enabled_button_text(alarm.enabled),
            alarm,
        })
        .collect();

    AlarmsResponse { server_error, alarms }
}

async fn alarms<S: AlarmSource + 'static>(data: web::Data<AppState<S>>) -> impl Responder {
    let (alarms, server_error) = data.alarms.snapshot();

    HttpResponse::Ok().json(alarms_response(alarms, server_error))
}

async fn toggle_alarm<S: AlarmSource + 'static>(
    params: web::Query<ToggleParams>,
    data: web::Data<AppState<S>>,
) -> impl Responder {
    info!("{:?}", params);

    let result = data.alarms.toggle(params.id).await;
    let (alarms, server_error) = data.alarms.snapshot();
    let body = alarms_response(alarms, server_error);

    match result {
        Ok(_) => HttpResponse::Ok().json(body),
        Err(AlarmError::NotFound(e)) => HttpResponse::NotFound().body(e),
        Err(e) => {
            error!("failed to toggle alarm {}: {}", params.id, e);
            HttpResponse::BadGateway().json(body)
        }
    }
}

async fn weather<S: AlarmSource + 'static>(data: web::Data<AppState<S>>) -> impl Responder {
    HttpResponse::Ok().json(data.view.weather_view())
}

async fn theme<S: AlarmSource + 'static>(
    params: web::Query<ThemeParams>,
    data: web::Data<AppState<S>>,
) -> impl Responder {
    info!("{:?}", params);

    match find_theme(&params.theme) {
        Ok(theme) => HttpResponse::Ok().json(theme),
        Err(e) => {
            let message = format!("Theme '{}' is not available.", params.theme);
            error!("{}", e);
            data.view.alert(&message);
            HttpResponse::NotFound().body(message)
        }
    }
}

async fn themes() -> impl Responder {
    HttpResponse::Ok().json(THEMES)
}

async fn chart<S: AlarmSource + 'static>(data: web::Data<AppState<S>>) -> impl Responder {
    let alarms = data.alarms.alarms();

    HttpResponse::Ok().json(sun_chart(Utc::now(), &Local, data.latitude, data.longitude, &alarms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{test, App};
    use actix_web::http::StatusCode;
    use serde_json::Value;
    use crate::manager_alarm::tests::{alarm, FakeSource};
    use crate::manager_alarm::AlarmStore;
    use crate::view::ViewState;

    async fn state(source: FakeSource) -> web::Data<AppState<FakeSource>> {
        let store = Arc::new(AlarmStore::new(source));
        let _ = store.refresh().await;

        web::Data::new(AppState {
            alarms: store,
            view: Arc::new(ViewState::new()),
            latitude: 52.5833,
            longitude: 2.1333,
        })
    }

    #[actix_web::test]
    async fn lists_alarm_panels() {
        let data = state(FakeSource::with_alarms(vec![alarm(1, 7, 5, true)])).await;
        let app = test::init_service(App::new().app_data(data).configure(configure::<FakeSource>)).await;

        let req = test::TestRequest::get().uri("/alarms").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["server_error"], false);
        assert_eq!(body["alarms"][0]["id"], 1);
        assert_eq!(body["alarms"][0]["time"], "07:05");
        assert_eq!(body["alarms"][0]["repeat"], "Mon --- Wed --- Fri --- ---");
        assert_eq!(body["alarms"][0]["button_text"], "Enabled");
        assert_eq!(body["alarms"][0]["timestamp"], 1431391253);
    }

    #[actix_web::test]
    async fn lists_demo_alarms_on_server_error() {
        let data = state(FakeSource::failing()).await;
        let app = test::init_service(App::new().app_data(data).configure(configure::<FakeSource>)).await;

        let req = test::TestRequest::get().uri("/alarms").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["server_error"], true);
        assert_eq!(body["alarms"].as_array().unwrap().len(), 2);
        assert_eq!(body["alarms"][1]["label"], "Fake default alarm 2");
    }

    #[actix_web::test]
    async fn toggles_alarm() {
        let data = state(FakeSource::with_alarms(vec![alarm(1, 7, 0, true)])).await;
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(configure::<FakeSource>)).await;

        let req = test::TestRequest::get().uri("/alarms/toggle?id=1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["alarms"][0]["enabled"], false);
        assert_eq!(body["alarms"][0]["button_text"], "Disabled");
        assert!(!data.alarms.alarms()[0].enabled);

        let req = test::TestRequest::get().uri("/alarms/toggle?id=7").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn failed_toggle_is_bad_gateway() {
        let mut source = FakeSource::with_alarms(vec![alarm(1, 7, 0, true)]);
        source.fail_edits = true;
        let data = state(source).await;
        let app = test::init_service(App::new().app_data(data).configure(configure::<FakeSource>)).await;

        let req = test::TestRequest::get().uri("/alarms/toggle?id=1").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn unknown_theme_raises_alert() {
        let data = state(FakeSource::with_alarms(Vec::new())).await;
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(configure::<FakeSource>)).await;

        let req = test::TestRequest::get().uri("/theme?theme=slate").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["css_url"], "//bootswatch.com/slate/bootstrap.css");

        let req = test::TestRequest::get().uri("/theme?theme=neon").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/weather").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["alerts"][0], "Theme 'neon' is not available.");
        assert_eq!(body["slots"].as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn chart_marks_enabled_alarms() {
        let data = state(FakeSource::with_alarms(vec![alarm(1, 7, 30, true), alarm(2, 9, 0, false)])).await;
        let app = test::init_service(App::new().app_data(data).configure(configure::<FakeSource>)).await;

        let req = test::TestRequest::get().uri("/chart").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["alarm_markers"], serde_json::json!([450]));
        assert_eq!(body["altitude"].as_array().unwrap().len(), 25);
    }
}
