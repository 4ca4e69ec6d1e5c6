use std::sync::{Mutex, MutexGuard};
use log::warn;
use serde::Serialize;
use crate::manager_weather::models::WeatherSlot;

const MAX_ALERTS: usize = 20;

/// Rendering side of the page, written to by the background managers
pub trait Renderer: Send + Sync {
    /// Shows a freshly resolved weather strip
    fn render_weather(&self, slots: &[WeatherSlot]);

    /// Shows a message the user must see
    fn alert(&self, message: &str);
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct WeatherView {
    pub slots: Vec<WeatherSlot>,
    pub alerts: Vec<String>,
}

/// In-memory view served to the page by the http handlers
#[derive(Default)]
pub struct ViewState {
    view: Mutex<WeatherView>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current weather strip and alerts
    pub fn weather_view(&self) -> WeatherView {
        self.lock_view().clone()
    }

    fn lock_view(&self) -> MutexGuard<'_, WeatherView> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Renderer for ViewState {
    fn render_weather(&self, slots: &[WeatherSlot]) {
        self.lock_view().slots = slots.to_vec();
    }

    fn alert(&self, message: &str) {
        warn!("alert: {}", message);

        let mut view = self.lock_view();
        if view.alerts.len() == MAX_ALERTS {
            view.alerts.remove(0);
        }
        view.alerts.push(message.to_string());
    }
}
