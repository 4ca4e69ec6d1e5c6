pub mod errors;
pub mod models;
pub mod demo;
pub mod format;

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use crate::manager_alarm::demo::demo_alarms;
use crate::manager_alarm::errors::AlarmError;
use crate::manager_alarm::models::{Alarm, AlarmsDocument};

/// Where alarm records come from and where edits are sent to
pub trait AlarmSource: Send + Sync {
    /// Fetches all alarms
    fn fetch_alarms(&self) -> impl Future<Output = Result<Vec<Alarm>, AlarmError>> + Send;

    /// Sets the enabled flag of one alarm
    ///
    /// # Arguments
    ///
    /// * 'id' - id of the alarm to edit
    /// * 'enabled' - the new enabled state
    fn edit_enabled(&self, id: u32, enabled: bool) -> impl Future<Output = Result<(), AlarmError>> + Send;
}

/// Struct for talking to the LightUpPi alarm server
pub struct AlarmServer {
    client: Client,
    base_url: String,
}

impl AlarmServer {
    /// Returns an AlarmServer ready for fetching and editing alarms
    ///
    /// # Arguments
    ///
    /// * 'base_url' - base url of the alarm server, e.g. "http://localhost/LightUpPi"
    pub fn new(base_url: &str) -> Result<AlarmServer, AlarmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl AlarmSource for AlarmServer {
    async fn fetch_alarms(&self) -> Result<Vec<Alarm>, AlarmError> {
        let req = self.client
            .get(format!("{}/getAlarm", self.base_url))
            .query(&[("id", "all")])
            .send().await?;

        let status = req.status();
        let json = req.text().await?;

        alarms_response(status, &json)
    }

    async fn edit_enabled(&self, id: u32, enabled: bool) -> Result<(), AlarmError> {
        let req = self.client
            .get(format!("{}/editAlarm", self.base_url))
            .query(&[("id", id.to_string()), ("enabled", enabled.to_string())])
            .send().await?;

        edit_response(id, req.status())
    }
}

/// Turns a `getAlarm` response into alarms, any non-success status is a transport error
///
/// # Arguments
///
/// * 'status' - http status of the response
/// * 'json' - the raw response body
pub fn alarms_response(status: StatusCode, json: &str) -> Result<Vec<Alarm>, AlarmError> {
    if !status.is_success() {
        return Err(AlarmError::Transport(format!("Error while fetching alarms: {}", status)));
    }

    parse_alarms(json)
}

/// Checks the status of an `editAlarm` response
///
/// # Arguments
///
/// * 'id' - id of the edited alarm
/// * 'status' - http status of the response
pub fn edit_response(id: u32, status: StatusCode) -> Result<(), AlarmError> {
    if !status.is_success() {
        return Err(AlarmError::Transport(format!("Error while editing alarm {}: {}", id, status)));
    }

    Ok(())
}

/// Parses the `getAlarm?id=all` document
///
/// A document carrying an `error` field is a server error even if it also has alarms.
///
/// # Arguments
///
/// * 'json' - the raw response body
pub fn parse_alarms(json: &str) -> Result<Vec<Alarm>, AlarmError> {
    let document: AlarmsDocument = serde_json::from_str(json)?;

    if let Some(e) = document.error {
        return Err(AlarmError::Server(e.to_string()));
    }

    let alarms = document.alarms
        .ok_or(AlarmError::Document("missing alarms list".to_string()))?;

    let mut ids = HashSet::new();
    for alarm in alarms.iter() {
        if alarm.hour > 23 || alarm.minute > 59 {
            return Err(AlarmError::Document(
                format!("alarm {} has invalid time {}:{}", alarm.id, alarm.hour, alarm.minute)));
        }
        if !ids.insert(alarm.id) {
            return Err(AlarmError::Document(format!("duplicate alarm id {}", alarm.id)));
        }
    }

    Ok(alarms)
}

struct StoreState {
    alarms: Vec<Alarm>,
    server_error: bool,
    applied_seq: u64,
}

/// Holds the latest alarm list for display
///
/// Every refresh is numbered, and a response is only applied if no newer
/// refresh has been applied before it, so overlapping polls can't roll the
/// list back to older data.
pub struct AlarmStore<S> {
    source: S,
    state: Mutex<StoreState>,
    next_seq: AtomicU64,
}

impl<S: AlarmSource> AlarmStore<S> {
    /// Creates a new AlarmStore with an empty alarm list
    ///
    /// # Arguments
    ///
    /// * 'source' - where to fetch alarms from
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(StoreState {
                alarms: Vec::new(),
                server_error: false,
                applied_seq: 0,
            }),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Returns a copy of the current alarm list
    pub fn alarms(&self) -> Vec<Alarm> {
        self.lock_state().alarms.clone()
    }

    /// Returns the alarm list and the error flag as one consistent pair
    pub fn snapshot(&self) -> (Vec<Alarm>, bool) {
        let state = self.lock_state();
        (state.alarms.clone(), state.server_error)
    }

    /// Fetches the alarms and replaces the held list
    ///
    /// On failure the error flag is set and the demo alarms are held instead.
    /// The fetched result is returned even when it arrived too late to be applied.
    pub async fn refresh(&self) -> Result<Vec<Alarm>, AlarmError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.source.fetch_alarms().await;

        let mut state = self.lock_state();
        if seq < state.applied_seq {
            debug!("discarding stale alarm response #{} (#{} already applied)", seq, state.applied_seq);
            return result;
        }
        state.applied_seq = seq;

        match &result {
            Ok(alarms) => {
                debug!("refreshed {} alarms", alarms.len());
                state.alarms = alarms.clone();
                state.server_error = false;
            }
            Err(e) => {
                warn!("failed to refresh alarms, showing demo data: {}", e);
                state.alarms = demo_alarms();
                state.server_error = true;
            }
        }

        result
    }

    /// Sets the enabled flag of an alarm, then refreshes whatever the outcome
    ///
    /// # Arguments
    ///
    /// * 'id' - id of the alarm to edit
    /// * 'enabled' - the new enabled state
    pub async fn set_enabled(&self, id: u32, enabled: bool) -> Result<(), AlarmError> {
        let edit = self.source.edit_enabled(id, enabled).await;
        if let Err(e) = &edit {
            error!("failed to set alarm {} enabled={}: {}", id, enabled, e);
        }

        // refresh failures are already logged and fall back to demo data
        let _ = self.refresh().await;

        edit
    }

    /// Flips the enabled flag of a held alarm and returns the new state
    ///
    /// # Arguments
    ///
    /// * 'id' - id of the alarm to toggle
    pub async fn toggle(&self, id: u32) -> Result<bool, AlarmError> {
        let enabled = self.lock_state().alarms
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.enabled)
            .ok_or(AlarmError::NotFound(format!("no alarm with id {}", id)))?;

        self.set_enabled(id, !enabled).await?;

        Ok(!enabled)
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
