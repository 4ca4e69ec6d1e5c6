use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: u32,
    pub label: String,
    pub hour: u8,
    pub minute: u8,
    pub enabled: bool,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub timestamp: DateTime<Utc>,
}

impl Alarm {
    /// Returns the repeat flags in week order, monday first
    pub fn repeat(&self) -> [bool; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }
}

/// Response document from `getAlarm?id=all`, either a list of alarms or an error
#[derive(Deserialize)]
pub struct AlarmsDocument {
    pub alarms: Option<Vec<Alarm>>,
    pub error: Option<serde_json::Value>,
}
