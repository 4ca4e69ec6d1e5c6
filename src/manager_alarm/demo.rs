use chrono::DateTime;
use crate::manager_alarm::models::Alarm;

/// Returns the fixed demo alarms shown whenever the alarm server can't be used,
/// so that the page never renders an empty alarm list.
pub fn demo_alarms() -> Vec<Alarm> {
    vec![
        Alarm {
            id: 1,
            label: "Fake default alarm 1".to_string(),
            hour: 7,
            minute: 30,
            enabled: true,
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            timestamp: DateTime::from_timestamp(1431391253, 0).unwrap_or_default(),
        },
        Alarm {
            id: 2,
            label: "Fake default alarm 2".to_string(),
            hour: 10,
            minute: 45,
            enabled: true,
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: true,
            sunday: true,
            timestamp: DateTime::from_timestamp(1431211548, 0).unwrap_or_default(),
        },
    ]
}
