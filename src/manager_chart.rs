use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::Serialize;
use serde_with::{serde_as, TimestampSeconds};
use crate::manager_alarm::models::Alarm;
use crate::solar_altitude::solar_altitude;

const CHART_HOURS: i64 = 24;

#[serde_as]
#[derive(Serialize, Debug)]
pub struct AltitudePoint {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub time: DateTime<Utc>,
    /// wall clock minute of day in the chart's zone, the axis the alarm markers use
    pub minute_of_day: u16,
    pub altitude: f64,
}

/// Data behind the weather and solar altitude chart
#[serde_as]
#[derive(Serialize, Debug)]
pub struct SunChart {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub from: DateTime<Utc>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub to: DateTime<Utc>,
    pub altitude: Vec<AltitudePoint>,
    pub alarm_markers: Vec<u16>,
}

/// Builds the chart for the 24 hours starting at `now`
///
/// Alarm markers are wall clock times, so every altitude point also carries its
/// wall clock minute in `tz` to place both on the same axis.
///
/// # Arguments
///
/// * 'now' - start of the chart domain
/// * 'tz' - zone the alarm clock runs in
/// * 'lat' - latitude of the location
/// * 'long' - longitude of the location
/// * 'alarms' - alarms to mark on the chart, only enabled ones are used
pub fn sun_chart<Tz: TimeZone>(
    now: DateTime<Utc>,
    tz: &Tz,
    lat: f64,
    long: f64,
    alarms: &[Alarm],
) -> SunChart {
    let altitude = (0..=CHART_HOURS)
        .map(|h| {
            let time = now + TimeDelta::hours(h);
            let local = time.with_timezone(tz);
            AltitudePoint {
                time,
                minute_of_day: (local.hour() * 60 + local.minute()) as u16,
                altitude: solar_altitude(lat, long, time),
            }
        })
        .collect();

    SunChart {
        from: now,
        to: now + TimeDelta::hours(CHART_HOURS),
        altitude,
        alarm_markers: alarm_markers(alarms),
    }
}

/// Minutes of day of the enabled alarms, sorted and without duplicates
///
/// # Arguments
///
/// * 'alarms' - alarms to mark
pub fn alarm_markers(alarms: &[Alarm]) -> Vec<u16> {
    let mut markers: Vec<u16> = alarms.iter()
        .filter(|a| a.enabled)
        .map(|a| a.hour as u16 * 60 + a.minute as u16)
        .collect();
    markers.sort_unstable();
    markers.dedup();

    markers
}
