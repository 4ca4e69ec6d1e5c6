use std::f64::consts::PI;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Calculates the altitude of the sun above the horizon in degrees.
/// Uses the NOAA general solar position approximation.
/// https://gml.noaa.gov/grad/solcalc/solareqns.PDF
///
/// # Arguments
///
/// * 'lat' - latitude in degrees, north positive
/// * 'long' - longitude in degrees, east positive
/// * 'time' - the moment to calculate for
pub fn solar_altitude(lat: f64, long: f64, time: DateTime<Utc>) -> f64 {
    let hour = time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0;
    let gamma = fractional_year(time.ordinal() as f64, hour, days_in_year(time.year()));

    let decl = declination(gamma);
    let true_solar_time = hour * 60.0 + equation_of_time(gamma) + 4.0 * long;
    let hour_angle = (true_solar_time / 4.0 - 180.0).to_radians();

    let lat = lat.to_radians();
    let cos_zenith = lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle.cos();

    90.0 - cos_zenith.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Fractional year in radians
fn fractional_year(day_of_year: f64, hour: f64, days_in_year: f64) -> f64 {
    2.0 * PI / days_in_year * (day_of_year - 1.0 + (hour - 12.0) / 24.0)
}

/// Equation of time in minutes
fn equation_of_time(gamma: f64) -> f64 {
    229.18 * (0.000075 + 0.001868 * gamma.cos() - 0.032077 * gamma.sin()
        - 0.014615 * (2.0 * gamma).cos() - 0.040849 * (2.0 * gamma).sin())
}

/// Solar declination in radians
fn declination(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos() + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos() + 0.00148 * (3.0 * gamma).sin()
}

fn days_in_year(year: i32) -> f64 {
    if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 { 366.0 } else { 365.0 }
}
