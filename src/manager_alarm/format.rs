use crate::manager_alarm::models::Alarm;

const DAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const UNSET_DAY: &str = "---";

/// Formats the repeat days of an alarm, e.g. "Mon Tue --- --- Fri --- ---"
///
/// # Arguments
///
/// * 'alarm' - the alarm to format
pub fn formatted_repeat(alarm: &Alarm) -> String {
    alarm.repeat()
        .iter()
        .zip(DAY_ABBREVIATIONS)
        .map(|(set, day)| if *set { day } else { UNSET_DAY })
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Pads single digit values with a leading zero
pub fn leading_zero(value: u8) -> String {
    format!("{:02}", value)
}

/// Clock display of an alarm, "HH:MM"
pub fn formatted_time(alarm: &Alarm) -> String {
    format!("{}:{}", leading_zero(alarm.hour), leading_zero(alarm.minute))
}

pub fn enabled_button_text(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}
