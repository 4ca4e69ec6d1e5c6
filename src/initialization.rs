use std::env;
use std::fs;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct AlarmServer {
    pub base_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct Weather {
    pub base_url: String,
    pub city_id: u64,
    pub api_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub web_server: WebServer,
    pub alarm_server: AlarmServer,
    pub weather: Weather,
    pub general: General,
}

fn default_poll_interval() -> u64 { 2 }

/// Loads the configuration file and sets up logging
///
/// The config file path is given with the `--config=<path>` argument and
/// defaults to `config.toml` in the working directory.
pub fn config() -> Result<Config, ConfigError> {
    let config_path = config_path(env::args());
    let toml = fs::read_to_string(&config_path)
        .map_err(|e| ConfigError(format!("failed to read {}: {}", config_path, e)))?;

    let config = parse_config(&toml)?;
    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;

    Ok(config)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration in toml format
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.alarm_server.poll_interval_secs == 0 {
        return Err(ConfigError::from("poll_interval_secs must be greater than zero"));
    }

    Ok(config)
}

/// Picks the config path out of the program arguments
///
/// # Arguments
///
/// * 'args' - program arguments, including the program name
fn config_path<I: Iterator<Item = String>>(args: I) -> String {
    args.skip(1)
        .find_map(|a| a.strip_prefix("--config=").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        [web_server]
        bind_address = "127.0.0.1"
        bind_port = 8080

        [alarm_server]
        base_url = "http://localhost/LightUpPi"

        [weather]
        base_url = "http://api.openweathermap.org/data/2.5/forecast"
        city_id = 2633691
        latitude = 52.5833
        longitude = 2.1333

        [general]
        log_path = "/tmp/lightuppi.log"
        log_level = "info"
    "#;

    #[test]
    fn parses_config_with_defaults() {
        let config = parse_config(CONFIG).unwrap();

        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.alarm_server.poll_interval_secs, 2);
        assert_eq!(config.weather.city_id, 2633691);
        assert!(config.weather.api_key.is_none());
        assert!(!config.general.log_to_stdout);
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let toml = CONFIG.replace(
            "base_url = \"http://localhost/LightUpPi\"",
            "base_url = \"http://localhost/LightUpPi\"\npoll_interval_secs = 0",
        );

        assert!(parse_config(&toml).is_err());
    }

    #[test]
    fn rejects_missing_section() {
        assert!(parse_config("[web_server]\nbind_address = \"x\"\nbind_port = 1\n").is_err());
    }

    #[test]
    fn finds_config_argument() {
        let args = vec!["lightuppi-web".to_string(), "--config=/etc/lightuppi.toml".to_string()];
        assert_eq!(config_path(args.into_iter()), "/etc/lightuppi.toml");

        let args = vec!["lightuppi-web".to_string()];
        assert_eq!(config_path(args.into_iter()), DEFAULT_CONFIG_PATH);
    }
}
