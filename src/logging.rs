use std::str::FromStr;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use crate::errors::ConfigError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {M} - {m}{n}";
const MAX_LOG_SIZE: u64 = 3 * 1024 * 1024;
const ARCHIVED_LOGS: u32 = 5;

/// Sets up the logger with a rolling file appender and, optionally, a console appender
///
/// # Arguments
///
/// * 'log_path' - path to the active log file, archives get a numeric suffix
/// * 'log_level' - root log level, e.g. "info" or "debug"
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: &str, log_level: &str, log_to_stdout: bool) -> Result<(), ConfigError> {
    let level = LevelFilter::from_str(log_level)
        .map_err(|e| ConfigError(format!("invalid log level '{}': {}", log_level, e)))?;

    let roller = FixedWindowRoller::builder()
        .build(&format!("{}.{{}}", log_path), ARCHIVED_LOGS)
        .map_err(|e| ConfigError(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(MAX_LOG_SIZE)), Box::new(roller));

    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_path, Box::new(policy))?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(level))?;
    log4rs::init_config(config)?;

    Ok(())
}
