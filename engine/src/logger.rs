use std::sync::OnceLock;

use chrono::Local;
use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Info,
    Debug,
}

impl LogLevel {
    fn tag(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    max_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, max_level: LogLevel) -> Self {
        Self { prefix, max_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }

    fn format_line(&self, timestamp: &str, level: LogLevel, file: &str, line: u32, message: &str) -> String {
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!(
                "[{}][{}][{}][{}:{}] {}",
                timestamp,
                prefix,
                level.tag(),
                file_name,
                line,
                message
            ),
            None => format!("[{}][{}][{}:{}] {}", timestamp, level.tag(), file_name, line, message),
        }
    }

    // stderr keeps stdout free for command output
    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        eprintln!("{}", self.format_line(&timestamp, level, file, line, message));
    }
}

pub fn init_logger(prefix: Option<String>, max_level: LogLevel) {
    LOGGER.get_or_init(|| Logger::new(prefix, max_level));
}

pub fn enabled(level: LogLevel) -> bool {
    LOGGER.get().is_some_and(|logger| logger.enabled(level))
}

/// No-op until `init_logger` has been called.
pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Error, $($arg)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {
        if $crate::logger::enabled($level) {
            $crate::logger::log($level, file!(), line!(), &format!($($arg)*))
        }
    };
}
