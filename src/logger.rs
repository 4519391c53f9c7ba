//! Structured logging for the catalog and Caja.
//!
//! - Log levels (ERROR, WARN, INFO, DEBUG, TRACE)
//! - JSON lines in production, human-readable lines in development
//! - Optional daily log file with size-based rotation
//! - Redaction of passwords and tokens in audit data
//!
//! Nothing is written until [`init_global_logger`] has run; the `log_*!`
//! macros are no-ops before that.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::config::LoggingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Unknown names fall back to INFO.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub log_to_file: bool,
    pub log_to_stdout: bool,
    pub json_format: bool,
    pub max_file_size_mb: u64,
    pub max_log_files: u32,
}

impl From<&LoggingConfig> for LoggerConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: LogLevel::parse(&config.level),
            log_to_file: config.log_to_file,
            log_to_stdout: config.log_to_stdout,
            json_format: config.json_format,
            max_file_size_mb: config.max_file_size_mb,
            max_log_files: config.max_log_files,
        }
    }
}

pub struct Logger {
    config: LoggerConfig,
    log_dir: Option<PathBuf>,
    current_file: Mutex<Option<BufWriter<File>>>,
    current_file_size: Mutex<u64>,
}

impl Logger {
    /// `log_dir` is only used when `config.log_to_file` is set.
    pub fn init(log_dir: Option<&Path>, config: LoggerConfig) -> Result<Self, String> {
        let log_dir = match (config.log_to_file, log_dir) {
            (true, Some(dir)) => {
                std::fs::create_dir_all(dir)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
                Some(dir.to_path_buf())
            }
            _ => None,
        };

        let logger = Self {
            config,
            log_dir,
            current_file: Mutex::new(None),
            current_file_size: Mutex::new(0),
        };

        if logger.log_dir.is_some() {
            logger.rotate_logs()?;
        }

        Ok(logger)
    }

    fn log_file_path(dir: &Path, index: Option<u32>) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d");
        match index {
            None => dir.join(format!("caja-{}.log", date)),
            Some(i) => dir.join(format!("caja-{}.{}.log", date, i)),
        }
    }

    /// Rotate today's file once it reaches the size limit and reopen it.
    fn rotate_logs(&self) -> Result<(), String> {
        let Some(dir) = self.log_dir.as_deref() else {
            return Ok(());
        };
        let log_path = Self::log_file_path(dir, None);
        let max_size = self.config.max_file_size_mb * 1024 * 1024;

        let file_size = std::fs::metadata(&log_path).map(|m| m.len()).unwrap_or(0);
        if file_size >= max_size && log_path.exists() {
            let oldest = Self::log_file_path(dir, Some(self.config.max_log_files));
            if oldest.exists() {
                let _ = std::fs::remove_file(&oldest);
            }
            for i in (1..self.config.max_log_files).rev() {
                let old_path = Self::log_file_path(dir, Some(i));
                if old_path.exists() {
                    let _ = std::fs::rename(&old_path, Self::log_file_path(dir, Some(i + 1)));
                }
            }
            let _ = std::fs::rename(&log_path, Self::log_file_path(dir, Some(1)));
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| format!("Failed to open log file: {}", e))?;
        let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);

        *self.current_file.lock().map_err(|e| e.to_string())? = Some(BufWriter::new(file));
        *self.current_file_size.lock().map_err(|e| e.to_string())? = file_size;
        Ok(())
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.config.level
    }

    pub fn format_line(&self, entry: &LogEntry) -> String {
        if self.config.json_format {
            serde_json::to_string(entry).unwrap_or_else(|_| "{}".to_string())
        } else {
            format!(
                "{} [{}] [{}] {}{}{}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.target,
                entry.message,
                entry
                    .data
                    .as_ref()
                    .map(|d| format!(" | {}", d))
                    .unwrap_or_default(),
                entry
                    .error
                    .as_ref()
                    .map(|e| format!(" | error: {}", e))
                    .unwrap_or_default()
            )
        }
    }

    fn write(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        let line = self.format_line(&entry);

        if self.config.log_to_stdout {
            match entry.level {
                LogLevel::Error | LogLevel::Warn => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }

        if self.log_dir.is_none() {
            return;
        }
        let needs_rotation = match self.current_file_size.lock() {
            Ok(size) => *size >= self.config.max_file_size_mb * 1024 * 1024,
            Err(_) => false,
        };
        if needs_rotation {
            let _ = self.rotate_logs();
        }
        if let Ok(mut guard) = self.current_file.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writeln!(writer, "{}", line);
                let _ = writer.flush();
                if let Ok(mut size) = self.current_file_size.lock() {
                    *size += line.len() as u64 + 1;
                }
            }
        }
    }

    fn entry(
        level: LogLevel,
        target: &str,
        message: &str,
        data: Option<serde_json::Value>,
        error: Option<&str>,
    ) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level,
            target: target.to_string(),
            message: message.to_string(),
            data,
            error: error.map(String::from),
        }
    }

    pub fn error(&self, target: &str, message: &str, error: Option<&str>) {
        self.write(Self::entry(LogLevel::Error, target, message, None, error));
    }

    pub fn warn(&self, target: &str, message: &str) {
        self.write(Self::entry(LogLevel::Warn, target, message, None, None));
    }

    pub fn info(&self, target: &str, message: &str, data: Option<serde_json::Value>) {
        self.write(Self::entry(LogLevel::Info, target, message, data, None));
    }

    pub fn debug(&self, target: &str, message: &str, data: Option<serde_json::Value>) {
        self.write(Self::entry(LogLevel::Debug, target, message, data, None));
    }

    /// Info-level record of a state-changing action, sensitive fields masked.
    pub fn audit(&self, action: &str, data: &serde_json::Value) {
        let redacted = redact_sensitive_data(data.clone());
        self.write(Self::entry(LogLevel::Info, "AUDIT", action, Some(redacted), None));
    }
}

/// Masks values whose key names a password, token, secret or key.
pub fn redact_sensitive_data(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(key, val)| {
                    let lowered = key.to_lowercase();
                    let sensitive = ["password", "token", "secret", "key"]
                        .iter()
                        .any(|s| lowered.contains(s));
                    if sensitive {
                        (key, serde_json::Value::String("***REDACTED***".to_string()))
                    } else {
                        (key, redact_sensitive_data(val))
                    }
                })
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(redact_sensitive_data).collect())
        }
        other => other,
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Initialize the global logger from the logging section of the config.
pub fn init_global_logger(log_dir: Option<&Path>, config: &LoggingConfig) -> Result<(), String> {
    let logger = Logger::init(log_dir, LoggerConfig::from(config))?;
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| "Logger already initialized".to_string())
}

pub fn get_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

#[macro_export]
macro_rules! log_error {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.error($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $err:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.error($target, $msg, Some(::std::convert::AsRef::<str>::as_ref(&$err)));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.warn($target, $msg);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.info($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.info($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.debug($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.debug($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[macro_export]
macro_rules! log_audit {
    ($action:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.audit($action, $data);
        }
    };
}
