//! File logging. The TUI owns the terminal, so log records go to a file.

use anyhow::{Context, Result};
use clap::ValueEnum;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Install a global logger writing to `path`, truncating any previous log
pub fn init_logging(path: &Path, level: LogLevel) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    WriteLogger::init(level.into(), Config::default(), file)
        .context("Failed to install logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }

    #[test]
    fn test_init_logging_writes_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("snake.log");

        init_logging(&path, LogLevel::Info).unwrap();
        log::info!("hello from the log test");
        log::debug!("filtered out");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello from the log test"));
        assert!(!contents.contains("filtered out"));

        // Only one global logger per process
        assert!(init_logging(&dir.path().join("second.log"), LogLevel::Info).is_err());
    }
}
