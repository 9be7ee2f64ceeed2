// src/log.rs
//
// Sink for the `log` facade: `[HH:MM:SS.mmm][LEVEL] message` lines, time
// measured from the first log call. Appended to a file and optionally
// mirrored to stderr.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{LevelFilter, Metadata, Record};

use crate::config::consts::LOG_FILE;

static START: OnceLock<Instant> = OnceLock::new();
static LOGGER: OnceLock<FileLogger> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub fn format_line(elapsed_ms: u128, level: log::Level, msg: &str) -> String {
    format!("[{}][{level}] {msg}\n", fmt_elapsed(elapsed_ms))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogTarget {
    /// `None` disables the file.
    pub file: Option<PathBuf>,
    pub stderr: bool,
}

impl Default for LogTarget {
    fn default() -> Self {
        Self { file: Some(PathBuf::from(LOG_FILE)), stderr: false }
    }
}

struct FileLogger {
    target: LogTarget,
    level: LevelFilter,
    lock: Mutex<()>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(start().elapsed().as_millis(), record.level(), &record.args().to_string());

        if let Ok(_guard) = self.lock.lock() {
            if let Some(path) = &self.target.file {
                if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                    let _ = file.write_all(line.as_bytes());
                }
            }
            if self.target.stderr {
                eprint!("{line}");
            }
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Later calls keep the first configuration.
pub fn init(target: LogTarget, level: LevelFilter) {
    start();
    if let Some(Some(parent)) = target.file.as_ref().map(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            let _ = crate::file::ensure_directory(parent);
        }
    }
    let logger = LOGGER.get_or_init(|| FileLogger { target, level, lock: Mutex::new(()) });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
        assert_eq!(format_line(1_500, log::Level::Warn, "hi"), "[00:00:01.500][WARN] hi\n");
    }
}
