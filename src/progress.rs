// src/progress.rs
/// Lightweight progress reporting used by the batch runners (crawl/analyse).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One league season crawled, or one championship file analysed.
    fn item_done(&mut self, _label: &str) {}

    /// The item was skipped for a recoverable reason.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints `[done/total] label` lines to stderr.
#[derive(Default)]
pub struct StderrProgress {
    total: usize,
    done: usize,
}

impl StderrProgress {
    pub fn new() -> Self { Self::default() }

    fn counter(&mut self) -> String {
        self.done += 1;
        if self.total > 0 {
            format!("[{}/{}]", self.done, self.total)
        } else {
            format!("[{}]", self.done)
        }
    }
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        let c = self.counter();
        eprintln!("{c} {label}");
    }

    fn item_failed(&mut self, label: &str, reason: &str) {
        let c = self.counter();
        eprintln!("{c} {label}: {reason}");
    }

    fn finish(&mut self) {
        eprintln!("Done: {} of {} items", self.done, self.total);
    }
}

/// Records every call; handy in tests.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub logs: Vec<String>,
    pub done: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.logs.push(s!(msg)); }
    fn item_done(&mut self, label: &str) { self.done.push(s!(label)); }
    fn item_failed(&mut self, label: &str, reason: &str) {
        self.failed.push((s!(label), s!(reason)));
    }
    fn finish(&mut self) { self.finished = true; }
}
