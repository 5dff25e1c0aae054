//! A `log` backend that keeps records in memory.
//!
//! Records are tagged with the emitting thread so that tests running in
//! parallel only see their own output.

use std::sync::{Mutex, Once, PoisonError};
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

#[derive(Debug)]
pub struct RecordingLogger {
    records: Mutex<Vec<(ThreadId, CapturedRecord)>>,
}

static LOGGER: RecordingLogger = RecordingLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

impl RecordingLogger {
    /// Install the process-wide recorder (once) and return it.
    ///
    /// If another logger was installed first nothing is captured.
    pub fn install() -> &'static RecordingLogger {
        INSTALL.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Trace);
            }
        });
        &LOGGER
    }

    /// Records emitted by the calling thread, oldest first.
    pub fn records(&self) -> Vec<CapturedRecord> {
        let me = thread::current().id();
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(id, _)| *id == me)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Messages the calling thread logged at `warn`.
    pub fn warnings(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == Level::Warn)
            .map(|r| r.message)
            .collect()
    }

    /// Drop the calling thread's records.
    pub fn clear(&self) {
        let me = thread::current().id();
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _)| *id != me);
    }
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let captured = CapturedRecord {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((thread::current().id(), captured));
    }

    fn flush(&self) {}
}
