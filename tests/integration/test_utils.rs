//! Shared test utilities for integration tests

use std::path::Path;
use std::sync::{Arc, Mutex};
use vigil::config::MonitorConfig;
use vigil::error::NotifyError;
use vigil::monitor::Monitor;
use vigil::notifier::Notifier;

/// Notifier stub that records every call instead of delivering anything.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded modified-path lists, one entry per notify call.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, modified: &[String]) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(modified.to_vec());
        Ok(())
    }
}

/// Monitor over `root` persisting to `store`, with a recording notifier.
pub fn monitor_with_recorder(root: &Path, store: &Path) -> (Monitor, RecordingNotifier) {
    let config = MonitorConfig {
        root: root.to_path_buf(),
        store_path: store.to_path_buf(),
        interval_secs: 1,
        ..Default::default()
    };
    let recorder = RecordingNotifier::new();
    let monitor = Monitor::new(&config, Box::new(recorder.clone())).unwrap();
    (monitor, recorder)
}
