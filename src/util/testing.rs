//! Test support: logging setup and a recording volume-control double

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::VolumeStatus;
use crate::infrastructure::traits::{VolumeControl, VolumeHandle};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {} (RUST_LOG={:?})", e, env::var("RUST_LOG"));
    }
}

/// What the fake volume answers.
#[derive(Debug, Clone, Copy)]
pub enum Scripted {
    Status(u32),
    OpenError(i32),
    QueryError(i32),
}

/// Counts of calls made against a [`RecordingVolumeControl`].
#[derive(Debug, Default)]
pub struct VolumeCalls {
    opens: AtomicUsize,
    queries: AtomicUsize,
    releases: AtomicUsize,
    devices: Mutex<Vec<PathBuf>>,
}

impl VolumeCalls {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Device paths passed to `open`, in call order.
    pub fn devices(&self) -> Vec<PathBuf> {
        self.devices.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

/// Volume control double that answers with a scripted outcome and records calls.
#[derive(Debug)]
pub struct RecordingVolumeControl {
    outcome: Scripted,
    calls: Arc<VolumeCalls>,
}

impl RecordingVolumeControl {
    pub fn new(outcome: Scripted) -> Self {
        Self {
            outcome,
            calls: Arc::new(VolumeCalls::default()),
        }
    }

    pub fn with_status(word: u32) -> Self {
        Self::new(Scripted::Status(word))
    }

    pub fn calls(&self) -> Arc<VolumeCalls> {
        self.calls.clone()
    }
}

impl VolumeControl for RecordingVolumeControl {
    fn open(&self, device: &Path) -> io::Result<Box<dyn VolumeHandle>> {
        self.calls.opens.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut devices) = self.calls.devices.lock() {
            devices.push(device.to_path_buf());
        }
        if let Scripted::OpenError(code) = self.outcome {
            return Err(io::Error::from_raw_os_error(code));
        }
        Ok(Box::new(RecordingHandle {
            outcome: self.outcome,
            calls: self.calls.clone(),
        }))
    }
}

struct RecordingHandle {
    outcome: Scripted,
    calls: Arc<VolumeCalls>,
}

impl VolumeHandle for RecordingHandle {
    fn query_status(&mut self) -> io::Result<VolumeStatus> {
        self.calls.queries.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Scripted::QueryError(code) => Err(io::Error::from_raw_os_error(code)),
            Scripted::Status(word) => Ok(VolumeStatus(word)),
            Scripted::OpenError(code) => Err(io::Error::from_raw_os_error(code)),
        }
    }
}

impl Drop for RecordingHandle {
    fn drop(&mut self) {
        self.calls.releases.fetch_add(1, Ordering::SeqCst);
    }
}
