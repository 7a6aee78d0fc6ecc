use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use crate::client::{get_client, Integration};

pub const APP_START_TRACKING_NAME: &str = "AppStartTracking";

/// Accepts app-start timing from the root profiler.
///
/// Typed capability replacing a lookup of the tracing integration by name:
/// a client either has a registered integration advertising this, or
/// app-start timestamps have nowhere to go and are dropped.
pub trait MountTimestampSink: Send + Sync {
    /// Milliseconds since the Unix epoch, recorded just before the root
    /// component is constructed.
    fn set_root_component_first_constructor_call_timestamp_ms(&self, timestamp_ms: f64);

    /// Seconds since the Unix epoch, taken from the finalized mount span.
    fn set_app_start_end_timestamp(&self, timestamp_seconds: f64);
}

/// Forwards the finalized app-start end timestamp to the active client's
/// mount-timestamp sink. Silent no-op without a client or a sink.
pub fn set_app_start_end_timestamp(timestamp_seconds: f64) {
    if let Some(sink) = get_client().and_then(|client| client.mount_timestamps()) {
        sink.set_app_start_end_timestamp(timestamp_seconds);
    }
}

/// One-shot latch deduplicating the app-start report across remounts.
///
/// Hosts normally share [`AppStartTracker::global`]; tests inject their own
/// instance so state resets without a process restart. The latch is consumed
/// by the first report attempt, even one skipped because no client existed.
#[derive(Debug, Default)]
pub struct AppStartTracker {
    reported: AtomicBool,
}

impl AppStartTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> Arc<AppStartTracker> {
        static GLOBAL: LazyLock<Arc<AppStartTracker>> =
            LazyLock::new(|| Arc::new(AppStartTracker::new()));
        Arc::clone(&GLOBAL)
    }

    pub fn is_reported(&self) -> bool {
        self.reported.load(Ordering::SeqCst)
    }

    pub fn mark_reported(&self) {
        self.reported.store(true, Ordering::SeqCst);
    }
}

/// Bookkeeping integration recording app-start timestamps.
///
/// Stands in for the full tracing integration: it stores the two app-start
/// timestamps and makes them readable, nothing more. Span assembly and
/// transport live outside this crate.
#[derive(Clone, Default)]
pub struct AppStartTracking {
    state: Arc<AppStartTimestamps>,
}

#[derive(Debug, Default)]
struct AppStartTimestamps {
    root_constructor_call_ms: Mutex<Option<f64>>,
    app_start_end_seconds: Mutex<Option<f64>>,
}

impl AppStartTracking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_constructor_call_timestamp_ms(&self) -> Option<f64> {
        *self.state.root_constructor_call_ms.lock().unwrap()
    }

    pub fn app_start_end_timestamp(&self) -> Option<f64> {
        *self.state.app_start_end_seconds.lock().unwrap()
    }
}

impl Integration for AppStartTracking {
    fn name(&self) -> &str {
        APP_START_TRACKING_NAME
    }

    fn mount_timestamps(&self) -> Option<Arc<dyn MountTimestampSink>> {
        Some(Arc::clone(&self.state) as Arc<dyn MountTimestampSink>)
    }
}

impl MountTimestampSink for AppStartTimestamps {
    fn set_root_component_first_constructor_call_timestamp_ms(&self, timestamp_ms: f64) {
        *self.root_constructor_call_ms.lock().unwrap() = Some(timestamp_ms);
    }

    fn set_app_start_end_timestamp(&self, timestamp_seconds: f64) {
        *self.app_start_end_seconds.lock().unwrap() = Some(timestamp_seconds);
    }
}
