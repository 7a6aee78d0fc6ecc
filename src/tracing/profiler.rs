use std::sync::{Arc, LazyLock};

use crate::client::get_client;
use crate::integrations::create_integration;
use crate::logger::Logger;
use crate::tracing::app_start::{set_app_start_end_timestamp, AppStartTracker};
use crate::util::timestamp_in_seconds;

pub const APP_START_PROFILER_NAME: &str = "AppStartProfiler";

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("sentinel/tracing"));

/// Timing span covering the root component's mount, finalized by the host
/// profiler once mounting completes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MountSpan {
    /// Finalized end of the mount interval, seconds since the Unix epoch.
    /// `None` while the span is still in flight.
    pub timestamp: Option<f64>,
}

/// Lifecycle seam over the host UI framework's root profiler.
///
/// The app-start profiler wraps an implementation of this trait instead of
/// inheriting from a component base class: it delegates the host's own mount
/// behavior through [`on_mount`](MountProfiler::on_mount) and only reads the
/// resulting span, never owning its lifecycle.
pub trait MountProfiler {
    /// The host profiler's own mount behavior. Runs before any reporting.
    fn on_mount(&mut self);

    /// The mount span tracked by the host profiler, if it has one.
    fn mount_span(&self) -> Option<&MountSpan>;
}

/// Root-component wrapper reporting the app-start interval.
///
/// Construction records the moment just before the root component comes up;
/// the first mount hands the finalized span end to the tracing sink. Every
/// missing collaborator degrades silently: instrumentation must never break
/// the application it instruments.
pub struct AppStartProfiler {
    inner: Box<dyn MountProfiler>,
    tracker: Arc<AppStartTracker>,
}

impl AppStartProfiler {
    /// Wraps `inner` using the shared process-wide tracker.
    pub fn new(inner: Box<dyn MountProfiler>) -> Self {
        Self::with_tracker(inner, AppStartTracker::global())
    }

    /// Wraps `inner` with an explicitly injected tracker.
    ///
    /// If a client with a mount-timestamp sink is already active, the
    /// current time is recorded as the root component's first constructor
    /// call. A client initialized later misses this timestamp; construction
    /// itself never fails.
    pub fn with_tracker(inner: Box<dyn MountProfiler>, tracker: Arc<AppStartTracker>) -> Self {
        if let Some(sink) = get_client().and_then(|client| client.mount_timestamps()) {
            sink.set_root_component_first_constructor_call_timestamp_ms(
                timestamp_in_seconds() * 1000.0,
            );
        }
        Self { inner, tracker }
    }

    /// Host lifecycle hook for mount completion.
    ///
    /// Delegates to the wrapped profiler first, unconditionally, then runs
    /// the one-shot app-start report. Later mounts are inert.
    pub fn component_did_mount(&mut self) {
        self.inner.on_mount();
        if !self.tracker.is_reported() {
            self.report_app_start();
            self.tracker.mark_reported();
        }
    }

    fn report_app_start(&self) {
        let Some(client) = get_client() else {
            // The default log handler is the only channel available this
            // early; the client may never have been initialized at all.
            LOGGER.warn(
                "App start span could not be finished: the root profiler was \
                 constructed before the client was initialized.",
            );
            return;
        };

        client.add_integration(create_integration(APP_START_PROFILER_NAME));

        if let Some(end) = self.inner.mount_span().and_then(|span| span.timestamp) {
            set_app_start_end_timestamp(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{clear_client_for_tests, init_client, ClientOptions};
    use crate::test_support::GLOBAL_STATE_GUARD;
    use crate::tracing::app_start::AppStartTracking;
    use crate::util::timestamp_in_seconds;

    /// Host profiler stub: finalizes its span on mount and counts calls.
    struct HostProfiler {
        span: Option<MountSpan>,
        mounts: usize,
    }

    impl HostProfiler {
        fn new() -> Self {
            Self {
                span: Some(MountSpan::default()),
                mounts: 0,
            }
        }

        fn spanless() -> Self {
            Self {
                span: None,
                mounts: 0,
            }
        }
    }

    impl MountProfiler for HostProfiler {
        fn on_mount(&mut self) {
            self.mounts += 1;
            if let Some(span) = self.span.as_mut() {
                span.timestamp = Some(timestamp_in_seconds());
            }
        }

        fn mount_span(&self) -> Option<&MountSpan> {
            self.span.as_ref()
        }
    }

    fn tracking_client() -> AppStartTracking {
        let client = init_client(ClientOptions::default());
        let tracking = AppStartTracking::new();
        client.add_integration(Arc::new(tracking.clone()));
        tracking
    }

    #[test]
    fn construction_records_the_constructor_timestamp() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();
        let tracking = tracking_client();

        let before_ms = timestamp_in_seconds() * 1000.0;
        let _profiler = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
        let after_ms = timestamp_in_seconds() * 1000.0;

        let recorded = tracking
            .root_constructor_call_timestamp_ms()
            .expect("constructor timestamp");
        assert!(recorded >= before_ms && recorded <= after_ms);

        clear_client_for_tests();
    }

    #[test]
    fn construction_without_a_client_is_silent() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();

        let _profiler = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
    }

    #[test]
    fn first_mount_reports_and_registers_the_marker_integration() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();
        let tracking = tracking_client();

        let mut profiler = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
        profiler.component_did_mount();

        let client = get_client().unwrap();
        assert!(client
            .get_integration_by_name(APP_START_PROFILER_NAME)
            .is_some());
        assert!(tracking.app_start_end_timestamp().is_some());

        clear_client_for_tests();
    }

    #[test]
    fn constructor_timestamp_never_exceeds_the_mount_end() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();
        let tracking = tracking_client();

        let mut profiler = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
        profiler.component_did_mount();

        let constructed_ms = tracking.root_constructor_call_timestamp_ms().unwrap();
        let end_seconds = tracking.app_start_end_timestamp().unwrap();
        assert!(constructed_ms <= end_seconds * 1000.0);

        clear_client_for_tests();
    }

    #[test]
    fn repeated_mounts_report_only_once() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();
        let tracking = tracking_client();

        let mut profiler = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
        profiler.component_did_mount();
        let first_end = tracking.app_start_end_timestamp();

        profiler.component_did_mount();
        profiler.component_did_mount();

        assert_eq!(tracking.app_start_end_timestamp(), first_end);

        clear_client_for_tests();
    }

    #[test]
    fn mount_always_delegates_to_the_host_profiler() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();

        struct Counting(Arc<std::sync::atomic::AtomicUsize>);
        impl MountProfiler for Counting {
            fn on_mount(&mut self) {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
            fn mount_span(&self) -> Option<&MountSpan> {
                None
            }
        }

        let mounts = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut profiler = AppStartProfiler::with_tracker(
            Box::new(Counting(Arc::clone(&mounts))),
            Arc::new(AppStartTracker::new()),
        );
        profiler.component_did_mount();
        profiler.component_did_mount();
        profiler.component_did_mount();

        assert_eq!(mounts.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[test]
    fn missing_client_warns_and_consumes_the_one_shot() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();

        let warnings = Arc::new(std::sync::Mutex::new(Vec::new()));
        let captured = Arc::clone(&warnings);
        LOGGER.set_log_handler(move |_, level, message| {
            captured.lock().unwrap().push((level, message.to_owned()));
        });

        let tracker = Arc::new(AppStartTracker::new());
        let mut profiler =
            AppStartProfiler::with_tracker(Box::new(HostProfiler::new()), Arc::clone(&tracker));
        profiler.component_did_mount();
        profiler.component_did_mount();

        LOGGER.reset_log_handler();

        let recorded = warnings.lock().unwrap();
        assert_eq!(recorded.len(), 1, "expected a single warning");
        assert_eq!(recorded[0].0, crate::logger::LogLevel::Warn);
        assert!(recorded[0].1.contains("App start span could not be finished"));
        assert!(tracker.is_reported());

        // A client arriving later gets nothing: the one-shot is consumed.
        let tracking = tracking_client();
        profiler.component_did_mount();
        assert!(tracking.app_start_end_timestamp().is_none());

        clear_client_for_tests();
    }

    #[test]
    fn spanless_host_registers_the_marker_but_forwards_no_end_timestamp() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();
        let tracking = tracking_client();

        let mut profiler = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::spanless()),
            Arc::new(AppStartTracker::new()),
        );
        profiler.component_did_mount();

        let client = get_client().unwrap();
        assert!(client
            .get_integration_by_name(APP_START_PROFILER_NAME)
            .is_some());
        assert!(tracking.app_start_end_timestamp().is_none());

        clear_client_for_tests();
    }

    /// Sink integration counting how many timestamps it receives.
    #[derive(Clone, Default)]
    struct CountingSink {
        state: Arc<CountingSinkState>,
    }

    #[derive(Default)]
    struct CountingSinkState {
        constructor_calls: std::sync::atomic::AtomicUsize,
        end_calls: std::sync::atomic::AtomicUsize,
    }

    impl crate::client::Integration for CountingSink {
        fn name(&self) -> &str {
            "CountingSink"
        }

        fn mount_timestamps(&self) -> Option<Arc<dyn crate::tracing::MountTimestampSink>> {
            Some(Arc::clone(&self.state) as Arc<dyn crate::tracing::MountTimestampSink>)
        }
    }

    impl crate::tracing::MountTimestampSink for CountingSinkState {
        fn set_root_component_first_constructor_call_timestamp_ms(&self, _timestamp_ms: f64) {
            self.constructor_calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }

        fn set_app_start_end_timestamp(&self, _timestamp_seconds: f64) {
            self.end_calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[test]
    fn independent_trackers_each_report_once() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();

        let client = init_client(ClientOptions::default());
        let sink = CountingSink::default();
        client.add_integration(Arc::new(sink.clone()));

        let mut first = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
        first.component_did_mount();
        assert_eq!(
            sink.state
                .end_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );

        let mut second = AppStartProfiler::with_tracker(
            Box::new(HostProfiler::new()),
            Arc::new(AppStartTracker::new()),
        );
        second.component_did_mount();

        // The second tracker has its own latch, so its report must land too.
        assert_eq!(
            sink.state
                .end_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            2
        );

        clear_client_for_tests();
    }

    // Consumes the process-global latch; the only test allowed to do so.
    #[test]
    fn global_tracker_hosts_report_once_per_process() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();

        let client = init_client(ClientOptions::default());
        let sink = CountingSink::default();
        client.add_integration(Arc::new(sink.clone()));

        assert!(!AppStartTracker::global().is_reported());

        let mut profiler = AppStartProfiler::new(Box::new(HostProfiler::new()));
        profiler.component_did_mount();

        assert!(AppStartTracker::global().is_reported());
        assert_eq!(
            sink.state
                .end_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );

        // A second wrapper on the default path shares the global latch.
        let mut remounted = AppStartProfiler::new(Box::new(HostProfiler::new()));
        remounted.component_did_mount();
        assert_eq!(
            sink.state
                .end_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );

        clear_client_for_tests();
    }

    #[test]
    fn profilers_sharing_a_tracker_report_once_between_them() {
        let _guard = GLOBAL_STATE_GUARD.lock().unwrap();
        clear_client_for_tests();

        let client = init_client(ClientOptions::default());
        let sink = CountingSink::default();
        client.add_integration(Arc::new(sink.clone()));

        let tracker = Arc::new(AppStartTracker::new());
        let mut first =
            AppStartProfiler::with_tracker(Box::new(HostProfiler::new()), Arc::clone(&tracker));
        let mut second =
            AppStartProfiler::with_tracker(Box::new(HostProfiler::new()), Arc::clone(&tracker));

        first.component_did_mount();
        second.component_did_mount();

        assert_eq!(
            sink.state
                .end_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );

        clear_client_for_tests();
    }
}
