//! App-start timing instrumentation.
//!
//! [`AppStartProfiler`] wraps the host's root mount profiler by composition
//! and reports the app-start interval once per [`AppStartTracker`]. The
//! timestamps flow into whichever registered integration advertises the
//! [`MountTimestampSink`] capability; [`AppStartTracking`] is the in-crate
//! sink.

mod app_start;
mod profiler;

pub use app_start::{
    set_app_start_end_timestamp, AppStartTracker, AppStartTracking, MountTimestampSink,
    APP_START_TRACKING_NAME,
};
pub use profiler::{AppStartProfiler, MountProfiler, MountSpan, APP_START_PROFILER_NAME};
