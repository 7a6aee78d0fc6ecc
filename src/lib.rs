//! Rust port of the Sentinel mobile SDK's instrumentation glue.
//!
//! Two adapters make up the public surface:
//!
//! * [`integrations::DeviceContextIntegration`] enriches outgoing telemetry
//!   events with `device` and `os` context blocks read from the platform
//!   device-info layer. Fields already present on the event always win.
//! * [`tracing::AppStartProfiler`] wraps the host application's root
//!   mount profiler and reports the app-start interval to the active
//!   client exactly once per tracker lifetime.
//!
//! The [`client`] module carries the minimal client core the adapters bind
//! against: an options struct, an ordered integration registry, and a
//! process-global active-client slot. Instrumentation never fails because
//! monitoring is not yet initialized; every missing collaborator degrades
//! to a no-op or, at most, a logged warning.

pub mod client;
pub mod events;
pub mod integrations;
pub mod logger;
pub mod platform;
pub mod tracing;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
