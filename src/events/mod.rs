mod types;

pub use types::{DeviceContext, EventLevel, OsContext, TelemetryEvent};

pub(crate) use types::merge_context_block;
