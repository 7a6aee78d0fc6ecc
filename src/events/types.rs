use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::platform::DeviceSnapshot;

/// Outgoing telemetry record handed through the monitoring pipeline.
///
/// Context blocks live under `contexts`, keyed by name (`device`, `os`, ...).
/// Blocks this crate does not know about pass through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<EventLevel>,
    /// Seconds since the Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub contexts: Map<String, Value>,
}

impl TelemetryEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the named context block, if present and an object.
    pub fn context(&self, name: &str) -> Option<&Map<String, Value>> {
        self.contexts.get(name).and_then(Value::as_object)
    }

    /// Replaces the named context block wholesale.
    pub fn set_context(&mut self, name: impl Into<String>, block: Map<String, Value>) {
        self.contexts.insert(name.into(), Value::Object(block));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

/// Device context block derived from a [`DeviceSnapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub simulator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u64>,
}

impl DeviceContext {
    /// An unknown physical-device status derives `simulator: true`, matching
    /// the JS SDK's negation of an undefined `isDevice`.
    pub fn from_snapshot(snapshot: &DeviceSnapshot) -> Self {
        Self {
            name: snapshot.device_name.clone(),
            simulator: !snapshot.is_device.unwrap_or(false),
            model: snapshot.model_name.clone(),
            manufacturer: snapshot.manufacturer.clone(),
            memory_size: snapshot.total_memory,
        }
    }
}

/// OS context block derived from a [`DeviceSnapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl OsContext {
    pub fn from_snapshot(snapshot: &DeviceSnapshot) -> Self {
        Self {
            build: snapshot.os_build_id.clone(),
            version: snapshot.os_version.clone(),
            name: snapshot.os_name.clone(),
        }
    }
}

/// Shallow-merges `derived` into the event's `key` block: derived fields are
/// laid down first, then any field already on the event overwrites them, so
/// caller-supplied context wins per-field.
pub(crate) fn merge_context_block(contexts: &mut Map<String, Value>, key: &str, derived: Value) {
    let Value::Object(derived) = derived else {
        return;
    };
    let merged = match contexts.get(key) {
        Some(Value::Object(existing)) => {
            let mut out = derived;
            for (field, value) in existing {
                out.insert(field.clone(), value.clone());
            }
            out
        }
        _ => derived,
    };
    contexts.insert(key.to_owned(), Value::Object(merged));
}
