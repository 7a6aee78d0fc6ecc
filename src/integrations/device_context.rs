use serde_json::Value;

use crate::client::Integration;
use crate::events::{merge_context_block, DeviceContext, OsContext, TelemetryEvent};
use crate::platform::{device_snapshot, DeviceSnapshot};

pub const DEVICE_CONTEXT_INTEGRATION_NAME: &str = "DeviceContext";

/// Populates `device` and `os` context blocks from the platform device-info
/// layer.
///
/// The snapshot is read fresh on every event. When the platform module is
/// absent neither block is touched, and fields the caller already set on the
/// event always win over derived ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceContextIntegration;

impl DeviceContextIntegration {
    pub fn new() -> Self {
        Self
    }

    fn enrich(&self, event: &mut TelemetryEvent, snapshot: &DeviceSnapshot) {
        let device = DeviceContext::from_snapshot(snapshot);
        if let Ok(derived @ Value::Object(_)) = serde_json::to_value(&device) {
            merge_context_block(&mut event.contexts, "device", derived);
        }

        let os = OsContext::from_snapshot(snapshot);
        if let Ok(derived @ Value::Object(_)) = serde_json::to_value(&os) {
            merge_context_block(&mut event.contexts, "os", derived);
        }
    }
}

impl Integration for DeviceContextIntegration {
    fn name(&self) -> &str {
        DEVICE_CONTEXT_INTEGRATION_NAME
    }

    fn process_event(&self, mut event: TelemetryEvent) -> TelemetryEvent {
        if let Some(snapshot) = device_snapshot() {
            self.enrich(&mut event, &snapshot);
        }
        event
    }
}
