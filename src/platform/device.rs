use std::env;
use std::sync::{Arc, LazyLock, RwLock};

use serde::{Deserialize, Serialize};

use crate::logger::Logger;

/// Environment variable holding a JSON-encoded [`DeviceSnapshot`], read by
/// the default [`EnvDeviceInfoProvider`].
pub const DEVICE_INFO_ENV_VAR: &str = "SENTINEL_DEVICE_INFO";

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("sentinel/platform"));

static PROVIDER: LazyLock<RwLock<Arc<dyn DeviceInfoProvider>>> =
    LazyLock::new(|| RwLock::new(Arc::new(EnvDeviceInfoProvider)));

/// Platform device attributes, all optional, in the mobile bridge's
/// camelCase wire shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_device: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_build_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
}

/// Synchronous accessor over the platform device-info module.
///
/// Returning `None` signals that the module is absent; callers degrade to a
/// no-op, never an error.
pub trait DeviceInfoProvider: Send + Sync {
    fn snapshot(&self) -> Option<DeviceSnapshot>;
}

/// Default provider: parses [`DEVICE_INFO_ENV_VAR`] as JSON. Malformed
/// content is logged and treated as an absent module.
pub struct EnvDeviceInfoProvider;

impl DeviceInfoProvider for EnvDeviceInfoProvider {
    fn snapshot(&self) -> Option<DeviceSnapshot> {
        let raw = env::var(DEVICE_INFO_ENV_VAR).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                LOGGER.warn(format!(
                    "Ignoring malformed {DEVICE_INFO_ENV_VAR} value: {err}"
                ));
                None
            }
        }
    }
}

/// Installs the process-wide device-info provider.
pub fn set_device_info_provider(provider: Arc<dyn DeviceInfoProvider>) {
    *PROVIDER.write().unwrap() = provider;
}

/// Queries the installed provider for a fresh snapshot. Never cached.
pub fn device_snapshot() -> Option<DeviceSnapshot> {
    PROVIDER.read().unwrap().snapshot()
}
