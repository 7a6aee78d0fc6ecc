//! Platform device-info layer.
//!
//! The enricher never talks to platform APIs directly; it asks the installed
//! [`DeviceInfoProvider`] for a fresh snapshot on every call. An absent
//! provider result means the platform module is unavailable and enrichment
//! is skipped for that event.

mod device;

pub use device::{
    device_snapshot, set_device_info_provider, DeviceInfoProvider, DeviceSnapshot,
    EnvDeviceInfoProvider, DEVICE_INFO_ENV_VAR,
};
