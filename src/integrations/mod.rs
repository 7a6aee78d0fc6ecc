//! Built-in integrations.
//!
//! [`DeviceContextIntegration`] adds `device` and `os` context blocks to
//! outgoing events; [`create_integration`] builds the no-op marker the
//! app-start profiler registers as a bookkeeping record.

mod device_context;
mod factory;

pub use device_context::{DeviceContextIntegration, DEVICE_CONTEXT_INTEGRATION_NAME};
pub use factory::create_integration;
