//! Test utilities shared across crate-level unit tests.

use std::sync::{LazyLock, Mutex};

/// Serializes tests that touch process-global state: the active client, the
/// device-info provider, and environment variables.
pub static GLOBAL_STATE_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
