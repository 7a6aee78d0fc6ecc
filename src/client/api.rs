use std::sync::{LazyLock, Mutex};

use crate::client::types::{Client, ClientOptions};

static ACTIVE_CLIENT: LazyLock<Mutex<Option<Client>>> = LazyLock::new(|| Mutex::new(None));

/// Creates a client from `options` and installs it as the process-wide
/// active client, replacing any prior one.
pub fn init_client(options: ClientOptions) -> Client {
    let client = Client::new(options);
    *ACTIVE_CLIENT.lock().unwrap() = Some(client.clone());
    client
}

/// Returns the active client, or `None` when monitoring has not been
/// initialized yet. Instrumentation treats absence as an expected state.
pub fn get_client() -> Option<Client> {
    ACTIVE_CLIENT.lock().unwrap().clone()
}

#[cfg(test)]
pub(crate) fn clear_client_for_tests() {
    ACTIVE_CLIENT.lock().unwrap().take();
}
