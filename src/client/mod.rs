mod api;
mod types;

pub use api::{get_client, init_client};
pub use types::{Client, ClientOptions, Integration};

#[cfg(test)]
pub(crate) use api::clear_client_for_tests;
