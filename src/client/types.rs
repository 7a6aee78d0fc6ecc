use std::sync::{Arc, LazyLock, RwLock};

use crate::events::TelemetryEvent;
use crate::logger::Logger;
use crate::tracing::MountTimestampSink;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("sentinel/client"));

/// Pluggable unit customizing client behavior.
///
/// Capabilities beyond event processing are advertised through typed
/// accessors rather than looked up by name, so collaborators downcast
/// through the trait instead of duck-typing.
pub trait Integration: Send + Sync {
    fn name(&self) -> &str;

    /// Called once when the integration is registered on a client.
    fn setup_once(&self) {}

    /// Hook into the outgoing event pipeline. Default is identity.
    fn process_event(&self, event: TelemetryEvent) -> TelemetryEvent {
        event
    }

    /// Advertises the mount-timestamp capability, if this integration
    /// accepts app-start timing.
    fn mount_timestamps(&self) -> Option<Arc<dyn MountTimestampSink>> {
        None
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
    pub debug: bool,
}

/// Monitoring client handle. Cheap to clone; all clones share the same
/// integration registry.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    options: ClientOptions,
    integrations: RwLock<Vec<Arc<dyn Integration>>>,
}

impl Client {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                options,
                integrations: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    /// Registers an integration and runs its `setup_once`. A name already
    /// present in the registry is skipped; registration is bookkeeping and
    /// never an error.
    pub fn add_integration(&self, integration: Arc<dyn Integration>) {
        {
            let mut integrations = self.inner.integrations.write().unwrap();
            if integrations
                .iter()
                .any(|existing| existing.name() == integration.name())
            {
                LOGGER.debug(format!(
                    "Integration {} is already registered, skipping",
                    integration.name()
                ));
                return;
            }
            integrations.push(Arc::clone(&integration));
        }
        integration.setup_once();
    }

    pub fn get_integration_by_name(&self, name: &str) -> Option<Arc<dyn Integration>> {
        self.inner
            .integrations
            .read()
            .unwrap()
            .iter()
            .find(|integration| integration.name() == name)
            .cloned()
    }

    /// Returns the first registered integration advertising the
    /// mount-timestamp capability.
    pub fn mount_timestamps(&self) -> Option<Arc<dyn MountTimestampSink>> {
        self.inner
            .integrations
            .read()
            .unwrap()
            .iter()
            .find_map(|integration| integration.mount_timestamps())
    }

    /// Runs the event through every integration in registration order and
    /// returns the enriched event.
    pub fn capture_event(&self, event: TelemetryEvent) -> TelemetryEvent {
        let integrations: Vec<_> = self.inner.integrations.read().unwrap().clone();
        integrations
            .into_iter()
            .fold(event, |event, integration| {
                integration.process_event(event)
            })
    }
}
