//! Provider-name lookup the host pipeline uses to dispatch webhooks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::adapters::SendgridInboundAdapter;
use crate::email::{AdapterError, InboundEmailAdapter, NormalizedEmail};
use crate::form::FormParams;

/// Maps a provider key (e.g. `"sendgrid"`) to the adapter that understands
/// its webhook fields.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn InboundEmailAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in adapter registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SendgridInboundAdapter::new()));
        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn InboundEmailAdapter>) {
        let provider = adapter.provider();
        if self
            .adapters
            .insert(provider.to_string(), adapter)
            .is_some()
        {
            warn!("replacing inbound email adapter for provider {}", provider);
        }
    }

    pub fn get(&self, provider: &str) -> Option<Arc<dyn InboundEmailAdapter>> {
        self.adapters.get(provider).cloned()
    }

    /// Dispatch one webhook delivery to the adapter registered for
    /// `provider`.
    pub fn normalize(
        &self,
        provider: &str,
        params: FormParams,
    ) -> Result<NormalizedEmail, AdapterError> {
        let adapter = self
            .get(provider)
            .ok_or_else(|| AdapterError::UnknownProvider(provider.to_string()))?;
        adapter.normalize(params)
    }
}
