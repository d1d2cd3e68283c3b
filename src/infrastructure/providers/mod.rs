use crate::domain::error::TranslateError;
use crate::domain::model::{ProviderDescriptor, ProviderOptions};
use crate::domain::traits::TranslationProvider;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod argos;
pub mod google;

/// Constructs a provider instance from resolved configuration.
pub type ProviderFactory =
    Box<dyn Fn(ProviderOptions) -> Arc<dyn TranslationProvider> + Send + Sync>;

struct RegistryEntry {
    descriptor: ProviderDescriptor,
    factory: ProviderFactory,
}

/// Maps provider ids to factories.
///
/// Decouples "which backends exist" from "which backend a given call uses":
/// the orchestrator selects by the configured id, and new backends register
/// without touching it. Populated once at `AppState` construction and kept
/// for the process lifetime.
pub struct ProviderRegistry {
    entries: DashMap<String, RegistryEntry>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in backends.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register(Box::new(|options| {
            Arc::new(argos::ArgosProvider::new(options))
        }));
        registry.register(Box::new(|options| {
            Arc::new(google::GoogleProvider::new(options))
        }));
        registry
    }

    /// Store a factory keyed by the id its instances report.
    ///
    /// Re-registration for an existing id silently overwrites. A factory
    /// whose instances report an empty id is logged and skipped.
    pub fn register(&self, factory: ProviderFactory) {
        let probe = factory(ProviderOptions::default());
        let id = probe.id();
        if id.is_empty() {
            warn!("provider reports an empty id; skipping registration");
            return;
        }
        let descriptor = ProviderDescriptor::new(probe.id(), probe.name());
        let replaced = self
            .entries
            .insert(id.to_string(), RegistryEntry { descriptor, factory });
        if replaced.is_some() {
            debug!(id, "re-registered translate provider");
        } else {
            debug!(id, "registered translate provider");
        }
    }

    /// Construct a provider instance for the given id.
    pub fn create(
        &self,
        id: &str,
        options: ProviderOptions,
    ) -> Result<Arc<dyn TranslationProvider>, TranslateError> {
        match self.entries.get(id) {
            Some(entry) => Ok((entry.factory)(options)),
            None => Err(TranslateError::ProviderNotFound(id.to_string())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Snapshot of registered ids, order not significant.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    /// Snapshot of registered descriptors.
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        self.entries.iter().map(|e| e.descriptor).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
