use crate::application::view_state::ViewStates;
use crate::infrastructure::config::Config;
use crate::infrastructure::providers::ProviderRegistry;
use crate::interfaces::activity::{ActivitySink, LogActivitySink};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Constructed-once context object: the provider registry, the view state
/// table and the activity sink live here for the process lifetime instead
/// of in hidden globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub registry: Arc<ProviderRegistry>,
    pub views: Arc<ViewStates>,
    pub activities: Arc<dyn ActivitySink>,
}

impl AppState {
    /// State with the built-in providers and the log-based activity sink.
    pub fn new(config: Config) -> Self {
        Self::with_activity_sink(config, Arc::new(LogActivitySink))
    }

    /// State with a host-provided activity sink.
    pub fn with_activity_sink(config: Config, activities: Arc<dyn ActivitySink>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            registry: Arc::new(ProviderRegistry::with_builtin()),
            views: Arc::new(ViewStates::new()),
            activities,
        }
    }
}
