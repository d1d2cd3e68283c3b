use crate::domain::error::TranslateError;
use crate::domain::model::TranslationRequest;
use async_trait::async_trait;

/// Contract every translation backend satisfies.
///
/// Implementations must be non-blocking: the future suspends while the
/// external helper runs, and resolves exactly once with the translated text
/// or a failure. Backends are selected through the provider registry, so new
/// ones can be added without touching the orchestrator.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Stable identifier, never empty.
    fn id(&self) -> &'static str;

    /// Display name for progress messages.
    fn name(&self) -> &'static str;

    /// Translate the request input into the target language.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError>;
}
