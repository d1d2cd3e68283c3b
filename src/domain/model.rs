use crate::domain::cancel::CancelToken;

/// Identifies a translation backend. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Stable short identifier, e.g. "argos" or "google". Never empty.
    pub id: &'static str,
    /// Human-readable display name.
    pub display_name: &'static str,
}

impl ProviderDescriptor {
    pub const fn new(id: &'static str, display_name: &'static str) -> Self {
        Self { id, display_name }
    }
}

/// One translation request, constructed per call and owned by the
/// orchestrator invocation that created it.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub is_html: bool,
    /// None means auto-detect.
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub cancel: CancelToken,
}

impl TranslationRequest {
    pub fn html(text: String, target_lang: String, cancel: CancelToken) -> Self {
        Self {
            text,
            is_html: true,
            source_lang: None,
            target_lang,
            cancel,
        }
    }

    pub fn plain(text: String, target_lang: String, cancel: CancelToken) -> Self {
        Self {
            text,
            is_html: false,
            source_lang: None,
            target_lang,
            cancel,
        }
    }
}

/// Successful translation output. Ownership transfers to the caller on
/// delivery through the completion channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    pub text: String,
}

/// Resolved configuration a provider factory may need at construction time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderOptions {
    /// Let the offline helper download missing language models on demand.
    pub install_on_demand: bool,
}
