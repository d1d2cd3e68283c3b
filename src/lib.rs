//! Pluggable translation engine for displayed HTML documents.
//!
//! Three cooperating pieces: a provider registry mapping backend ids to
//! constructible providers, an async orchestrator that resolves
//! configuration and dispatches a request to a helper subprocess, and a
//! per-view state manager that remembers the original content so a
//! translation can be toggled off again.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;

pub use application::translate::{
    toggle_translation, translate_html, translate_text, TranslateOptions, TranslationTicket,
};
pub use application::view_state::ViewStates;
pub use domain::cancel::CancelToken;
pub use domain::error::TranslateError;
pub use domain::model::{ProviderDescriptor, ProviderOptions, Translated, TranslationRequest};
pub use domain::traits::TranslationProvider;
pub use infrastructure::config::Config;
pub use infrastructure::providers::ProviderRegistry;
pub use interfaces::activity::{Activity, ActivitySink, ActivityState, LogActivitySink};
pub use interfaces::surface::{ContentSnapshot, Surface, SurfaceId};
pub use state::AppState;
