//! Async translation orchestration.
//!
//! Validates input, resolves configuration, constructs the configured
//! provider through the registry and dispatches the request on a spawned
//! task. Pre-dispatch failures come back synchronously from
//! `translate_html`; everything after dispatch is delivered through the
//! returned ticket, with the progress activity reaching its terminal state
//! strictly before the ticket fires.

use crate::domain::cancel::CancelToken;
use crate::domain::error::TranslateError;
use crate::domain::model::{ProviderOptions, Translated, TranslationRequest};
use crate::interfaces::activity::ActivityState;
use crate::interfaces::surface::Surface;
use crate::state::AppState;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Fallback backend when the configured provider id is empty.
pub const DEFAULT_PROVIDER_ID: &str = "google";

#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateOptions {
    /// Report progress through the activity sink.
    pub report_progress: bool,
}

/// Completion handle for one translate call.
///
/// Consuming `finish` yields the result exactly once; the single-fire
/// channel makes a double completion unrepresentable. A completion that can
/// no longer be delivered maps to `InvalidState`.
pub struct TranslationTicket {
    rx: oneshot::Receiver<Result<Translated, TranslateError>>,
    cancel: CancelToken,
}

impl std::fmt::Debug for TranslationTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationTicket").finish_non_exhaustive()
    }
}

impl TranslationTicket {
    /// Token aborting this call's subprocess work when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub async fn finish(self) -> Result<Translated, TranslateError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(TranslateError::InvalidState(
                "translation task ended without delivering a result".to_string(),
            )),
        }
    }
}

/// Translate an HTML document with the configured provider.
pub async fn translate_html(
    state: &AppState,
    body_html: &str,
    options: TranslateOptions,
) -> Result<TranslationTicket, TranslateError> {
    translate_input(state, body_html, true, options).await
}

/// Translate plain text with the configured provider.
pub async fn translate_text(
    state: &AppState,
    text: &str,
    options: TranslateOptions,
) -> Result<TranslationTicket, TranslateError> {
    translate_input(state, text, false, options).await
}

async fn translate_input(
    state: &AppState,
    content: &str,
    is_html: bool,
    options: TranslateOptions,
) -> Result<TranslationTicket, TranslateError> {
    if content.trim().is_empty() {
        return Err(TranslateError::InvalidArgument(
            "nothing to translate".to_string(),
        ));
    }

    // Resolve configuration before any asynchronous work; failures here are
    // surfaced synchronously and no subprocess is spawned.
    let (target_lang, provider_id, install_on_demand) = {
        let config = state.config.read().await;
        let target = if config.target_language.is_empty() {
            "en".to_string()
        } else {
            config.target_language.clone()
        };
        let provider = if config.provider_id.is_empty() {
            DEFAULT_PROVIDER_ID.to_string()
        } else {
            config.provider_id.clone()
        };
        (target, provider, config.install_on_demand)
    };

    let provider = state
        .registry
        .create(&provider_id, ProviderOptions { install_on_demand })?;

    let cancel = CancelToken::new();

    let activity = if options.report_progress {
        let activity = state.activities.create_activity();
        activity.set_state(ActivityState::Running);
        activity.set_text(&format!("Translating with {}…", provider.name()));
        activity.attach_cancel(cancel.clone());
        Some(activity)
    } else {
        None
    };

    let request = if is_html {
        TranslationRequest::html(content.to_string(), target_lang, cancel.clone())
    } else {
        TranslationRequest::plain(content.to_string(), target_lang, cancel.clone())
    };

    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = provider.translate(&request).await;

        // Progress observers must see the terminal state before the caller
        // is notified.
        if let Some(activity) = &activity {
            match &result {
                Ok(_) => {
                    activity.set_state(ActivityState::Completed);
                    activity.set_text(&format!("Translated with {}", provider.name()));
                }
                Err(TranslateError::Cancelled) => {
                    activity.set_state(ActivityState::Cancelled);
                    activity.set_text("Translation cancelled");
                }
                Err(e) => {
                    activity.set_state(ActivityState::Failed);
                    activity.set_text(&format!("Translation failed: {e}"));
                }
            }
        } else if let Err(e) = &result {
            warn!("Translate failed: {e}");
        }

        let _ = tx.send(result.map(|text| Translated { text }));
    });

    Ok(TranslationTicket { rx, cancel })
}

/// One user action toggling a surface between translated and original.
///
/// If the surface currently shows a translation, restore the original.
/// Otherwise extract the displayed body HTML (a missing body is a logged
/// no-op), translate it and apply the result. A failed call leaves the view
/// state untouched.
///
/// Concurrent calls for the same surface are not serialized; callers that
/// need an in-flight guard must add their own.
pub async fn toggle_translation(
    state: &AppState,
    surface: &dyn Surface,
    options: TranslateOptions,
) -> Result<(), TranslateError> {
    if state.views.is_translated(surface) {
        state.views.restore_original(surface);
        return Ok(());
    }

    let Some(body_html) = surface.selected_body_html() else {
        debug!("no message body available to translate");
        return Ok(());
    };
    if body_html.is_empty() {
        debug!("empty message body; nothing to translate");
        return Ok(());
    }

    let ticket = translate_html(state, &body_html, options).await?;
    let translated = ticket.finish().await?;
    state.views.apply_translation(surface, &translated.text);
    Ok(())
}
