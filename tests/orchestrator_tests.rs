//! End-to-end orchestration against fake helper scripts
//!
//! The fake helpers are plain /bin/sh scripts driven through explicit
//! provider path overrides, so no test touches process environment.

use async_trait::async_trait;
use mail_translate::application::translate::{
    toggle_translation, translate_html, TranslateOptions,
};
use mail_translate::domain::cancel::CancelToken;
use mail_translate::domain::error::TranslateError;
use mail_translate::domain::model::TranslationRequest;
use mail_translate::domain::traits::TranslationProvider;
use mail_translate::infrastructure::config::Config;
use mail_translate::infrastructure::providers::argos::ArgosProvider;
use mail_translate::infrastructure::providers::google::GoogleProvider;
use mail_translate::interfaces::activity::{Activity, ActivitySink, ActivityState};
use mail_translate::interfaces::surface::{ContentSnapshot, Surface, SurfaceId};
use mail_translate::state::AppState;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn write_script(test: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mail-translate-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{test}.sh"));
    std::fs::write(&path, body).unwrap();
    path
}

fn test_config(provider_id: &str) -> Config {
    Config {
        target_language: "fr".to_string(),
        provider_id: provider_id.to_string(),
        ..Config::default()
    }
}

/// Overwrite the builtin argos registration with one backed by a fake
/// helper script (also exercises the registry's overwrite semantics).
fn register_fake_argos(state: &AppState, script: &Path) {
    let script = script.to_path_buf();
    state.registry.register(Box::new(move |options| {
        Arc::new(ArgosProvider::with_paths(options, script.clone(), "/bin/sh"))
    }));
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    State(ActivityState),
    Text(String),
    CancelAttached,
}

#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
}

struct RecordingActivity {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Activity for RecordingActivity {
    fn set_state(&self, state: ActivityState) {
        self.events.lock().unwrap().push(Event::State(state));
    }

    fn set_text(&self, text: &str) {
        self.events.lock().unwrap().push(Event::Text(text.to_string()));
    }

    fn attach_cancel(&self, _token: CancelToken) {
        self.events.lock().unwrap().push(Event::CancelAttached);
    }
}

impl ActivitySink for RecordingSink {
    fn create_activity(&self) -> Box<dyn Activity> {
        Box::new(RecordingActivity {
            events: self.events.clone(),
        })
    }
}

#[tokio::test]
async fn helper_success_delivers_exact_translation() {
    let script = write_script(
        "success",
        "cat >/dev/null\nprintf '{\"translated\": \"Bonjour le monde\"}'\n",
    );
    let state = AppState::new(test_config("argos"));
    register_fake_argos(&state, &script);

    let ticket = translate_html(&state, "Hello world", TranslateOptions::default())
        .await
        .expect("dispatch must succeed");
    let translated = ticket.finish().await.expect("translation must succeed");
    assert_eq!(translated.text, "Bonjour le monde");
}

#[tokio::test]
async fn unparseable_helper_output_falls_back_to_raw() {
    let script = write_script("raw_fallback", "cat >/dev/null\nprintf 'not json'\n");
    let state = AppState::new(test_config("argos"));
    register_fake_argos(&state, &script);

    let ticket = translate_html(&state, "Hello world", TranslateOptions::default())
        .await
        .unwrap();
    let translated = ticket.finish().await.unwrap();
    assert_eq!(translated.text, "not json");
}

#[tokio::test]
async fn unknown_provider_fails_synchronously() {
    let state = AppState::new(test_config("unknown"));

    let err = translate_html(&state, "Hello world", TranslateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::ProviderNotFound(id) if id == "unknown"));
}

#[tokio::test]
async fn empty_input_fails_synchronously() {
    let state = AppState::new(test_config("argos"));

    let err = translate_html(&state, "   \n", TranslateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::InvalidArgument(_)));
}

#[tokio::test]
async fn helper_failure_carries_stderr() {
    let script = write_script(
        "failure",
        "cat >/dev/null\necho 'model missing' >&2\nexit 3\n",
    );
    let state = AppState::new(test_config("argos"));
    register_fake_argos(&state, &script);

    let ticket = translate_html(&state, "Hello world", TranslateOptions::default())
        .await
        .unwrap();
    let err = ticket.finish().await.unwrap_err();
    match err {
        TranslateError::HelperExecutionFailed { stderr } => {
            assert!(stderr.contains("model missing"), "stderr was: {stderr}");
        }
        other => panic!("expected HelperExecutionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn early_exit_with_large_input_still_reports_stderr() {
    // The helper dies before reading stdin, so feeding an input well past
    // the pipe buffer breaks the pipe mid-write. The exit status and its
    // stderr must still win over the write error.
    let script = write_script("early_exit", "echo 'usage: bad arguments' >&2\nexit 2\n");
    let state = AppState::new(test_config("argos"));
    register_fake_argos(&state, &script);

    let input = "lorem ipsum ".repeat(400_000);
    let ticket = translate_html(&state, &input, TranslateOptions::default())
        .await
        .unwrap();
    let err = ticket.finish().await.unwrap_err();
    match err {
        TranslateError::HelperExecutionFailed { stderr } => {
            assert!(stderr.contains("usage: bad arguments"), "stderr was: {stderr}");
        }
        other => panic!("expected HelperExecutionFailed, got {other:?}"),
    }
}

/// Provider whose dispatch task dies before a result can be delivered.
struct AbortingProvider;

#[async_trait]
impl TranslationProvider for AbortingProvider {
    fn id(&self) -> &'static str {
        "argos"
    }

    fn name(&self) -> &'static str {
        "Aborting"
    }

    async fn translate(&self, _request: &TranslationRequest) -> Result<String, TranslateError> {
        panic!("simulated task death");
    }
}

#[tokio::test]
async fn lost_completion_maps_to_invalid_state() {
    let state = AppState::new(test_config("argos"));
    state
        .registry
        .register(Box::new(|_options| Arc::new(AbortingProvider)));

    let ticket = translate_html(&state, "Hello", TranslateOptions::default())
        .await
        .unwrap();
    let err = ticket.finish().await.unwrap_err();
    assert!(matches!(err, TranslateError::InvalidState(_)));
}

#[tokio::test]
async fn cancellation_resolves_cancelled() {
    let script = write_script(
        "cancel",
        "cat >/dev/null\nsleep 30\nprintf '{\"translated\": \"late\"}'\n",
    );
    let state = AppState::new(test_config("argos"));
    register_fake_argos(&state, &script);

    let ticket = translate_html(&state, "Hello world", TranslateOptions::default())
        .await
        .unwrap();
    let cancel = ticket.cancel_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(5), ticket.finish())
        .await
        .expect("cancellation must not hang")
        .unwrap_err();
    assert!(matches!(err, TranslateError::Cancelled));
}

#[tokio::test]
async fn activity_reaches_terminal_state_before_completion() {
    let script = write_script(
        "activity_ok",
        "cat >/dev/null\nprintf '{\"translated\": \"Bonjour\"}'\n",
    );
    let sink = RecordingSink::default();
    let state = AppState::with_activity_sink(test_config("argos"), Arc::new(sink.clone()));
    register_fake_argos(&state, &script);

    let options = TranslateOptions {
        report_progress: true,
    };
    let ticket = translate_html(&state, "Hello", options).await.unwrap();
    ticket.finish().await.unwrap();

    let events = sink.events.lock().unwrap();
    assert_eq!(events[0], Event::State(ActivityState::Running));
    assert!(events.contains(&Event::CancelAttached));
    assert!(
        events.contains(&Event::State(ActivityState::Completed)),
        "terminal state must be recorded before the ticket fires: {events:?}"
    );
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Text(t) if t.contains("Argos"))));
}

#[tokio::test]
async fn activity_reports_failure_message() {
    let script = write_script(
        "activity_fail",
        "cat >/dev/null\necho 'model missing' >&2\nexit 1\n",
    );
    let sink = RecordingSink::default();
    let state = AppState::with_activity_sink(test_config("argos"), Arc::new(sink.clone()));
    register_fake_argos(&state, &script);

    let options = TranslateOptions {
        report_progress: true,
    };
    let ticket = translate_html(&state, "Hello", options).await.unwrap();
    ticket.finish().await.unwrap_err();

    let events = sink.events.lock().unwrap();
    assert!(events.contains(&Event::State(ActivityState::Failed)));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Text(t) if t.contains("model missing"))));
}

#[tokio::test]
async fn empty_configured_provider_falls_back_to_default() {
    let script = write_script(
        "default_provider",
        "cat >/dev/null\nprintf '{\"translated\": \"ok\"}'\n",
    );
    let state = AppState::new(test_config(""));
    // The default id is "google"; overwrite its registration with a fake.
    let script_path = script.clone();
    state.registry.register(Box::new(move |_options| {
        Arc::new(GoogleProvider::with_paths(script_path.clone(), "/bin/sh"))
    }));

    let ticket = translate_html(&state, "Hello", TranslateOptions::default())
        .await
        .unwrap();
    assert_eq!(ticket.finish().await.unwrap().text, "ok");
}

struct MockSurface {
    id: SurfaceId,
    message_id: Option<String>,
    content: Mutex<String>,
}

impl Surface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn current_message_id(&self) -> Option<String> {
        self.message_id.clone()
    }

    fn content_snapshot(&self) -> Option<ContentSnapshot> {
        Some(Arc::new(self.content.lock().unwrap().clone()) as ContentSnapshot)
    }

    fn selected_body_html(&self) -> Option<String> {
        Some(self.content.lock().unwrap().clone())
    }

    fn render_html(&self, html: &str) {
        *self.content.lock().unwrap() = html.to_string();
    }

    fn restore(&self, snapshot: &ContentSnapshot) {
        let original = snapshot.downcast_ref::<String>().unwrap();
        *self.content.lock().unwrap() = original.clone();
    }
}

#[tokio::test]
async fn toggle_translates_then_restores() {
    let script = write_script(
        "toggle",
        "cat >/dev/null\nprintf '{\"translated\": \"Bonjour le monde\"}'\n",
    );
    let state = AppState::new(test_config("argos"));
    register_fake_argos(&state, &script);

    let surface = MockSurface {
        id: SurfaceId(7),
        message_id: Some("msg-7".to_string()),
        content: Mutex::new("<p>Hello world</p>".to_string()),
    };

    toggle_translation(&state, &surface, TranslateOptions::default())
        .await
        .unwrap();
    assert!(state.views.is_translated(&surface));
    assert_eq!(*surface.content.lock().unwrap(), "Bonjour le monde");

    toggle_translation(&state, &surface, TranslateOptions::default())
        .await
        .unwrap();
    assert!(!state.views.is_translated(&surface));
    assert_eq!(*surface.content.lock().unwrap(), "<p>Hello world</p>");
}
