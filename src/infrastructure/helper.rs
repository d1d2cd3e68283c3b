//! Subprocess plumbing shared by the translation providers.
//!
//! Every translate call runs one helper process: resolve the script and the
//! Python runtime, feed the input over stdin, collect stdout/stderr without
//! blocking, and map the exit status to the error taxonomy. The child's
//! lifetime is scoped to the call; there is no pooling or reuse.

use crate::domain::cancel::CancelToken;
use crate::domain::error::TranslateError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

pub const HELPER_PATH_ENV: &str = "TRANSLATE_HELPER_PATH";
pub const PYTHON_BIN_ENV: &str = "TRANSLATE_PYTHON_BIN";

const PACKAGED_HELPER_DIR: &str = "/usr/share/mail-translate/translate";
const PACKAGED_VENV_PYTHON: &str = "/usr/lib/mail-translate/venv/bin/python";

/// Resolve the helper script path.
///
/// Order: explicit override (tests, embedding hosts), then the
/// TRANSLATE_HELPER_PATH environment variable, then the packaged data
/// location, then the user-local developer install.
pub fn resolve_helper(
    override_path: Option<&Path>,
    script: &str,
) -> Result<PathBuf, TranslateError> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(HELPER_PATH_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    let packaged = Path::new(PACKAGED_HELPER_DIR).join(script);
    if packaged.exists() {
        return Ok(packaged);
    }

    if let Some(home) = dirs::home_dir() {
        let local = home
            .join(".local")
            .join("lib")
            .join("mail-translate")
            .join("translate")
            .join(script);
        if local.exists() {
            return Ok(local);
        }
    }

    Err(TranslateError::HelperNotFound(script.to_string()))
}

/// Resolve the Python runtime the helper runs under.
///
/// Order: explicit override, TRANSLATE_PYTHON_BIN, the packaged venv, then
/// the user-local venv.
pub fn resolve_interpreter(override_path: Option<&Path>) -> Result<PathBuf, TranslateError> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(PYTHON_BIN_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    let packaged = PathBuf::from(PACKAGED_VENV_PYTHON);
    if packaged.exists() {
        return Ok(packaged);
    }

    if let Some(home) = dirs::home_dir() {
        let local = home
            .join(".local")
            .join("lib")
            .join("mail-translate")
            .join("venv")
            .join("bin")
            .join("python");
        if local.exists() {
            return Ok(local);
        }
    }

    Err(TranslateError::InterpreterNotFound(
        "no venv python available".to_string(),
    ))
}

/// Run one helper invocation to completion, feeding `input` on stdin.
///
/// Returns the raw stdout on success. A non-zero exit maps to
/// `HelperExecutionFailed` with the captured stderr; a spawn error maps to
/// `HelperSpawnFailed`. Cancelling the token aborts the wait and kills the
/// child, resolving `Cancelled`.
pub async fn run_helper(
    interpreter: &Path,
    helper: &Path,
    args: &[String],
    input: &str,
    cancel: &CancelToken,
) -> Result<String, TranslateError> {
    if cancel.is_cancelled() {
        return Err(TranslateError::Cancelled);
    }

    debug!(
        interpreter = %interpreter.display(),
        helper = %helper.display(),
        ?args,
        "running translate helper"
    );

    let mut command = Command::new(interpreter);
    command
        .arg(helper)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(TranslateError::HelperSpawnFailed)?;

    // Write the payload, close stdin so the child sees EOF, then collect
    // the output. A helper that exits before draining stdin breaks the
    // pipe; tolerate that so the exit-status mapping below still sees the
    // real failure and its stderr. The whole exchange races against the
    // cancel token; dropping the future on cancellation kills the child.
    let exchange = async {
        if let Some(mut stdin) = child.stdin.take() {
            let fed = async {
                stdin.write_all(input.as_bytes()).await?;
                stdin.shutdown().await
            }
            .await;
            if let Err(e) = fed {
                debug!("helper closed stdin early: {e}");
            }
            drop(stdin);
        }
        child.wait_with_output().await
    };

    let output = tokio::select! {
        result = exchange => result?,
        _ = cancel.cancelled() => {
            debug!("translate helper cancelled");
            return Err(TranslateError::Cancelled);
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(TranslateError::HelperExecutionFailed {
            stderr: if stderr.is_empty() {
                "unknown".to_string()
            } else {
                stderr
            },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract the "translated" field from the helper's JSON response.
///
/// Expected shape: `{"translated": "..."}`. Returns None when the document
/// does not parse, the field is absent, or it is not a string.
pub fn extract_translated(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let translated = value.as_object()?.get("translated")?.as_str()?;
    Some(translated.to_string())
}

/// Interpret the helper's stdout, degrading to the raw stream when the
/// structured field cannot be extracted.
pub fn translated_or_raw(raw: &str) -> String {
    match extract_translated(raw) {
        Some(translated) => translated,
        None => {
            debug!("helper response not parseable; falling back to raw stdout");
            raw.to_string()
        }
    }
}
