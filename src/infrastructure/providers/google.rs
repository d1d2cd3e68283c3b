use crate::domain::error::TranslateError;
use crate::domain::model::{ProviderOptions, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::helper;
use async_trait::async_trait;
use std::path::PathBuf;

/// Online backend driven by the multi-provider helper script.
///
/// Runs `translate_runner_online.py`, which fans out to free online engines;
/// this provider pins the helper's `--provider google` backend. The wire
/// contract is otherwise identical to the offline provider.
pub struct GoogleProvider {
    helper_override: Option<PathBuf>,
    interpreter_override: Option<PathBuf>,
}

impl GoogleProvider {
    pub const SCRIPT: &'static str = "translate_runner_online.py";

    pub fn new(_options: ProviderOptions) -> Self {
        Self {
            helper_override: None,
            interpreter_override: None,
        }
    }

    /// Construct with explicit helper and interpreter paths, bypassing
    /// environment and filesystem resolution.
    pub fn with_paths(helper: impl Into<PathBuf>, interpreter: impl Into<PathBuf>) -> Self {
        Self {
            helper_override: Some(helper.into()),
            interpreter_override: Some(interpreter.into()),
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        "google"
    }

    fn name(&self) -> &'static str {
        "Google Translate (online)"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let helper_path = helper::resolve_helper(self.helper_override.as_deref(), Self::SCRIPT)?;
        let python = helper::resolve_interpreter(self.interpreter_override.as_deref())?;

        let target = if request.target_lang.is_empty() {
            "en"
        } else {
            request.target_lang.as_str()
        };
        let args = vec![
            "--target".to_string(),
            target.to_string(),
            "--provider".to_string(),
            "google".to_string(),
            if request.is_html { "--html" } else { "--text" }.to_string(),
        ];

        let stdout =
            helper::run_helper(&python, &helper_path, &args, &request.text, &request.cancel)
                .await?;
        Ok(helper::translated_or_raw(&stdout))
    }
}
