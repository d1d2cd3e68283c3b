use crate::domain::error::TranslateError;
use crate::domain::model::{ProviderOptions, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::helper;
use async_trait::async_trait;
use std::path::PathBuf;

/// Offline backend driven by the Argos Translate helper script.
///
/// Runs `translate_runner.py` under the resolved Python runtime, one child
/// per call. Missing language models are downloaded by the helper itself
/// when install-on-demand is enabled.
pub struct ArgosProvider {
    install_on_demand: bool,
    helper_override: Option<PathBuf>,
    interpreter_override: Option<PathBuf>,
}

impl ArgosProvider {
    pub const SCRIPT: &'static str = "translate_runner.py";

    pub fn new(options: ProviderOptions) -> Self {
        Self {
            install_on_demand: options.install_on_demand,
            helper_override: None,
            interpreter_override: None,
        }
    }

    /// Construct with explicit helper and interpreter paths, bypassing
    /// environment and filesystem resolution.
    pub fn with_paths(
        options: ProviderOptions,
        helper: impl Into<PathBuf>,
        interpreter: impl Into<PathBuf>,
    ) -> Self {
        Self {
            install_on_demand: options.install_on_demand,
            helper_override: Some(helper.into()),
            interpreter_override: Some(interpreter.into()),
        }
    }
}

#[async_trait]
impl TranslationProvider for ArgosProvider {
    fn id(&self) -> &'static str {
        "argos"
    }

    fn name(&self) -> &'static str {
        "Argos Translate (offline)"
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
            if request.is_html { "--html" } else { "--text" }.to_string(),
            if self.install_on_demand {
                "--install-on-demand"
            } else {
                "--no-install-on-demand"
            }
            .to_string(),
        ];

        let stdout =
            helper::run_helper(&python, &helper_path, &args, &request.text, &request.cancel)
                .await?;
        Ok(helper::translated_or_raw(&stdout))
    }
}
