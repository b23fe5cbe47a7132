//! LLM configuration and serdes-ai completion harness.

mod config;
mod error;

pub(crate) use config::LlmConfig;
pub use error::LlmError;

use serde::Deserialize;
use serdes_ai::{agent::Agent, agent::AgentBuilder};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Model used when neither a config file nor the environment names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const MODEL_ENV: &str = "REPO_PULSE_LLM_MODEL";
const LLM_TIMEOUT_SECS: u64 = 120;
const SUMMARY_TEMPERATURE: f64 = 0.3;
const SYSTEM_PROMPT: &str =
    "You explain software projects to non-technical readers in short, plain language.";

/// A text-generation backend that turns a prompt into a completion.
pub trait Completer {
    /// Sends the prompt to the model and returns its output text.
    fn complete(&self, prompt: String) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Top-level structure for the config file with a single `[llm]` section.
#[derive(Debug, Clone, Deserialize)]
struct LlmConfigFile {
    /// LLM provider configuration.
    llm: LlmConfig,
}

/// Completion backend built on a serdes-ai agent.
pub struct LlmCompleter {
    agent: Agent<(), String>,
}

impl LlmCompleter {
    /// Builds the completer from an optional config file.
    ///
    /// Resolution order: the `[llm]` table of `config_path` if the file
    /// exists, then `REPO_PULSE_LLM_MODEL` (a `provider:model` spec), then
    /// OpenAI with [`DEFAULT_MODEL`].
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the config file is unreadable or the model
    /// cannot be constructed.
    pub fn from_config_path(config_path: Option<&Path>) -> Result<Self, LlmError> {
        let config = match config_path {
            Some(path) => load_config(path)?,
            None => None,
        };
        let model = resolve_model(config.as_ref())?;
        Ok(Self {
            agent: build_agent(model),
        })
    }
}

impl Completer for LlmCompleter {
    async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        debug!(prompt_chars = prompt.chars().count(), "Requesting completion");

        let result = tokio::time::timeout(
            tokio::time::Duration::from_secs(LLM_TIMEOUT_SECS),
            self.agent.run(prompt, ()),
        )
        .await
        .map_err(|_| LlmError::Timeout(LLM_TIMEOUT_SECS))??;

        Ok(result.output.trim().to_string())
    }
}

/// Resolves the LLM model from config or environment.
fn resolve_model(
    config: Option<&LlmConfig>,
) -> Result<Arc<dyn serdes_ai_models::Model>, LlmError> {
    if let Some(config) = config {
        info!(model = config.model_name(), "Using configured LLM");
        return config.build_model();
    }
    if let Ok(model_spec) = std::env::var(MODEL_ENV) {
        info!(model = %model_spec, "Using LLM from environment");
        return match LlmConfig::from_model_spec(&model_spec) {
            Some(config) => config.build_model(),
            None => serdes_ai_models::infer_model(&model_spec).map_err(LlmError::Model),
        };
    }
    info!(model = DEFAULT_MODEL, "Using default LLM");
    LlmConfig::openai(DEFAULT_MODEL).build_model()
}

/// Loads the LLM config file if it exists.
fn load_config(path: &Path) -> Result<Option<LlmConfig>, LlmError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|source| LlmError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: LlmConfigFile = toml::from_str(&contents).map_err(|source| LlmError::Toml {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(parsed.llm))
}

/// Builds a tool-less agent for one-shot summaries.
fn build_agent(model: Arc<dyn serdes_ai_models::Model>) -> Agent<(), String> {
    AgentBuilder::from_arc(model)
        .system_prompt(SYSTEM_PROMPT.to_string())
        .temperature(SUMMARY_TEMPERATURE)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_config_returns_none_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        let config = load_config(&path).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn load_config_parses_openai() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[llm]
provider = "openai"
model = "gpt-4o-mini"
base-url = "https://api.openai.com/v1"
timeout-secs = 30
"#,
        );
        let config = load_config(&path).unwrap().unwrap();
        match config {
            LlmConfig::OpenAi {
                model,
                base_url,
                timeout_secs,
                ..
            } => {
                assert_eq!(model, "gpt-4o-mini");
                assert_eq!(base_url.as_deref(), Some("https://api.openai.com/v1"));
                assert_eq!(timeout_secs, Some(30));
            }
            _ => panic!("expected openai"),
        }
    }

    #[test]
    fn load_config_parses_openrouter() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[llm]
provider = "openrouter"
model = "anthropic/claude-3-haiku"
app-title = "repo-pulse"
"#,
        );
        let config = load_config(&path).unwrap().unwrap();
        match config {
            LlmConfig::OpenRouter {
                model, app_title, ..
            } => {
                assert_eq!(model, "anthropic/claude-3-haiku");
                assert_eq!(app_title.as_deref(), Some("repo-pulse"));
            }
            _ => panic!("expected openrouter"),
        }
    }

    #[test]
    fn load_config_parses_gemini() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash"
"#,
        );
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.model_name(), "gemini-2.0-flash");
        assert!(matches!(config, LlmConfig::Gemini { .. }));
    }

    #[test]
    fn load_config_parses_anthropic() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[llm]
provider = "anthropic"
model = "claude-3-5-haiku-20241022"
api_key = "sk-ant-test"
timeout-secs = 45
"#,
        );
        let config = load_config(&path).unwrap().unwrap();
        match &config {
            LlmConfig::Anthropic {
                model,
                api_key,
                timeout_secs,
                ..
            } => {
                assert_eq!(model, "claude-3-5-haiku-20241022");
                assert_eq!(api_key.as_deref(), Some("sk-ant-test"));
                assert_eq!(*timeout_secs, Some(45));
            }
            _ => panic!("expected anthropic"),
        }
        assert!(config.build_model().is_ok());
    }

    #[test]
    fn environment_model_accepts_fallback_openai_key() {
        temp_env::with_vars(
            [
                (MODEL_ENV, Some("openai:gpt-4o")),
                ("OPENAI_API_KEY", None),
                ("OPENAI_KEY", Some("sk-test")),
            ],
            || assert!(resolve_model(None).is_ok()),
        );
    }

    #[test]
    fn load_config_reports_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "not = [valid");
        let error = load_config(&path).unwrap_err();
        assert!(matches!(error, LlmError::Toml { .. }));
    }

    #[test]
    fn load_config_reports_unknown_provider() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[llm]
provider = "mystery"
model = "m"
"#,
        );
        assert!(matches!(load_config(&path), Err(LlmError::Toml { .. })));
    }
}
