//! Bot configuration.
//!
//! A [`BotConfig`] is built once at startup, before the Slack connection is
//! opened, and is read-only afterwards.

mod error;

pub use error::ConfigError;

use crate::chat::{SlackClient, SLACK_API_BASE};
use crate::llm::LlmCompleter;
use octocrab::Octocrab;
use std::path::{Path, PathBuf};

/// Organization whose repositories the bot reports on.
pub const ORGANIZATION: &str = "kkr-genweb";

/// Configuration for running the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// GitHub organization.
    org: String,
    /// GitHub token used as a bearer token for API calls.
    github_token: String,
    /// Slack bot token (`xoxb-...`) used to post messages.
    slack_bot_token: String,
    /// Slack app-level token (`xapp-...`) used to open Socket Mode.
    slack_app_token: String,
    /// Whether reports include an LLM-written README summary.
    summarize_readme: bool,
    /// Path to the LLM config file.
    llm_config_path: Option<PathBuf>,
    /// GitHub API base URI override.
    github_base_uri: Option<String>,
    /// Slack Web API base URL.
    slack_api_base: String,
}

impl BotConfig {
    /// Creates a configuration for the fixed organization.
    pub fn new(github_token: String, slack_bot_token: String, slack_app_token: String) -> Self {
        Self {
            org: ORGANIZATION.to_string(),
            github_token,
            slack_bot_token,
            slack_app_token,
            summarize_readme: false,
            llm_config_path: None,
            github_base_uri: None,
            slack_api_base: SLACK_API_BASE.to_string(),
        }
    }

    /// Enables README summaries in reports.
    pub fn with_readme_summary(mut self, enabled: bool) -> Self {
        self.summarize_readme = enabled;
        self
    }

    /// Sets a custom LLM config path.
    pub fn with_llm_config_path(mut self, llm_config_path: PathBuf) -> Self {
        self.llm_config_path = Some(llm_config_path);
        self
    }

    /// Points the GitHub client at a different API host.
    pub fn with_github_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.github_base_uri = Some(base_uri.into());
        self
    }

    /// Points the Slack client at a different Web API base URL.
    pub fn with_slack_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.slack_api_base = api_base.into();
        self
    }

    /// Overrides the organization. Used by tests and embedders.
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = org.into();
        self
    }

    /// Returns the organization name.
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Returns the configured GitHub token.
    pub fn github_token(&self) -> &str {
        &self.github_token
    }

    /// Returns whether README summaries are enabled.
    pub fn summarize_readme(&self) -> bool {
        self.summarize_readme
    }

    /// Returns the LLM config file path, if set.
    pub fn llm_config_path(&self) -> Option<&Path> {
        self.llm_config_path.as_deref()
    }

    /// Builds the authenticated GitHub client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URI is invalid or the client
    /// cannot be built.
    pub fn github_client(&self) -> Result<Octocrab, ConfigError> {
        let mut builder = Octocrab::builder().personal_token(self.github_token.clone());
        if let Some(base_uri) = &self.github_base_uri {
            builder = builder.base_uri(base_uri.as_str())?;
        }
        Ok(builder.build()?)
    }

    /// Builds the Slack Web API client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API base URL is invalid.
    pub fn slack_client(&self) -> Result<SlackClient, ConfigError> {
        Ok(SlackClient::with_api_base(
            self.slack_bot_token.clone(),
            self.slack_app_token.clone(),
            &self.slack_api_base,
        )?)
    }

    /// Builds the README summarizer if summaries are enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the LLM cannot be configured.
    pub fn completer(&self) -> Result<Option<LlmCompleter>, ConfigError> {
        if !self.summarize_readme {
            return Ok(None);
        }
        Ok(Some(LlmCompleter::from_config_path(
            self.llm_config_path(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BotConfig {
        BotConfig::new("ghp".into(), "xoxb".into(), "xapp".into())
    }

    #[test]
    fn defaults_to_fixed_organization() {
        let config = config();
        assert_eq!(config.org(), ORGANIZATION);
        assert!(!config.summarize_readme());
        assert!(config.llm_config_path().is_none());
    }

    #[test]
    fn builder_setters_apply() {
        let config = config()
            .with_org("acme")
            .with_readme_summary(true)
            .with_llm_config_path(PathBuf::from("llm.toml"));

        assert_eq!(config.org(), "acme");
        assert!(config.summarize_readme());
        assert_eq!(config.llm_config_path(), Some(Path::new("llm.toml")));
    }

    #[test]
    fn completer_is_skipped_when_disabled() {
        assert!(config().completer().unwrap().is_none());
    }

    #[test]
    fn rejects_invalid_slack_base() {
        let result = config().with_slack_api_base("::nope::").slack_client();
        assert!(matches!(result, Err(ConfigError::SlackClient(_))));
    }

    #[tokio::test]
    async fn builds_github_client_with_custom_base() {
        let result = config()
            .with_github_base_uri("http://127.0.0.1:9")
            .github_client();
        assert!(result.is_ok());
    }
}
