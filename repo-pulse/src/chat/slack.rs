//! Slack Web API client.

use super::{Block, ChatBridge, ChatError, OutgoingMessage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Default Slack Web API base URL.
pub const SLACK_API_BASE: &str = "https://slack.com/api/";

/// Body of a `chat.postMessage` call.
#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<&'a [Block]>,
}

/// Response of `apps.connections.open`.
#[derive(Debug, Deserialize)]
struct ConnectionsOpen {
    url: String,
}

/// Authenticated Slack Web API client.
///
/// The bot token posts messages; the app-level token opens Socket Mode
/// connections.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: Url,
    bot_token: String,
    app_token: String,
}

impl SlackClient {
    /// Creates a client against the public Slack API.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the HTTP client cannot be built.
    pub fn new(bot_token: String, app_token: String) -> Result<Self, ChatError> {
        Self::with_api_base(bot_token, app_token, SLACK_API_BASE)
    }

    /// Creates a client against a custom API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_api_base(
        bot_token: String,
        app_token: String,
        api_base: &str,
    ) -> Result<Self, ChatError> {
        let mut base = api_base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            api_base: Url::parse(&base)?,
            bot_token,
            app_token,
        })
    }

    /// Requests a Socket Mode websocket URL.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the call fails or Slack rejects the app token.
    pub async fn open_connection(&self) -> Result<String, ChatError> {
        let response: ConnectionsOpen = self
            .call("apps.connections.open", &self.app_token, &serde_json::json!({}))
            .await?;
        Ok(response.url)
    }

    /// Posts a message to a channel with `chat.postMessage`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the call fails or Slack rejects the message.
    pub async fn post_message(
        &self,
        channel: &str,
        message: &OutgoingMessage,
    ) -> Result<(), ChatError> {
        let body = match message {
            OutgoingMessage::Text(text) => PostMessage {
                channel,
                text,
                blocks: None,
            },
            OutgoingMessage::Blocks { text, blocks } => PostMessage {
                channel,
                text,
                blocks: Some(blocks.as_slice()),
            },
        };

        let _: Value = self
            .call("chat.postMessage", &self.bot_token, &body)
            .instrument(info_span!("post_message", channel = %channel))
            .await?;
        Ok(())
    }

    /// Calls a Web API method and checks Slack's `ok` flag.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        token: &str,
        body: &impl Serialize,
    ) -> Result<T, ChatError> {
        let url = self.api_base.join(method)?;
        debug!(method, "Calling Slack API");

        let response: Value = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            let error = response
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error")
                .to_string();
            return Err(ChatError::Api {
                method: method.to_string(),
                error,
            });
        }

        Ok(serde_json::from_value(response)?)
    }
}

impl ChatBridge for SlackClient {
    async fn say(&self, channel: &str, message: &OutgoingMessage) -> Result<(), ChatError> {
        self.post_message(channel, message).await
    }
}
