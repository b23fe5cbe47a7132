#![allow(dead_code)]

use octocrab::Octocrab;
use repo_pulse::{ChatBridge, ChatError, Completer, LlmError, OutgoingMessage};
use std::sync::Mutex;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// GitHub client pointed at a mock server.
pub fn github(server: &MockServer) -> Octocrab {
    Octocrab::builder()
        .personal_token(TOKEN.to_string())
        .base_uri(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

/// Chat bridge that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingChat {
    messages: Mutex<Vec<(String, OutgoingMessage)>>,
}

impl RecordingChat {
    pub fn messages(&self) -> Vec<(String, OutgoingMessage)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages()
            .iter()
            .map(|(_, message)| message.text().to_string())
            .collect()
    }
}

impl ChatBridge for RecordingChat {
    async fn say(&self, channel: &str, message: &OutgoingMessage) -> Result<(), ChatError> {
        self.messages
            .lock()
            .unwrap()
            .push((channel.to_string(), message.clone()));
        Ok(())
    }
}

/// Completer that returns a canned reply and records prompts.
pub struct FakeCompleter {
    reply: Result<String, ()>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompleter {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Completer for FakeCompleter {
    async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt);
        self.reply.clone().map_err(|()| LlmError::Timeout(1))
    }
}
