//! Slack Socket Mode connection.
//!
//! Every envelope carrying an `envelope_id` is acknowledged as soon as it is
//! read, before the bot sees the event it contains.

use super::{ChatError, InboundEvent};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

/// A decoded Socket Mode frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketFrame {
    /// Connection established.
    Hello,

    /// Slack asks the client to reconnect.
    Disconnect { reason: String },

    /// An `events_api` or `interactive` envelope. `event` is `None` when
    /// the payload is not something the bot handles.
    Envelope {
        envelope_id: Option<String>,
        event: Option<InboundEvent>,
    },

    /// Any other envelope type.
    Other {
        kind: String,
        envelope_id: Option<String>,
    },
}

impl SocketFrame {
    /// Returns the id that must be acknowledged, if any.
    #[must_use]
    pub fn envelope_id(&self) -> Option<&str> {
        match self {
            Self::Envelope { envelope_id, .. } | Self::Other { envelope_id, .. } => {
                envelope_id.as_deref()
            }
            Self::Hello | Self::Disconnect { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    envelope_id: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
struct EventsApiPayload {
    event: RawEvent,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    channel: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct BlockActionsPayload {
    #[serde(rename = "type")]
    kind: String,
    user: IdRef,
    #[serde(default)]
    channel: Option<IdRef>,
    #[serde(default)]
    actions: Vec<RawAction>,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawAction {
    action_id: String,
    #[serde(default)]
    value: String,
}

/// Decodes one Socket Mode text frame.
///
/// # Errors
///
/// Returns [`ChatError::Envelope`] if the frame is not a JSON envelope.
pub fn parse_frame(text: &str) -> Result<SocketFrame, ChatError> {
    let raw: RawEnvelope = serde_json::from_str(text)?;

    let frame = match raw.kind.as_str() {
        "hello" => SocketFrame::Hello,
        "disconnect" => SocketFrame::Disconnect {
            reason: raw.reason.unwrap_or_default(),
        },
        "events_api" => SocketFrame::Envelope {
            envelope_id: raw.envelope_id,
            event: mention_event(raw.payload),
        },
        "interactive" => SocketFrame::Envelope {
            envelope_id: raw.envelope_id,
            event: action_event(raw.payload),
        },
        _ => SocketFrame::Other {
            kind: raw.kind,
            envelope_id: raw.envelope_id,
        },
    };
    Ok(frame)
}

fn mention_event(payload: Value) -> Option<InboundEvent> {
    let payload: EventsApiPayload = serde_json::from_value(payload)
        .map_err(|e| debug!(error = %e, "Unrecognised events_api payload"))
        .ok()?;
    let event = payload.event;
    if event.kind != "app_mention" {
        debug!(kind = %event.kind, "Ignoring event");
        return None;
    }
    Some(InboundEvent::Mention {
        user: event.user,
        channel: event.channel,
        text: event.text,
    })
}

fn action_event(payload: Value) -> Option<InboundEvent> {
    let payload: BlockActionsPayload = serde_json::from_value(payload)
        .map_err(|e| debug!(error = %e, "Unrecognised interactive payload"))
        .ok()?;
    if payload.kind != "block_actions" {
        debug!(kind = %payload.kind, "Ignoring interaction");
        return None;
    }
    let channel = payload.channel?;
    let action = payload.actions.into_iter().next()?;
    Some(InboundEvent::Action {
        user: payload.user.id,
        channel: channel.id,
        action_id: action.action_id,
        value: action.value,
    })
}

/// An open Socket Mode websocket.
pub struct SocketModeConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl SocketModeConnection {
    /// Connects to a URL returned by `apps.connections.open`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::WebSocket`] if the handshake fails.
    pub async fn connect(url: &str) -> Result<Self, ChatError> {
        let (stream, _) = connect_async(url).await?;
        info!("Socket Mode connected");
        Ok(Self { stream })
    }

    /// Waits for the next event addressed to the bot.
    ///
    /// Returns `Ok(None)` when Slack closes the socket or asks for a
    /// reconnect.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] on websocket failures.
    pub async fn next_event(&mut self) -> Result<Option<InboundEvent>, ChatError> {
        while let Some(message) = self.stream.next().await {
            let text = match message? {
                Message::Text(text) => text,
                Message::Close(frame) => {
                    info!(?frame, "Socket Mode closed by Slack");
                    return Ok(None);
                }
                _ => continue,
            };

            let frame = match parse_frame(text.as_str()) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed Socket Mode frame");
                    continue;
                }
            };

            if let Some(envelope_id) = frame.envelope_id() {
                self.acknowledge(envelope_id).await?;
            }

            match frame {
                SocketFrame::Hello => debug!("Socket Mode hello"),
                SocketFrame::Disconnect { reason } => {
                    info!(reason = %reason, "Slack requested reconnect");
                    return Ok(None);
                }
                SocketFrame::Envelope {
                    event: Some(event), ..
                } => return Ok(Some(event)),
                SocketFrame::Envelope { event: None, .. } => {}
                SocketFrame::Other { kind, .. } => debug!(kind = %kind, "Ignoring envelope"),
            }
        }

        Ok(None)
    }

    /// Acknowledges an envelope.
    async fn acknowledge(&mut self, envelope_id: &str) -> Result<(), ChatError> {
        let ack = serde_json::json!({ "envelope_id": envelope_id }).to_string();
        self.stream.send(Message::Text(ack.into())).await?;
        debug!(envelope_id, "Acknowledged envelope");
        Ok(())
    }
}
