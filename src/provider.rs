use std::sync::mpsc::Sender;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::chat::{ChatMessage, ComponentInvocation, Role, ThreadEvent};
use crate::config::StudioConfig;
use crate::error::EngineError;
use crate::registry::REGISTRY;

const CHAT_PATH: &str = "/design/chat";
const MAX_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = "You are an interior design assistant. Answer briefly, and when a \
visual would help, emit exactly one registered component with props that fit its schema.";

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

/// Registry entry as the engine sees it: name, description, and the prop
/// schema it may fill in.
#[derive(Debug, Serialize)]
struct WireComponent<'a> {
    name: &'a str,
    description: &'a str,
    props_schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
    components: Vec<WireComponent<'a>>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    id: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
    Component { name: String, props: Value },
}

pub struct DesignEngineClient {
    http: Client,
    base_url: String,
    model: String,
}

impl DesignEngineClient {
    pub fn new(config: &StudioConfig) -> Result<Self, EngineError> {
        if !config.has_api_key() {
            return Err(EngineError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|_| EngineError::MissingApiKey)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// One blocking round-trip: full history out, one assistant message back.
    pub fn complete(&self, history: &[ChatMessage]) -> Result<ChatMessage, EngineError> {
        let request = CompletionRequest {
            model: &self.model,
            system: SYSTEM_PROMPT,
            max_tokens: MAX_TOKENS,
            messages: history
                .iter()
                .map(|m| WireMessage {
                    role: m.role,
                    content: &m.text,
                })
                .collect(),
            components: REGISTRY
                .iter()
                .map(|entry| WireComponent {
                    name: entry.name,
                    description: entry.description,
                    props_schema: &entry.schema,
                })
                .collect(),
        };

        let url = format!("{}{}", self.base_url, CHAT_PATH);
        debug!(%url, turns = history.len(), "design engine round-trip");

        let response = self.http.post(&url).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                body: body.chars().take(300).collect(),
            });
        }

        let reply: CompletionResponse = serde_json::from_str(&response.text()?)?;
        if reply.content.is_empty() {
            return Err(EngineError::EmptyReply);
        }
        info!(id = %reply.id, blocks = reply.content.len(), "engine reply received");

        let mut text = String::new();
        let mut component = None;
        for block in reply.content {
            match block {
                ContentBlock::Text { text: t } => {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&t);
                }
                // Last component block wins, matching the canvas contract.
                ContentBlock::Component { name, props } => {
                    component = Some(ComponentInvocation { name, props });
                }
            }
        }

        Ok(ChatMessage::assistant(text, component))
    }
}

/// Runs the round-trip off the UI thread and posts the outcome back through
/// the channel; the repaint nudge wakes the event loop so the reply is not
/// stuck until the next input.
pub fn spawn_round_trip(
    client: std::sync::Arc<DesignEngineClient>,
    history: Vec<ChatMessage>,
    tx: Sender<ThreadEvent>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let event = match client.complete(&history) {
            Ok(message) => ThreadEvent::Completed(message),
            Err(err) => {
                warn!("design engine call failed: {err}");
                ThreadEvent::Failed(err.to_string())
            }
        };
        if tx.send(event).is_err() {
            warn!("thread event dropped: receiver gone");
        }
        ctx.request_repaint();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_blocks_parse_text_and_component() {
        let raw = json!({
            "id": "gen_123",
            "content": [
                {"type": "text", "text": "Here is your room."},
                {"type": "component", "name": "luxury_room", "props": {"room_name": "Suite"}}
            ]
        });
        let reply: CompletionResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(reply.content.len(), 2);
        match &reply.content[1] {
            ContentBlock::Component { name, props } => {
                assert_eq!(name, "luxury_room");
                assert_eq!(props["room_name"], "Suite");
            }
            other => panic!("unexpected block: {other:?}"),
        }
    }

    #[test]
    fn client_requires_api_key() {
        let config = StudioConfig::default();
        assert!(matches!(
            DesignEngineClient::new(&config),
            Err(EngineError::MissingApiKey)
        ));
    }
}
