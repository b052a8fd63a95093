use serde::Serialize;
use serde_json::{json, Value};

/// A Slack modal definition as accepted by `views.open` and `views.update`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ModalView {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Value,
    pub submit: Value,
    pub close: Value,
    pub callback_id: String,
    pub blocks: Vec<Value>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Attachment {
    pub blocks: Vec<Value>,
    pub color: String,
}

/// Blocks and attachments of a `chat.postMessage` or command response.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MessageView {
    pub blocks: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl MessageView {
    pub fn blocks(blocks: Vec<Value>) -> Self {
        Self {
            blocks,
            attachments: vec![],
        }
    }
}

/// Slash command reply visible only to the caller.
#[derive(Serialize, Debug)]
pub struct EphemeralResponse {
    response_type: &'static str,
    #[serde(flatten)]
    message: MessageView,
}

impl EphemeralResponse {
    pub fn new(message: MessageView) -> Self {
        Self {
            response_type: "ephemeral",
            message,
        }
    }
}

pub fn plain_text(text: &str) -> Value {
    json!({
        "type": "plain_text",
        "text": text,
        "emoji": true,
    })
}

pub fn mrkdwn(text: &str) -> Value {
    json!({
        "type": "mrkdwn",
        "text": text,
    })
}

pub fn context(text: &str) -> Value {
    json!({
        "type": "context",
        "elements": [mrkdwn(text)],
    })
}

pub fn section(text: &str) -> Value {
    json!({
        "type": "section",
        "text": mrkdwn(text),
    })
}

pub fn divider() -> Value {
    json!({ "type": "divider" })
}

pub fn block_id(block: &Value) -> Option<&str> {
    block.get("block_id").and_then(Value::as_str)
}

pub fn block_type(block: &Value) -> Option<&str> {
    block.get("type").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_omit_empty_attachments() {
        let message = MessageView::blocks(vec![divider()]);

        assert_eq!(
            serde_json::to_value(message).unwrap(),
            json!({ "blocks": [{ "type": "divider" }] })
        );
    }

    #[test]
    fn it_should_flatten_the_message_into_an_ephemeral_response() {
        let response = EphemeralResponse::new(MessageView::blocks(vec![section("hi")]));

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "response_type": "ephemeral",
                "blocks": [{ "type": "section", "text": { "type": "mrkdwn", "text": "hi" } }],
            })
        );
    }
}
