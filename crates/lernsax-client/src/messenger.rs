//! Quick-message history grouping.
//!
//! `get_quick_message_history` returns one flat message list. This module
//! groups it per chat partner and keeps each chat ordered ascending by send
//! date, tolerating a server that delivers the list unsorted.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use lernsax_protocol::PackedResponse;

use crate::error::ClientError;

/// One chat partner's grouped history.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chat {
    /// Human-readable chat name.
    pub chat_name: String,
    /// Partner type reported by the server (user, group, ...).
    pub chat_type: String,
    /// Messages ordered ascending by date.
    pub messages: Vec<ChatMessage>,
}

/// One quick message within a chat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Server-assigned message id.
    pub id: Value,
    /// Message body.
    pub text: String,
    /// Send date, epoch seconds.
    pub date: i64,
    /// Server-reported message flags.
    pub flags: Value,
}

/// Group an unpacked quick-message history by chat partner login.
///
/// The message list is read from the reply's `result.messages` field.
pub fn group_history_by_chat(
    history: &PackedResponse,
) -> Result<BTreeMap<String, Chat>, ClientError> {
    let messages = history
        .result
        .pointer("/result/messages")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("history reply carries no message list"))?;

    let mut chats: BTreeMap<String, Chat> = BTreeMap::new();
    for message in messages {
        let date = epoch_seconds(message.get("date"))
            .ok_or_else(|| malformed("message date is not an epoch timestamp"))?;
        let partner = message
            .pointer("/to/login")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("message carries no partner login"))?;

        let chat = chats.entry(partner.to_string()).or_insert_with(|| Chat {
            chat_name: string_at(message, "/to/name_hr"),
            chat_type: string_at(message, "/to/type"),
            messages: Vec::new(),
        });
        insert_by_date(
            &mut chat.messages,
            ChatMessage {
                id: message.get("id").cloned().unwrap_or(Value::Null),
                text: string_at(message, "/text"),
                date,
                flags: message.get("flags").cloned().unwrap_or(Value::Null),
            },
        );
    }
    Ok(chats)
}

fn malformed(message: &str) -> ClientError {
    ClientError::Malformed {
        message: message.to_string(),
    }
}

fn string_at(message: &Value, pointer: &str) -> String {
    message
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The server sends the date as either a number or a numeric string.
fn epoch_seconds(date: Option<&Value>) -> Option<i64> {
    match date? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Keep `messages` ascending by date. History normally arrives pre-sorted,
/// so the common case appends; an out-of-order message is placed before the
/// first entry with an equal or later date.
fn insert_by_date(messages: &mut Vec<ChatMessage>, message: ChatMessage) {
    match messages.last() {
        Some(tail) if message.date < tail.date => {
            let at = messages
                .iter()
                .position(|m| m.date >= message.date)
                .unwrap_or(messages.len());
            messages.insert(at, message);
        }
        _ => messages.push(message),
    }
}
