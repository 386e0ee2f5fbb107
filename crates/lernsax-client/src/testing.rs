//! Test doubles shared across unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use lernsax_protocol::Call;

use crate::channel::{ChannelError, RpcChannel};

/// Channel answering each batch with the next scripted reply.
///
/// Records every batch it sees; `handle()` returns a second view onto the
/// same state so tests can inspect traffic after boxing the channel.
#[derive(Clone)]
pub(crate) struct ScriptedChannel {
    replies: Arc<Mutex<VecDeque<Result<Vec<Value>, ChannelError>>>>,
    sent: Arc<Mutex<Vec<Vec<Call>>>>,
}

impl ScriptedChannel {
    pub(crate) fn scripted(replies: Vec<Result<Vec<Value>, ChannelError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn replying(replies: Vec<Vec<Value>>) -> Self {
        Self::scripted(replies.into_iter().map(Ok).collect())
    }

    pub(crate) fn handle(&self) -> Self {
        self.clone()
    }

    /// Snapshot of every batch sent so far.
    pub(crate) fn sent(&self) -> Vec<Vec<Call>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcChannel for ScriptedChannel {
    async fn send(&self, batch: &[Call]) -> Result<Vec<Value>, ChannelError> {
        self.sent.lock().unwrap().push(batch.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ChannelError::Decode {
                    message: "script exhausted".to_string(),
                })
            })
    }
}

/// An OK result for the given call id.
pub(crate) fn ok_result(id: u32) -> Value {
    json!({ "id": id, "result": { "return": "OK" } })
}

/// The two-element reply of a successful login batch.
pub(crate) fn login_success(session_id: &str, members: &[&str]) -> Vec<Value> {
    let members: Vec<Value> = members.iter().map(|m| json!({ "login": m })).collect();
    vec![
        json!({ "id": 1, "result": { "return": "OK", "member": members } }),
        json!({ "id": 999, "result": { "return": "OK", "session_id": session_id } }),
    ]
}
