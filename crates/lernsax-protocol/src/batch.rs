//! JSON-RPC 2.0 batch call records.
//!
//! The server consumes ordered batches and applies calls in sequence: a
//! session-scoped batch opens with `set_session`, usually followed by
//! `set_focus`, and ends with the terminal call that decides success or
//! failure.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::focus::FocusObject;

/// Protocol version sent with every call.
pub const JSONRPC_VERSION: &str = "2.0";

/// One call within a request batch.
///
/// `id` is caller-assigned and echoed back by the server. Batches are never
/// persisted; they are constructed and discarded per operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Caller-assigned sequence id, echoed by the server.
    pub id: u32,
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
    /// Remote method name.
    pub method: String,
    /// Method parameters.
    pub params: Value,
}

impl Call {
    /// Create a call with the fixed protocol version.
    #[must_use]
    pub fn new(id: u32, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

/// `set_session` call re-authenticating the batch with a session token.
#[must_use]
pub fn set_session(id: u32, session_id: &str) -> Call {
    Call::new(id, "set_session", json!({ "session_id": session_id }))
}

/// `set_focus` call selecting an object context, optionally scoped to a
/// target account or group login. Omitting the login operates on the
/// caller's own account.
#[must_use]
pub fn set_focus(id: u32, object: FocusObject, login: Option<&str>) -> Call {
    let mut params = json!({ "object": object.as_str() });
    if let Some(login) = login {
        params["login"] = Value::String(login.to_string());
    }
    Call::new(id, "set_focus", params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_carries_protocol_version() {
        let call = Call::new(3, "get_entries", json!({}));
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "get_entries");
    }

    #[test]
    fn set_session_shape() {
        let call = set_session(1, "abc123");
        assert_eq!(call.method, "set_session");
        assert_eq!(call.params, json!({ "session_id": "abc123" }));
    }

    #[test]
    fn set_focus_without_login() {
        let call = set_focus(2, FocusObject::Notes, None);
        assert_eq!(call.params, json!({ "object": "notes" }));
    }

    #[test]
    fn set_focus_with_login() {
        let call = set_focus(2, FocusObject::Files, Some("group@lernsax.de"));
        assert_eq!(
            call.params,
            json!({ "object": "files", "login": "group@lernsax.de" })
        );
    }

    #[test]
    fn batch_serializes_as_array() {
        let batch = vec![set_session(1, "s"), set_focus(2, FocusObject::Tasks, None)];
        let value = serde_json::to_value(&batch).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["method"], "set_session");
        assert_eq!(array[1]["method"], "set_focus");
    }

    #[test]
    fn call_roundtrips_through_json() {
        let call = set_focus(2, FocusObject::Board, Some("g@x.de"));
        let json = serde_json::to_string(&call).unwrap();
        let back: Call = serde_json::from_str(&json).unwrap();
        assert_eq!(back, call);
    }
}
