//! Response batch packing.
//!
//! A successful operation splits its response batch into the terminal result
//! and the remaining helper results, preserving their original order. The
//! split is reversible: [`PackedResponse::into_batch`] reproduces the batch
//! exactly.

use serde::Serialize;
use serde_json::Value;

/// `return` value marking success.
pub const RETURN_OK: &str = "OK";

/// `return` value marking a resumable partial listing; accepted only where
/// an operation documents it.
pub const RETURN_RESUME: &str = "RESUME";

/// A response batch split into its terminal result and helper results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PackedResponse {
    /// The terminal call's result.
    pub result: Value,
    /// The remaining results, in original batch order.
    pub helpers: Vec<Value>,
    #[serde(skip)]
    terminal_index: usize,
}

impl PackedResponse {
    /// Split `responses`, removing the entry at `terminal_index`.
    ///
    /// Returns `None` when the index is out of range.
    #[must_use]
    pub fn unpack(mut responses: Vec<Value>, terminal_index: usize) -> Option<Self> {
        if terminal_index >= responses.len() {
            return None;
        }
        let result = responses.remove(terminal_index);
        Some(Self {
            result,
            helpers: responses,
            terminal_index,
        })
    }

    /// Index the terminal entry held in the original response batch.
    #[must_use]
    pub fn terminal_index(&self) -> usize {
        self.terminal_index
    }

    /// Rebuild the original response batch, terminal entry back in place.
    #[must_use]
    pub fn into_batch(self) -> Vec<Value> {
        let mut batch = self.helpers;
        batch.insert(self.terminal_index, self.result);
        batch
    }
}

/// Read a result's `return` marker.
#[must_use]
pub fn return_code(response: &Value) -> Option<&str> {
    response.pointer("/result/return").and_then(Value::as_str)
}

/// Read a result's `errno` code. The server sends either a string or a bare
/// number.
#[must_use]
pub fn errno(response: &Value) -> Option<String> {
    match response.pointer("/result/errno") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
