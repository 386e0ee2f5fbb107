//! Client error types.

use serde_json::Value;

use lernsax_protocol::ApiFault;

use crate::channel::ChannelError;

/// Errors surfaced by client operations.
///
/// Nothing is retried and nothing is swallowed: server faults carry the raw
/// terminal result, transport errors pass through unmodified.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Server-reported fault, classified from the terminal errno.
    #[error(transparent)]
    Fault(#[from] ApiFault),

    /// The operation requires an authenticated session. Raised locally,
    /// before any network call.
    #[error("not logged in")]
    NotLoggedIn,

    /// No credentials retained from an earlier login.
    #[error("no stored credentials")]
    MissingCredentials,

    /// Login rejected with an errno outside the classified table.
    #[error("login failed (errno {errno})")]
    Login {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// Logout rejected by the server.
    #[error("logout failed")]
    Logout {
        /// Raw terminal result.
        response: Value,
    },

    /// Task page retrieval or parsing failed.
    #[error("task retrieval failed: {message}")]
    Task {
        /// Failure description.
        message: String,
    },

    /// Transport failure from the RPC channel.
    #[error("transport error: {0}")]
    Channel(#[from] ChannelError),

    /// The server returned fewer results than the batch had calls.
    #[error("response batch ended early: expected {expected} results, got {got}")]
    ShortBatch {
        /// Number of calls sent.
        expected: usize,
        /// Number of results received.
        got: usize,
    },

    /// The server reply did not have the expected shape.
    #[error("malformed server reply: {message}")]
    Malformed {
        /// What was missing or mis-shaped.
        message: String,
    },
}
