//! Server fault taxonomy.
//!
//! A failed terminal call carries a numeric `errno` code. The mapping below
//! is static; every fault keeps the raw terminal result for context.

use serde_json::Value;

/// Fault reported by the server, classified from its `errno` code.
#[derive(Debug, thiserror::Error)]
pub enum ApiFault {
    /// The account may not perform the operation (errno 107 or 103).
    #[error("access denied (errno {errno})")]
    AccessDenied {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// The session token is invalid or expired (errno 106).
    #[error("invalid session (errno {errno})")]
    InvalidSession {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// A mail operation failed (errno 111).
    #[error("mail operation failed (errno {errno})")]
    Mail {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// The requested folder does not exist (errno 247).
    #[error("folder not found (errno {errno})")]
    FolderNotFound {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// The requested entry does not exist (errno 117).
    #[error("entry not found (errno {errno})")]
    EntryNotFound {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// A prior call in the batch failed, cascading into this one
    /// (errno 9999).
    #[error("a prior call in the batch failed (errno {errno})")]
    Consequential {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },

    /// An errno outside the documented table.
    #[error("unrecognized server error (errno {errno})")]
    Unknown {
        /// Server error code.
        errno: String,
        /// Raw terminal result.
        response: Value,
    },
}

impl ApiFault {
    /// Classify an errno code, attaching the raw terminal result.
    #[must_use]
    pub fn classify(errno: impl Into<String>, response: Value) -> Self {
        let errno = errno.into();
        match errno.as_str() {
            "107" | "103" => Self::AccessDenied { errno, response },
            "106" => Self::InvalidSession { errno, response },
            "111" => Self::Mail { errno, response },
            "247" => Self::FolderNotFound { errno, response },
            "117" => Self::EntryNotFound { errno, response },
            "9999" => Self::Consequential { errno, response },
            _ => Self::Unknown { errno, response },
        }
    }

    /// The server error code this fault was classified from.
    #[must_use]
    pub fn errno(&self) -> &str {
        match self {
            Self::AccessDenied { errno, .. }
            | Self::InvalidSession { errno, .. }
            | Self::Mail { errno, .. }
            | Self::FolderNotFound { errno, .. }
            | Self::EntryNotFound { errno, .. }
            | Self::Consequential { errno, .. }
            | Self::Unknown { errno, .. } => errno,
        }
    }

    /// The raw terminal result the server returned.
    #[must_use]
    pub fn response(&self) -> &Value {
        match self {
            Self::AccessDenied { response, .. }
            | Self::InvalidSession { response, .. }
            | Self::Mail { response, .. }
            | Self::FolderNotFound { response, .. }
            | Self::EntryNotFound { response, .. }
            | Self::Consequential { response, .. }
            | Self::Unknown { response, .. } => response,
        }
    }
}
