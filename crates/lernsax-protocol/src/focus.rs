//! Focus object selection.
//!
//! Most operations scope their terminal call by first selecting an object
//! context with `set_focus`. The server accepts a fixed set of objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Object contexts accepted by `set_focus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusObject {
    /// File storage of an account or group.
    Files,
    /// Notes.
    Notes,
    /// Message board.
    Board,
    /// Email mailbox.
    Mailbox,
    /// Quick-message messenger.
    Messenger,
    /// Task lists.
    Tasks,
    /// Account settings.
    Settings,
}

impl FocusObject {
    /// Wire name of the focus object.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Notes => "notes",
            Self::Board => "board",
            Self::Mailbox => "mailbox",
            Self::Messenger => "messenger",
            Self::Tasks => "tasks",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for FocusObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(FocusObject::Files.as_str(), "files");
        assert_eq!(FocusObject::Mailbox.as_str(), "mailbox");
        assert_eq!(FocusObject::Settings.as_str(), "settings");
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&FocusObject::Messenger).unwrap();
        assert_eq!(json, r#""messenger""#);
    }

    #[test]
    fn deserializes_lowercase() {
        let obj: FocusObject = serde_json::from_str(r#""board""#).unwrap();
        assert_eq!(obj, FocusObject::Board);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(FocusObject::Tasks.to_string(), "tasks");
    }
}
