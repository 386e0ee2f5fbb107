//! # lernsax-client
//!
//! Session-scoped client for the LernSax platform: one JSON-RPC batch
//! endpoint, a fixed operation catalogue, and a legacy HTML task page.
//!
//! Every operation composes a short batch (re-authenticate the session,
//! select an object context, invoke), validates the terminal reply, and
//! unpacks the batch into a [`PackedResponse`] of `{result, helpers}`.
//! Server faults are classified from their errno code; see
//! [`ApiFault`] and [`ClientError`].
//!
//! # Example
//!
//! ```ignore
//! use lernsax_client::{Client, ClientConfig};
//!
//! let mut client = Client::new(ClientConfig::default())?;
//! let _ = client.login("user@lernsax.de", "secret").await?;
//! let files = client.get_files("user@lernsax.de", true).await?;
//! client.logout().await?;
//! ```

#![deny(unsafe_code)]

pub mod channel;
pub mod client;
pub mod config;
pub mod dav;
pub mod error;
pub mod keepalive;
pub mod messenger;
pub mod session;
pub mod tasks;

#[cfg(test)]
mod testing;

pub use channel::{ChannelError, HttpChannel, RpcChannel};
pub use client::Client;
pub use config::ClientConfig;
pub use dav::DavCredentials;
pub use error::ClientError;
pub use keepalive::{
    DEFAULT_REFRESH_INTERVAL, KeepaliveHandle, KeepaliveResult, run_keepalive,
};
pub use messenger::{Chat, ChatMessage, group_history_by_chat};
pub use session::Session;
pub use tasks::TaskLink;

pub use lernsax_protocol::{ApiFault, Call, FocusObject, PackedResponse};
