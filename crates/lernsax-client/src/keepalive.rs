//! Background session keep-alive.
//!
//! Refreshes the session on a fixed interval so the server does not expire
//! the token between operations. The loop takes the same serialization path
//! as every other operation (the shared client mutex), stops on its own once
//! logout cleared the token, and is cancelled explicitly at teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::client::Client;

/// Default refresh interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Outcome of the keep-alive loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeepaliveResult {
    /// The session token was cleared by a logout; nothing left to refresh.
    LoggedOut,
    /// The keep-alive was cancelled externally.
    Cancelled,
}

/// Run session refreshes on `interval` until cancelled or logged out.
///
/// The first tick fires immediately, re-validating the session right after
/// spawn. Refresh failures are logged and do not stop the loop; the next
/// tick tries again.
pub async fn run_keepalive(
    client: Arc<Mutex<Client>>,
    interval: Duration,
    cancel: CancellationToken,
) -> KeepaliveResult {
    let mut tick = time::interval(interval);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let mut client = client.lock().await;
                if !client.is_logged_in() {
                    return KeepaliveResult::LoggedOut;
                }
                if let Err(e) = client.refresh_session().await {
                    tracing::warn!("session refresh failed: {e}");
                }
            }
            () = cancel.cancelled() => {
                return KeepaliveResult::Cancelled;
            }
        }
    }
}

/// A spawned keep-alive task with explicit shutdown.
///
/// Teardown must go through [`shutdown`](KeepaliveHandle::shutdown) before
/// the transport is dropped; the loop is never left to process-exit cleanup
/// ordering.
pub struct KeepaliveHandle {
    cancel: CancellationToken,
    task: JoinHandle<KeepaliveResult>,
}

impl KeepaliveHandle {
    /// Spawn the keep-alive loop for a shared client.
    #[must_use]
    pub fn spawn(client: Arc<Mutex<Client>>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_keepalive(client, interval, cancel.clone()));
        Self { cancel, task }
    }

    /// Cancel the loop and wait for it to finish.
    pub async fn shutdown(self) -> KeepaliveResult {
        self.cancel.cancel();
        self.task.await.unwrap_or(KeepaliveResult::Cancelled)
    }
}
