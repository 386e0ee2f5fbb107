//! WebDAV credential hand-off.
//!
//! File transfer runs over WebDAV and is owned by an external collaborator.
//! The client does not reimplement it; it only surfaces the values such a
//! collaborator needs, composed explicitly at the call site.

/// Credentials and endpoint for a WebDAV file-transfer client.
///
/// Obtained from [`Client::dav_credentials`](crate::Client::dav_credentials)
/// once a login has stored credentials; pair it with
/// [`Client::http_client`](crate::Client::http_client) to share the
/// transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DavCredentials {
    /// Account login.
    pub login: String,
    /// Account password.
    pub password: String,
    /// Platform base URL, without trailing slash.
    pub base_url: String,
}
