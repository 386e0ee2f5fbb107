//! Session orchestrator and operation catalogue.
//!
//! Every operation follows one template: open the batch with `set_session`,
//! usually select an object context with `set_focus`, append the terminal
//! call, send, validate the terminal reply, and unpack the batch into
//! `{result, helpers}`. The catalogue methods below are thin descriptors
//! over that shared executor.

use serde_json::{Value, json};

use lernsax_protocol::{ApiFault, Call, FocusObject, PackedResponse, batch, pack};

use crate::channel::{HttpChannel, RpcChannel};
use crate::config::ClientConfig;
use crate::dav::DavCredentials;
use crate::error::ClientError;
use crate::session::Session;
use crate::tasks::{self, TaskLink};

/// Client for one account's session against the platform.
///
/// Operations take `&mut self`: a client runs at most one operation at a
/// time, because operations read and conditionally write session state.
/// Independent accounts get independent clients.
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
    channel: Box<dyn RpcChannel>,
    session: Session,
}

/// Descriptor for one catalogued operation.
struct Operation<'a> {
    focus: FocusObject,
    target: Option<&'a str>,
    method: &'a str,
    params: Value,
    accept_resume: bool,
}

impl<'a> Operation<'a> {
    fn new(focus: FocusObject, method: &'a str, params: Value) -> Self {
        Self {
            focus,
            target: None,
            method,
            params,
            accept_resume: false,
        }
    }

    /// Scope the focus to a target account or group login.
    fn target(mut self, login: &'a str) -> Self {
        self.target = Some(login);
        self
    }

    /// Accept a `"RESUME"` terminal reply as success.
    fn accept_resume(mut self) -> Self {
        self.accept_resume = true;
        self
    }
}

impl Client {
    /// Create a client for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(crate::channel::ChannelError::from)?;
        let channel = HttpChannel::new(config.rpc_endpoint(), http.clone());
        Ok(Self {
            config,
            http,
            channel: Box::new(channel),
            session: Session::default(),
        })
    }

    /// Create a client over a custom RPC channel.
    #[must_use]
    pub fn with_channel(config: ClientConfig, channel: Box<dyn RpcChannel>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            channel,
            session: Session::default(),
        }
    }

    /// The configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session state snapshot.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a session token is currently held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_active()
    }

    /// The underlying HTTP client, for collaborators sharing the transport.
    #[must_use]
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Values a WebDAV file-transfer collaborator needs, composed explicitly
    /// rather than mixed into the client's own surface.
    ///
    /// `None` until a login stored credentials.
    #[must_use]
    pub fn dav_credentials(&self) -> Option<DavCredentials> {
        let (login, _) = self.session.credentials()?;
        Some(DavCredentials {
            login,
            password: self.session.password().to_string(),
            base_url: self.config.base_url.clone(),
        })
    }

    // ── Session lifecycle ────────────────────────────────────────────────

    /// Enter a session.
    ///
    /// On success the token, credentials, and group memberships are stored
    /// together; on any failure the session is left untouched. Classified
    /// errnos keep their fault kinds; anything else maps to
    /// [`ClientError::Login`].
    #[tracing::instrument(skip_all, fields(login = %email))]
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<PackedResponse, ClientError> {
        let request = vec![
            Call::new(
                1,
                "login",
                json!({ "login": email, "password": password, "get_miniature": true }),
            ),
            Call::new(999, "get_information", json!({})),
        ];
        let responses = self.channel.send(&request).await?;
        ensure_len(&responses, request.len())?;

        let reply = &responses[0];
        if pack::return_code(reply) != Some(pack::RETURN_OK) {
            let errno = pack::errno(reply).unwrap_or_default();
            return Err(match ApiFault::classify(errno, reply.clone()) {
                ApiFault::Unknown { errno, response } => ClientError::Login { errno, response },
                fault => fault.into(),
            });
        }

        let session_id = responses[1]
            .pointer("/result/session_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Malformed {
                message: "login reply carries no session id".to_string(),
            })?
            .to_string();
        let member_of = reply
            .pointer("/result/member")
            .and_then(Value::as_array)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|m| m.get("login").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        self.session.establish(
            session_id,
            email.to_string(),
            password.to_string(),
            member_of,
        );
        tracing::info!(members = self.session.member_of().len(), "session established");
        unpack_checked(responses, 0)
    }

    /// Re-enter a session with the credentials retained from an earlier
    /// login.
    pub async fn relogin(&mut self) -> Result<PackedResponse, ClientError> {
        let (email, password) = self
            .session
            .credentials()
            .ok_or(ClientError::MissingCredentials)?;
        self.login(&email, &password).await
    }

    /// Re-validate the current session with the server.
    ///
    /// Idempotent keep-alive: the token value never changes.
    #[tracing::instrument(skip_all)]
    pub async fn refresh_session(&mut self) -> Result<PackedResponse, ClientError> {
        let sid = self.require_session()?;
        let request = vec![batch::set_session(1, &sid)];
        self.run(request, false).await
    }

    /// Exit the session. The token is cleared only after the server
    /// confirms; any non-OK reply is a [`ClientError::Logout`].
    #[tracing::instrument(skip_all)]
    pub async fn logout(&mut self) -> Result<PackedResponse, ClientError> {
        let sid = self.require_session()?;
        let request = vec![
            batch::set_session(1, &sid),
            batch::set_focus(2, FocusObject::Settings, None),
            Call::new(3, "logout", json!({})),
        ];
        let responses = self.channel.send(&request).await?;
        ensure_len(&responses, request.len())?;

        let terminal = &responses[2];
        if pack::return_code(terminal) != Some(pack::RETURN_OK) {
            return Err(ClientError::Logout {
                response: terminal.clone(),
            });
        }
        self.session.clear_token();
        tracing::info!("session cleared");
        unpack_checked(responses, 2)
    }

    // ── Tasks ────────────────────────────────────────────────────────────

    /// List the task entries of a group.
    pub async fn get_tasks(&mut self, group: &str) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(FocusObject::Tasks, "get_entries", json!({})).target(group))
            .await
    }

    /// Fetch the legacy task listing page and extract its task anchors.
    ///
    /// This predates the JSON-RPC surface: a plain authenticated GET, no
    /// batching, no session mutation. All network and parse failures
    /// collapse into [`ClientError::Task`].
    #[tracing::instrument(skip_all)]
    pub async fn scrape_tasks(&mut self) -> Result<Vec<TaskLink>, ClientError> {
        let sid = self.require_session()?;
        let url = self.config.tasks_url(&sid);
        let body = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(task_error)?
            .text()
            .await
            .map_err(task_error)?;
        tasks::extract_task_links(&body).map_err(|message| ClientError::Task { message })
    }

    // ── Files ────────────────────────────────────────────────────────────

    /// List the files and folders visible to a login.
    ///
    /// `recursive` walks the whole tree in one listing; the server may
    /// answer a long listing with `"RESUME"`, which counts as success here.
    pub async fn get_files(
        &mut self,
        login: &str,
        recursive: bool,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(
            Operation::new(
                FocusObject::Files,
                "get_entries",
                json!({
                    "folder_id": "",
                    "get_files": 1,
                    "get_folders": 1,
                    "recursive": u8::from(recursive),
                }),
            )
            .target(login)
            .accept_resume(),
        )
        .await
    }

    /// Query used and free storage for a login.
    pub async fn get_storage_state(&mut self, login: &str) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(FocusObject::Files, "get_state", json!({})).target(login))
            .await
    }

    /// Resolve a file id to a download URL.
    pub async fn get_download_url(
        &mut self,
        login: &str,
        id: &str,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(
            Operation::new(FocusObject::Files, "get_file_download_url", json!({ "id": id }))
                .target(login),
        )
        .await
    }

    /// Edit a file's description and, optionally, its name.
    ///
    /// With no explicit name, the name is derived from the file id by
    /// truncating it up to and including its last comma.
    pub async fn edit_file(
        &mut self,
        login: &str,
        id: &str,
        description: &str,
        name: Option<&str>,
    ) -> Result<PackedResponse, ClientError> {
        let name = name.map_or_else(|| default_file_name(id), str::to_string);
        self.execute(
            Operation::new(
                FocusObject::Files,
                "set_file",
                json!({
                    "id": id,
                    "folder_id": parent_folder_id(id),
                    "name": name,
                    "description": description,
                }),
            )
            .target(login),
        )
        .await
    }

    // ── Board ────────────────────────────────────────────────────────────

    /// List the board entries of a login.
    ///
    /// The production service answers this through the `files` focus with a
    /// plain `get_entries`; there is no board-scoped listing call.
    pub async fn get_board(&mut self, login: &str) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(FocusObject::Files, "get_entries", json!({})).target(login))
            .await
    }

    /// Add a board entry for a (group) login.
    ///
    /// `color` must be a hexadecimal color code; the server validates it.
    pub async fn add_board_entry(
        &mut self,
        login: &str,
        title: &str,
        text: &str,
        color: &str,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(
            Operation::new(
                FocusObject::Board,
                "add_entry",
                json!({ "title": title, "text": text, "color": color }),
            )
            .target(login),
        )
        .await
    }

    // ── Notes ────────────────────────────────────────────────────────────

    /// List the notes of a login.
    pub async fn get_notes(&mut self, login: &str) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(FocusObject::Notes, "get_entries", json!({})).target(login))
            .await
    }

    /// Add a note to the caller's own account.
    pub async fn add_note(
        &mut self,
        title: &str,
        text: &str,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Notes,
            "add_entry",
            json!({ "text": text, "title": title }),
        ))
        .await
    }

    /// Delete a note by id.
    pub async fn delete_note(&mut self, id: &str) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Notes,
            "delete_entry",
            json!({ "id": id }),
        ))
        .await
    }

    // ── Email ────────────────────────────────────────────────────────────

    /// List the mailbox folders.
    pub async fn get_email_folders(&mut self) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(FocusObject::Mailbox, "get_folders", json!({})))
            .await
    }

    /// List the emails of a folder.
    pub async fn get_emails(&mut self, folder_id: &str) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Mailbox,
            "get_messages",
            json!({ "folder_id": folder_id }),
        ))
        .await
    }

    /// Read one email.
    pub async fn read_email(
        &mut self,
        folder_id: &str,
        message_id: u64,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Mailbox,
            "read_message",
            json!({ "folder_id": folder_id, "message_id": message_id }),
        ))
        .await
    }

    /// Send an email.
    pub async fn send_email(
        &mut self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Mailbox,
            "send_mail",
            json!({ "to": to, "subject": subject, "body_plain": body }),
        ))
        .await
    }

    // ── Messenger ────────────────────────────────────────────────────────

    /// Read the pending quick messages.
    pub async fn get_quick_messages(&mut self) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Messenger,
            "read_quick_messages",
            json!({ "export_session_file": 0 }),
        ))
        .await
    }

    /// Send a quick message to a login.
    pub async fn send_quick_message(
        &mut self,
        login: &str,
        text: &str,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Messenger,
            "send_quick_message",
            json!({ "login": login, "text": text, "import_session_file": 0 }),
        ))
        .await
    }

    /// Fetch quick-message history starting at a message-id cursor.
    pub async fn get_quick_message_history(
        &mut self,
        start_id: u64,
    ) -> Result<PackedResponse, ClientError> {
        self.execute(Operation::new(
            FocusObject::Messenger,
            "get_history",
            json!({ "start_id": start_id, "export_session_file": 0 }),
        ))
        .await
    }

    // ── Shared executor ──────────────────────────────────────────────────

    /// Run one catalogued operation: re-authenticate, select focus, invoke.
    #[tracing::instrument(skip_all, fields(method = op.method, focus = %op.focus))]
    async fn execute(&mut self, op: Operation<'_>) -> Result<PackedResponse, ClientError> {
        let sid = self.require_session()?;
        let request = vec![
            batch::set_session(1, &sid),
            batch::set_focus(2, op.focus, op.target),
            Call::new(3, op.method, op.params),
        ];
        self.run(request, op.accept_resume).await
    }

    async fn run(
        &mut self,
        request: Vec<Call>,
        accept_resume: bool,
    ) -> Result<PackedResponse, ClientError> {
        let responses = self.channel.send(&request).await?;
        ensure_len(&responses, request.len())?;
        let terminal = request.len() - 1;
        validate_terminal(&responses[terminal], accept_resume)?;
        unpack_checked(responses, terminal)
    }

    fn require_session(&self) -> Result<String, ClientError> {
        if !self.session.is_active() {
            return Err(ClientError::NotLoggedIn);
        }
        Ok(self.session.session_id().to_string())
    }
}

/// Check the terminal reply's `return` marker; classify anything else.
fn validate_terminal(response: &Value, accept_resume: bool) -> Result<(), ClientError> {
    match pack::return_code(response) {
        Some(pack::RETURN_OK) => Ok(()),
        Some(pack::RETURN_RESUME) if accept_resume => Ok(()),
        _ => {
            let errno = pack::errno(response).unwrap_or_default();
            Err(ApiFault::classify(errno, response.clone()).into())
        }
    }
}

fn ensure_len(responses: &[Value], expected: usize) -> Result<(), ClientError> {
    if responses.len() < expected {
        return Err(ClientError::ShortBatch {
            expected,
            got: responses.len(),
        });
    }
    Ok(())
}

fn unpack_checked(responses: Vec<Value>, index: usize) -> Result<PackedResponse, ClientError> {
    let got = responses.len();
    PackedResponse::unpack(responses, index).ok_or(ClientError::ShortBatch {
        expected: index + 1,
        got,
    })
}

fn task_error(e: reqwest::Error) -> ClientError {
    ClientError::Task {
        message: e.to_string(),
    }
}

/// File name fallback: the id up to and including its last comma, empty
/// when the id has none.
fn default_file_name(id: &str) -> String {
    id.rfind(',').map_or_else(String::new, |i| id[..=i].to_string())
}

/// Folder id of a file id: everything before its last slash.
fn parent_folder_id(id: &str) -> String {
    id.rfind('/').map_or_else(String::new, |i| id[..i].to_string())
}
