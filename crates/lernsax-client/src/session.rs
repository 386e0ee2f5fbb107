//! Session state.

/// Mutable session state owned by a client.
///
/// Created empty; populated atomically by a successful login; its token is
/// cleared by a successful logout. Credentials are retained so a dropped
/// session can be re-entered without the caller re-supplying them.
#[derive(Clone, Debug, Default)]
pub struct Session {
    session_id: String,
    email: String,
    password: String,
    member_of: Vec<String>,
}

impl Session {
    /// Whether a server-issued session token is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// The server-issued session token; empty when logged out.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The login the session was established with.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Group logins the account is a member of, populated at login.
    #[must_use]
    pub fn member_of(&self) -> &[String] {
        &self.member_of
    }

    /// Install a freshly established session. All fields move together; a
    /// session is never half-populated.
    pub(crate) fn establish(
        &mut self,
        session_id: String,
        email: String,
        password: String,
        member_of: Vec<String>,
    ) {
        self.session_id = session_id;
        self.email = email;
        self.password = password;
        self.member_of = member_of;
    }

    /// Drop the token. Credentials and memberships stay for re-login.
    pub(crate) fn clear_token(&mut self) {
        self.session_id.clear();
    }

    /// Retained credentials, if a login happened before.
    pub(crate) fn credentials(&self) -> Option<(String, String)> {
        if self.email.is_empty() {
            return None;
        }
        Some((self.email.clone(), self.password.clone()))
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = Session::default();
        assert!(!session.is_active());
        assert_eq!(session.session_id(), "");
        assert!(session.member_of().is_empty());
        assert!(session.credentials().is_none());
    }

    #[test]
    fn establish_populates_all_fields() {
        let mut session = Session::default();
        session.establish(
            "tok".into(),
            "u@lernsax.de".into(),
            "pw".into(),
            vec!["g1@lernsax.de".into()],
        );
        assert!(session.is_active());
        assert_eq!(session.session_id(), "tok");
        assert_eq!(session.email(), "u@lernsax.de");
        assert_eq!(session.member_of(), ["g1@lernsax.de".to_string()]);
        assert_eq!(
            session.credentials(),
            Some(("u@lernsax.de".to_string(), "pw".to_string()))
        );
    }

    #[test]
    fn clear_token_keeps_credentials() {
        let mut session = Session::default();
        session.establish("tok".into(), "u@x.de".into(), "pw".into(), Vec::new());
        session.clear_token();
        assert!(!session.is_active());
        assert!(session.credentials().is_some());
    }
}
