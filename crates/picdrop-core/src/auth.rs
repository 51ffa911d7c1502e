//! Login/sign-up form state.
//!
//! [`AuthForm`] holds the form fields and status message and turns a
//! submit into an [`AuthRequest`]. Whoever drives the form sends that
//! request to an authenticator and feeds the answer back through
//! [`AuthForm::complete`]; the form itself never decides whether
//! credentials are correct.
//!
//! [`AccountBook`] is the in-memory account table behind the simulated
//! authenticator in `picdrop-io`.

use std::collections::HashMap;
use std::fmt;

use crate::config::Account;

/// Which action the form submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Sign in to an existing account.
    #[default]
    Login,
    /// Register a new account.
    SignUp,
}

impl AuthMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::SignUp,
            Self::SignUp => Self::Login,
        }
    }

    /// Heading and submit button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::SignUp => "Sign up",
        }
    }

    /// Label of the link that switches to the other mode.
    #[must_use]
    pub const fn switch_prompt(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account? Sign up",
            Self::SignUp => "Already have an account? Log in",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a submit was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// The email field is blank.
    #[error("please enter your email address")]
    MissingEmail,
    /// The password field is blank.
    #[error("please enter your password")]
    MissingPassword,
    /// The email is not shaped like `local@domain.tld`.
    #[error("please enter a valid email address")]
    InvalidEmail,
}

/// A request for the authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    /// Login or sign-up.
    pub mode: AuthMode,
    /// Trimmed email.
    pub email: String,
    /// Password as typed.
    pub password: String,
}

/// The authenticator's answer to an [`AuthRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Login accepted.
    LoggedIn {
        /// Account email.
        email: String,
    },
    /// Login refused: unknown email or wrong password.
    Rejected,
    /// Sign-up accepted.
    Registered {
        /// Account email.
        email: String,
    },
    /// Sign-up refused: the email is taken.
    AlreadyRegistered {
        /// Account email.
        email: String,
    },
}

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Positive result.
    Success,
    /// Refusal or error.
    Failure,
    /// Neutral notice.
    Info,
}

/// Status line shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthMessage {
    /// Tone, used for styling.
    pub kind: MessageKind,
    /// Text to show.
    pub text: String,
}

impl AuthMessage {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Check that `email` looks like `local@domain.tld`.
///
/// No whitespace, exactly one `@` with a non-empty local part, and a
/// domain containing a dot that is neither its first nor last
/// character.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validate form fields and build the request to send.
///
/// # Errors
///
/// Returns the first [`CredentialError`] found, checking the email
/// before the password.
pub fn validate_credentials(
    mode: AuthMode,
    email: &str,
    password: &str,
) -> Result<AuthRequest, CredentialError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CredentialError::MissingEmail);
    }
    if !is_valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }
    if password.trim().is_empty() {
        return Err(CredentialError::MissingPassword);
    }
    Ok(AuthRequest {
        mode,
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// State of the login/sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    email: String,
    password: String,
    message: Option<AuthMessage>,
    loading: bool,
}

impl AuthForm {
    /// Empty form in login mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Email field contents.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password field contents.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Status message, if any.
    #[must_use]
    pub const fn message(&self) -> Option<&AuthMessage> {
        self.message.as_ref()
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Update the email field. Ignored while loading.
    pub fn set_email(&mut self, email: impl Into<String>) {
        if !self.loading {
            self.email = email.into();
        }
    }

    /// Update the password field. Ignored while loading.
    pub fn set_password(&mut self, password: impl Into<String>) {
        if !self.loading {
            self.password = password.into();
        }
    }

    /// Switch between login and sign-up, clearing fields and message.
    ///
    /// Ignored while loading.
    pub fn toggle_mode(&mut self) {
        if self.loading {
            return;
        }
        self.mode = self.mode.toggled();
        self.reset_fields();
        self.message = None;
    }

    /// Validate the fields and start a request.
    ///
    /// On success the form enters the loading state and the returned
    /// request must eventually be answered with [`complete`](Self::complete).
    ///
    /// Returns `None` without touching state if a request is already in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] (also shown as a failure message)
    /// when a field is missing or the email is malformed.
    pub fn submit(&mut self) -> Result<Option<AuthRequest>, CredentialError> {
        if self.loading {
            return Ok(None);
        }
        self.message = None;
        match validate_credentials(self.mode, &self.email, &self.password) {
            Ok(request) => {
                self.loading = true;
                Ok(Some(request))
            }
            Err(e) => {
                self.message = Some(AuthMessage::new(MessageKind::Failure, e.to_string()));
                Err(e)
            }
        }
    }

    /// Apply the authenticator's answer to the in-flight request.
    pub fn complete<E: fmt::Display>(&mut self, result: Result<AuthOutcome, E>) {
        self.loading = false;
        let message = match result {
            Ok(AuthOutcome::LoggedIn { email }) => AuthMessage::new(
                MessageKind::Success,
                format!("Logged in as {email}. Welcome!"),
            ),
            Ok(AuthOutcome::Rejected) => AuthMessage::new(
                MessageKind::Failure,
                "Login failed: invalid email or password.",
            ),
            Ok(AuthOutcome::Registered { email }) => {
                self.reset_fields();
                self.mode = AuthMode::Login;
                AuthMessage::new(
                    MessageKind::Success,
                    format!("Signed up as {email}. You can log in now."),
                )
            }
            Ok(AuthOutcome::AlreadyRegistered { email }) => AuthMessage::new(
                MessageKind::Failure,
                format!("Sign-up failed: {email} is already registered."),
            ),
            Err(e) => AuthMessage::new(MessageKind::Failure, format!("Request failed: {e}")),
        };
        self.message = Some(message);
    }

    /// Show the notice for the home button.
    pub fn go_home(&mut self) {
        if !self.loading {
            self.message = Some(AuthMessage::new(MessageKind::Info, "Going to the home page."));
        }
    }

    fn reset_fields(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

/// In-memory account table.
///
/// Emails are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AccountBook {
    accounts: HashMap<String, String>,
}

impl AccountBook {
    /// Table seeded with `accounts`. Later duplicates win.
    #[must_use]
    pub fn new<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|a| (a.email.to_ascii_lowercase(), a.password.clone()))
            .collect();
        Self { accounts }
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if no account is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Answer a request, registering the account on a successful sign-up.
    pub fn handle(&mut self, request: &AuthRequest) -> AuthOutcome {
        let key = request.email.to_ascii_lowercase();
        let email = request.email.clone();
        match request.mode {
            AuthMode::Login => match self.accounts.get(&key) {
                Some(password) if *password == request.password => AuthOutcome::LoggedIn { email },
                _ => AuthOutcome::Rejected,
            },
            AuthMode::SignUp => {
                if self.accounts.contains_key(&key) {
                    AuthOutcome::AlreadyRegistered { email }
                } else {
                    self.accounts.insert(key, request.password.clone());
                    AuthOutcome::Registered { email }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled(mode: AuthMode, email: &str, password: &str) -> AuthForm {
        let mut form = AuthForm::new();
        if mode == AuthMode::SignUp {
            form.toggle_mode();
        }
        form.set_email(email);
        form.set_password(password);
        form
    }

    #[test]
    fn email_shape() {
        for good in ["a@b.co", "first.last@example.com", "x@sub.domain.org"] {
            assert!(is_valid_email(good), "{good:?} should be valid");
        }
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@example",
            "a@.com",
            "a@com.",
            "a b@example.com",
            "a@b@example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn missing_fields_checked_email_first() {
        assert_eq!(
            validate_credentials(AuthMode::Login, "   ", ""),
            Err(CredentialError::MissingEmail)
        );
        assert_eq!(
            validate_credentials(AuthMode::Login, "a@b.co", "  "),
            Err(CredentialError::MissingPassword)
        );
        assert_eq!(
            validate_credentials(AuthMode::Login, "nope", "pw"),
            Err(CredentialError::InvalidEmail)
        );
    }

    #[test]
    fn request_trims_email_only() {
        let request = validate_credentials(AuthMode::SignUp, "  a@b.co ", " pw ").unwrap();
        assert_eq!(request.email, "a@b.co");
        assert_eq!(request.password, " pw ");
        assert_eq!(request.mode, AuthMode::SignUp);
    }

    #[test]
    fn invalid_submit_sets_failure_message() {
        let mut form = filled(AuthMode::Login, "nope", "pw");
        assert_eq!(form.submit(), Err(CredentialError::InvalidEmail));
        assert!(!form.is_loading());
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Failure);
        assert_eq!(message.text, "please enter a valid email address");
    }

    #[test]
    fn submit_enters_loading_and_blocks_edits() {
        let mut form = filled(AuthMode::Login, "a@b.co", "pw");
        let request = form.submit().unwrap().unwrap();
        assert_eq!(request.email, "a@b.co");
        assert!(form.is_loading());

        form.set_email("other@b.co");
        form.toggle_mode();
        assert_eq!(form.email(), "a@b.co");
        assert_eq!(form.mode(), AuthMode::Login);
        assert_eq!(form.submit(), Ok(None));
    }

    #[test]
    fn login_results() {
        let mut form = filled(AuthMode::Login, "a@b.co", "pw");
        form.submit().unwrap();
        form.complete::<String>(Ok(AuthOutcome::LoggedIn {
            email: "a@b.co".into(),
        }));
        assert!(!form.is_loading());
        assert_eq!(form.message().unwrap().kind, MessageKind::Success);
        assert_eq!(form.email(), "a@b.co");

        form.submit().unwrap();
        form.complete::<String>(Ok(AuthOutcome::Rejected));
        assert_eq!(form.message().unwrap().kind, MessageKind::Failure);
    }

    #[test]
    fn sign_up_success_resets_to_login() {
        let mut form = filled(AuthMode::SignUp, "a@b.co", "pw");
        form.submit().unwrap();
        form.complete::<String>(Ok(AuthOutcome::Registered {
            email: "a@b.co".into(),
        }));
        assert_eq!(form.mode(), AuthMode::Login);
        assert_eq!(form.email(), "");
        assert_eq!(form.password(), "");
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Success);
        assert!(message.text.contains("a@b.co"));
    }

    #[test]
    fn collaborator_error_is_reported() {
        let mut form = filled(AuthMode::Login, "a@b.co", "pw");
        form.submit().unwrap();
        form.complete(Err("service unavailable"));
        assert!(!form.is_loading());
        assert_eq!(
            form.message().unwrap().text,
            "Request failed: service unavailable"
        );
    }

    #[test]
    fn toggle_clears_fields_and_message() {
        let mut form = filled(AuthMode::Login, "nope", "pw");
        let _ = form.submit();
        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::SignUp);
        assert_eq!(form.email(), "");
        assert!(form.message().is_none());
    }

    #[test]
    fn home_shows_info() {
        let mut form = AuthForm::new();
        form.go_home();
        assert_eq!(form.message().unwrap().kind, MessageKind::Info);
    }

    #[test]
    fn account_book_sign_up_then_login() {
        let mut book = AccountBook::default();
        let sign_up = validate_credentials(AuthMode::SignUp, "A@B.co", "pw").unwrap();
        assert_eq!(
            book.handle(&sign_up),
            AuthOutcome::Registered {
                email: "A@B.co".into()
            }
        );
        assert!(matches!(
            book.handle(&sign_up),
            AuthOutcome::AlreadyRegistered { .. }
        ));

        let login = validate_credentials(AuthMode::Login, "a@b.co", "pw").unwrap();
        assert!(matches!(book.handle(&login), AuthOutcome::LoggedIn { .. }));

        let wrong = validate_credentials(AuthMode::Login, "a@b.co", "nope").unwrap();
        assert_eq!(book.handle(&wrong), AuthOutcome::Rejected);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn account_book_seeded() {
        let seed = [Account {
            email: "demo@example.com".into(),
            password: "1234".into(),
        }];
        let mut book = AccountBook::new(&seed);
        let login = validate_credentials(AuthMode::Login, "demo@example.com", "1234").unwrap();
        assert!(matches!(book.handle(&login), AuthOutcome::LoggedIn { .. }));
    }
}
