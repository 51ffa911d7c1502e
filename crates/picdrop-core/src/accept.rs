//! Accept policy: which files the drop target takes.
//!
//! Mirrors the HTML `accept` attribute grammar so the same list drives
//! both the picker's declarative hint and the validation applied to
//! dropped files. Supported tokens:
//!
//! - `image/*` -- any subtype of a top-level type
//! - `image/png` -- an exact MIME type
//! - `.png` -- a file extension (case-insensitive)

use crate::file::extension;

/// A malformed token in an accept list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid accept token: {0:?}")]
pub struct InvalidAcceptToken(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
enum AcceptToken {
    /// Lowercase extension without the leading dot.
    Extension(String),
    /// Lowercase `type/subtype`.
    MimeType(String),
    /// Lowercase top-level type of a `type/*` token.
    MimeWildcard(String),
}

impl AcceptToken {
    fn parse(raw: &str) -> Result<Self, InvalidAcceptToken> {
        let token = raw.trim().to_ascii_lowercase();
        let invalid = || InvalidAcceptToken(raw.to_owned());

        if token.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        if let Some(ext) = token.strip_prefix('.') {
            if ext.is_empty() || ext.contains('/') {
                return Err(invalid());
            }
            return Ok(Self::Extension(ext.to_owned()));
        }

        let (top, sub) = token.split_once('/').ok_or_else(invalid)?;
        if top.is_empty() || top == "*" || sub.is_empty() || sub.contains('/') {
            return Err(invalid());
        }
        if sub == "*" {
            Ok(Self::MimeWildcard(top.to_owned()))
        } else {
            Ok(Self::MimeType(token))
        }
    }

    fn matches(&self, name: &str, mime: Option<&str>) -> bool {
        match self {
            Self::Extension(ext) => extension(name).is_some_and(|e| e.eq_ignore_ascii_case(ext)),
            Self::MimeType(expected) => mime.is_some_and(|m| m.eq_ignore_ascii_case(expected)),
            Self::MimeWildcard(top) => mime
                .and_then(|m| m.split_once('/'))
                .is_some_and(|(t, _)| t.eq_ignore_ascii_case(top)),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Extension(ext) => format!(".{ext}"),
            Self::MimeType(mime) => mime.clone(),
            Self::MimeWildcard(top) => format!("{top}/*"),
        }
    }
}

/// Parsed accept list.
///
/// An empty policy accepts every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptPolicy {
    tokens: Vec<AcceptToken>,
}

impl AcceptPolicy {
    /// Policy that accepts any file.
    #[must_use]
    pub const fn any() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Policy that accepts any `image/*` file.
    #[must_use]
    pub fn images() -> Self {
        Self {
            tokens: vec![AcceptToken::MimeWildcard("image".to_owned())],
        }
    }

    /// Parse a list of tokens. Blank tokens are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAcceptToken`] for the first token that is neither
    /// an extension, a MIME type, nor a `type/*` wildcard.
    pub fn parse<I, S>(tokens: I) -> Result<Self, InvalidAcceptToken>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .filter(|t| !t.as_ref().trim().is_empty())
            .map(|t| AcceptToken::parse(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    /// Returns `true` if this policy places no restriction.
    #[must_use]
    pub const fn accepts_everything(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check a file's name and detected MIME type against the policy.
    #[must_use]
    pub fn matches(&self, name: &str, mime: Option<&str>) -> bool {
        self.accepts_everything() || self.tokens.iter().any(|t| t.matches(name, mime))
    }

    /// Render the policy as an HTML `accept` attribute value.
    #[must_use]
    pub fn to_attribute(&self) -> String {
        self.tokens
            .iter()
            .map(AcceptToken::render)
            .collect::<Vec<_>>()
            .join(",")
    }
}
