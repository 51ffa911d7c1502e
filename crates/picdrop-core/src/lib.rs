//! picdrop-core: Upload selection and auth form state (sans-IO).
//!
//! Models the single-file drop target (drag state, the held file, and
//! the lifetime of its preview reference), the accept policy applied
//! to incoming files, and the login/sign-up form.
//!
//! This crate has **no browser dependencies** -- preview references are
//! produced by a [`PreviewStore`] supplied by the caller, and
//! authentication is answered by whoever drives [`AuthForm`]. All DOM
//! interaction lives in `picdrop-io`.

pub mod accept;
pub mod auth;
pub mod config;
pub mod file;
pub mod preview;
pub mod selection;

pub use accept::{AcceptPolicy, InvalidAcceptToken};
pub use auth::{
    AccountBook, AuthForm, AuthMessage, AuthMode, AuthOutcome, AuthRequest, CredentialError,
    MessageKind,
};
pub use config::{Account, AppConfig, AuthConfig, ConfigError, UploadConfig};
pub use file::{TypeOrigin, UploadedFile};
pub use preview::{MemoryLedger, MemoryStore, PreviewError, PreviewStore};
pub use selection::{
    DropTargetState, ReadTicket, SelectError, SelectOutcome, Selection, UploadEffect, UploadView,
};
