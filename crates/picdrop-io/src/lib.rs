//! picdrop-io: Browser I/O and Dioxus component library.
//!
//! Turns dropped and picked files into [`picdrop_core::UploadedFile`]s,
//! backs previews with object URLs, answers auth requests through the
//! [`Authenticator`] seam, and provides the upload area and auth panel
//! components for the picdrop web application.

pub mod auth;
pub mod components;
pub mod console;
pub mod object_url;
pub mod read;

pub use auth::{AuthError, Authenticator, SimulatedAuthenticator};
pub use components::{AuthPanel, UploadArea};
pub use object_url::ObjectUrlStore;
