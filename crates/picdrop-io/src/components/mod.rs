//! Dioxus UI components for picdrop.
//!
//! Provides the image drop target with live preview and the
//! login/sign-up panel.

mod auth_panel;
mod upload_area;

pub use auth_panel::AuthPanel;
pub use upload_area::UploadArea;
