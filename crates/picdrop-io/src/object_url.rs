//! Preview references backed by Blob object URLs.
//!
//! Wraps the selected file's bytes in a typed `Blob` and hands out the
//! `blob:` URL created for it. Each URL pins the blob in browser memory
//! until revoked, so [`ObjectUrlStore`] revokes on release.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use picdrop_core::{PreviewError, PreviewStore, UploadedFile};
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

use crate::console;

/// MIME type used for files whose type could not be detected.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Errors that can occur while creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum ObjectUrlError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ObjectUrlError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<ObjectUrlError> for PreviewError {
    fn from(err: ObjectUrlError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Create an object URL for `bytes` typed as `mime_type`.
///
/// The returned URL must be revoked via [`revoke_object_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`ObjectUrlError::JsError`] if Blob or URL creation fails.
pub fn create_object_url(bytes: &[u8], mime_type: &str) -> Result<String, ObjectUrlError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke an object URL previously created by [`create_object_url`].
///
/// Best-effort: a failure is logged, not reported, since the caller
/// has already stopped displaying the URL.
pub fn revoke_object_url(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        console::warn(&format!("failed to revoke {url}: {e:?}"));
    }
}

/// [`PreviewStore`] that hands out `blob:` object URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlStore;

impl PreviewStore for ObjectUrlStore {
    type Handle = String;

    fn acquire(&mut self, file: &UploadedFile) -> Result<String, PreviewError> {
        let mime = file.mime_type().unwrap_or(FALLBACK_MIME);
        Ok(create_object_url(file.bytes(), mime)?)
    }

    fn release(&mut self, url: String) {
        revoke_object_url(&url);
    }
}
