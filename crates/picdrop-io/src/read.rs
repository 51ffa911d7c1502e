//! Reading dropped and picked files into memory.

use dioxus::html::FileData;
use picdrop_core::UploadedFile;

/// A file's contents could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to read {name}: {message}")]
pub struct ReadError {
    /// Name of the file being read.
    pub name: String,
    /// Browser-reported reason.
    pub message: String,
}

/// Read the first file of a drop payload or picker selection.
///
/// Only the first file is read; the rest are never loaded since the
/// selection would discard them anyway. Returns `Ok(None)` for an
/// empty list.
///
/// # Errors
///
/// Returns [`ReadError`] if the browser fails to read the file.
pub async fn read_first(files: Vec<FileData>) -> Result<Option<UploadedFile>, ReadError> {
    let Some(file) = files.into_iter().next() else {
        return Ok(None);
    };
    let name = file.name();
    match file.read_bytes().await {
        Ok(bytes) => Ok(Some(UploadedFile::new(name, bytes.to_vec()))),
        Err(e) => Err(ReadError {
            name,
            message: e.to_string(),
        }),
    }
}
