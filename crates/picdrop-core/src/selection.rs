//! Single-file selection state for the drop target.
//!
//! [`Selection`] owns everything the upload widget tracks: whether a
//! drag is hovering, the currently held file, and that file's preview
//! reference. The widget forwards DOM events to the `on_*` methods and
//! renders from [`Selection::view`] and
//! [`Selection::drop_target_state`].
//!
//! # Invariants
//!
//! - At most one file is held; a new selection replaces the old one.
//! - A preview reference exists if and only if a file is held (they
//!   are stored together in one `Held` value).
//! - Every preview reference is released exactly once: on replacement,
//!   on [`Selection::clear`], or when the selection is dropped.

use crate::accept::AcceptPolicy;
use crate::config::{ConfigError, UploadConfig};
use crate::file::UploadedFile;
use crate::preview::{PreviewError, PreviewStore};

/// Errors that reject a candidate file.
///
/// A rejected file never replaces the current selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The file's type is not allowed by the accept policy.
    #[error("unsupported file type for {name}: {}", .mime.unwrap_or("unknown"))]
    UnsupportedType {
        /// Rejected file name.
        name: String,
        /// MIME type recognized from the contents, if any.
        mime: Option<&'static str>,
    },

    /// The file has no contents.
    #[error("{name} is empty")]
    EmptyFile {
        /// Rejected file name.
        name: String,
    },

    /// The file exceeds the configured size limit.
    #[error("{name} is {size} bytes, over the {limit} byte limit")]
    TooLarge {
        /// Rejected file name.
        name: String,
        /// File size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The preview reference could not be created.
    #[error("could not create preview: {0}")]
    Preview(#[from] PreviewError),
}

/// Which input path produced a candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionSource {
    /// Drag-and-drop onto the target.
    Drop,
    /// The (hidden) file picker.
    Picker,
}

/// Result of a drop or picker change that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The first file of the payload is now held.
    Selected,
    /// The payload was empty; nothing changed.
    NoFiles,
}

/// Side effect the host must perform on behalf of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEffect {
    /// Open the file picker (click the hidden `<input type="file">`).
    OpenPicker,
}

/// Identifies one in-flight file read.
///
/// Reading a dropped or picked file is asynchronous, so reads can finish
/// out of order. Take a ticket with [`Selection::begin_read`] before
/// reading and check [`Selection::is_current`] before applying the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

/// Visual treatment of the drop target's border and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTargetState {
    /// No drag is hovering.
    Inactive,
    /// A drag is hovering over the target.
    Active,
}

/// What the drop target should display.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadView<'a, H> {
    /// Instructional placeholder text.
    Placeholder,
    /// Contain-fit preview of the held file.
    Preview {
        /// Preview reference to render.
        url: &'a H,
        /// The file being previewed.
        file: &'a UploadedFile,
    },
}

/// A held file paired with its preview reference.
struct Held<H> {
    file: UploadedFile,
    preview: H,
}

/// Local state of one upload widget instance.
pub struct Selection<S: PreviewStore> {
    store: S,
    held: Option<Held<S::Handle>>,
    drag_active: bool,
    policy: AcceptPolicy,
    validate_drops: bool,
    max_bytes: Option<u64>,
    last_error: Option<SelectError>,
    read_generation: u64,
}

impl<S: PreviewStore> Selection<S> {
    /// Create an empty selection that validates both input paths
    /// against `policy`.
    #[must_use]
    pub fn new(store: S, policy: AcceptPolicy) -> Self {
        Self {
            store,
            held: None,
            drag_active: false,
            policy,
            validate_drops: true,
            max_bytes: None,
            last_error: None,
            read_generation: 0,
        }
    }

    /// Create an empty selection from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the accept list is malformed.
    pub fn from_config(store: S, config: &UploadConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(store, config.accept_policy()?)
            .with_drop_validation(config.validate_drops)
            .with_max_bytes(config.max_bytes))
    }

    /// Whether dropped files are checked against the accept policy.
    ///
    /// Picker selections are always checked.
    #[must_use]
    pub fn with_drop_validation(mut self, validate: bool) -> Self {
        self.validate_drops = validate;
        self
    }

    /// Reject files larger than `limit` bytes (`None` for no limit).
    #[must_use]
    pub fn with_max_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_bytes = limit;
        self
    }

    // --- Event handlers ---

    /// A drag entered the drop target.
    pub const fn on_drag_enter(&mut self) {
        self.drag_active = true;
    }

    /// A drag is moving over the drop target.
    ///
    /// The host must also suppress the browser's default handling so
    /// the file is not opened in the tab.
    pub const fn on_drag_over(&mut self) {
        self.drag_active = true;
    }

    /// The drag left the drop target.
    pub const fn on_drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Payload dropped on the target.
    ///
    /// Always ends the drag. Selects the first file if there is one;
    /// any further files are discarded.
    ///
    /// # Errors
    ///
    /// See [`SelectError`]. The current selection is left untouched and
    /// the error is also kept in [`Selection::last_error`].
    pub fn on_drop<I>(&mut self, files: I) -> Result<SelectOutcome, SelectError>
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        self.drag_active = false;
        self.select_first(SelectionSource::Drop, files)
    }

    /// The file picker's selection changed.
    ///
    /// # Errors
    ///
    /// Same as [`Selection::on_drop`].
    pub fn on_file_picker_change<I>(&mut self, files: I) -> Result<SelectOutcome, SelectError>
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        self.select_first(SelectionSource::Picker, files)
    }

    /// The drop target was clicked; the whole area acts as the picker
    /// trigger.
    #[must_use]
    pub const fn on_area_click(&self) -> UploadEffect {
        UploadEffect::OpenPicker
    }

    /// Start reading a new payload, superseding any read in flight.
    pub const fn begin_read(&mut self) -> ReadTicket {
        self.read_generation += 1;
        ReadTicket(self.read_generation)
    }

    /// Returns `false` once a later [`begin_read`](Self::begin_read) has
    /// superseded `ticket`; its result must then be discarded.
    #[must_use]
    pub const fn is_current(&self, ticket: ReadTicket) -> bool {
        ticket.0 == self.read_generation
    }

    /// Release the held file and its preview and reset drag state.
    pub fn clear(&mut self) {
        if let Some(held) = self.held.take() {
            self.store.release(held.preview);
        }
        self.drag_active = false;
        self.last_error = None;
    }

    // --- Rendering ---

    /// What the drop target should display.
    #[must_use]
    pub fn view(&self) -> UploadView<'_, S::Handle> {
        self.held
            .as_ref()
            .map_or(UploadView::Placeholder, |held| UploadView::Preview {
                url: &held.preview,
                file: &held.file,
            })
    }

    /// Border/background treatment for the drop target.
    #[must_use]
    pub const fn drop_target_state(&self) -> DropTargetState {
        if self.drag_active {
            DropTargetState::Active
        } else {
            DropTargetState::Inactive
        }
    }

    /// Returns `true` while a drag hovers the target.
    #[must_use]
    pub const fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// The held file, if any.
    #[must_use]
    pub fn file(&self) -> Option<&UploadedFile> {
        self.held.as_ref().map(|held| &held.file)
    }

    /// The held file's preview reference, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&S::Handle> {
        self.held.as_ref().map(|held| &held.preview)
    }

    /// The most recent rejection, cleared by the next successful selection.
    #[must_use]
    pub const fn last_error(&self) -> Option<&SelectError> {
        self.last_error.as_ref()
    }

    /// The policy files are checked against.
    #[must_use]
    pub const fn policy(&self) -> &AcceptPolicy {
        &self.policy
    }

    // --- Internals ---

    fn select_first<I>(
        &mut self,
        source: SelectionSource,
        files: I,
    ) -> Result<SelectOutcome, SelectError>
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let Some(file) = files.into_iter().next() else {
            return Ok(SelectOutcome::NoFiles);
        };
        match self.replace(source, file) {
            Ok(()) => {
                self.last_error = None;
                Ok(SelectOutcome::Selected)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Validate `file`, acquire its preview, then swap it in.
    ///
    /// The new reference is acquired before the old one is released so
    /// a failed acquisition leaves the previous selection intact.
    fn replace(&mut self, source: SelectionSource, file: UploadedFile) -> Result<(), SelectError> {
        self.check(source, &file)?;
        let preview = self.store.acquire(&file)?;
        if let Some(previous) = self.held.replace(Held { file, preview }) {
            self.store.release(previous.preview);
        }
        Ok(())
    }

    fn check(&self, source: SelectionSource, file: &UploadedFile) -> Result<(), SelectError> {
        if file.is_empty() {
            return Err(SelectError::EmptyFile {
                name: file.name().to_owned(),
            });
        }
        if let Some(limit) = self.max_bytes
            && file.size() > limit
        {
            return Err(SelectError::TooLarge {
                name: file.name().to_owned(),
                size: file.size(),
                limit,
            });
        }
        let validate = match source {
            SelectionSource::Picker => true,
            SelectionSource::Drop => self.validate_drops,
        };
        // A type guessed from the name alone cannot satisfy a MIME token;
        // extension tokens still match on the name.
        let mime = file.sniffed_mime_type();
        if validate && !self.policy.matches(file.name(), mime) {
            return Err(SelectError::UnsupportedType {
                name: file.name().to_owned(),
                mime,
            });
        }
        Ok(())
    }
}

impl<S: PreviewStore> Drop for Selection<S> {
    fn drop(&mut self) {
        if let Some(held) = self.held.take() {
            self.store.release(held.preview);
        }
    }
}
