//! Preview references and the stores that hand them out.
//!
//! A preview reference is whatever the renderer needs to display the
//! selected file -- in the browser an object URL, in tests an opaque
//! token. References are scoped resources: every handle returned by
//! [`PreviewStore::acquire`] must be passed back to
//! [`PreviewStore::release`] exactly once. [`Selection`] upholds this.
//!
//! [`Selection`]: crate::Selection

use std::cell::RefCell;
use std::rc::Rc;

use crate::file::UploadedFile;

/// Errors produced while creating a preview reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// The backing store failed (e.g. a browser API call threw).
    #[error("preview backend error: {0}")]
    Backend(String),
}

/// Source of preview references for selected files.
pub trait PreviewStore {
    /// The reference type rendered by the UI.
    type Handle;

    /// Create a preview reference for `file`.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Backend`] if the reference could not be
    /// created. No resource is held in that case.
    fn acquire(&mut self, file: &UploadedFile) -> Result<Self::Handle, PreviewError>;

    /// Release a reference previously returned by [`acquire`](Self::acquire).
    fn release(&mut self, handle: Self::Handle);
}

/// Shared counters for a [`MemoryStore`].
///
/// Cloned out of the store before it is moved into a selection so the
/// caller can still inspect outstanding references afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger(Rc<RefCell<LedgerState>>);

#[derive(Debug, Default)]
struct LedgerState {
    next_id: u64,
    live: Vec<String>,
    released: Vec<String>,
    fail_next: bool,
}

impl MemoryLedger {
    /// Handles acquired and not yet released, in acquisition order.
    #[must_use]
    pub fn live(&self) -> Vec<String> {
        self.0.borrow().live.clone()
    }

    /// Handles released so far, in release order.
    #[must_use]
    pub fn released(&self) -> Vec<String> {
        self.0.borrow().released.clone()
    }

    /// Make the next [`PreviewStore::acquire`] call fail.
    pub fn fail_next(&self) {
        self.0.borrow_mut().fail_next = true;
    }
}

/// In-memory preview store for headless use.
///
/// Hands out `memory:<n>:<file name>` tokens and records their
/// lifetimes in a [`MemoryLedger`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ledger: MemoryLedger,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to this store's counters.
    #[must_use]
    pub fn ledger(&self) -> MemoryLedger {
        self.ledger.clone()
    }
}

impl PreviewStore for MemoryStore {
    type Handle = String;

    fn acquire(&mut self, file: &UploadedFile) -> Result<String, PreviewError> {
        let mut state = self.ledger.0.borrow_mut();
        if std::mem::take(&mut state.fail_next) {
            return Err(PreviewError::Backend("simulated acquire failure".into()));
        }
        let handle = format!("memory:{}:{}", state.next_id, file.name());
        state.next_id += 1;
        state.live.push(handle.clone());
        Ok(handle)
    }

    fn release(&mut self, handle: String) {
        let mut state = self.ledger.0.borrow_mut();
        // Releasing an unknown or already-released handle is a caller bug.
        debug_assert!(
            state.live.contains(&handle),
            "release of handle not live: {handle:?}"
        );
        state.live.retain(|h| h != &handle);
        state.released.push(handle);
    }
}
