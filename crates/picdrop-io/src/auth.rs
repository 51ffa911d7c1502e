//! Authentication collaborator.
//!
//! The auth panel hands each validated [`AuthRequest`] to an
//! [`Authenticator`] and applies whatever comes back. The only
//! implementation shipped is [`SimulatedAuthenticator`], which answers
//! from an in-memory account table after a fixed delay.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use picdrop_core::{AccountBook, AuthConfig, AuthOutcome, AuthRequest};

use crate::console;

/// Errors from the authentication collaborator itself (as opposed to a
/// refused login, which is an [`AuthOutcome`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The service could not answer.
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Future returned by [`Authenticator::authenticate`].
///
/// Not `Send`: WASM is single-threaded and browser handles are `!Send`.
pub type AuthFuture = Pin<Box<dyn Future<Output = Result<AuthOutcome, AuthError>>>>;

/// Answers login and sign-up requests.
pub trait Authenticator {
    /// Send `request` and resolve with the outcome.
    fn authenticate(&self, request: AuthRequest) -> AuthFuture;
}

/// Stand-in authenticator with simulated network latency.
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    book: Rc<RefCell<AccountBook>>,
    latency_ms: u32,
}

impl SimulatedAuthenticator {
    /// Create an authenticator seeded from configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let book = AccountBook::new(&config.accounts);
        if book.is_empty() {
            console::log("simulated auth: no seeded accounts; sign up to create one");
        } else {
            console::log(&format!("simulated auth: {} seeded account(s)", book.len()));
        }
        Self {
            book: Rc::new(RefCell::new(book)),
            latency_ms: config.latency_ms,
        }
    }
}

impl Authenticator for SimulatedAuthenticator {
    fn authenticate(&self, request: AuthRequest) -> AuthFuture {
        let book = Rc::clone(&self.book);
        let latency_ms = self.latency_ms;
        Box::pin(async move {
            TimeoutFuture::new(latency_ms).await;
            let mut book = book
                .try_borrow_mut()
                .map_err(|e| AuthError::Unavailable(e.to_string()))?;
            Ok(book.handle(&request))
        })
    }
}
