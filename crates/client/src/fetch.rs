//! Superseding fetches and the submit guard.
//!
//! A desk may start a new list fetch before the previous one answered
//! (the user changed a filter). Only the latest fetch may deliver; earlier
//! ones are cancelled and resolve to `Ok(None)`. Saves are never queued:
//! a second submit while one is running fails with `Busy`.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use crate::{ClientError, ClientResult};

/// Hands out one live cancellation token at a time.
#[derive(Debug, Default)]
pub struct LatestFetch {
    current: Mutex<CancellationToken>,
}

impl LatestFetch {
    /// Creates a tracker with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the previous fetch and returns the token for a new one.
    pub fn begin(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        current.cancel();
        *current = fresh.clone();
        fresh
    }

    /// Runs `fut` as the latest fetch.
    ///
    /// Returns `Ok(None)` if a newer fetch started before `fut` finished.
    pub async fn run<T, F>(&self, fut: F) -> ClientResult<Option<T>>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let token = self.begin();
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!("Superseded fetch discarded");
                Ok(None)
            }
            result = fut => {
                if token.is_cancelled() {
                    return Ok(None);
                }
                result.map(Some)
            }
        }
    }
}

/// Rejects a submit while another one is running.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    saving: AtomicBool,
}

/// Held for the duration of a submit; releases the guard on drop.
#[derive(Debug)]
pub struct SubmitTicket<'a> {
    guard: &'a SubmitGuard,
}

impl SubmitGuard {
    /// Creates an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the guard.
    ///
    /// # Errors
    /// `ClientError::Busy` if a submit is already running.
    pub fn acquire(&self) -> ClientResult<SubmitTicket<'_>> {
        self.saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(SubmitTicket { guard: self })
    }

    /// Returns true while a submit is running.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.guard.saving.store(false, Ordering::Release);
    }
}
