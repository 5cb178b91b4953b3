//! Desks: one per document type.
//!
//! A desk binds the pure rules of `atelier-core` to the backend. Every
//! write follows the same steps: check the action locally (no request is
//! sent when it is refused), write, then reload the document so the caller
//! always sees the backend's copy.

pub mod directory;
pub mod purchase_order;
pub mod receipt;
pub mod references;
pub mod shift_close;
pub mod voucher;
pub mod work_shift;

use atelier_core::workflow::Actor;
use atelier_shared::types::{Page, PageRequest};
use serde::Serialize;

use crate::wire::{Keyed, Loaded, WireRecord, decode_all, decode_strict};
use crate::{ClientConfig, ClientError, ClientResult, Endpoint, HttpClient};

pub use directory::DirectoryDesk;
pub use purchase_order::{PurchaseOrderDesk, PurchaseOrderDocument};
pub use receipt::{ReceiptDesk, ReceiptDocument};
pub use references::load_lookups;
pub use shift_close::{ShiftCloseDesk, ShiftClosePreview};
pub use voucher::VoucherDesk;
pub use work_shift::WorkShiftDesk;

/// What every desk needs: an authorized client, the acting employee and
/// the configuration.
#[derive(Debug, Clone)]
pub struct DeskContext {
    /// Authorized HTTP client.
    pub http: HttpClient,
    /// The logged-in employee.
    pub actor: Actor,
    /// Client configuration.
    pub config: ClientConfig,
}

impl DeskContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(http: HttpClient, actor: Actor, config: ClientConfig) -> Self {
        Self {
            http,
            actor,
            config,
        }
    }

    /// Loads a whole collection, skipping unreadable rows.
    pub async fn load_all<R: WireRecord>(&self) -> ClientResult<Vec<Loaded<R>>> {
        Ok(decode_all(self.http.list::<Keyed<R>>(R::ENDPOINT).await?))
    }

    /// Loads a whole collection, failing on any unreadable row. For reads
    /// that a rule sums over.
    pub async fn load_all_strict<R: WireRecord>(&self) -> ClientResult<Vec<Loaded<R>>> {
        decode_strict(self.http.list::<Keyed<R>>(R::ENDPOINT).await?)
    }

    /// Loads one record.
    pub async fn load<R: WireRecord>(&self, id: i64) -> ClientResult<Loaded<R>> {
        Loaded::new(self.http.fetch::<Keyed<R>>(R::ENDPOINT, id).await?)
    }

    /// Writes `next` over a loaded record.
    pub async fn save<R: WireRecord>(&self, loaded: &Loaded<R>, next: &R::Domain) -> ClientResult<()> {
        let id = loaded.record.key().ok_or_else(|| {
            ClientError::InvalidResponse(format!("{} record without id", R::ENDPOINT))
        })?;
        self.http.update(R::ENDPOINT, id, &loaded.updated(next)).await
    }

    /// Deletes a document: its lines first, then the header. Once one
    /// delete went through, a later failure is a `PartialWrite`.
    pub async fn delete_document(
        &self,
        lines: (Endpoint, Vec<i64>),
        header: (Endpoint, i64),
        header_step: &'static str,
    ) -> ClientResult<()> {
        let (line_endpoint, line_ids) = lines;
        let mut deleted = false;
        for id in line_ids {
            self.http
                .delete(line_endpoint, id)
                .await
                .map_err(|e| partial_after(deleted, "line delete", e))?;
            deleted = true;
        }
        let (header_endpoint, header_id) = header;
        self.http
            .delete(header_endpoint, header_id)
            .await
            .map_err(|e| partial_after(deleted, header_step, e))
    }

    /// Creates a record; returns the backend's id when it echoes one.
    pub async fn create<R: WireRecord>(&self, body: &R) -> ClientResult<Option<i64>> {
        let created: Option<R> = self.http.create(R::ENDPOINT, body).await?;
        Ok(created.and_then(|record| record.key()))
    }
}

/// A page of list rows, with a banner when the list could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    /// The rows of the requested page.
    pub page: Page<T>,
    /// User-facing message explaining an empty fallback.
    pub banner: Option<String>,
}

impl<T: Clone> Listing<T> {
    /// A listing of `rows`.
    #[must_use]
    pub fn of(rows: &[T], page: PageRequest) -> Self {
        Self {
            page: page.paginate(rows),
            banner: None,
        }
    }

    /// Turns a transport failure into an empty listing with a banner.
    /// Any other error is passed through.
    pub fn or_banner(result: ClientResult<Self>, page: PageRequest) -> ClientResult<Self> {
        match result {
            Err(e @ ClientError::Http(_)) => {
                tracing::warn!(error = %e, "List unavailable, showing empty");
                Ok(Self {
                    page: page.paginate(&[]),
                    banner: Some(e.user_message()),
                })
            }
            other => other,
        }
    }
}

fn partial_after(saved_before: bool, step: &'static str, error: ClientError) -> ClientError {
    if saved_before {
        tracing::warn!(step, error = %error, "Write stopped half way");
        ClientError::PartialWrite {
            step,
            source: Box::new(error),
        }
    } else {
        error
    }
}

/// Awaits the reload that follows a saved write. A failure here is
/// reported as `ReloadFailed` since the write itself went through.
pub(crate) async fn reloaded<T>(reload: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
    reload.await.map_err(|e| {
        tracing::warn!(error = %e, "Saved, but reloading failed");
        ClientError::ReloadFailed(Box::new(e))
    })
}

/// Domain values of loaded records.
pub(crate) fn domains<R: WireRecord>(loaded: &[Loaded<R>]) -> Vec<R::Domain> {
    loaded.iter().map(|l| l.domain.clone()).collect()
}
