//! Backend records.
//!
//! Each record mirrors one backend resource with its own field names
//! (concatenated lowercase Vietnamese, or snake_case; see [`keys`]).
//! Unknown fields land in `extra` and are written back untouched, and raw
//! date/status text is only rewritten when its meaning changes, so a
//! read-edit-write cycle never loses data.

pub mod closing;
pub mod envelope;
pub mod keys;
pub mod purchasing;
pub mod receiving;
pub mod reference;
pub mod shift;
pub mod value;
pub mod voucher;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult, Endpoint};

pub use closing::{CustomerOrderRecord, ShiftCloseRecord};
pub use keys::{KeySpelling, KeyStyle, Keyed};
pub use purchasing::{PurchaseOrderLineRecord, PurchaseOrderRecord};
pub use receiving::{ReceiptLineRecord, ReceiptRecord};
pub use reference::{
    EmployeeRecord, LoginRequest, LoginResponse, ProductRecord, RatingRecord, SupplierRecord,
    VariantRecord,
};
pub use shift::WorkShiftRecord;
pub use voucher::VoucherRecord;

/// A backend record with a domain counterpart.
pub trait WireRecord:
    Serialize + DeserializeOwned + KeySpelling + Clone + Send + Sync + 'static
{
    /// The domain type.
    type Domain: Clone;

    /// Where the record lives.
    const ENDPOINT: Endpoint;

    /// Backend id, absent on records not yet created.
    fn key(&self) -> Option<i64>;

    /// Translates to the domain type.
    ///
    /// # Errors
    /// `InvalidResponse` when a required field is missing or malformed.
    fn to_domain(&self) -> ClientResult<Self::Domain>;

    /// Builds a fresh record from a domain value.
    fn from_domain(domain: &Self::Domain) -> Self;

    /// Writes `domain` into this record, keeping unknown fields and any
    /// raw text that already means the same thing.
    fn apply(&mut self, domain: &Self::Domain);
}

/// A record as loaded, next to its domain reading.
///
/// Writes go through [`Loaded::updated`] so the body sent back is the
/// loaded record, in the key spelling it arrived in, with only the changed
/// fields touched.
#[derive(Debug, Clone)]
pub struct Loaded<R: WireRecord> {
    /// The record as the backend sent it.
    pub record: Keyed<R>,
    /// Its domain reading.
    pub domain: R::Domain,
}

impl<R: WireRecord> Loaded<R> {
    /// Reads `record` into the domain.
    pub fn new(record: Keyed<R>) -> ClientResult<Self> {
        let domain = record.to_domain()?;
        Ok(Self { record, domain })
    }

    /// The loaded record with `domain` applied.
    #[must_use]
    pub fn updated(&self, domain: &R::Domain) -> Keyed<R> {
        let mut record = self.record.clone();
        record.apply(domain);
        record
    }
}

/// Reads every record, skipping (and logging) the ones that cannot be
/// understood so a single bad row does not blank a whole list.
pub fn decode_all<R: WireRecord>(records: Vec<Keyed<R>>) -> Vec<Loaded<R>> {
    records
        .into_iter()
        .filter_map(|record| match Loaded::new(record) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                tracing::warn!(endpoint = %R::ENDPOINT, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect()
}

/// Reads every record, failing on the first one that cannot be understood.
///
/// # Errors
/// `InvalidResponse` naming the unreadable row.
pub fn decode_strict<R: WireRecord>(records: Vec<Keyed<R>>) -> ClientResult<Vec<Loaded<R>>> {
    records
        .into_iter()
        .map(|record| {
            Loaded::new(record).map_err(|e| {
                tracing::warn!(endpoint = %R::ENDPOINT, error = %e, "Unreadable record");
                ClientError::InvalidResponse(format!("{}: {e}", R::ENDPOINT))
            })
        })
        .collect()
}

pub(crate) fn required<T>(value: Option<T>, entity: &str, field: &str) -> ClientResult<T> {
    value.ok_or_else(|| ClientError::InvalidResponse(format!("{entity} without {field}")))
}
