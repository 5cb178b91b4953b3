//! Client-side search and status filter.

use atelier_shared::text::{contains_folded, fold};
use serde::{Deserialize, Serialize};

use crate::voucher::VoucherStatus;
use crate::workflow::DocumentStatus;

use super::rows::{PurchaseOrderRow, ReceiptRow, ShiftCloseRow, VoucherRow};

/// A row that can be searched and filtered by status.
pub trait Listable {
    /// Status type the list filters on.
    type Status: Copy + PartialEq;

    /// Text fields matched by the search term.
    fn search_fields(&self) -> Vec<String>;

    /// The row's status.
    fn status(&self) -> Self::Status;
}

/// Search term and status filter for a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery<S> {
    /// Case- and accent-insensitive search term.
    pub search: Option<String>,
    /// Keep only rows in this status.
    pub status: Option<S>,
}

impl<S> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
        }
    }
}

impl<S: Copy + PartialEq> ListQuery<S> {
    /// Creates an empty query (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term; blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if `row` passes the query.
    pub fn matches<T: Listable<Status = S>>(&self, row: &T) -> bool {
        if self.status.is_some_and(|s| s != row.status()) {
            return false;
        }
        match self.search.as_deref() {
            Some(term) => {
                let needle = fold(term);
                row.search_fields()
                    .iter()
                    .any(|field| contains_folded(field, &needle))
            }
            None => true,
        }
    }

    /// Keeps the rows that pass the query, in order.
    #[must_use]
    pub fn apply<T: Listable<Status = S> + Clone>(&self, rows: &[T]) -> Vec<T> {
        rows.iter().filter(|row| self.matches(*row)).cloned().collect()
    }
}

impl Listable for PurchaseOrderRow {
    type Status = DocumentStatus;

    fn search_fields(&self) -> Vec<String> {
        vec![
            format!("#{}", self.id),
            self.supplier.clone(),
            self.employee.clone(),
        ]
    }

    fn status(&self) -> DocumentStatus {
        self.status
    }
}

impl Listable for ReceiptRow {
    type Status = DocumentStatus;

    fn search_fields(&self) -> Vec<String> {
        vec![
            format!("#{}", self.id),
            self.source.clone(),
            self.supplier.clone(),
            self.employee.clone(),
        ]
    }

    fn status(&self) -> DocumentStatus {
        self.status
    }
}

impl Listable for ShiftCloseRow {
    type Status = DocumentStatus;

    fn search_fields(&self) -> Vec<String> {
        vec![self.employee.clone(), self.closed_date.to_string()]
    }

    fn status(&self) -> DocumentStatus {
        self.status
    }
}

impl Listable for VoucherRow {
    type Status = VoucherStatus;

    fn search_fields(&self) -> Vec<String> {
        vec![self.code.clone(), self.name.clone()]
    }

    fn status(&self) -> VoucherStatus {
        self.status
    }
}
