//! Receiving error types.

use atelier_shared::types::{PurchaseOrderId, ReceiptLineId, VariantId};
use thiserror::Error;

use crate::workflow::WorkflowError;

/// Receiving-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceivingError {
    /// The workflow does not allow the change.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Quantity must be positive.
    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    /// Neither the receipt nor its source order names a supplier.
    #[error("Receipt has no supplier")]
    MissingSupplier,

    /// The source purchase order is not approved.
    #[error("Purchase order #{0} is not approved yet")]
    SourceNotApproved(PurchaseOrderId),

    /// The source purchase order does not exist.
    #[error("Purchase order #{0} not found")]
    SourceNotFound(PurchaseOrderId),

    /// Receiving would exceed what was ordered.
    #[error(
        "Variant #{variant_id}: ordered {ordered}, already received {received}, cannot receive {requested} more"
    )]
    ExceedsOrdered {
        /// Variant being received.
        variant_id: VariantId,
        /// Total ordered across approved purchase orders.
        ordered: u64,
        /// Already received on other live receipts.
        received: u64,
        /// Requested quantity.
        requested: u32,
    },

    /// The line does not belong to the receipt.
    #[error("Line {0} not found on this receipt")]
    LineNotFound(ReceiptLineId),
}

impl ReceivingError {
    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Workflow(inner) => inner.status_code(),
            Self::SourceNotFound(_) | Self::LineNotFound(_) => 404,
            Self::ExceedsOrdered { .. } | Self::SourceNotApproved(_) => 422,
            Self::InvalidQuantity | Self::MissingSupplier => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Workflow(inner) => inner.error_code(),
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::MissingSupplier => "MISSING_SUPPLIER",
            Self::SourceNotApproved(_) => "SOURCE_NOT_APPROVED",
            Self::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            Self::ExceedsOrdered { .. } => "EXCEEDS_ORDERED",
            Self::LineNotFound(_) => "LINE_NOT_FOUND",
        }
    }
}
