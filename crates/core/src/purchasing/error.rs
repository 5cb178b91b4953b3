//! Purchasing error types.

use atelier_shared::types::{PurchaseOrderLineId, VariantId};
use thiserror::Error;

use crate::workflow::WorkflowError;

/// Purchasing-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PurchasingError {
    /// The workflow does not allow the change.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Quantity must be positive.
    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    /// Unit price cannot be negative.
    #[error("Unit price cannot be negative")]
    NegativePrice,

    /// Deposit cannot be negative.
    #[error("Deposit cannot be negative")]
    NegativeDeposit,

    /// A supplier must be chosen.
    #[error("A supplier is required")]
    MissingSupplier,

    /// Expected delivery precedes the order date.
    #[error("Expected delivery date is before the order date")]
    ExpectedBeforeOrdered,

    /// The line does not belong to the order.
    #[error("Line {0} not found on this order")]
    LineNotFound(PurchaseOrderLineId),

    /// The variant already has a line on this order.
    #[error("Variant #{0} is already on this order; edit that line instead")]
    DuplicateVariant(VariantId),
}

impl PurchasingError {
    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Workflow(inner) => inner.status_code(),
            Self::LineNotFound(_) => 404,
            Self::DuplicateVariant(_) => 409,
            Self::InvalidQuantity
            | Self::NegativePrice
            | Self::NegativeDeposit
            | Self::MissingSupplier
            | Self::ExpectedBeforeOrdered => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Workflow(inner) => inner.error_code(),
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::NegativePrice => "NEGATIVE_PRICE",
            Self::NegativeDeposit => "NEGATIVE_DEPOSIT",
            Self::MissingSupplier => "MISSING_SUPPLIER",
            Self::ExpectedBeforeOrdered => "EXPECTED_BEFORE_ORDERED",
            Self::LineNotFound(_) => "LINE_NOT_FOUND",
            Self::DuplicateVariant(_) => "DUPLICATE_VARIANT",
        }
    }
}
