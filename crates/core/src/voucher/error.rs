//! Voucher error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::status::VoucherStatus;

/// Voucher-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherError {
    /// Code is blank.
    #[error("Voucher code is required")]
    EmptyCode,

    /// Another voucher already uses the code.
    #[error("Voucher code '{0}' already exists")]
    DuplicateCode(String),

    /// Name is blank.
    #[error("Voucher name is required")]
    EmptyName,

    /// Start date after end date.
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Percent outside (0, 100].
    #[error("Discount percent must be between 0 and 100")]
    InvalidPercent,

    /// Amount not positive.
    #[error("Discount amount must be greater than zero")]
    InvalidAmount,

    /// Total quantity is zero.
    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    /// Minimum order value below zero.
    #[error("Minimum order value cannot be negative")]
    NegativeMinimum,

    /// Voucher is not currently usable.
    #[error("Voucher is {0}")]
    NotActive(VoucherStatus),

    /// Order value below the voucher minimum.
    #[error("Order value is below the minimum of {minimum}")]
    BelowMinimum {
        /// Required minimum order value.
        minimum: Decimal,
    },

    /// Voucher is reserved for customers on their birthday.
    #[error("Voucher is only valid on the customer's birthday")]
    BirthdayOnly,

    /// No edits are allowed in this status.
    #[error("Voucher is {0} and can no longer be edited")]
    Locked(VoucherStatus),

    /// Only the end date may change in this status.
    #[error("Voucher is {0}; only the end date can be extended")]
    ExtendOnly(VoucherStatus),

    /// End date moved earlier while only extension is allowed.
    #[error("End date can only be extended, not shortened")]
    EndDateShortened,
}

impl VoucherError {
    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateCode(_) | Self::Locked(_) | Self::ExtendOnly(_) => 409,
            Self::NotActive(_) | Self::BelowMinimum { .. } | Self::BirthdayOnly => 422,
            Self::EmptyCode
            | Self::EmptyName
            | Self::InvalidDateRange { .. }
            | Self::InvalidPercent
            | Self::InvalidAmount
            | Self::InvalidQuantity
            | Self::NegativeMinimum
            | Self::EndDateShortened => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCode => "EMPTY_CODE",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::EmptyName => "EMPTY_NAME",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::InvalidPercent => "INVALID_PERCENT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::NegativeMinimum => "NEGATIVE_MINIMUM",
            Self::NotActive(_) => "VOUCHER_NOT_ACTIVE",
            Self::BelowMinimum { .. } => "BELOW_MINIMUM",
            Self::BirthdayOnly => "BIRTHDAY_ONLY",
            Self::Locked(_) => "VOUCHER_LOCKED",
            Self::ExtendOnly(_) => "EXTEND_ONLY",
            Self::EndDateShortened => "END_DATE_SHORTENED",
        }
    }
}
