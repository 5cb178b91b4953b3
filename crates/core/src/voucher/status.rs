//! Voucher status derivation and edit scope.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::VoucherError;
use super::types::{Voucher, VoucherForm};

/// Computed voucher status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    /// Start date not reached yet.
    Upcoming,
    /// Within its date range with uses left.
    Ongoing,
    /// End date passed.
    Ended,
    /// No uses left, regardless of dates.
    OutOfStock,
}

impl VoucherStatus {
    /// Vietnamese display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Sắp diễn ra",
            Self::Ongoing => "Đang diễn ra",
            Self::Ended => "Đã kết thúc",
            Self::OutOfStock => "Hết lượt",
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Ended => "ended",
            Self::OutOfStock => "out_of_stock",
        }
    }
}

impl fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives a voucher's status at day granularity.
///
/// Running out of uses takes precedence over the date range.
#[must_use]
pub fn derive_status(
    today: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
    remaining: i64,
) -> VoucherStatus {
    if remaining <= 0 {
        VoucherStatus::OutOfStock
    } else if today < start {
        VoucherStatus::Upcoming
    } else if today > end {
        VoucherStatus::Ended
    } else {
        VoucherStatus::Ongoing
    }
}

impl Voucher {
    /// The voucher's status on `today`.
    #[must_use]
    pub fn status(&self, today: NaiveDate) -> VoucherStatus {
        derive_status(
            today,
            self.form.start_date,
            self.form.end_date,
            self.quantity_remaining(),
        )
    }
}

/// What may still be edited on a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherEditScope {
    /// Every field.
    Full,
    /// Only the end date, and only later.
    ExtendEndDate,
    /// Nothing.
    Locked,
}

impl VoucherEditScope {
    /// Edit scope for a status.
    #[must_use]
    pub const fn for_status(status: VoucherStatus) -> Self {
        match status {
            VoucherStatus::Upcoming => Self::Full,
            VoucherStatus::Ongoing | VoucherStatus::OutOfStock => Self::ExtendEndDate,
            VoucherStatus::Ended => Self::Locked,
        }
    }

    /// Checks that replacing `current`'s fields with `proposed` stays
    /// within the scope allowed on `today`.
    ///
    /// # Errors
    /// * `Locked` - the voucher has ended and nothing changed is allowed
    /// * `ExtendOnly` - a field other than the end date changed
    /// * `EndDateShortened` - the end date moved earlier
    pub fn check(
        current: &Voucher,
        proposed: &VoucherForm,
        today: NaiveDate,
    ) -> Result<(), VoucherError> {
        let status = current.status(today);
        if *proposed == current.form {
            return Ok(());
        }

        match Self::for_status(status) {
            Self::Full => Ok(()),
            Self::Locked => Err(VoucherError::Locked(status)),
            Self::ExtendEndDate => {
                let only_end_changed = VoucherForm {
                    end_date: current.form.end_date,
                    ..proposed.clone()
                } == current.form;
                if !only_end_changed {
                    return Err(VoucherError::ExtendOnly(status));
                }
                if proposed.end_date < current.form.end_date {
                    return Err(VoucherError::EndDateShortened);
                }
                Ok(())
            }
        }
    }
}
