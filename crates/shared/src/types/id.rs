//! Typed IDs for type-safe entity references.
//!
//! The backend keys every table with an integer. Wrapping each one keeps a
//! `SupplierId` from being passed where an `EmployeeId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw backend id.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw backend id.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().trim_start_matches('#').parse()?))
            }
        }
    };
}

typed_id!(EmployeeId, "Unique identifier for an employee (nhân viên).");
typed_id!(SupplierId, "Unique identifier for a supplier (nhà cung cấp).");
typed_id!(ProductId, "Unique identifier for a product (sản phẩm).");
typed_id!(
    VariantId,
    "Unique identifier for a product variant (chi tiết sản phẩm: size x color x material)."
);
typed_id!(PurchaseOrderId, "Unique identifier for a purchase order (phiếu đặt hàng).");
typed_id!(PurchaseOrderLineId, "Unique identifier for a purchase order line.");
typed_id!(ReceiptId, "Unique identifier for a warehouse receipt (phiếu nhập kho).");
typed_id!(ReceiptLineId, "Unique identifier for a warehouse receipt line.");
typed_id!(ShiftCloseId, "Unique identifier for a shift-closing report (chốt ca).");
typed_id!(VoucherId, "Unique identifier for a discount voucher (mã giảm giá).");
typed_id!(WorkShiftId, "Unique identifier for a work shift (ca làm việc).");
typed_id!(OrderId, "Unique identifier for a customer order (đơn hàng).");
typed_id!(RatingId, "Unique identifier for a product rating (đánh giá).");
