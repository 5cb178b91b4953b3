//! List and detail view-models.
//!
//! Documents reference suppliers, employees and variants by id. A desk
//! bulk-loads those reference lists once per screen, builds a
//! [`ReferenceLookups`], and joins every row against it. Missing
//! references render as `#<id>` and are logged, never fatal.
//!
//! # Modules
//!
//! - `lookup` - Id-to-label indexes with `#<id>` fallback
//! - `rows` - One display row per document
//! - `detail` - Purchase order and receipt detail views
//! - `query` - Client-side search and status filter

pub mod detail;
pub mod lookup;
pub mod query;
pub mod rows;

pub use detail::{LineRow, PurchaseOrderDetailView, ReceiptDetailView, ReceiptLineRow};
pub use lookup::{LookupIndex, ReferenceLookups};
pub use query::{ListQuery, Listable};
pub use rows::{PurchaseOrderRow, ReceiptRow, ShiftCloseRow, VoucherRow};
