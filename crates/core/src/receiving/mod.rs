//! Warehouse receipts (phiếu nhập kho).
//!
//! A receipt records goods arriving from a supplier, optionally against a
//! purchase order. Its lifecycle is the shared document workflow; the one
//! rule specific to receipts is the received-quantity cap in [`cap`].

pub mod cap;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod cap_props;

pub use cap::{QuantityCap, ReceivingBook, check_receipt_quantity};
pub use error::ReceivingError;
pub use service::ReceivingService;
pub use types::{NewReceipt, ReceiptLineInput, WarehouseReceipt, WarehouseReceiptLine};
