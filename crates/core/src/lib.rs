//! Core back-office logic for Atelier.
//!
//! This crate contains pure business logic with ZERO network dependencies.
//! The REST client loads records, converts them into these types, asks this
//! crate what is allowed and what the next state is, and writes the result.
//!
//! # Modules
//!
//! - `workflow` - Document approval lifecycle shared by purchase orders,
//!   warehouse receipts and shift-closing reports
//! - `purchasing` - Purchase orders, line items and header totals
//! - `receiving` - Warehouse receipts and the received-quantity cap
//! - `shift` - Work shifts and the time-overlap validator
//! - `closing` - Shift-closing (chốt ca) derivation from order snapshots
//! - `voucher` - Discount vouchers: status, edit scope, discount amount
//! - `view` - List/detail view-models joined with reference lookups

pub mod closing;
pub mod purchasing;
pub mod receiving;
pub mod shift;
pub mod view;
pub mod voucher;
pub mod workflow;
