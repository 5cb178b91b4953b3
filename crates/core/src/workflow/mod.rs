//! Document approval lifecycle for Atelier.
//!
//! Purchase orders, warehouse receipts and shift-closing reports follow
//! the same lifecycle. It is implemented once here and parameterized by
//! `DocumentKind`.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (DocumentKind, DocumentStatus, Action, Transition)
//! - `status` - Free-text status normalizer
//! - `policy` - Role/status transition policy
//! - `service` - State transition logic
//! - `error` - Workflow-specific error types

pub mod error;
pub mod policy;
pub mod service;
pub mod status;
pub mod types;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod status_props;

pub use error::WorkflowError;
pub use policy::{Actor, ActorRole, TransitionPolicy};
pub use service::WorkflowService;
pub use status::{normalize_optional, normalize_status};
pub use types::{Action, ActionSet, DocumentKind, DocumentStatus, Transition, append_reason};
