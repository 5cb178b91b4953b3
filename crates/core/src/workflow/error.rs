//! Workflow error types for the document approval lifecycle.
//!
//! Every variant is raised locally, before any request reaches the
//! backend. The `Display` text is what the operator sees.

use thiserror::Error;

use crate::workflow::policy::ActorRole;
use crate::workflow::types::{Action, DocumentKind, DocumentStatus};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The action does not apply to the document's current status.
    #[error("Cannot {action} a {kind} in status {from}")]
    InvalidTransition {
        /// The document kind.
        kind: DocumentKind,
        /// The current status.
        from: DocumentStatus,
        /// The attempted action.
        action: Action,
    },

    /// The actor's role does not permit the action.
    #[error("Role {role} is not allowed to {action} a {kind}")]
    NotPermitted {
        /// The document kind.
        kind: DocumentKind,
        /// The actor's role.
        role: ActorRole,
        /// The attempted action.
        action: Action,
    },

    /// The document is in a terminal status and can no longer change.
    #[error("{kind} is {status} and can no longer be changed")]
    Immutable {
        /// The document kind.
        kind: DocumentKind,
        /// The terminal status.
        status: DocumentStatus,
    },

    /// The status text could not be interpreted, so nothing is allowed.
    #[error("{kind} has an unrecognised status; reload before acting")]
    UnknownStatus {
        /// The document kind.
        kind: DocumentKind,
    },

    /// Rejection or cancellation reason is required but not provided.
    #[error("A reason is required to reject or cancel")]
    ReasonRequired,
}

impl WorkflowError {
    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::UnknownStatus { .. } | Self::ReasonRequired => {
                400
            }
            Self::NotPermitted { .. } => 403,
            Self::Immutable { .. } => 409,
        }
    }

    /// Returns the error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotPermitted { .. } => "NOT_PERMITTED",
            Self::Immutable { .. } => "DOCUMENT_IMMUTABLE",
            Self::UnknownStatus { .. } => "UNKNOWN_STATUS",
            Self::ReasonRequired => "REASON_REQUIRED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = WorkflowError::InvalidTransition {
            kind: DocumentKind::PurchaseOrder,
            from: DocumentStatus::New,
            action: Action::Approve,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert_eq!(
            err.to_string(),
            "Cannot approve a purchase_order in status new"
        );
    }

    #[test]
    fn test_not_permitted_error() {
        let err = WorkflowError::NotPermitted {
            kind: DocumentKind::ShiftClose,
            role: ActorRole::Staff,
            action: Action::Approve,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_PERMITTED");
        assert!(err.to_string().contains("staff"));
    }

    #[test]
    fn test_immutable_error() {
        let err = WorkflowError::Immutable {
            kind: DocumentKind::WarehouseReceipt,
            status: DocumentStatus::Approved,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "DOCUMENT_IMMUTABLE");
    }

    #[test]
    fn test_reason_required_error() {
        let err = WorkflowError::ReasonRequired;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "REASON_REQUIRED");
    }
}
