//! Workflow service for document state transitions.
//!
//! This module implements the state machine: it validates a requested
//! action against the policy and returns the resulting `Transition`.
//! Nothing here talks to the backend; the caller persists the transition
//! and reloads.

use chrono::Utc;

use crate::workflow::error::WorkflowError;
use crate::workflow::policy::{Actor, TransitionPolicy};
use crate::workflow::types::{Action, DocumentKind, DocumentStatus, Transition};

/// Stateless service for document workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Send a new document for review.
    ///
    /// # Arguments
    /// * `kind` - The document kind
    /// * `current_status` - The document's normalized status
    /// * `actor` - The employee sending the document
    ///
    /// # Returns
    /// * `Ok(Transition::Send)` if the document is `New`
    /// * `Err(WorkflowError)` otherwise
    pub fn send(
        kind: DocumentKind,
        current_status: DocumentStatus,
        actor: &Actor,
    ) -> Result<Transition, WorkflowError> {
        TransitionPolicy::authorize(kind, current_status, actor, false, Action::Send)?;

        Ok(Transition::Send {
            new_status: DocumentStatus::PendingReview,
            sent_by: actor.id,
            sent_at: Utc::now(),
        })
    }

    /// Approve a document under review.
    ///
    /// # Returns
    /// * `Ok(Transition::Approve)` if pending and the actor is a reviewer
    /// * `Err(WorkflowError::NotPermitted)` for staff
    /// * `Err(WorkflowError)` for any other status
    pub fn approve(
        kind: DocumentKind,
        current_status: DocumentStatus,
        actor: &Actor,
    ) -> Result<Transition, WorkflowError> {
        TransitionPolicy::authorize(kind, current_status, actor, false, Action::Approve)?;

        Ok(Transition::Approve {
            new_status: DocumentStatus::Approved,
            approved_by: actor.id,
            approved_at: Utc::now(),
        })
    }

    /// Reject (or cancel) a document under review.
    ///
    /// Purchase orders and receipts land in `Cancelled`, shift-closing
    /// reports in `Rejected`.
    ///
    /// # Returns
    /// * `Ok(Transition::Reject)` if the transition is valid
    /// * `Err(WorkflowError::ReasonRequired)` if the reason is blank
    /// * `Err(WorkflowError)` if the actor or status does not allow it
    pub fn reject(
        kind: DocumentKind,
        current_status: DocumentStatus,
        actor: &Actor,
        reason: &str,
    ) -> Result<Transition, WorkflowError> {
        TransitionPolicy::authorize(kind, current_status, actor, false, Action::Reject)?;

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::ReasonRequired);
        }

        Ok(Transition::Reject {
            new_status: kind.rejected_status(),
            rejected_by: actor.id,
            rejected_at: Utc::now(),
            reason: reason.to_string(),
        })
    }

    /// Dispatch a status-changing action by name.
    ///
    /// Non-transition actions (edit, line changes, delete) are not status
    /// changes; use [`ensure_allowed`](Self::ensure_allowed) for those.
    pub fn apply(
        kind: DocumentKind,
        current_status: DocumentStatus,
        action: Action,
        actor: &Actor,
        reason: Option<&str>,
    ) -> Result<Transition, WorkflowError> {
        match action {
            Action::Send => Self::send(kind, current_status, actor),
            Action::Approve => Self::approve(kind, current_status, actor),
            Action::Reject => Self::reject(kind, current_status, actor, reason.unwrap_or("")),
            Action::Edit | Action::EditLine | Action::DeleteLine | Action::Delete => {
                Err(WorkflowError::InvalidTransition {
                    kind,
                    from: current_status,
                    action,
                })
            }
        }
    }

    /// Check a non-transition action (edit, line change, delete).
    pub fn ensure_allowed(
        kind: DocumentKind,
        current_status: DocumentStatus,
        actor: &Actor,
        is_owner: bool,
        action: Action,
    ) -> Result<(), WorkflowError> {
        TransitionPolicy::authorize(kind, current_status, actor, is_owner, action)
    }

    /// Check if a status transition is valid for `kind`, regardless of role.
    ///
    /// Valid transitions:
    /// - New → PendingReview (send)
    /// - PendingReview → Approved (approve)
    /// - PendingReview → kind's rejected status (reject)
    #[must_use]
    pub fn is_valid_transition(
        kind: DocumentKind,
        from: DocumentStatus,
        to: DocumentStatus,
    ) -> bool {
        match (from, to) {
            (DocumentStatus::New, DocumentStatus::PendingReview)
            | (DocumentStatus::PendingReview, DocumentStatus::Approved) => true,
            (DocumentStatus::PendingReview, rejected) => rejected == kind.rejected_status(),
            _ => false,
        }
    }
}
