//! Transition policy: who may do what, in which status.
//!
//! One rule set serves all three document kinds. The rules are:
//! - `New`: any employee may edit, change lines and send; deleting the
//!   whole document is reserved to its owner or a reviewer.
//! - `PendingReview`: only Admin or Manager may approve or reject; lines
//!   are frozen.
//! - Terminal and unknown statuses allow nothing.

use std::fmt;

use atelier_shared::Session;
use atelier_shared::text::fold;
use atelier_shared::types::EmployeeId;
use serde::{Deserialize, Serialize};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{Action, ActionSet, DocumentKind, DocumentStatus};

/// Employee role, ordered from lowest to highest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// Nhân viên: sales or warehouse staff.
    Staff = 0,
    /// Quản lý: store manager.
    Manager = 1,
    /// Administrator.
    Admin = 2,
}

impl ActorRole {
    /// Parses a role from backend free text.
    ///
    /// Accepts English and Vietnamese, any case or accents. Anything
    /// unrecognised is treated as `Staff`, the least privileged role.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let folded = fold(raw);
        if folded.contains("admin") || folded.contains("quan tri") {
            Self::Admin
        } else if folded.contains("quan ly") || folded.contains("manager") {
            Self::Manager
        } else {
            Self::Staff
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns true if the role may approve or reject documents.
    #[must_use]
    pub const fn can_review(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The employee performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Employee id.
    pub id: EmployeeId,
    /// Employee role.
    pub role: ActorRole,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: EmployeeId, role: ActorRole) -> Self {
        Self { id, role }
    }

    /// Builds the actor from the logged-in session.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: session.profile.id,
            role: ActorRole::parse(&session.profile.role),
        }
    }

    /// Returns true if the actor created the document.
    #[must_use]
    pub fn owns(&self, owner: Option<EmployeeId>) -> bool {
        owner == Some(self.id)
    }
}

/// Stateless policy deciding which actions are allowed.
pub struct TransitionPolicy;

impl TransitionPolicy {
    /// Returns the set of actions `role` may perform on a document of
    /// `kind` in `status`.
    ///
    /// # Arguments
    /// * `kind` - The document kind
    /// * `status` - The document's normalized status
    /// * `role` - The actor's role
    /// * `is_owner` - Whether the actor created the document
    #[must_use]
    pub fn allowed_actions(
        kind: DocumentKind,
        status: DocumentStatus,
        role: ActorRole,
        is_owner: bool,
    ) -> ActionSet {
        match status {
            DocumentStatus::New => {
                let mut set = ActionSet::of(&[Action::Edit, Action::Send]);
                if kind.has_lines() {
                    set = set.with(Action::EditLine).with(Action::DeleteLine);
                }
                if is_owner || role.can_review() {
                    set = set.with(Action::Delete);
                }
                set
            }
            DocumentStatus::PendingReview if role.can_review() => {
                ActionSet::of(&[Action::Approve, Action::Reject])
            }
            DocumentStatus::PendingReview
            | DocumentStatus::Approved
            | DocumentStatus::Rejected
            | DocumentStatus::Cancelled
            | DocumentStatus::Completed
            | DocumentStatus::Unknown => ActionSet::EMPTY,
        }
    }

    /// Checks that `action` is allowed, explaining why when it is not.
    ///
    /// # Errors
    /// * `WorkflowError::NotPermitted` - a staff member tried to review
    /// * `WorkflowError::Immutable` - the document is terminal
    /// * `WorkflowError::UnknownStatus` - the status text was not understood
    /// * `WorkflowError::InvalidTransition` - anything else
    pub fn authorize(
        kind: DocumentKind,
        status: DocumentStatus,
        actor: &Actor,
        is_owner: bool,
        action: Action,
    ) -> Result<(), WorkflowError> {
        if Self::allowed_actions(kind, status, actor.role, is_owner).contains(action) {
            return Ok(());
        }

        tracing::debug!(%kind, %status, role = %actor.role, %action, "Action refused locally");

        if status.is_terminal() {
            return Err(WorkflowError::Immutable { kind, status });
        }
        if status == DocumentStatus::Unknown {
            return Err(WorkflowError::UnknownStatus { kind });
        }

        let reviewer_would_pass =
            Self::allowed_actions(kind, status, ActorRole::Admin, true).contains(action);
        if reviewer_would_pass {
            return Err(WorkflowError::NotPermitted {
                kind,
                role: actor.role,
                action,
            });
        }

        Err(WorkflowError::InvalidTransition {
            kind,
            from: status,
            action,
        })
    }
}
