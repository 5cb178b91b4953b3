//! Workflow domain types for the document approval lifecycle.
//!
//! Purchase orders, warehouse receipts and shift-closing reports share one
//! lifecycle. `DocumentKind` parameterizes the few places where they
//! differ.

use std::fmt;

use atelier_shared::types::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of document moving through the approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Phiếu đặt hàng: purchase order sent to a supplier.
    PurchaseOrder,
    /// Phiếu nhập kho: goods received against a purchase order.
    WarehouseReceipt,
    /// Chốt ca: end-of-shift cash reconciliation.
    ShiftClose,
}

impl DocumentKind {
    /// Status a freshly created document starts in.
    ///
    /// Shift-closing reports are created already awaiting review.
    #[must_use]
    pub const fn initial_status(self) -> DocumentStatus {
        match self {
            Self::PurchaseOrder | Self::WarehouseReceipt => DocumentStatus::New,
            Self::ShiftClose => DocumentStatus::PendingReview,
        }
    }

    /// Status a rejected document lands in.
    #[must_use]
    pub const fn rejected_status(self) -> DocumentStatus {
        match self {
            Self::PurchaseOrder | Self::WarehouseReceipt => DocumentStatus::Cancelled,
            Self::ShiftClose => DocumentStatus::Rejected,
        }
    }

    /// Whether the kind has a `Completed` state.
    #[must_use]
    pub const fn supports_completed(self) -> bool {
        matches!(self, Self::PurchaseOrder)
    }

    /// Whether documents of this kind carry line items.
    #[must_use]
    pub const fn has_lines(self) -> bool {
        matches!(self, Self::PurchaseOrder | Self::WarehouseReceipt)
    }

    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::WarehouseReceipt => "warehouse_receipt",
            Self::ShiftClose => "shift_close",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical document status.
///
/// The backend stores status as free Vietnamese text; see
/// [`normalize_status`](super::status::normalize_status) for the mapping.
/// Valid transitions:
/// - New → PendingReview (send)
/// - PendingReview → Approved (approve)
/// - PendingReview → Cancelled / Rejected (reject, per kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Tạo mới: being drafted, lines may change.
    New,
    /// Chờ xác nhận / Chờ duyệt: waiting for a manager.
    PendingReview,
    /// Đã duyệt.
    Approved,
    /// Từ chối.
    Rejected,
    /// Đã hủy.
    Cancelled,
    /// Hoàn thành (purchase orders only).
    Completed,
    /// Text that could not be mapped. Nothing is allowed on it.
    Unknown,
}

impl DocumentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::New,
        Self::PendingReview,
        Self::Approved,
        Self::Rejected,
        Self::Cancelled,
        Self::Completed,
        Self::Unknown,
    ];

    /// Returns the canonical token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the Vietnamese text the backend stores for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "Tạo mới",
            Self::PendingReview => "Chờ duyệt",
            Self::Approved => "Đã duyệt",
            Self::Rejected => "Từ chối",
            Self::Cancelled => "Đã hủy",
            Self::Completed => "Hoàn thành",
            Self::Unknown => "Không xác định",
        }
    }

    /// Returns true if line items and header fields may change.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::New)
    }

    /// Returns true if no further action is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Approved | Self::Rejected | Self::Cancelled | Self::Completed
        )
    }

    /// Returns true if the document is still live (not cancelled or rejected).
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Rejected | Self::Cancelled)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action an actor may request on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Submit a new document for review.
    Send,
    /// Approve a document under review.
    Approve,
    /// Reject or cancel a document under review.
    Reject,
    /// Edit header fields.
    Edit,
    /// Add or update a line item.
    EditLine,
    /// Remove a line item.
    DeleteLine,
    /// Delete the whole document.
    Delete,
}

impl Action {
    /// Every action.
    pub const ALL: [Self; 7] = [
        Self::Send,
        Self::Approve,
        Self::Reject,
        Self::Edit,
        Self::EditLine,
        Self::DeleteLine,
        Self::Delete,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Send => 1,
            Self::Approve => 1 << 1,
            Self::Reject => 1 << 2,
            Self::Edit => 1 << 3,
            Self::EditLine => 1 << 4,
            Self::DeleteLine => 1 << 5,
            Self::Delete => 1 << 6,
        }
    }

    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Edit => "edit",
            Self::EditLine => "edit_line",
            Self::DeleteLine => "delete_line",
            Self::Delete => "delete",
        }
    }

    /// Parses an action name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A small set of actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a slice of actions.
    #[must_use]
    pub const fn of(actions: &[Action]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < actions.len() {
            bits |= actions[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Returns a copy with `action` added.
    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self(self.0 | action.bit())
    }

    /// Returns true if `action` is in the set.
    #[must_use]
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the contained actions in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl Serialize for ActionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// A validated status transition with audit data.
///
/// Each variant captures the resulting status and who/when/why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// New document sent for review.
    Send {
        /// The new status after sending.
        new_status: DocumentStatus,
        /// The employee who sent the document.
        sent_by: EmployeeId,
        /// When the document was sent.
        sent_at: DateTime<Utc>,
    },
    /// Document approved by a reviewer.
    Approve {
        /// The new status after approval.
        new_status: DocumentStatus,
        /// The reviewer.
        approved_by: EmployeeId,
        /// When the document was approved.
        approved_at: DateTime<Utc>,
    },
    /// Document rejected or cancelled by a reviewer.
    Reject {
        /// The new status after rejection (Rejected or Cancelled, per kind).
        new_status: DocumentStatus,
        /// The reviewer.
        rejected_by: EmployeeId,
        /// When the document was rejected.
        rejected_at: DateTime<Utc>,
        /// The reason given by the reviewer.
        reason: String,
    },
}

impl Transition {
    /// Returns the new status resulting from this transition.
    #[must_use]
    pub fn new_status(&self) -> DocumentStatus {
        match self {
            Self::Send { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Returns the action this transition performs.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Send { .. } => Action::Send,
            Self::Approve { .. } => Action::Approve,
            Self::Reject { .. } => Action::Reject,
        }
    }

    /// Returns the note to persist with the new status.
    ///
    /// A rejection reason is appended to the existing note so it is never
    /// dropped; other transitions keep the note unchanged.
    #[must_use]
    pub fn next_note(&self, current: Option<&str>) -> Option<String> {
        match self {
            Self::Reject { reason, .. } => Some(append_reason(current, reason)),
            _ => current.map(str::to_string),
        }
    }
}

/// Appends a rejection reason to a note.
#[must_use]
pub fn append_reason(note: Option<&str>, reason: &str) -> String {
    let reason = reason.trim();
    match note.map(str::trim).filter(|n| !n.is_empty()) {
        Some(existing) => format!("{existing}\nLý do: {reason}"),
        None => format!("Lý do: {reason}"),
    }
}
