//! Status normalizer.
//!
//! The backend has no status enum: documents carry free text such as
//! "Chờ duyệt" or "ĐÃ DUYỆT". This is the only place that interprets that
//! text; swap the body of [`normalize_status`] if the backend ever grows a
//! real enum.

use atelier_shared::text::fold;

use super::types::{DocumentKind, DocumentStatus};

/// Substring rules checked in priority order against folded text.
///
/// "cho" must win over "duyet" so "Chờ duyệt" reads as pending, and "huy"
/// must win over everything so "Đã hủy duyệt" reads as cancelled.
const RULES: &[(&str, DocumentStatus)] = &[
    ("huy", DocumentStatus::Cancelled),
    ("tu choi", DocumentStatus::Rejected),
    ("cho", DocumentStatus::PendingReview),
    ("hoan", DocumentStatus::Completed),
    ("duyet", DocumentStatus::Approved),
    ("tao", DocumentStatus::New),
    ("moi", DocumentStatus::New),
];

/// Maps free-text status to the canonical enum for `kind`.
///
/// Matching is case- and diacritics-insensitive. Canonical tokens
/// (`pending_review`, `approved`, ...) are accepted too, so normalizing a
/// status's own token or label returns the same status. Empty or
/// unrecognised text yields [`DocumentStatus::Unknown`], never `New`.
#[must_use]
pub fn normalize_status(kind: DocumentKind, raw: &str) -> DocumentStatus {
    let folded = fold(raw);
    if folded.is_empty() {
        return DocumentStatus::Unknown;
    }

    let status = canonical_token(&folded).unwrap_or_else(|| {
        RULES
            .iter()
            .find(|(needle, _)| folded.contains(needle))
            .map_or(DocumentStatus::Unknown, |(_, status)| *status)
    });

    if status == DocumentStatus::Completed && !kind.supports_completed() {
        tracing::warn!(%kind, raw, "Completed status on a kind without completion");
        return DocumentStatus::Unknown;
    }

    status
}

/// Maps an optional status field; a missing field is `Unknown`.
#[must_use]
pub fn normalize_optional(kind: DocumentKind, raw: Option<&str>) -> DocumentStatus {
    raw.map_or(DocumentStatus::Unknown, |s| normalize_status(kind, s))
}

fn canonical_token(folded: &str) -> Option<DocumentStatus> {
    let token = folded.replace(' ', "_");
    DocumentStatus::ALL
        .into_iter()
        .filter(|s| *s != DocumentStatus::Unknown)
        .find(|s| s.as_str() == token)
        .or(match token.as_str() {
            "pending" => Some(DocumentStatus::PendingReview),
            "canceled" => Some(DocumentStatus::Cancelled),
            _ => None,
        })
}
