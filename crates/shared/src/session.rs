//! Authenticated session context.
//!
//! A `Session` is created at login and destroyed at logout. It is passed
//! explicitly to the HTTP client (bearer token) and to the workflow policy
//! (actor id and role) instead of being looked up from ambient state.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::types::EmployeeId;

/// Cached profile of the logged-in employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// Employee id.
    pub id: EmployeeId,
    /// Display name.
    pub full_name: String,
    /// Role as free text from the backend ("Admin", "Quản lý", "Nhân viên").
    pub role: String,
    /// Login email, if any.
    #[serde(default)]
    pub email: Option<String>,
}

/// Bearer token plus cached profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to every backend request.
    pub token: String,
    /// The employee the token belongs to.
    pub profile: StaffProfile,
    /// When the session was established.
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session stamped with the current time.
    #[must_use]
    pub fn new(token: impl Into<String>, profile: StaffProfile) -> Self {
        Self {
            token: token.into(),
            profile,
            logged_in_at: Utc::now(),
        }
    }

    /// Returns the acting employee's id.
    #[must_use]
    pub const fn actor_id(&self) -> EmployeeId {
        self.profile.id
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// File-backed persistence for the session between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session, if any.
    ///
    /// A missing file means "logged out". A corrupt file is reported as a
    /// storage error rather than silently discarded.
    pub fn load(&self) -> AppResult<Option<Session>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Loads the session or fails with `Unauthorized`.
    pub fn require(&self) -> AppResult<Session> {
        self.load()?
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
    }

    /// Persists the session.
    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Removes the persisted session. Clearing an absent session is a no-op.
    pub fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
