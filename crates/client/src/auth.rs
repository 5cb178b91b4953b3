//! Login and logout.
//!
//! Login trades credentials for a bearer token and caches the employee's
//! profile; both are persisted in the session file so later runs can act
//! without logging in again. Logout only forgets the session locally.

use atelier_core::workflow::Actor;
use atelier_shared::{Session, SessionStore};

use crate::wire::{LoginRequest, LoginResponse};
use crate::{ClientConfig, ClientError, ClientResult, Endpoint, HttpClient};

/// Session lifecycle against the backend and the session file.
#[derive(Debug, Clone)]
pub struct Authenticator {
    http: HttpClient,
    store: SessionStore,
}

impl Authenticator {
    /// Creates an authenticator.
    pub fn new(config: &ClientConfig, store: SessionStore) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            store,
        })
    }

    /// Logs in and persists the session.
    ///
    /// # Errors
    /// * `Rejected` - wrong credentials (the backend's message is kept)
    /// * `InvalidResponse` - the answer carries no employee id
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.http.post_json(Endpoint::Login, &request).await?;
        if response.token.trim().is_empty() {
            return Err(ClientError::InvalidResponse("login answer without token".to_string()));
        }

        let session = Session::new(response.token, response.employee.to_profile()?);
        self.store.save(&session)?;
        tracing::info!(
            employee_id = %session.profile.id,
            role = %session.profile.role,
            "Logged in"
        );
        Ok(session)
    }

    /// Forgets the session.
    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The persisted session.
    ///
    /// # Errors
    /// `App(Unauthorized)` when nobody is logged in.
    pub fn session(&self) -> ClientResult<Session> {
        Ok(self.store.require()?)
    }

    /// An HTTP client carrying the session's token, and the acting
    /// employee.
    pub fn authorized(&self) -> ClientResult<(HttpClient, Actor)> {
        let session = self.session()?;
        Ok((
            self.http.clone().with_session(&session),
            Actor::from_session(&session),
        ))
    }
}
