//! HTTP client for the backend REST API.

use std::time::Duration;

use atelier_shared::Session;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::wire::envelope::{Envelope, One};
use crate::{ClientConfig, ClientError, ClientResult, Endpoint};

/// HTTP client for making requests to the backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach the session's bearer token.
    #[must_use]
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    /// Get the current token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Backend request");
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET a collection, accepting any list envelope.
    pub async fn list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ClientResult<Vec<T>> {
        let body = Self::handle_response(self.request(Method::GET, endpoint.path()).send().await?)
            .await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("{endpoint}: unrecognised list body: {e}"))
        })?;
        Ok(envelope.into_vec())
    }

    /// GET one item by id, bare or wrapped in `data`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint, id: i64) -> ClientResult<T> {
        self.get_json(&endpoint.item(id)).await
    }

    /// GET an arbitrary path, bare or wrapped in `data`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let body = Self::handle_response(self.request(Method::GET, path).send().await?).await?;
        let one: One<T> = serde_json::from_slice(&body)?;
        Ok(one.into_inner())
    }

    /// POST a new item.
    ///
    /// Returns the created item when the backend echoes it back.
    pub async fn create<B, T>(&self, endpoint: Endpoint, body: &B) -> ClientResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, endpoint.path())
            .json(body)
            .send()
            .await?;
        let bytes = Self::handle_response(response).await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice::<One<T>>(&bytes) {
            Ok(one) => Ok(Some(one.into_inner())),
            Err(e) => {
                tracing::debug!(%endpoint, error = %e, "Create response not an item");
                Ok(None)
            }
        }
    }

    /// PUT an item.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        id: i64,
        body: &B,
    ) -> ClientResult<()> {
        let response = self
            .request(Method::PUT, &endpoint.item(id))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await?;
        Ok(())
    }

    /// DELETE an item.
    pub async fn delete(&self, endpoint: Endpoint, id: i64) -> ClientResult<()> {
        let response = self.request(Method::DELETE, &endpoint.item(id)).send().await?;
        Self::handle_response(response).await?;
        Ok(())
    }

    /// POST a JSON body and decode the answer.
    pub async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, endpoint.path())
            .json(body)
            .send()
            .await?;
        let bytes = Self::handle_response(response).await?;
        let one: One<T> = serde_json::from_slice(&bytes)?;
        Ok(one.into_inner())
    }

    /// Handle the HTTP response, returning the body of a success.
    async fn handle_response(response: Response) -> ClientResult<Vec<u8>> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let message = rejection_message(status, &body);
        tracing::warn!(status = status.as_u16(), %message, "Backend rejected request");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Picks the most useful message out of an error body.
fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() && text.len() <= 200 {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
