//! REST client for the Atelier back office.
//!
//! The backend owns every record. This crate fetches them, translates the
//! backend's field names into `atelier-core` types and back, and binds the
//! core workflow to the network through *desks*: each desk checks an
//! action locally, writes, then reloads from the backend.
//!
//! # Modules
//!
//! - `http` - Bearer-authenticated JSON client tolerant of list envelopes
//! - `endpoint` - Backend resource paths
//! - `wire` - Backend records and their domain conversions
//! - `desk` - Per-document workflows (purchase orders, receipts, ...)
//! - `fetch` - Superseding list fetches and the submit guard
//! - `address` - Province/ward dataset, fetched once
//! - `auth` - Login and logout against the session store

pub mod address;
pub mod auth;
pub mod config;
pub mod desk;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod http;
pub mod wire;

pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{ClientError, ClientResult};
pub use fetch::{LatestFetch, SubmitGuard};
pub use http::HttpClient;
