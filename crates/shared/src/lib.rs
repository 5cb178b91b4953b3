//! Shared types, errors, session and configuration for Atelier.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for backend entity references
//! - VND money helpers with decimal precision
//! - Client-side pagination
//! - Application-wide error types
//! - The authenticated session context
//! - Configuration management

pub mod config;
pub mod error;
pub mod session;
pub mod text;
pub mod types;


pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use session::{Session, SessionStore, StaffProfile};
