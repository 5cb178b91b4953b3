//! Common types used across the workspace.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{Vnd, format_vnd};
pub use pagination::{Page, PageMeta, PageRequest};
