//! Response envelopes.
//!
//! List endpoints answer with a bare array or with the array under
//! `data`, `items` or `result`, depending on the resource.

use serde::Deserialize;

/// A list body in any of the accepted shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `[...]`
    Bare(Vec<T>),
    /// `{"data": [...]}`
    Data {
        /// Items.
        data: Vec<T>,
    },
    /// `{"items": [...]}`
    Items {
        /// Items.
        items: Vec<T>,
    },
    /// `{"result": [...]}`
    Result {
        /// Items.
        result: Vec<T>,
    },
}

impl<T> Envelope<T> {
    /// Unwraps the items.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items)
            | Self::Data { data: items }
            | Self::Items { items }
            | Self::Result { result: items } => items,
        }
    }
}

/// A single-item body, bare or under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum One<T> {
    /// `{"data": {...}}`
    Data {
        /// The item.
        data: T,
    },
    /// `{...}`
    Bare(T),
}

impl<T> One<T> {
    /// Unwraps the item.
    pub fn into_inner(self) -> T {
        match self {
            Self::Data { data } | Self::Bare(data) => data,
        }
    }
}
