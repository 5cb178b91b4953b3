//! Key spelling of backend records.
//!
//! Resources answer with concatenated keys (`tongtien`) or with snake_case
//! ones (`tong_tien`). Records are read under the concatenated names;
//! [`Keyed`] remembers how each key arrived and writes the record back
//! under the same spelling. Keys the backend never sent are left out of the
//! body unless they now carry a value.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Snake_case spellings of a record's keys.
pub trait KeySpelling {
    /// `(concatenated, snake_case)` pairs.
    const SNAKE_KEYS: &'static [(&'static str, &'static str)];

    /// The snake_case spelling of `key`.
    fn snake_key(key: &str) -> Option<&'static str> {
        Self::SNAKE_KEYS
            .iter()
            .find(|(concatenated, _)| *concatenated == key)
            .map(|(_, snake)| *snake)
    }

    /// The concatenated spelling of a snake_case `key`.
    fn concatenated_key(key: &str) -> Option<&'static str> {
        Self::SNAKE_KEYS
            .iter()
            .find(|(_, snake)| *snake == key)
            .map(|(concatenated, _)| *concatenated)
    }
}

/// Which spelling a record's known keys arrived in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStyle {
    /// `maphieudathang`
    #[default]
    Concatenated,
    /// `ma_phieu_dat_hang`
    SnakeCase,
}

/// The keys a record arrived with, by the name it is read under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyShape {
    style: KeyStyle,
    sent: BTreeMap<String, String>,
}

impl KeyShape {
    /// Records the shape of `object` and renames its snake_case keys to
    /// the concatenated form.
    fn capture<R: KeySpelling>(object: &Map<String, Value>) -> (Self, Map<String, Value>) {
        let mut shape = Self::default();
        let mut read = Map::new();
        for (key, value) in object {
            let name = match R::concatenated_key(key) {
                Some(concatenated) if !object.contains_key(concatenated) => {
                    shape.style = KeyStyle::SnakeCase;
                    concatenated.to_string()
                }
                _ => key.clone(),
            };
            shape.sent.insert(name.clone(), key.clone());
            read.insert(name, value.clone());
        }
        (shape, read)
    }

    /// Style of the known keys.
    #[must_use]
    pub const fn style(&self) -> KeyStyle {
        self.style
    }

    /// Puts a serialized record back into the spelling it arrived in.
    fn restore<R: KeySpelling>(&self, value: Value) -> Value {
        let Value::Object(fields) = value else {
            return value;
        };
        let mut body = Map::new();
        for (name, value) in fields {
            match self.sent.get(&name) {
                Some(key) => {
                    body.insert(key.clone(), value);
                }
                None if value.is_null() => {}
                None => {
                    let key = match self.style {
                        KeyStyle::SnakeCase => R::snake_key(&name).map_or(name, str::to_string),
                        KeyStyle::Concatenated => name,
                    };
                    body.insert(key, value);
                }
            }
        }
        Value::Object(body)
    }
}

/// A record together with the key spelling it was read in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyed<R> {
    record: R,
    shape: KeyShape,
}

impl<R> Keyed<R> {
    /// A record that was not read from the backend.
    pub fn new(record: R) -> Self {
        Self {
            record,
            shape: KeyShape::default(),
        }
    }

    /// The spelling the record arrived in.
    pub const fn shape(&self) -> &KeyShape {
        &self.shape
    }

    /// Unwraps the record.
    pub fn into_inner(self) -> R {
        self.record
    }
}

impl<R> Deref for Keyed<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R> DerefMut for Keyed<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}

impl<'de, R: DeserializeOwned + KeySpelling> Deserialize<'de> for Keyed<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(object) => {
                let (shape, object) = KeyShape::capture::<R>(&object);
                let record = R::deserialize(Value::Object(object)).map_err(D::Error::custom)?;
                Ok(Self { record, shape })
            }
            other => R::deserialize(other)
                .map(Self::new)
                .map_err(D::Error::custom),
        }
    }
}

impl<R: Serialize + KeySpelling> Serialize for Keyed<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = serde_json::to_value(&self.record).map_err(S::Error::custom)?;
        self.shape.restore::<R>(value).serialize(serializer)
    }
}
