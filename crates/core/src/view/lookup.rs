//! Reference lookups.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use atelier_shared::types::{EmployeeId, SupplierId, VariantId};

/// Id-to-label index for one reference entity.
#[derive(Debug, Clone)]
pub struct LookupIndex<Id> {
    entity: &'static str,
    labels: HashMap<Id, String>,
}

impl<Id> LookupIndex<Id>
where
    Id: Copy + Eq + Hash + Display,
{
    /// Creates an empty index for `entity` ("supplier", "employee", ...).
    #[must_use]
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            labels: HashMap::new(),
        }
    }

    /// Builds an index from `(id, label)` pairs. Later duplicates win.
    #[must_use]
    pub fn from_pairs(entity: &'static str, pairs: impl IntoIterator<Item = (Id, String)>) -> Self {
        Self {
            entity,
            labels: pairs.into_iter().collect(),
        }
    }

    /// Adds or replaces a label.
    pub fn insert(&mut self, id: Id, label: impl Into<String>) {
        self.labels.insert(id, label.into());
    }

    /// Returns the label for `id`, if loaded.
    #[must_use]
    pub fn get(&self, id: Id) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Returns the label for `id`, or `#<id>` when it is missing.
    #[must_use]
    pub fn label(&self, id: Id) -> String {
        if let Some(label) = self.get(id) {
            return label.to_string();
        }
        tracing::warn!(entity = self.entity, %id, "Reference not found, showing raw id");
        format!("#{id}")
    }

    /// Like [`label`](Self::label) but empty for a missing reference.
    #[must_use]
    pub fn label_opt(&self, id: Option<Id>) -> String {
        id.map(|id| self.label(id)).unwrap_or_default()
    }

    /// Number of loaded labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The reference indexes a back-office screen joins against.
#[derive(Debug, Clone)]
pub struct ReferenceLookups {
    /// Supplier names.
    pub suppliers: LookupIndex<SupplierId>,
    /// Employee full names.
    pub employees: LookupIndex<EmployeeId>,
    /// Variant labels ("Áo sơ mi - Trắng - M").
    pub variants: LookupIndex<VariantId>,
}

impl Default for ReferenceLookups {
    fn default() -> Self {
        Self {
            suppliers: LookupIndex::new("supplier"),
            employees: LookupIndex::new("employee"),
            variants: LookupIndex::new("variant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_fallback() {
        let index = LookupIndex::from_pairs(
            "supplier",
            [(SupplierId(1), "Dệt May Thành Công".to_string())],
        );
        assert_eq!(index.label(SupplierId(1)), "Dệt May Thành Công");
        assert_eq!(index.label(SupplierId(2)), "#2");
        assert_eq!(index.label_opt(None), "");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_insert_replaces() {
        let mut index = LookupIndex::new("employee");
        assert!(index.is_empty());
        index.insert(EmployeeId(4), "Lan");
        index.insert(EmployeeId(4), "Nguyễn Thị Lan");
        assert_eq!(index.get(EmployeeId(4)), Some("Nguyễn Thị Lan"));
    }
}
