//! Bulk reference loading for list and detail views.

use atelier_core::view::{LookupIndex, ReferenceLookups};

use crate::wire::{EmployeeRecord, ProductRecord, SupplierRecord};
use crate::{ClientResult, Endpoint, HttpClient};

/// Loads suppliers, employees and product variants concurrently and
/// indexes their labels.
pub async fn load_lookups(http: &HttpClient) -> ClientResult<ReferenceLookups> {
    let (suppliers, employees, products) = tokio::try_join!(
        http.list::<SupplierRecord>(Endpoint::Suppliers),
        http.list::<EmployeeRecord>(Endpoint::Employees),
        http.list::<ProductRecord>(Endpoint::Products),
    )?;

    let lookups = ReferenceLookups {
        suppliers: LookupIndex::from_pairs(
            "supplier",
            suppliers.iter().filter_map(SupplierRecord::label),
        ),
        employees: LookupIndex::from_pairs(
            "employee",
            employees.iter().filter_map(EmployeeRecord::label),
        ),
        variants: LookupIndex::from_pairs(
            "variant",
            products.iter().flat_map(ProductRecord::variant_labels),
        ),
    };
    tracing::debug!(
        suppliers = lookups.suppliers.len(),
        employees = lookups.employees.len(),
        variants = lookups.variants.len(),
        "Reference lookups loaded"
    );
    Ok(lookups)
}
