//! Reference data desk: employees, suppliers and product ratings.
//!
//! These records have no workflow. They are listed for lookups and edited
//! with plain CRUD; the loaded record is sent back in the key spelling it
//! arrived in, with only the edited fields changed.

use atelier_shared::AppError;
use atelier_shared::text::{contains_folded, fold};
use atelier_shared::types::{RatingId, SupplierId};

use crate::wire::{EmployeeRecord, Keyed, RatingRecord, SupplierRecord};
use crate::{ClientError, ClientResult, Endpoint};

use super::DeskContext;

/// Employees, suppliers and ratings.
#[derive(Debug)]
pub struct DirectoryDesk {
    ctx: DeskContext,
}

impl DirectoryDesk {
    /// Creates the desk.
    #[must_use]
    pub const fn new(ctx: DeskContext) -> Self {
        Self { ctx }
    }

    /// Employees whose name, email or phone contains `search`.
    pub async fn employees(&self, search: Option<&str>) -> ClientResult<Vec<EmployeeRecord>> {
        let employees: Vec<EmployeeRecord> = self.ctx.http.list(Endpoint::Employees).await?;
        let needle = search.map(fold).filter(|n| !n.is_empty());
        Ok(employees
            .into_iter()
            .filter(|e| {
                needle.as_deref().is_none_or(|n| {
                    [&e.full_name, &e.email, &e.phone]
                        .into_iter()
                        .flatten()
                        .any(|field| contains_folded(field, n))
                })
            })
            .collect())
    }

    /// All suppliers.
    pub async fn suppliers(&self) -> ClientResult<Vec<Keyed<SupplierRecord>>> {
        self.ctx.http.list(Endpoint::Suppliers).await
    }

    /// Creates a supplier.
    pub async fn create_supplier(
        &self,
        supplier: &SupplierRecord,
    ) -> ClientResult<Option<SupplierId>> {
        if supplier.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(ClientError::App(AppError::Validation(
                "Tên nhà cung cấp không được để trống".to_string(),
            )));
        }
        let created: Option<SupplierRecord> =
            self.ctx.http.create(Endpoint::Suppliers, supplier).await?;
        let id = created.and_then(|s| s.id).map(SupplierId);
        tracing::info!(supplier_id = ?id, "Supplier created");
        Ok(id)
    }

    /// Saves an edited supplier.
    pub async fn update_supplier(&self, supplier: &Keyed<SupplierRecord>) -> ClientResult<()> {
        let id = supplier
            .id
            .ok_or_else(|| ClientError::InvalidResponse("supplier without id".to_string()))?;
        self.ctx.http.update(Endpoint::Suppliers, id, supplier).await?;
        tracing::info!(supplier_id = id, "Supplier updated");
        Ok(())
    }

    /// Deletes a supplier.
    pub async fn delete_supplier(&self, id: SupplierId) -> ClientResult<()> {
        self.ctx.http.delete(Endpoint::Suppliers, id.0).await?;
        tracing::info!(supplier_id = %id, "Supplier deleted");
        Ok(())
    }

    /// All ratings, optionally only those with at most `max_stars`.
    pub async fn ratings(&self, max_stars: Option<u8>) -> ClientResult<Vec<Keyed<RatingRecord>>> {
        let ratings: Vec<Keyed<RatingRecord>> = self.ctx.http.list(Endpoint::Ratings).await?;
        Ok(ratings
            .into_iter()
            .filter(|r| max_stars.is_none_or(|max| r.star_count().is_some_and(|s| s <= max)))
            .collect())
    }

    /// Shows or hides a rating on the storefront.
    pub async fn set_rating_visibility(
        &self,
        rating: &Keyed<RatingRecord>,
        visible: bool,
    ) -> ClientResult<()> {
        let id: RatingId = rating
            .rating_id()
            .ok_or_else(|| ClientError::InvalidResponse("rating without id".to_string()))?;
        let mut body = rating.clone();
        body.visible = visible;
        self.ctx.http.update(Endpoint::Ratings, id.0, &body).await?;
        tracing::info!(rating_id = %id, visible, "Rating visibility changed");
        Ok(())
    }
}
