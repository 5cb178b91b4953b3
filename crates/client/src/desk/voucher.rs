//! Voucher desk (mã giảm giá).
//!
//! Voucher status is never stored; it is derived from the dates and the
//! remaining quantity as of the business-timezone day.

use atelier_core::view::{ListQuery, VoucherRow};
use atelier_core::voucher::{
    Voucher, VoucherEditScope, VoucherError, VoucherForm, VoucherStatus, compute_discount,
    validate_voucher,
};
use atelier_shared::types::{PageRequest, VoucherId};
use rust_decimal::Decimal;

use super::{DeskContext, Listing, domains, load_lookups, reloaded};
use crate::fetch::{LatestFetch, SubmitGuard};
use crate::wire::{Loaded, VoucherRecord};
use crate::{ClientError, ClientResult, Endpoint};

/// Lists, creates and edits vouchers.
#[derive(Debug)]
pub struct VoucherDesk {
    ctx: DeskContext,
    fetch: LatestFetch,
    submit: SubmitGuard,
}

impl VoucherDesk {
    /// Creates the desk.
    #[must_use]
    pub fn new(ctx: DeskContext) -> Self {
        Self {
            ctx,
            fetch: LatestFetch::new(),
            submit: SubmitGuard::new(),
        }
    }

    /// One page of the filtered list; `Ok(None)` when superseded.
    pub async fn list(
        &self,
        query: &ListQuery<VoucherStatus>,
        page: PageRequest,
    ) -> ClientResult<Option<Listing<VoucherRow>>> {
        let today = self.ctx.config.today();
        let load = async {
            let (vouchers, lookups) = tokio::try_join!(
                self.ctx.load_all::<VoucherRecord>(),
                load_lookups(&self.ctx.http),
            )?;
            let rows: Vec<_> = vouchers
                .iter()
                .map(|v| VoucherRow::build(&v.domain, &lookups, today))
                .collect();
            Ok::<_, ClientError>(Listing::of(&query.apply(&rows), page))
        };
        self.fetch
            .run(async { Listing::or_banner(load.await, page) })
            .await
    }

    /// Loads one voucher.
    pub async fn show(&self, id: VoucherId) -> ClientResult<Loaded<VoucherRecord>> {
        self.ctx.load(id.0).await
    }

    /// Creates a voucher after checking the form and code uniqueness.
    pub async fn create(&self, form: &VoucherForm) -> ClientResult<Option<VoucherId>> {
        let _ticket = self.submit.acquire()?;
        let existing = domains(&self.ctx.load_all::<VoucherRecord>().await?);
        validate_voucher(form, &existing, None)?;

        let id = self
            .ctx
            .create(&VoucherRecord::from_form(form, self.ctx.actor.id))
            .await?
            .map(VoucherId);
        tracing::info!(voucher_id = ?id, code = %form.code.trim(), "Voucher created");
        Ok(id)
    }

    /// Replaces the editable fields within the voucher's edit scope.
    pub async fn update(
        &self,
        voucher: &Loaded<VoucherRecord>,
        form: &VoucherForm,
    ) -> ClientResult<Loaded<VoucherRecord>> {
        let _ticket = self.submit.acquire()?;
        let current = &voucher.domain;
        VoucherEditScope::check(current, form, self.ctx.config.today())?;
        let existing = domains(&self.ctx.load_all::<VoucherRecord>().await?);
        validate_voucher(form, &existing, Some(current.id))?;

        let next = Voucher {
            form: form.clone(),
            ..current.clone()
        };
        self.ctx.save(voucher, &next).await?;
        tracing::info!(voucher_id = %current.id, "Voucher updated");
        reloaded(self.show(current.id)).await
    }

    /// Deletes a voucher that has not started yet.
    pub async fn delete(&self, voucher: &Loaded<VoucherRecord>) -> ClientResult<()> {
        let _ticket = self.submit.acquire()?;
        let status = voucher.domain.status(self.ctx.config.today());
        if VoucherEditScope::for_status(status) != VoucherEditScope::Full {
            return Err(VoucherError::Locked(status).into());
        }
        self.ctx.http.delete(Endpoint::Vouchers, voucher.domain.id.0).await?;
        tracing::info!(voucher_id = %voucher.domain.id, "Voucher deleted");
        Ok(())
    }

    /// The discount the voucher gives an order today. No request is sent.
    pub fn quote(
        &self,
        voucher: &Voucher,
        order_value: Decimal,
        shipping_fee: Decimal,
        is_birthday: bool,
    ) -> ClientResult<Decimal> {
        Ok(compute_discount(
            voucher,
            order_value,
            shipping_fee,
            is_birthday,
            self.ctx.config.today(),
        )?)
    }
}
