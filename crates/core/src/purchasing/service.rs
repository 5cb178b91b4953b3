//! Purchase order mutations.
//!
//! Each line mutation is checked against the workflow, applied to a copy
//! of the line set, and returned together with the recomputed header so
//! the caller can persist the line and the header in sequence.

use atelier_shared::types::{PurchaseOrderId, PurchaseOrderLineId};
use rust_decimal::Decimal;

use crate::workflow::{Action, Actor, DocumentKind, WorkflowService};

use super::error::PurchasingError;
use super::totals::{OrderTotals, compute_totals, line_total};
use super::types::{LineInput, NewPurchaseOrder, PurchaseOrder, PurchaseOrderLine};

/// The line write a mutation requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineWrite {
    /// POST a new line.
    Create(PurchaseOrderLine),
    /// PUT an existing line.
    Update(PurchaseOrderLine),
    /// DELETE a line.
    Delete(PurchaseOrderLineId),
}

/// Result of a line mutation: the line write plus the header to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// The line write to send first.
    pub write: LineWrite,
    /// The line set after the change.
    pub lines: Vec<PurchaseOrderLine>,
    /// The header totals to send second.
    pub totals: OrderTotals,
}

/// Stateless service for purchase order mutations.
pub struct PurchasingService;

impl PurchasingService {
    /// Validate header input for a new order.
    ///
    /// # Errors
    /// * `MissingSupplier` - no supplier chosen
    /// * `NegativeDeposit` - deposit below zero
    /// * `ExpectedBeforeOrdered` - delivery date precedes order date
    pub fn validate_new_order(input: &NewPurchaseOrder) -> Result<(), PurchasingError> {
        if input.supplier_id.is_none() {
            return Err(PurchasingError::MissingSupplier);
        }
        if input.deposit < Decimal::ZERO {
            return Err(PurchasingError::NegativeDeposit);
        }
        if input
            .expected_at
            .is_some_and(|expected| expected < input.ordered_at)
        {
            return Err(PurchasingError::ExpectedBeforeOrdered);
        }
        Ok(())
    }

    /// Add a line to a `New` order.
    pub fn add_line(
        order: &PurchaseOrder,
        lines: &[PurchaseOrderLine],
        input: LineInput,
        actor: &Actor,
    ) -> Result<LineChange, PurchasingError> {
        Self::ensure(order, actor, Action::EditLine)?;
        Self::validate_line(&input)?;

        if lines.iter().any(|l| l.variant_id == input.variant_id) {
            return Err(PurchasingError::DuplicateVariant(input.variant_id));
        }

        let line = PurchaseOrderLine::new(
            order.id,
            input.variant_id,
            input.quantity,
            input.unit_price,
        );
        let mut next = lines.to_vec();
        next.push(line.clone());

        Ok(Self::change(order, next, LineWrite::Create(line)))
    }

    /// Change quantity/price (or variant) of an existing line on a `New` order.
    pub fn update_line(
        order: &PurchaseOrder,
        lines: &[PurchaseOrderLine],
        line_id: PurchaseOrderLineId,
        input: LineInput,
        actor: &Actor,
    ) -> Result<LineChange, PurchasingError> {
        Self::ensure(order, actor, Action::EditLine)?;
        Self::validate_line(&input)?;

        if lines
            .iter()
            .any(|l| l.variant_id == input.variant_id && l.id != Some(line_id))
        {
            return Err(PurchasingError::DuplicateVariant(input.variant_id));
        }

        let mut next = lines.to_vec();
        let line = next
            .iter_mut()
            .find(|l| l.id == Some(line_id))
            .ok_or(PurchasingError::LineNotFound(line_id))?;
        line.variant_id = input.variant_id;
        line.quantity = input.quantity;
        line.unit_price = input.unit_price;
        line.line_total = line_total(input.quantity, input.unit_price);
        let updated = line.clone();

        Ok(Self::change(order, next, LineWrite::Update(updated)))
    }

    /// Remove a line from a `New` order.
    pub fn remove_line(
        order: &PurchaseOrder,
        lines: &[PurchaseOrderLine],
        line_id: PurchaseOrderLineId,
        actor: &Actor,
    ) -> Result<LineChange, PurchasingError> {
        Self::ensure(order, actor, Action::DeleteLine)?;

        if !lines.iter().any(|l| l.id == Some(line_id)) {
            return Err(PurchasingError::LineNotFound(line_id));
        }
        let next: Vec<_> = lines
            .iter()
            .filter(|l| l.id != Some(line_id))
            .cloned()
            .collect();

        Ok(Self::change(order, next, LineWrite::Delete(line_id)))
    }

    /// Change the deposit on a `New` order and recompute the remaining balance.
    pub fn set_deposit(
        order: &PurchaseOrder,
        lines: &[PurchaseOrderLine],
        deposit: Decimal,
        actor: &Actor,
    ) -> Result<PurchaseOrder, PurchasingError> {
        Self::ensure(order, actor, Action::Edit)?;
        if deposit < Decimal::ZERO {
            return Err(PurchasingError::NegativeDeposit);
        }

        let totals = compute_totals(lines, deposit);
        Ok(PurchaseOrder {
            deposit,
            total_amount: totals.total_amount,
            remaining: totals.remaining,
            ..order.clone()
        })
    }

    /// Returns `order` with its header totals replaced by `totals`.
    #[must_use]
    pub fn with_totals(order: &PurchaseOrder, totals: OrderTotals) -> PurchaseOrder {
        PurchaseOrder {
            total_amount: totals.total_amount,
            remaining: totals.remaining,
            ..order.clone()
        }
    }

    /// Lines belonging to `order_id`.
    #[must_use]
    pub fn lines_of(order_id: PurchaseOrderId, lines: &[PurchaseOrderLine]) -> Vec<PurchaseOrderLine> {
        lines
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect()
    }

    fn ensure(order: &PurchaseOrder, actor: &Actor, action: Action) -> Result<(), PurchasingError> {
        WorkflowService::ensure_allowed(
            DocumentKind::PurchaseOrder,
            order.status,
            actor,
            actor.owns(Some(order.employee_id)),
            action,
        )?;
        Ok(())
    }

    fn validate_line(input: &LineInput) -> Result<(), PurchasingError> {
        if input.quantity == 0 {
            return Err(PurchasingError::InvalidQuantity);
        }
        if input.unit_price < Decimal::ZERO {
            return Err(PurchasingError::NegativePrice);
        }
        Ok(())
    }

    fn change(order: &PurchaseOrder, lines: Vec<PurchaseOrderLine>, write: LineWrite) -> LineChange {
        let totals = compute_totals(&lines, order.deposit);
        LineChange {
            write,
            lines,
            totals,
        }
    }
}
