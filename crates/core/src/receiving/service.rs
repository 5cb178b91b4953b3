//! Warehouse receipt mutations.

use atelier_shared::types::ReceiptLineId;

use crate::purchasing::PurchaseOrder;
use crate::workflow::{Action, Actor, DocumentKind, DocumentStatus, WorkflowService};

use super::cap::{ReceivingBook, check_receipt_quantity};
use super::error::ReceivingError;
use super::types::{NewReceipt, ReceiptLineInput, WarehouseReceipt, WarehouseReceiptLine};

/// Stateless service for warehouse receipt mutations.
pub struct ReceivingService;

impl ReceivingService {
    /// Validates a receipt header before creation.
    ///
    /// A receipt needs a supplier, either directly or through its source
    /// purchase order, and a source order must already be approved.
    ///
    /// # Errors
    /// * `SourceNotFound` - the source order does not exist
    /// * `SourceNotApproved` - the source order is not `Approved`
    /// * `MissingSupplier` - no supplier can be resolved
    pub fn validate_new_receipt(
        receipt: &NewReceipt,
        orders: &[PurchaseOrder],
    ) -> Result<(), ReceivingError> {
        if let Some(source) = receipt.purchase_order_id {
            let order = orders
                .iter()
                .find(|o| o.id == source)
                .ok_or(ReceivingError::SourceNotFound(source))?;
            if order.status != DocumentStatus::Approved {
                return Err(ReceivingError::SourceNotApproved(source));
            }
        }
        receipt
            .resolve_supplier(orders)
            .ok_or(ReceivingError::MissingSupplier)?;
        Ok(())
    }

    /// Builds a new line for a `New` receipt, enforcing the quantity cap.
    pub fn add_line(
        book: &ReceivingBook<'_>,
        receipt: &WarehouseReceipt,
        input: ReceiptLineInput,
        actor: &Actor,
    ) -> Result<WarehouseReceiptLine, ReceivingError> {
        Self::ensure(receipt, actor, Action::EditLine)?;
        check_receipt_quantity(book, receipt, input.variant_id, input.quantity, None)?;

        Ok(WarehouseReceiptLine {
            id: None,
            receipt_id: receipt.id,
            variant_id: input.variant_id,
            quantity: input.quantity,
            note: input.note,
        })
    }

    /// Rewrites an existing line of a `New` receipt. The line's own previous
    /// quantity is excluded from the received total.
    pub fn update_line(
        book: &ReceivingBook<'_>,
        receipt: &WarehouseReceipt,
        line_id: ReceiptLineId,
        input: ReceiptLineInput,
        actor: &Actor,
    ) -> Result<WarehouseReceiptLine, ReceivingError> {
        Self::ensure(receipt, actor, Action::EditLine)?;

        let existing = book
            .receipt_lines
            .iter()
            .find(|l| l.id == Some(line_id) && l.receipt_id == receipt.id)
            .ok_or(ReceivingError::LineNotFound(line_id))?;

        check_receipt_quantity(
            book,
            receipt,
            input.variant_id,
            input.quantity,
            Some(line_id),
        )?;

        Ok(WarehouseReceiptLine {
            variant_id: input.variant_id,
            quantity: input.quantity,
            note: input.note,
            ..existing.clone()
        })
    }

    /// Checks that a line may be removed from the receipt.
    pub fn remove_line(
        receipt: &WarehouseReceipt,
        lines: &[WarehouseReceiptLine],
        line_id: ReceiptLineId,
        actor: &Actor,
    ) -> Result<ReceiptLineId, ReceivingError> {
        Self::ensure(receipt, actor, Action::DeleteLine)?;
        if !lines
            .iter()
            .any(|l| l.id == Some(line_id) && l.receipt_id == receipt.id)
        {
            return Err(ReceivingError::LineNotFound(line_id));
        }
        Ok(line_id)
    }

    fn ensure(
        receipt: &WarehouseReceipt,
        actor: &Actor,
        action: Action,
    ) -> Result<(), ReceivingError> {
        WorkflowService::ensure_allowed(
            DocumentKind::WarehouseReceipt,
            receipt.status,
            actor,
            actor.owns(Some(receipt.employee_id)),
            action,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiving::cap::fixtures::{po, po_line, receipt, receipt_line};
    use crate::workflow::{ActorRole, WorkflowError};
    use atelier_shared::types::{EmployeeId, PurchaseOrderId, VariantId};
    use rstest::rstest;

    fn clerk() -> Actor {
        Actor::new(EmployeeId(4), ActorRole::Staff)
    }

    fn draft(source: Option<i64>) -> NewReceipt {
        NewReceipt {
            purchase_order_id: source.map(PurchaseOrderId),
            supplier_id: None,
            employee_id: EmployeeId(4),
            received_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            note: None,
        }
    }

    fn input(variant: i64, quantity: u32) -> ReceiptLineInput {
        ReceiptLineInput {
            variant_id: VariantId(variant),
            quantity,
            note: None,
        }
    }

    #[rstest]
    #[case(DocumentStatus::Approved, Ok(()))]
    #[case(DocumentStatus::New, Err(ReceivingError::SourceNotApproved(PurchaseOrderId(1))))]
    #[case(DocumentStatus::Cancelled, Err(ReceivingError::SourceNotApproved(PurchaseOrderId(1))))]
    fn test_validate_new_receipt_source_status(
        #[case] source_status: DocumentStatus,
        #[case] expected: Result<(), ReceivingError>,
    ) {
        let orders = vec![po(1, 3, source_status)];
        assert_eq!(ReceivingService::validate_new_receipt(&draft(Some(1)), &orders), expected);
    }

    #[test]
    fn test_validate_new_receipt_missing_source() {
        assert_eq!(
            ReceivingService::validate_new_receipt(&draft(Some(404)), &[]),
            Err(ReceivingError::SourceNotFound(PurchaseOrderId(404)))
        );
        assert_eq!(
            ReceivingService::validate_new_receipt(&draft(None), &[]),
            Err(ReceivingError::MissingSupplier)
        );
    }

    #[test]
    fn test_add_line_within_cap() {
        let orders = vec![po(1, 3, DocumentStatus::Approved)];
        let order_lines = vec![po_line(1, 5, 10)];
        let receipts = vec![receipt(2, Some(1), DocumentStatus::New)];
        let book = ReceivingBook {
            orders: &orders,
            order_lines: &order_lines,
            receipts: &receipts,
            receipt_lines: &[],
        };

        let line = ReceivingService::add_line(&book, &receipts[0], input(5, 10), &clerk()).unwrap();
        assert_eq!(line.id, None);
        assert_eq!(line.quantity, 10);

        let over = ReceivingService::add_line(&book, &receipts[0], input(5, 11), &clerk());
        assert!(matches!(over, Err(ReceivingError::ExceedsOrdered { .. })));
    }

    #[test]
    fn test_add_line_blocked_after_send() {
        let orders = vec![po(1, 3, DocumentStatus::Approved)];
        let receipts = vec![receipt(2, Some(1), DocumentStatus::PendingReview)];
        let book = ReceivingBook {
            orders: &orders,
            order_lines: &[],
            receipts: &receipts,
            receipt_lines: &[],
        };
        let result = ReceivingService::add_line(&book, &receipts[0], input(5, 1), &clerk());
        assert!(matches!(
            result,
            Err(ReceivingError::Workflow(WorkflowError::InvalidTransition { .. }))
        ));
    }

    #[test]
    fn test_update_line_keeps_id() {
        let orders = vec![po(1, 3, DocumentStatus::Approved)];
        let order_lines = vec![po_line(1, 5, 10)];
        let receipts = vec![receipt(2, Some(1), DocumentStatus::New)];
        let receipt_lines = vec![receipt_line(70, 2, 5, 8)];
        let book = ReceivingBook {
            orders: &orders,
            order_lines: &order_lines,
            receipts: &receipts,
            receipt_lines: &receipt_lines,
        };

        let line = ReceivingService::update_line(
            &book,
            &receipts[0],
            ReceiptLineId(70),
            input(5, 10),
            &clerk(),
        )
        .unwrap();
        assert_eq!(line.id, Some(ReceiptLineId(70)));
        assert_eq!(line.quantity, 10);

        let missing = ReceivingService::update_line(
            &book,
            &receipts[0],
            ReceiptLineId(71),
            input(5, 1),
            &clerk(),
        );
        assert_eq!(missing, Err(ReceivingError::LineNotFound(ReceiptLineId(71))));
    }

    #[test]
    fn test_remove_line() {
        let pending = receipt(2, Some(1), DocumentStatus::New);
        let lines = vec![receipt_line(70, 2, 5, 8)];
        assert_eq!(
            ReceivingService::remove_line(&pending, &lines, ReceiptLineId(70), &clerk()),
            Ok(ReceiptLineId(70))
        );

        let approved = receipt(2, Some(1), DocumentStatus::Approved);
        assert!(matches!(
            ReceivingService::remove_line(&approved, &lines, ReceiptLineId(70), &clerk()),
            Err(ReceivingError::Workflow(WorkflowError::Immutable { .. }))
        ));
    }
}
