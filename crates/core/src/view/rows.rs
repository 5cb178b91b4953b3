//! One display row per document.

use atelier_shared::types::money::format_vnd;
use atelier_shared::types::{
    EmployeeId, PurchaseOrderId, ReceiptId, ShiftCloseId, VoucherId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::closing::ShiftCloseReport;
use crate::purchasing::PurchaseOrder;
use crate::receiving::WarehouseReceipt;
use crate::voucher::{DiscountKind, Voucher, VoucherEditScope, VoucherStatus};
use crate::workflow::{ActionSet, Actor, DocumentKind, DocumentStatus, TransitionPolicy};

use super::lookup::ReferenceLookups;

/// Purchase order list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderRow {
    /// Order id.
    pub id: PurchaseOrderId,
    /// Supplier name.
    pub supplier: String,
    /// Creating employee's name.
    pub employee: String,
    /// Order date.
    pub ordered_at: Option<NaiveDate>,
    /// Expected delivery.
    pub expected_at: Option<NaiveDate>,
    /// Stored header total.
    pub total_amount: Decimal,
    /// Deposit.
    pub deposit: Decimal,
    /// Stored remaining balance.
    pub remaining: Decimal,
    /// Payment method text.
    pub payment_method: String,
    /// Normalized status.
    pub status: DocumentStatus,
    /// Vietnamese status label.
    pub status_label: &'static str,
    /// What the viewer may do.
    pub actions: ActionSet,
}

impl PurchaseOrderRow {
    /// Joins an order with its references.
    #[must_use]
    pub fn build(order: &PurchaseOrder, lookups: &ReferenceLookups, viewer: &Actor) -> Self {
        Self {
            id: order.id,
            supplier: lookups.suppliers.label(order.supplier_id),
            employee: lookups.employees.label(order.employee_id),
            ordered_at: order.ordered_at,
            expected_at: order.expected_at,
            total_amount: order.total_amount,
            deposit: order.deposit,
            remaining: order.remaining,
            payment_method: order.payment_method.clone().unwrap_or_default(),
            status: order.status,
            status_label: order.status.label(),
            actions: actions_for(
                DocumentKind::PurchaseOrder,
                order.status,
                viewer,
                order.employee_id,
            ),
        }
    }
}

/// Warehouse receipt list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptRow {
    /// Receipt id.
    pub id: ReceiptId,
    /// Source purchase order, as `#<id>`.
    pub source: String,
    /// Supplier name, resolved through the source order when needed.
    pub supplier: String,
    /// Receiving employee's name.
    pub employee: String,
    /// Receiving date.
    pub received_at: Option<NaiveDate>,
    /// Normalized status.
    pub status: DocumentStatus,
    /// Vietnamese status label.
    pub status_label: &'static str,
    /// What the viewer may do.
    pub actions: ActionSet,
}

impl ReceiptRow {
    /// Joins a receipt with its references.
    #[must_use]
    pub fn build(
        receipt: &WarehouseReceipt,
        orders: &[PurchaseOrder],
        lookups: &ReferenceLookups,
        viewer: &Actor,
    ) -> Self {
        Self {
            id: receipt.id,
            source: receipt
                .purchase_order_id
                .map(|id| format!("#{id}"))
                .unwrap_or_default(),
            supplier: lookups.suppliers.label_opt(receipt.resolve_supplier(orders)),
            employee: lookups.employees.label(receipt.employee_id),
            received_at: receipt.received_at,
            status: receipt.status,
            status_label: receipt.status.label(),
            actions: actions_for(
                DocumentKind::WarehouseReceipt,
                receipt.status,
                viewer,
                receipt.employee_id,
            ),
        }
    }
}

/// Shift-closing report list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftCloseRow {
    /// Report id.
    pub id: ShiftCloseId,
    /// Closing employee's name.
    pub employee: String,
    /// Day closed.
    pub closed_date: NaiveDate,
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Cash revenue.
    pub cash_amount: Decimal,
    /// Cash expense.
    pub cash_expense: Decimal,
    /// Bank transfer revenue.
    pub bank_transfer_amount: Decimal,
    /// Counted orders.
    pub order_count: u32,
    /// Cash counted.
    pub actual_cash: Decimal,
    /// Counted minus expected cash.
    pub cash_variance: Decimal,
    /// Reviewer's name.
    pub approver: String,
    /// Normalized status.
    pub status: DocumentStatus,
    /// Vietnamese status label.
    pub status_label: &'static str,
    /// What the viewer may do.
    pub actions: ActionSet,
}

impl ShiftCloseRow {
    /// Joins a report with its references.
    #[must_use]
    pub fn build(report: &ShiftCloseReport, lookups: &ReferenceLookups, viewer: &Actor) -> Self {
        Self {
            id: report.id,
            employee: lookups.employees.label(report.employee_id),
            closed_date: report.closed_date,
            total_revenue: report.total_revenue,
            cash_amount: report.cash_amount,
            cash_expense: report.cash_expense,
            bank_transfer_amount: report.bank_transfer_amount,
            order_count: report.order_count,
            actual_cash: report.actual_cash,
            cash_variance: report.cash_variance,
            approver: lookups.employees.label_opt(report.approver_id),
            status: report.status,
            status_label: report.status.label(),
            actions: actions_for(
                DocumentKind::ShiftClose,
                report.status,
                viewer,
                report.employee_id,
            ),
        }
    }
}

/// Voucher list row with its computed status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherRow {
    /// Voucher id.
    pub id: VoucherId,
    /// Code.
    pub code: String,
    /// Name.
    pub name: String,
    /// Human-readable discount ("10% tối đa 50.000 ₫").
    pub discount: String,
    /// Minimum order value.
    pub min_order_value: Decimal,
    /// Issued uses.
    pub quantity_total: u32,
    /// Consumed uses.
    pub quantity_used: u32,
    /// Remaining uses.
    pub quantity_remaining: i64,
    /// First valid day.
    pub start_date: NaiveDate,
    /// Last valid day.
    pub end_date: NaiveDate,
    /// Computed status.
    pub status: VoucherStatus,
    /// Vietnamese status label.
    pub status_label: &'static str,
    /// What may still be edited.
    pub edit_scope: VoucherEditScope,
    /// Creator's name.
    pub creator: String,
}

impl VoucherRow {
    /// Builds the row as of `today`.
    #[must_use]
    pub fn build(voucher: &Voucher, lookups: &ReferenceLookups, today: NaiveDate) -> Self {
        let status = voucher.status(today);
        Self {
            id: voucher.id,
            code: voucher.form.code.clone(),
            name: voucher.form.name.clone(),
            discount: describe_discount(&voucher.form.discount),
            min_order_value: voucher.form.min_order_value,
            quantity_total: voucher.form.quantity_total,
            quantity_used: voucher.quantity_used,
            quantity_remaining: voucher.quantity_remaining(),
            start_date: voucher.form.start_date,
            end_date: voucher.form.end_date,
            status,
            status_label: status.label(),
            edit_scope: VoucherEditScope::for_status(status),
            creator: lookups.employees.label_opt(voucher.creator_employee_id),
        }
    }
}

fn actions_for(
    kind: DocumentKind,
    status: DocumentStatus,
    viewer: &Actor,
    owner: EmployeeId,
) -> ActionSet {
    TransitionPolicy::allowed_actions(kind, status, viewer.role, viewer.owns(Some(owner)))
}

fn describe_discount(discount: &DiscountKind) -> String {
    let cap = |max: Option<Decimal>| {
        max.map(|m| format!(" tối đa {}", format_vnd(m)))
            .unwrap_or_default()
    };
    match *discount {
        DiscountKind::FixedAmount { amount } => format!("Giảm {}", format_vnd(amount)),
        DiscountKind::Percent {
            percent,
            max_discount,
        } => format!("Giảm {}%{}", percent.normalize(), cap(max_discount)),
        DiscountKind::FreeShipping { max_discount } => {
            format!("Miễn phí vận chuyển{}", cap(max_discount))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voucher::VoucherForm;
    use crate::workflow::{Action, ActorRole};
    use atelier_shared::types::SupplierId;
    use rust_decimal_macros::dec;

    fn lookups() -> ReferenceLookups {
        let mut lookups = ReferenceLookups::default();
        lookups.suppliers.insert(SupplierId(2), "Vải Việt");
        lookups.employees.insert(EmployeeId(1), "Trần Minh");
        lookups
    }

    fn order(status: DocumentStatus) -> PurchaseOrder {
        PurchaseOrder {
            id: PurchaseOrderId(5),
            supplier_id: SupplierId(2),
            employee_id: EmployeeId(1),
            ordered_at: None,
            expected_at: None,
            total_amount: dec!(100),
            deposit: dec!(0),
            remaining: dec!(100),
            payment_method: Some("Tiền mặt".to_string()),
            status,
            note: None,
        }
    }

    #[test]
    fn test_po_row_joins_labels() {
        let viewer = Actor::new(EmployeeId(1), ActorRole::Staff);
        let row = PurchaseOrderRow::build(&order(DocumentStatus::New), &lookups(), &viewer);
        assert_eq!(row.supplier, "Vải Việt");
        assert_eq!(row.employee, "Trần Minh");
        assert_eq!(row.status_label, "Tạo mới");
        assert!(row.actions.contains(Action::Delete));
    }

    #[test]
    fn test_po_row_missing_supplier_falls_back() {
        let mut po = order(DocumentStatus::PendingReview);
        po.supplier_id = SupplierId(99);
        let viewer = Actor::new(EmployeeId(3), ActorRole::Manager);
        let row = PurchaseOrderRow::build(&po, &lookups(), &viewer);
        assert_eq!(row.supplier, "#99");
        assert!(row.actions.contains(Action::Approve));
    }

    #[test]
    fn test_receipt_row_resolves_supplier_through_order() {
        let receipt = WarehouseReceipt {
            id: ReceiptId(8),
            purchase_order_id: Some(PurchaseOrderId(5)),
            supplier_id: None,
            employee_id: EmployeeId(1),
            received_at: None,
            status: DocumentStatus::New,
            note: None,
        };
        let viewer = Actor::new(EmployeeId(3), ActorRole::Staff);
        let row = ReceiptRow::build(
            &receipt,
            &[order(DocumentStatus::Approved)],
            &lookups(),
            &viewer,
        );
        assert_eq!(row.source, "#5");
        assert_eq!(row.supplier, "Vải Việt");
        assert!(!row.actions.contains(Action::Delete));
    }

    #[test]
    fn test_voucher_row_describes_discount() {
        let voucher = Voucher {
            id: VoucherId(1),
            form: VoucherForm {
                code: "THU10".to_string(),
                name: "Thu".to_string(),
                discount: DiscountKind::Percent {
                    percent: dec!(10.00),
                    max_discount: Some(dec!(50000)),
                },
                min_order_value: dec!(0),
                quantity_total: 5,
                start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
                birthday_only: false,
            },
            quantity_used: 5,
            creator_employee_id: Some(EmployeeId(1)),
        };
        let row = VoucherRow::build(
            &voucher,
            &lookups(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        );
        assert_eq!(row.discount, "Giảm 10% tối đa 50.000 ₫");
        assert_eq!(row.status, VoucherStatus::OutOfStock);
        assert_eq!(row.edit_scope, VoucherEditScope::ExtendEndDate);
        assert_eq!(row.creator, "Trần Minh");
    }
}
