//! Purchase order records (`/phieudathang`, `/chitietphieudathang`).

use atelier_core::purchasing::{
    NewPurchaseOrder, PurchaseOrder, PurchaseOrderLine, compute_totals, line_total,
};
use atelier_core::workflow::{DocumentKind, normalize_optional};
use atelier_shared::types::{
    EmployeeId, PurchaseOrderId, PurchaseOrderLineId, SupplierId, VariantId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::keys::KeySpelling;
use super::value::{
    Extra, amount, keep_or_write_date, keep_or_write_status, keep_or_write_text, opt_count,
    opt_id, parse_date,
};
use super::{WireRecord, required};
use crate::{ClientResult, Endpoint};

/// A `phieudathang` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderRecord {
    /// Id.
    #[serde(rename = "maphieudathang", alias = "ma_phieu_dat_hang", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Supplier.
    #[serde(rename = "manhacungcap", alias = "ma_nha_cung_cap", with = "opt_id", default)]
    pub supplier_id: Option<i64>,
    /// Creating employee.
    #[serde(rename = "manhanvien", alias = "ma_nhan_vien", with = "opt_id", default)]
    pub employee_id: Option<i64>,
    /// Order date, raw.
    #[serde(rename = "ngaydat", alias = "ngay_dat", default)]
    pub ordered_at: Option<String>,
    /// Expected delivery date, raw.
    #[serde(rename = "ngaygiaodukien", alias = "ngay_giao_du_kien", default)]
    pub expected_at: Option<String>,
    /// Stored total.
    #[serde(rename = "tongtien", alias = "tong_tien", with = "amount", default)]
    pub total_amount: Decimal,
    /// Deposit.
    #[serde(rename = "tiencoc", alias = "tien_coc", with = "amount", default)]
    pub deposit: Decimal,
    /// Stored remaining balance.
    #[serde(rename = "conlai", alias = "con_lai", with = "amount", default)]
    pub remaining: Decimal,
    /// Payment method text.
    #[serde(rename = "phuongthucthanhtoan", alias = "phuong_thuc_thanh_toan", default)]
    pub payment_method: Option<String>,
    /// Status text.
    #[serde(rename = "trangthai", alias = "trang_thai", default)]
    pub status: Option<String>,
    /// Note.
    #[serde(rename = "ghichu", alias = "ghi_chu", default)]
    pub note: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for PurchaseOrderRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("maphieudathang", "ma_phieu_dat_hang"),
        ("manhacungcap", "ma_nha_cung_cap"),
        ("manhanvien", "ma_nhan_vien"),
        ("ngaydat", "ngay_dat"),
        ("ngaygiaodukien", "ngay_giao_du_kien"),
        ("tongtien", "tong_tien"),
        ("tiencoc", "tien_coc"),
        ("conlai", "con_lai"),
        ("phuongthucthanhtoan", "phuong_thuc_thanh_toan"),
        ("trangthai", "trang_thai"),
        ("ghichu", "ghi_chu"),
    ];
}

impl PurchaseOrderRecord {
    /// Body for creating an order from form input.
    #[must_use]
    pub fn from_new(input: &NewPurchaseOrder) -> Self {
        let totals = compute_totals(&[], input.deposit);
        Self {
            id: None,
            supplier_id: input.supplier_id.map(|s| s.0),
            employee_id: Some(input.employee_id.0),
            ordered_at: Some(input.ordered_at.format("%Y-%m-%d").to_string()),
            expected_at: input.expected_at.map(|d| d.format("%Y-%m-%d").to_string()),
            total_amount: totals.total_amount,
            deposit: input.deposit,
            remaining: totals.remaining,
            payment_method: input.payment_method.clone(),
            status: Some(DocumentKind::PurchaseOrder.initial_status().label().to_string()),
            note: input.note.clone(),
            extra: Extra::new(),
        }
    }
}

impl WireRecord for PurchaseOrderRecord {
    type Domain = PurchaseOrder;
    const ENDPOINT: Endpoint = Endpoint::PurchaseOrders;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_domain(&self) -> ClientResult<PurchaseOrder> {
        Ok(PurchaseOrder {
            id: PurchaseOrderId(required(self.id, "phieudathang", "maphieudathang")?),
            supplier_id: SupplierId(required(self.supplier_id, "phieudathang", "manhacungcap")?),
            employee_id: EmployeeId(required(self.employee_id, "phieudathang", "manhanvien")?),
            ordered_at: self.ordered_at.as_deref().and_then(parse_date),
            expected_at: self.expected_at.as_deref().and_then(parse_date),
            total_amount: self.total_amount,
            deposit: self.deposit,
            remaining: self.remaining,
            payment_method: self.payment_method.clone().filter(|p| !p.trim().is_empty()),
            status: normalize_optional(DocumentKind::PurchaseOrder, self.status.as_deref()),
            note: self.note.clone(),
        })
    }

    fn from_domain(order: &PurchaseOrder) -> Self {
        let mut record = Self::default();
        record.apply(order);
        record
    }

    fn apply(&mut self, order: &PurchaseOrder) {
        self.id = Some(order.id.0);
        self.supplier_id = Some(order.supplier_id.0);
        self.employee_id = Some(order.employee_id.0);
        keep_or_write_date(&mut self.ordered_at, order.ordered_at);
        keep_or_write_date(&mut self.expected_at, order.expected_at);
        self.total_amount = order.total_amount;
        self.deposit = order.deposit;
        self.remaining = order.remaining;
        keep_or_write_text(&mut self.payment_method, order.payment_method.as_deref());
        keep_or_write_status(&mut self.status, DocumentKind::PurchaseOrder, order.status);
        keep_or_write_text(&mut self.note, order.note.as_deref());
    }
}

/// A `chitietphieudathang` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLineRecord {
    /// Id.
    #[serde(rename = "machitiet", alias = "ma_chi_tiet", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Owning order.
    #[serde(rename = "maphieudathang", alias = "ma_phieu_dat_hang", with = "opt_id", default)]
    pub order_id: Option<i64>,
    /// Product variant.
    #[serde(rename = "machitietsanpham", alias = "ma_chi_tiet_san_pham", with = "opt_id", default)]
    pub variant_id: Option<i64>,
    /// Quantity.
    #[serde(rename = "soluong", alias = "so_luong", with = "opt_count", default)]
    pub quantity: Option<u32>,
    /// Unit price.
    #[serde(rename = "dongia", alias = "don_gia", with = "amount", default)]
    pub unit_price: Decimal,
    /// Stored line total.
    #[serde(rename = "thanhtien", alias = "thanh_tien", with = "amount", default)]
    pub line_total: Decimal,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for PurchaseOrderLineRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("machitiet", "ma_chi_tiet"),
        ("maphieudathang", "ma_phieu_dat_hang"),
        ("machitietsanpham", "ma_chi_tiet_san_pham"),
        ("soluong", "so_luong"),
        ("dongia", "don_gia"),
        ("thanhtien", "thanh_tien"),
    ];
}

impl WireRecord for PurchaseOrderLineRecord {
    type Domain = PurchaseOrderLine;
    const ENDPOINT: Endpoint = Endpoint::PurchaseOrderLines;

    fn key(&self) -> Option<i64> {
        self.id
    }

    /// The line total is recomputed from quantity and price; the stored
    /// value is not trusted.
    fn to_domain(&self) -> ClientResult<PurchaseOrderLine> {
        let quantity = self.quantity.unwrap_or(0);
        Ok(PurchaseOrderLine {
            id: self.id.map(PurchaseOrderLineId),
            order_id: PurchaseOrderId(required(
                self.order_id,
                "chitietphieudathang",
                "maphieudathang",
            )?),
            variant_id: VariantId(required(
                self.variant_id,
                "chitietphieudathang",
                "machitietsanpham",
            )?),
            quantity,
            unit_price: self.unit_price,
            line_total: line_total(quantity, self.unit_price),
        })
    }

    fn from_domain(line: &PurchaseOrderLine) -> Self {
        let mut record = Self::default();
        record.apply(line);
        record
    }

    fn apply(&mut self, line: &PurchaseOrderLine) {
        self.id = line.id.map(|id| id.0).or(self.id);
        self.order_id = Some(line.order_id.0);
        self.variant_id = Some(line.variant_id.0);
        self.quantity = Some(line.quantity);
        self.unit_price = line.unit_price;
        self.line_total = line.line_total;
    }
}
