//! Warehouse receipt records (`/phieunhapkho`, `/chitietphieunhap`).

use atelier_core::receiving::{NewReceipt, WarehouseReceipt, WarehouseReceiptLine};
use atelier_core::workflow::{DocumentKind, normalize_optional};
use atelier_shared::types::{EmployeeId, PurchaseOrderId, ReceiptId, ReceiptLineId, SupplierId, VariantId};
use serde::{Deserialize, Serialize};

use super::keys::KeySpelling;
use super::value::{
    Extra, keep_or_write_date, keep_or_write_status, keep_or_write_text, opt_count, opt_id,
    parse_date,
};
use super::{WireRecord, required};
use crate::{ClientResult, Endpoint};

/// A `phieunhapkho` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Id.
    #[serde(rename = "maphieunhap", alias = "ma_phieu_nhap", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Source purchase order.
    #[serde(rename = "maphieudathang", alias = "ma_phieu_dat_hang", with = "opt_id", default)]
    pub purchase_order_id: Option<i64>,
    /// Supplier, when set directly.
    #[serde(rename = "manhacungcap", alias = "ma_nha_cung_cap", with = "opt_id", default)]
    pub supplier_id: Option<i64>,
    /// Receiving employee.
    #[serde(rename = "manhanvien", alias = "ma_nhan_vien", with = "opt_id", default)]
    pub employee_id: Option<i64>,
    /// Receipt date, raw.
    #[serde(rename = "ngaynhap", alias = "ngay_nhap", default)]
    pub received_at: Option<String>,
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

impl KeySpelling for ReceiptRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("maphieunhap", "ma_phieu_nhap"),
        ("maphieudathang", "ma_phieu_dat_hang"),
        ("manhacungcap", "ma_nha_cung_cap"),
        ("manhanvien", "ma_nhan_vien"),
        ("ngaynhap", "ngay_nhap"),
        ("trangthai", "trang_thai"),
        ("ghichu", "ghi_chu"),
    ];
}

impl ReceiptRecord {
    /// Body for creating a receipt. The supplier is written as resolved so
    /// the backend does not need to follow the source order.
    #[must_use]
    pub fn from_new(input: &NewReceipt, supplier_id: Option<SupplierId>) -> Self {
        Self {
            id: None,
            purchase_order_id: input.purchase_order_id.map(|id| id.0),
            supplier_id: supplier_id.or(input.supplier_id).map(|id| id.0),
            employee_id: Some(input.employee_id.0),
            received_at: Some(input.received_at.format("%Y-%m-%d").to_string()),
            status: Some(DocumentKind::WarehouseReceipt.initial_status().label().to_string()),
            note: input.note.clone(),
            extra: Extra::new(),
        }
    }
}

impl WireRecord for ReceiptRecord {
    type Domain = WarehouseReceipt;
    const ENDPOINT: Endpoint = Endpoint::WarehouseReceipts;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_domain(&self) -> ClientResult<WarehouseReceipt> {
        Ok(WarehouseReceipt {
            id: ReceiptId(required(self.id, "phieunhapkho", "maphieunhap")?),
            purchase_order_id: self.purchase_order_id.map(PurchaseOrderId),
            supplier_id: self.supplier_id.map(SupplierId),
            employee_id: EmployeeId(required(self.employee_id, "phieunhapkho", "manhanvien")?),
            received_at: self.received_at.as_deref().and_then(parse_date),
            status: normalize_optional(DocumentKind::WarehouseReceipt, self.status.as_deref()),
            note: self.note.clone(),
        })
    }

    fn from_domain(receipt: &WarehouseReceipt) -> Self {
        let mut record = Self::default();
        record.apply(receipt);
        record
    }

    fn apply(&mut self, receipt: &WarehouseReceipt) {
        self.id = Some(receipt.id.0);
        self.purchase_order_id = receipt.purchase_order_id.map(|id| id.0);
        self.supplier_id = receipt.supplier_id.map(|id| id.0);
        self.employee_id = Some(receipt.employee_id.0);
        keep_or_write_date(&mut self.received_at, receipt.received_at);
        keep_or_write_status(&mut self.status, DocumentKind::WarehouseReceipt, receipt.status);
        keep_or_write_text(&mut self.note, receipt.note.as_deref());
    }
}

/// A `chitietphieunhap` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLineRecord {
    /// Id.
    #[serde(rename = "machitietphieunhap", alias = "ma_chi_tiet_phieu_nhap", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Owning receipt.
    #[serde(rename = "maphieunhap", alias = "ma_phieu_nhap", with = "opt_id", default)]
    pub receipt_id: Option<i64>,
    /// Product variant.
    #[serde(rename = "machitietsanpham", alias = "ma_chi_tiet_san_pham", with = "opt_id", default)]
    pub variant_id: Option<i64>,
    /// Quantity received.
    #[serde(rename = "soluong", alias = "so_luong", with = "opt_count", default)]
    pub quantity: Option<u32>,
    /// Note.
    #[serde(rename = "ghichu", alias = "ghi_chu", default)]
    pub note: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for ReceiptLineRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("machitietphieunhap", "ma_chi_tiet_phieu_nhap"),
        ("maphieunhap", "ma_phieu_nhap"),
        ("machitietsanpham", "ma_chi_tiet_san_pham"),
        ("soluong", "so_luong"),
        ("ghichu", "ghi_chu"),
    ];
}

impl WireRecord for ReceiptLineRecord {
    type Domain = WarehouseReceiptLine;
    const ENDPOINT: Endpoint = Endpoint::ReceiptLines;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_domain(&self) -> ClientResult<WarehouseReceiptLine> {
        Ok(WarehouseReceiptLine {
            id: self.id.map(ReceiptLineId),
            receipt_id: ReceiptId(required(self.receipt_id, "chitietphieunhap", "maphieunhap")?),
            variant_id: VariantId(required(
                self.variant_id,
                "chitietphieunhap",
                "machitietsanpham",
            )?),
            quantity: self.quantity.unwrap_or(0),
            note: self.note.clone(),
        })
    }

    fn from_domain(line: &WarehouseReceiptLine) -> Self {
        let mut record = Self::default();
        record.apply(line);
        record
    }

    fn apply(&mut self, line: &WarehouseReceiptLine) {
        self.id = line.id.map(|id| id.0).or(self.id);
        self.receipt_id = Some(line.receipt_id.0);
        self.variant_id = Some(line.variant_id.0);
        self.quantity = Some(line.quantity);
        keep_or_write_text(&mut self.note, line.note.as_deref());
    }
}
