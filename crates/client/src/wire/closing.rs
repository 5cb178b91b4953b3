//! Shift-close records (`/chotca`) and the customer orders they are
//! derived from (`/donhang`).

use atelier_core::closing::{
    CustomerOrder, OrderStatus, PaymentMethod, ShiftCloseDraft, ShiftCloseReport,
};
use atelier_core::workflow::{DocumentKind, normalize_optional};
use atelier_shared::types::{EmployeeId, OrderId, ShiftCloseId};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::keys::KeySpelling;
use super::value::{
    Extra, amount, keep_or_write_date, keep_or_write_status, keep_or_write_text, opt_count,
    opt_id, parse_date, parse_day_in,
};
use super::{WireRecord, required};
use crate::{ClientResult, Endpoint};

/// A `chotca` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftCloseRecord {
    /// Id.
    #[serde(rename = "machotca", alias = "ma_chot_ca", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Closing employee.
    #[serde(rename = "manhanvien", alias = "ma_nhan_vien", with = "opt_id", default)]
    pub employee_id: Option<i64>,
    /// Day closed, raw.
    #[serde(rename = "ngaychot", alias = "ngay_chot", default)]
    pub closed_date: Option<String>,
    /// Total revenue.
    #[serde(rename = "tongdoanhthu", alias = "tong_doanh_thu", with = "amount", default)]
    pub total_revenue: Decimal,
    /// Cash revenue.
    #[serde(rename = "tienmat", alias = "tien_mat", with = "amount", default)]
    pub cash_amount: Decimal,
    /// Cash expenses.
    #[serde(rename = "chiphi", alias = "chi_phi", with = "amount", default)]
    pub cash_expense: Decimal,
    /// Bank transfer revenue.
    #[serde(rename = "chuyenkhoan", alias = "chuyen_khoan", with = "amount", default)]
    pub bank_transfer_amount: Decimal,
    /// Orders counted.
    #[serde(rename = "sodonhang", alias = "so_don_hang", with = "opt_count", default)]
    pub order_count: Option<u32>,
    /// Cash counted in the drawer.
    #[serde(rename = "tienmatthucte", alias = "tien_mat_thuc_te", with = "amount", default)]
    pub actual_cash: Decimal,
    /// Variance.
    #[serde(rename = "chenhlech", alias = "chenh_lech", with = "amount", default)]
    pub cash_variance: Decimal,
    /// Reviewer.
    #[serde(rename = "nguoiduyet", alias = "nguoi_duyet", with = "opt_id", default)]
    pub approver_id: Option<i64>,
    /// Review time, raw.
    #[serde(rename = "thoigianduyet", alias = "thoi_gian_duyet", default)]
    pub approved_at: Option<String>,
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

impl KeySpelling for ShiftCloseRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("machotca", "ma_chot_ca"),
        ("manhanvien", "ma_nhan_vien"),
        ("ngaychot", "ngay_chot"),
        ("tongdoanhthu", "tong_doanh_thu"),
        ("tienmat", "tien_mat"),
        ("chiphi", "chi_phi"),
        ("chuyenkhoan", "chuyen_khoan"),
        ("sodonhang", "so_don_hang"),
        ("tienmatthucte", "tien_mat_thuc_te"),
        ("chenhlech", "chenh_lech"),
        ("nguoiduyet", "nguoi_duyet"),
        ("thoigianduyet", "thoi_gian_duyet"),
        ("trangthai", "trang_thai"),
        ("ghichu", "ghi_chu"),
    ];
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()
                .map(|t| t.and_utc())
        })
}

impl ShiftCloseRecord {
    /// Body for creating a report from a draft.
    #[must_use]
    pub fn from_draft(draft: &ShiftCloseDraft) -> Self {
        Self {
            id: None,
            employee_id: Some(draft.employee_id.0),
            closed_date: Some(draft.closed_date.format("%Y-%m-%d").to_string()),
            total_revenue: draft.total_revenue,
            cash_amount: draft.cash_amount,
            cash_expense: draft.cash_expense,
            bank_transfer_amount: draft.bank_transfer_amount,
            order_count: Some(draft.order_count),
            actual_cash: draft.actual_cash,
            cash_variance: draft.cash_variance,
            approver_id: None,
            approved_at: None,
            status: Some(draft.status.label().to_string()),
            note: draft.note.clone(),
            extra: Extra::new(),
        }
    }
}

impl WireRecord for ShiftCloseRecord {
    type Domain = ShiftCloseReport;
    const ENDPOINT: Endpoint = Endpoint::ShiftCloses;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_domain(&self) -> ClientResult<ShiftCloseReport> {
        Ok(ShiftCloseReport {
            id: ShiftCloseId(required(self.id, "chotca", "machotca")?),
            employee_id: EmployeeId(required(self.employee_id, "chotca", "manhanvien")?),
            closed_date: required(
                self.closed_date.as_deref().and_then(parse_date),
                "chotca",
                "ngaychot",
            )?,
            total_revenue: self.total_revenue,
            cash_amount: self.cash_amount,
            cash_expense: self.cash_expense,
            bank_transfer_amount: self.bank_transfer_amount,
            order_count: self.order_count.unwrap_or(0),
            actual_cash: self.actual_cash,
            cash_variance: self.cash_variance,
            approver_id: self.approver_id.map(EmployeeId),
            approved_at: self.approved_at.as_deref().and_then(parse_instant),
            status: normalize_optional(DocumentKind::ShiftClose, self.status.as_deref()),
            note: self.note.clone(),
        })
    }

    fn from_domain(report: &ShiftCloseReport) -> Self {
        let mut record = Self::default();
        record.apply(report);
        record
    }

    fn apply(&mut self, report: &ShiftCloseReport) {
        self.id = Some(report.id.0);
        self.employee_id = Some(report.employee_id.0);
        keep_or_write_date(&mut self.closed_date, Some(report.closed_date));
        self.total_revenue = report.total_revenue;
        self.cash_amount = report.cash_amount;
        self.cash_expense = report.cash_expense;
        self.bank_transfer_amount = report.bank_transfer_amount;
        self.order_count = Some(report.order_count);
        self.actual_cash = report.actual_cash;
        self.cash_variance = report.cash_variance;
        self.approver_id = report.approver_id.map(|id| id.0);
        if self.approved_at.as_deref().and_then(parse_instant) != report.approved_at {
            self.approved_at = report
                .approved_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        keep_or_write_status(&mut self.status, DocumentKind::ShiftClose, report.status);
        keep_or_write_text(&mut self.note, report.note.as_deref());
    }
}

/// A `donhang` row, read only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrderRecord {
    /// Id.
    #[serde(rename = "madonhang", alias = "ma_don_hang", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Employee who handled the order.
    #[serde(rename = "manhanvien", alias = "ma_nhan_vien", with = "opt_id", default)]
    pub employee_id: Option<i64>,
    /// Order timestamp, raw.
    #[serde(rename = "ngaydat", alias = "ngay_dat", default)]
    pub ordered_at: Option<String>,
    /// Order total.
    #[serde(rename = "tongtien", alias = "tong_tien", with = "amount", default)]
    pub total_amount: Decimal,
    /// Payment method text.
    #[serde(rename = "phuongthucthanhtoan", alias = "phuong_thuc_thanh_toan", default)]
    pub payment_method: Option<String>,
    /// Status text.
    #[serde(rename = "trangthai", alias = "trang_thai", default)]
    pub status: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl CustomerOrderRecord {
    /// Translates to the domain, taking the order day in `tz`.
    pub fn to_domain(&self, tz: Tz) -> ClientResult<CustomerOrder> {
        Ok(CustomerOrder {
            id: OrderId(required(self.id, "donhang", "madonhang")?),
            employee_id: self.employee_id.map(EmployeeId),
            ordered_on: self.ordered_at.as_deref().and_then(|raw| parse_day_in(raw, tz)),
            total_amount: self.total_amount,
            payment_method: PaymentMethod::parse(self.payment_method.as_deref().unwrap_or("")),
            status: OrderStatus::parse(self.status.as_deref().unwrap_or("")),
        })
    }
}
