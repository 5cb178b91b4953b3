//! Voucher records (`/magiamgia`).

use atelier_core::voucher::{DiscountKind, Voucher, VoucherForm};
use atelier_shared::text::fold;
use atelier_shared::types::{EmployeeId, VoucherId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::keys::KeySpelling;
use super::value::{
    Extra, amount, flag, keep_or_write_date, keep_or_write_text, opt_amount, opt_count, opt_id,
    parse_date,
};
use super::{WireRecord, required};
use crate::{ClientResult, Endpoint};

/// A `magiamgia` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoucherRecord {
    /// Id.
    #[serde(rename = "mamagiamgia", alias = "ma_ma_giam_gia", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Customer-facing code.
    #[serde(default, alias = "ma")]
    pub code: Option<String>,
    /// Display name.
    #[serde(rename = "ten", alias = "ten_ma", default)]
    pub name: Option<String>,
    /// Discount type text (`phantram`, `tienmat`, `freeship`).
    #[serde(rename = "loaigiam", alias = "loai_giam", default)]
    pub kind: Option<String>,
    /// Discount value: percent or amount.
    #[serde(rename = "giatrigiam", alias = "gia_tri_giam", with = "amount", default)]
    pub value: Decimal,
    /// Discount cap.
    #[serde(rename = "giamtoida", alias = "giam_toi_da", with = "opt_amount", default)]
    pub max_discount: Option<Decimal>,
    /// Minimum order value.
    #[serde(rename = "donhangtoithieu", alias = "don_hang_toi_thieu", with = "amount", default)]
    pub min_order_value: Decimal,
    /// Uses issued.
    #[serde(rename = "soluong", alias = "so_luong", with = "opt_count", default)]
    pub quantity_total: Option<u32>,
    /// Uses consumed.
    #[serde(rename = "dasudung", alias = "da_su_dung", with = "opt_count", default)]
    pub quantity_used: Option<u32>,
    /// First valid day, raw.
    #[serde(rename = "ngaybatdau", alias = "ngay_bat_dau", default)]
    pub start_date: Option<String>,
    /// Last valid day, raw.
    #[serde(rename = "ngayketthuc", alias = "ngay_ket_thuc", default)]
    pub end_date: Option<String>,
    /// Birthday-only flag.
    #[serde(rename = "chisinhnhat", alias = "chi_sinh_nhat", with = "flag", default)]
    pub birthday_only: bool,
    /// Creator.
    #[serde(rename = "manhanvien", alias = "ma_nhan_vien", with = "opt_id", default)]
    pub creator_employee_id: Option<i64>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for VoucherRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("mamagiamgia", "ma_ma_giam_gia"),
        ("ten", "ten_ma"),
        ("loaigiam", "loai_giam"),
        ("giatrigiam", "gia_tri_giam"),
        ("giamtoida", "giam_toi_da"),
        ("donhangtoithieu", "don_hang_toi_thieu"),
        ("soluong", "so_luong"),
        ("dasudung", "da_su_dung"),
        ("ngaybatdau", "ngay_bat_dau"),
        ("ngayketthuc", "ngay_ket_thuc"),
        ("chisinhnhat", "chi_sinh_nhat"),
        ("manhanvien", "ma_nhan_vien"),
    ];
}

const PERCENT: &str = "phantram";
const FIXED: &str = "tienmat";
const FREE_SHIPPING: &str = "freeship";

fn parse_kind(raw: Option<&str>, value: Decimal, max_discount: Option<Decimal>) -> DiscountKind {
    let folded = fold(raw.unwrap_or(""));
    let compact: String = folded.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.contains("phantram") || compact.contains("percent") || compact.contains('%') {
        DiscountKind::Percent {
            percent: value,
            max_discount,
        }
    } else if compact.contains("ship") || compact.contains("vanchuyen") {
        DiscountKind::FreeShipping { max_discount }
    } else {
        DiscountKind::FixedAmount { amount: value }
    }
}

fn kind_token(kind: &DiscountKind) -> &'static str {
    match kind {
        DiscountKind::Percent { .. } => PERCENT,
        DiscountKind::FixedAmount { .. } => FIXED,
        DiscountKind::FreeShipping { .. } => FREE_SHIPPING,
    }
}

impl VoucherRecord {
    /// Body for creating a voucher.
    #[must_use]
    pub fn from_form(form: &VoucherForm, creator: EmployeeId) -> Self {
        let mut record = Self {
            quantity_used: Some(0),
            creator_employee_id: Some(creator.0),
            ..Self::default()
        };
        record.apply_form(form);
        record
    }

    /// Writes the editable fields.
    pub fn apply_form(&mut self, form: &VoucherForm) {
        self.code = Some(form.code.trim().to_string());
        keep_or_write_text(&mut self.name, Some(form.name.as_str()));
        let current = parse_kind(self.kind.as_deref(), self.value, self.max_discount);
        if std::mem::discriminant(&current) != std::mem::discriminant(&form.discount) {
            self.kind = Some(kind_token(&form.discount).to_string());
        }
        match form.discount {
            DiscountKind::FixedAmount { amount } => {
                self.value = amount;
                self.max_discount = None;
            }
            DiscountKind::Percent {
                percent,
                max_discount,
            } => {
                self.value = percent;
                self.max_discount = max_discount;
            }
            DiscountKind::FreeShipping { max_discount } => {
                self.value = Decimal::ZERO;
                self.max_discount = max_discount;
            }
        }
        self.min_order_value = form.min_order_value;
        self.quantity_total = Some(form.quantity_total);
        keep_or_write_date(&mut self.start_date, Some(form.start_date));
        keep_or_write_date(&mut self.end_date, Some(form.end_date));
        self.birthday_only = form.birthday_only;
    }
}

impl WireRecord for VoucherRecord {
    type Domain = Voucher;
    const ENDPOINT: Endpoint = Endpoint::Vouchers;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_domain(&self) -> ClientResult<Voucher> {
        Ok(Voucher {
            id: VoucherId(required(self.id, "magiamgia", "mamagiamgia")?),
            form: VoucherForm {
                code: required(self.code.clone(), "magiamgia", "code")?,
                name: self.name.clone().unwrap_or_default(),
                discount: parse_kind(self.kind.as_deref(), self.value, self.max_discount),
                min_order_value: self.min_order_value,
                quantity_total: self.quantity_total.unwrap_or(0),
                start_date: required(
                    self.start_date.as_deref().and_then(parse_date),
                    "magiamgia",
                    "ngaybatdau",
                )?,
                end_date: required(
                    self.end_date.as_deref().and_then(parse_date),
                    "magiamgia",
                    "ngayketthuc",
                )?,
                birthday_only: self.birthday_only,
            },
            quantity_used: self.quantity_used.unwrap_or(0),
            creator_employee_id: self.creator_employee_id.map(EmployeeId),
        })
    }

    fn from_domain(voucher: &Voucher) -> Self {
        let mut record = Self::default();
        record.apply(voucher);
        record
    }

    fn apply(&mut self, voucher: &Voucher) {
        self.id = Some(voucher.id.0);
        self.apply_form(&voucher.form);
        self.quantity_used = Some(voucher.quantity_used);
        self.creator_employee_id = voucher.creator_employee_id.map(|id| id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Keyed, Loaded};
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "mamagiamgia": 3,
            "code": "SALE10",
            "ten": "Giảm 10%",
            "loaigiam": "Phần trăm",
            "giatrigiam": 10,
            "giamtoida": 50000,
            "donhangtoithieu": 200000,
            "soluong": 100,
            "dasudung": 12,
            "ngaybatdau": "2026-03-01",
            "ngayketthuc": "2026-03-31",
            "chisinhnhat": false,
            "manhanvien": 1,
            "hinhanh": "sale10.png"
        })
    }

    #[test]
    fn test_voucher_reads() {
        let voucher = serde_json::from_value::<VoucherRecord>(sample())
            .unwrap()
            .to_domain()
            .unwrap();
        assert_eq!(
            voucher.form.discount,
            DiscountKind::Percent {
                percent: dec!(10),
                max_discount: Some(dec!(50000))
            }
        );
        assert_eq!(voucher.quantity_remaining(), 88);
        assert_eq!(voucher.form.end_date, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    }

    #[test]
    fn test_voucher_round_trip_keeps_kind_text() {
        let record: Keyed<VoucherRecord> = serde_json::from_value(sample()).unwrap();
        let loaded = Loaded::new(record).unwrap();
        assert_eq!(
            serde_json::to_value(loaded.updated(&loaded.domain)).unwrap(),
            sample()
        );
    }

    #[test]
    fn test_kind_change_writes_token() {
        let record: Keyed<VoucherRecord> = serde_json::from_value(sample()).unwrap();
        let loaded = Loaded::new(record).unwrap();
        let mut fixed = loaded.domain.clone();
        fixed.form.discount = DiscountKind::FixedAmount {
            amount: dec!(30000),
        };
        let body = serde_json::to_value(loaded.updated(&fixed)).unwrap();
        assert_eq!(body["loaigiam"], "tienmat");
        assert_eq!(body["giatrigiam"], 30000);
        assert!(body["giamtoida"].is_null());
    }

    #[rstest]
    #[case(Some("percent"), true)]
    #[case(Some("%"), true)]
    #[case(Some("tienmat"), false)]
    #[case(None, false)]
    fn test_parse_kind(#[case] raw: Option<&str>, #[case] is_percent: bool) {
        let kind = parse_kind(raw, dec!(5), None);
        assert_eq!(matches!(kind, DiscountKind::Percent { .. }), is_percent);
    }

    #[test]
    fn test_flag_from_number() {
        let mut raw = sample();
        raw["chisinhnhat"] = json!(1);
        let voucher = serde_json::from_value::<VoucherRecord>(raw)
            .unwrap()
            .to_domain()
            .unwrap();
        assert!(voucher.form.birthday_only);
    }
}
