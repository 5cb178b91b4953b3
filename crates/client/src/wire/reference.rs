//! Reference records: employees, suppliers, products, ratings, login.

use atelier_shared::session::StaffProfile;
use atelier_shared::types::{EmployeeId, ProductId, RatingId, SupplierId, VariantId};
use serde::{Deserialize, Serialize};

use super::keys::KeySpelling;
use super::required;
use super::value::{Extra, flag, opt_count, opt_id};
use crate::ClientResult;

/// A `nhanvien` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Id.
    #[serde(rename = "manhanvien", alias = "ma_nhan_vien", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Full name.
    #[serde(rename = "hoten", alias = "ho_ten", default)]
    pub full_name: Option<String>,
    /// Role text ("Admin", "Quản lý", "Nhân viên").
    #[serde(rename = "chucvu", alias = "chuc_vu", default)]
    pub role: Option<String>,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone.
    #[serde(rename = "sodienthoai", alias = "so_dien_thoai", default)]
    pub phone: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl EmployeeRecord {
    /// Id and display name, when the id is present.
    #[must_use]
    pub fn label(&self) -> Option<(EmployeeId, String)> {
        let id = EmployeeId(self.id?);
        let name = self
            .full_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("#{id}"));
        Some((id, name))
    }

    /// The profile cached in a session.
    pub fn to_profile(&self) -> ClientResult<StaffProfile> {
        Ok(StaffProfile {
            id: EmployeeId(required(self.id, "nhanvien", "manhanvien")?),
            full_name: self.full_name.clone().unwrap_or_default(),
            role: self.role.clone().unwrap_or_default(),
            email: self.email.clone(),
        })
    }
}

/// A `nhacungcap` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// Id.
    #[serde(rename = "manhacungcap", alias = "ma_nha_cung_cap", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Name.
    #[serde(rename = "tennhacungcap", alias = "ten_nha_cung_cap", default)]
    pub name: Option<String>,
    /// Phone.
    #[serde(rename = "sodienthoai", alias = "so_dien_thoai", default)]
    pub phone: Option<String>,
    /// Address.
    #[serde(rename = "diachi", alias = "dia_chi", default)]
    pub address: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for SupplierRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("manhacungcap", "ma_nha_cung_cap"),
        ("tennhacungcap", "ten_nha_cung_cap"),
        ("sodienthoai", "so_dien_thoai"),
        ("diachi", "dia_chi"),
    ];
}

impl SupplierRecord {
    /// Id and display name, when the id is present.
    #[must_use]
    pub fn label(&self) -> Option<(SupplierId, String)> {
        let id = SupplierId(self.id?);
        let name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("#{id}"));
        Some((id, name))
    }
}

/// A product variant, nested in a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Id.
    #[serde(rename = "machitietsanpham", alias = "ma_chi_tiet_san_pham", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Size.
    #[serde(rename = "kichthuoc", alias = "kich_thuoc", default)]
    pub size: Option<String>,
    /// Colour.
    #[serde(rename = "mausac", alias = "mau_sac", default)]
    pub colour: Option<String>,
    /// Material.
    #[serde(rename = "chatlieu", alias = "chat_lieu", default)]
    pub material: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// A `sanpham` row with its variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Id.
    #[serde(rename = "masanpham", alias = "ma_san_pham", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Product name.
    #[serde(rename = "tensanpham", alias = "ten_san_pham", default)]
    pub name: Option<String>,
    /// Variants.
    #[serde(rename = "chitietsanpham", alias = "chi_tiet_san_pham", alias = "variants", default)]
    pub variants: Vec<VariantRecord>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl ProductRecord {
    /// Product id, when present.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        self.id.map(ProductId)
    }

    /// One label per variant: `"Áo sơ mi (M / Trắng / Cotton)"`.
    #[must_use]
    pub fn variant_labels(&self) -> Vec<(VariantId, String)> {
        let name = self.name.as_deref().unwrap_or("").trim();
        self.variants
            .iter()
            .filter_map(|variant| {
                let id = VariantId(variant.id?);
                let traits: Vec<&str> = [&variant.size, &variant.colour, &variant.material]
                    .into_iter()
                    .filter_map(|t| t.as_deref().map(str::trim).filter(|t| !t.is_empty()))
                    .collect();
                let label = match (name.is_empty(), traits.is_empty()) {
                    (true, true) => format!("#{id}"),
                    (true, false) => traits.join(" / "),
                    (false, true) => name.to_string(),
                    (false, false) => format!("{name} ({})", traits.join(" / ")),
                };
                Some((id, label))
            })
            .collect()
    }
}

/// A `danhgia` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Id.
    #[serde(rename = "madanhgia", alias = "ma_danh_gia", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Rated product.
    #[serde(rename = "masanpham", alias = "ma_san_pham", with = "opt_id", default)]
    pub product_id: Option<i64>,
    /// Customer.
    #[serde(rename = "makhachhang", alias = "ma_khach_hang", with = "opt_id", default)]
    pub customer_id: Option<i64>,
    /// Stars.
    #[serde(rename = "sosao", alias = "so_sao", with = "opt_count", default)]
    pub stars: Option<u32>,
    /// Comment.
    #[serde(rename = "noidung", alias = "noi_dung", default)]
    pub comment: Option<String>,
    /// Shown on the storefront.
    #[serde(rename = "hienthi", alias = "hien_thi", with = "flag", default)]
    pub visible: bool,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for RatingRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("madanhgia", "ma_danh_gia"),
        ("masanpham", "ma_san_pham"),
        ("makhachhang", "ma_khach_hang"),
        ("sosao", "so_sao"),
        ("noidung", "noi_dung"),
        ("hienthi", "hien_thi"),
    ];
}

impl RatingRecord {
    /// Rating id, when present.
    #[must_use]
    pub fn rating_id(&self) -> Option<RatingId> {
        self.id.map(RatingId)
    }

    /// Stars clamped to 1..=5; `None` when missing or zero.
    #[must_use]
    pub fn star_count(&self) -> Option<u8> {
        self.stars
            .filter(|&s| s > 0)
            .map(|s| u8::try_from(s.min(5)).unwrap_or(5))
    }
}

/// Login body for `/taikhoannhanvien/dangnhap`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(rename = "tendangnhap")]
    pub username: String,
    /// Password.
    #[serde(rename = "matkhau")]
    pub password: String,
}

/// Login answer: a token and the employee it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    /// The employee.
    #[serde(rename = "nhanvien", alias = "nhan_vien", alias = "employee")]
    pub employee: EmployeeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_labels() {
        let product: ProductRecord = serde_json::from_value(json!({
            "masanpham": 1,
            "tensanpham": "Áo sơ mi",
            "chitietsanpham": [
                {"machitietsanpham": 10, "kichthuoc": "M", "mausac": "Trắng", "chatlieu": "Cotton"},
                {"machitietsanpham": 11, "kichthuoc": "L", "mausac": "", "chatlieu": null},
                {"kichthuoc": "XL"}
            ]
        }))
        .unwrap();
        assert_eq!(
            product.variant_labels(),
            vec![
                (VariantId(10), "Áo sơ mi (M / Trắng / Cotton)".to_string()),
                (VariantId(11), "Áo sơ mi (L)".to_string()),
            ]
        );
    }

    #[test]
    fn test_employee_profile() {
        let response: LoginResponse = serde_json::from_value(json!({
            "accessToken": "abc",
            "nhanvien": {"manhanvien": 4, "hoten": "Trần Thu", "chucvu": "Quản lý"}
        }))
        .unwrap();
        let profile = response.employee.to_profile().unwrap();
        assert_eq!(response.token, "abc");
        assert_eq!(profile.id, EmployeeId(4));
        assert_eq!(profile.role, "Quản lý");
    }

    #[test]
    fn test_rating_stars_and_visibility() {
        let rating: RatingRecord = serde_json::from_value(json!({
            "madanhgia": 2, "sosao": 9, "hienthi": "1"
        }))
        .unwrap();
        assert_eq!(rating.star_count(), Some(5));
        assert!(rating.visible);
    }
}
