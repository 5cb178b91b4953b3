//! Backend resource paths.

use std::fmt;

/// A backend resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Customer orders.
    CustomerOrders,
    /// Purchase orders.
    PurchaseOrders,
    /// Warehouse receipts.
    WarehouseReceipts,
    /// Shift-closing reports.
    ShiftCloses,
    /// Discount vouchers.
    Vouchers,
    /// Work shifts.
    WorkShifts,
    /// Purchase order lines.
    PurchaseOrderLines,
    /// Warehouse receipt lines.
    ReceiptLines,
    /// Employees.
    Employees,
    /// Suppliers.
    Suppliers,
    /// Employee accounts.
    Accounts,
    /// Product ratings.
    Ratings,
    /// Products with their variants.
    Products,
    /// Storefront banners.
    Banners,
    /// Dashboard summary figures.
    DashboardSummary,
    /// Account login.
    Login,
}

impl Endpoint {
    /// Every resource endpoint.
    pub const ALL: [Self; 16] = [
        Self::CustomerOrders,
        Self::PurchaseOrders,
        Self::WarehouseReceipts,
        Self::ShiftCloses,
        Self::Vouchers,
        Self::WorkShifts,
        Self::PurchaseOrderLines,
        Self::ReceiptLines,
        Self::Employees,
        Self::Suppliers,
        Self::Accounts,
        Self::Ratings,
        Self::Products,
        Self::Banners,
        Self::DashboardSummary,
        Self::Login,
    ];

    /// Collection path, relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CustomerOrders => "/donhang",
            Self::PurchaseOrders => "/phieudathang",
            Self::WarehouseReceipts => "/phieunhapkho",
            Self::ShiftCloses => "/chotca",
            Self::Vouchers => "/magiamgia",
            Self::WorkShifts => "/calamviec",
            Self::PurchaseOrderLines => "/chitietphieudathang",
            Self::ReceiptLines => "/chitietphieunhap",
            Self::Employees => "/nhanvien",
            Self::Suppliers => "/nhacungcap",
            Self::Accounts => "/taikhoannhanvien",
            Self::Ratings => "/danhgia",
            Self::Products => "/sanpham",
            Self::Banners => "/banner",
            Self::DashboardSummary => "/dashboard/summary",
            Self::Login => "/taikhoannhanvien/dangnhap",
        }
    }

    /// Item path (`/phieudathang/12`).
    #[must_use]
    pub fn item(self, id: i64) -> String {
        format!("{}/{id}", self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn test_item_path() {
        assert_eq!(Endpoint::PurchaseOrders.item(12), "/phieudathang/12");
        assert_eq!(Endpoint::ShiftCloses.to_string(), "/chotca");
    }
}
