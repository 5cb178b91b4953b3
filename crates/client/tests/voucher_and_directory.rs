//! Voucher edit scope and reference data through their desks.

mod common;

use atelier_client::ClientError;
use atelier_client::desk::{DirectoryDesk, VoucherDesk};
use atelier_core::voucher::{VoucherError, VoucherStatus};
use atelier_core::workflow::ActorRole;
use atelier_shared::types::VoucherId;
use axum::http::Method;
use common::MockBackend;
use serde_json::{Value, json};

fn voucher(id: i64, start: &str, end: &str) -> Value {
    json!({
        "mamagiamgia": id,
        "code": format!("MA{id}"),
        "ten": "Giảm giá",
        "loaigiam": "Phần trăm",
        "giatrigiam": 10,
        "giamtoida": 50000,
        "donhangtoithieu": 0,
        "soluong": 10,
        "dasudung": 1,
        "ngaybatdau": start,
        "ngayketthuc": end,
        "chisinhnhat": 0,
        "manhanvien": 1
    })
}

#[tokio::test]
async fn test_running_voucher_cannot_be_deleted() {
    let mock = MockBackend::start().await;
    mock.get("/magiamgia/1", voucher(1, "2000-01-01", "2099-12-31"));
    let desk = VoucherDesk::new(mock.desk(1, ActorRole::Manager));

    let loaded = desk.show(VoucherId(1)).await.unwrap();
    let err = desk.delete(&loaded).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Voucher(VoucherError::Locked(VoucherStatus::Ongoing))
    ));
    assert!(mock.writes().is_empty());
}

#[tokio::test]
async fn test_upcoming_voucher_is_deleted() {
    let mock = MockBackend::start().await;
    mock.get("/magiamgia/2", voucher(2, "2099-01-01", "2099-12-31"));
    let desk = VoucherDesk::new(mock.desk(1, ActorRole::Manager));

    let loaded = desk.show(VoucherId(2)).await.unwrap();
    desk.delete(&loaded).await.unwrap();
    assert_eq!(mock.calls_to(&Method::DELETE, "/magiamgia/2").len(), 1);
}

#[tokio::test]
async fn test_voucher_list_derives_status() {
    let mock = MockBackend::start().await;
    mock.get(
        "/magiamgia",
        json!([
            voucher(1, "2000-01-01", "2099-12-31"),
            voucher(2, "2099-01-01", "2099-12-31"),
            voucher(3, "2000-01-01", "2000-12-31")
        ]),
    );
    let desk = VoucherDesk::new(mock.desk(1, ActorRole::Manager));

    let listing = desk
        .list(&Default::default(), Default::default())
        .await
        .unwrap()
        .unwrap();
    let statuses: Vec<_> = listing.page.data.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        [
            VoucherStatus::Ongoing,
            VoucherStatus::Upcoming,
            VoucherStatus::Ended
        ]
    );
    assert_eq!(listing.page.data[0].discount, "Giảm 10% tối đa 50.000 ₫");
}

#[tokio::test]
async fn test_rating_visibility_keeps_other_fields() {
    let mock = MockBackend::start().await;
    mock.get(
        "/danhgia",
        json!([
            { "madanhgia": 4, "masanpham": 9, "makhachhang": 3, "sosao": 1, "noidung": "Vải mỏng", "hienthi": 1, "ngaytao": "2026-10-01" },
            { "madanhgia": 5, "masanpham": 9, "makhachhang": 6, "sosao": 5, "noidung": "Đẹp", "hienthi": true }
        ]),
    );
    let desk = DirectoryDesk::new(mock.desk(1, ActorRole::Manager));

    let low = desk.ratings(Some(2)).await.unwrap();
    assert_eq!(low.len(), 1);
    desk.set_rating_visibility(&low[0], false).await.unwrap();

    let body = mock.calls_to(&Method::PUT, "/danhgia/4")[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(body["hienthi"], json!(false));
    assert_eq!(body["noidung"], "Vải mỏng");
    assert_eq!(body["ngaytao"], "2026-10-01");
}

#[tokio::test]
async fn test_employee_search_ignores_accents() {
    let mock = MockBackend::start().await;
    mock.get(
        "/nhanvien",
        json!([
            { "manhanvien": 1, "hoten": "Trần Minh Đức", "chucvu": "Quản lý" },
            { "manhanvien": 2, "hoten": "Lê Thu", "chucvu": "Nhân viên", "email": "thu@atelier.vn" }
        ]),
    );
    let desk = DirectoryDesk::new(mock.desk(1, ActorRole::Manager));

    let found = desk.employees(Some("tran minh duc")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, Some(1));
    assert_eq!(desk.employees(None).await.unwrap().len(), 2);
}
