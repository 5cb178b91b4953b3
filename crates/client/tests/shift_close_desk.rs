//! Shift-close desk against a mock backend.

mod common;

use atelier_client::ClientError;
use atelier_client::desk::ShiftCloseDesk;
use atelier_core::closing::ClosingError;
use atelier_core::workflow::{ActorRole, DocumentStatus};
use atelier_shared::types::{EmployeeId, ShiftCloseId};
use axum::http::Method;
use chrono::NaiveDate;
use common::MockBackend;
use rust_decimal_macros::dec;
use serde_json::json;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 3).unwrap()
}

fn orders() -> serde_json::Value {
    json!([
        { "madonhang": 1, "manhanvien": 7, "ngaydat": "2026-10-03", "tongtien": 500000, "phuongthucthanhtoan": "Tiền mặt", "trangthai": "Đã giao" },
        { "madonhang": 2, "manhanvien": 7, "ngaydat": "2026-10-03T15:30:00+07:00", "tongtien": "300000", "phuongthucthanhtoan": "Chuyển khoản", "trangthai": "Đang giao" },
        { "madonhang": 3, "manhanvien": 7, "ngaydat": "2026-10-03", "tongtien": 900000, "phuongthucthanhtoan": "Tiền mặt", "trangthai": "Đã hủy" },
        { "madonhang": 4, "manhanvien": 8, "ngaydat": "2026-10-03", "tongtien": 800000, "phuongthucthanhtoan": "Tiền mặt", "trangthai": "Đã giao" },
        { "madonhang": null, "manhanvien": 7, "tongtien": 1 }
    ])
}

fn report(status: &str) -> serde_json::Value {
    json!({
        "machotca": 11,
        "manhanvien": 7,
        "ngaychot": "2026-10-03",
        "tongdoanhthu": 800000,
        "tienmat": 500000,
        "chiphi": 0,
        "chuyenkhoan": 300000,
        "sodonhang": 2,
        "tienmatthucte": 500000,
        "chenhlech": 0,
        "nguoiduyet": null,
        "thoigianduyet": null,
        "trangthai": status,
        "ghichu": null
    })
}

#[tokio::test]
async fn test_duplicate_close_is_blocked_before_any_write() {
    let mock = MockBackend::start().await;
    mock.get("/chotca", json!({ "items": [report("Chờ xác nhận")] }))
        .get("/donhang", orders());
    let desk = ShiftCloseDesk::new(mock.desk(7, ActorRole::Staff));

    let err = desk
        .create(day(), dec!(0), dec!(500000), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Closing(ClosingError::AlreadyClosed {
            existing: ShiftCloseId(11),
            ..
        })
    ));
    assert!(err.is_local());
    assert!(mock.calls_to(&Method::POST, "/chotca").is_empty());
    assert!(mock.calls_to(&Method::GET, "/donhang").is_empty());
}

#[tokio::test]
async fn test_rejected_day_can_be_closed_again() {
    let mock = MockBackend::start().await;
    mock.get("/chotca", json!([report("Từ chối")]))
        .get("/donhang", orders())
        .on(
            Method::POST,
            "/chotca",
            201,
            json!({ "data": { "machotca": 31, "manhanvien": 7, "ngaychot": "2026-10-03" } }),
        );
    let desk = ShiftCloseDesk::new(mock.desk(7, ActorRole::Staff));

    let id = desk
        .create(day(), dec!(100000), dec!(390000), Some("Mua nước".to_string()))
        .await
        .unwrap();
    assert_eq!(id, Some(ShiftCloseId(31)));

    let posted = mock.calls_to(&Method::POST, "/chotca");
    assert_eq!(posted.len(), 1);
    let body = posted[0].body.clone().unwrap();
    assert_eq!(body["manhanvien"], json!(7));
    assert_eq!(body["ngaychot"], "2026-10-03");
    assert_eq!(body["tongdoanhthu"], json!(800000));
    assert_eq!(body["tienmat"], json!(500000));
    assert_eq!(body["chuyenkhoan"], json!(300000));
    assert_eq!(body["sodonhang"], json!(2));
    // expected cash 500000 - 100000 = 400000
    assert_eq!(body["chenhlech"], json!(-10000));
    assert_eq!(body["trangthai"], "Chờ duyệt");
    assert_eq!(body["ghichu"], "Mua nước");
}

#[tokio::test]
async fn test_preview_reports_existing_close() {
    let mock = MockBackend::start().await;
    mock.get("/chotca", json!([report("Chờ xác nhận")]))
        .get("/donhang", orders());
    let desk = ShiftCloseDesk::new(mock.desk(7, ActorRole::Staff));

    let preview = desk.preview(EmployeeId(7), day()).await.unwrap();
    assert_eq!(preview.existing, Some(ShiftCloseId(11)));
    assert_eq!(preview.snapshot.order_count, 2);
    assert_eq!(preview.snapshot.total_revenue, dec!(800000));
    assert!(mock.writes().is_empty());
}

#[tokio::test]
async fn test_manager_approval_stamps_reviewer() {
    let mock = MockBackend::start().await;
    mock.get("/chotca/11", report("Chờ xác nhận"));
    let desk = ShiftCloseDesk::new(mock.desk(2, ActorRole::Manager));

    let loaded = desk.show(ShiftCloseId(11)).await.unwrap();
    assert_eq!(loaded.domain.status, DocumentStatus::PendingReview);
    desk.approve(&loaded).await.unwrap();

    let put = mock.calls_to(&Method::PUT, "/chotca/11")[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(put["trangthai"], "Đã duyệt");
    assert_eq!(put["nguoiduyet"], json!(2));
    assert!(put["thoigianduyet"].is_string());
}

#[tokio::test]
async fn test_staff_cannot_review_own_close() {
    let mock = MockBackend::start().await;
    mock.get("/chotca/11", report("Chờ xác nhận"));
    let desk = ShiftCloseDesk::new(mock.desk(7, ActorRole::Staff));

    let loaded = desk.show(ShiftCloseId(11)).await.unwrap();
    let err = desk.reject(&loaded, "Thiếu tiền").await.unwrap_err();
    assert!(err.is_local());
    assert!(mock.writes().is_empty());
}
