//! Receipt quantity cap and work shift overlap through their desks.

mod common;

use atelier_client::ClientError;
use atelier_client::desk::{ReceiptDesk, WorkShiftDesk};
use atelier_core::receiving::{ReceiptLineInput, ReceivingError};
use atelier_core::shift::{ShiftError, ShiftWindow};
use atelier_core::workflow::ActorRole;
use atelier_shared::types::{ReceiptId, SupplierId, VariantId, WorkShiftId};
use axum::http::Method;
use common::MockBackend;
use serde_json::json;

async fn receiving_backend() -> MockBackend {
    let mock = MockBackend::start().await;
    mock.get(
        "/phieudathang",
        json!([{ "maphieudathang": 1, "manhacungcap": 2, "manhanvien": 4, "trangthai": "Đã duyệt" }]),
    )
    .get(
        "/chitietphieudathang",
        json!([{ "machitiet": 1, "maphieudathang": 1, "machitietsanpham": 5, "soluong": 50, "dongia": 80000 }]),
    )
    .get(
        "/phieunhapkho",
        json!({ "data": [
            { "maphieunhap": 10, "maphieudathang": 1, "manhanvien": 4, "trangthai": "Đã duyệt" },
            { "maphieunhap": 11, "maphieudathang": 1, "manhanvien": 4, "trangthai": "Tạo mới" }
        ] }),
    )
    .get(
        "/phieunhapkho/11",
        json!({ "maphieunhap": 11, "maphieudathang": 1, "manhanvien": 4, "ngaynhap": "2026-10-05", "trangthai": "Tạo mới" }),
    )
    .get(
        "/chitietphieunhap",
        json!([{ "machitietphieunhap": 70, "maphieunhap": 10, "machitietsanpham": 5, "soluong": 30 }]),
    );
    mock
}

fn input(quantity: u32) -> ReceiptLineInput {
    ReceiptLineInput {
        variant_id: VariantId(5),
        quantity,
        note: None,
    }
}

#[tokio::test]
async fn test_receipt_cap_refuses_over_delivery() {
    let mock = receiving_backend().await;
    let desk = ReceiptDesk::new(mock.desk(4, ActorRole::Staff));

    let doc = desk.show(ReceiptId(11)).await.unwrap();
    assert_eq!(doc.receipt.domain.resolve_supplier(&[]), None);
    let cap = desk.cap(&doc, VariantId(5)).await.unwrap();
    assert_eq!((cap.ordered, cap.received, cap.remaining()), (50, 30, 20));

    let err = desk.add_line(&doc, input(25)).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Receiving(ReceivingError::ExceedsOrdered { .. })
    ));
    assert!(mock.writes().is_empty());

    desk.add_line(&doc, input(20)).await.unwrap();
    let posted = mock.calls_to(&Method::POST, "/chitietphieunhap");
    assert_eq!(posted.len(), 1);
    let body = posted[0].body.clone().unwrap();
    assert_eq!(body["maphieunhap"], json!(11));
    assert_eq!(body["soluong"], json!(20));
}

#[tokio::test]
async fn test_unreadable_receipt_line_blocks_the_cap() {
    let mock = receiving_backend().await;
    mock.get(
        "/chitietphieunhap",
        json!([
            { "machitietphieunhap": 70, "maphieunhap": 10, "machitietsanpham": 5, "soluong": 30 },
            { "machitietphieunhap": 71, "maphieunhap": 10, "soluong": 15 }
        ]),
    );
    let desk = ReceiptDesk::new(mock.desk(4, ActorRole::Staff));

    let doc = desk.show(ReceiptId(11)).await.unwrap();
    assert!(matches!(
        desk.cap(&doc, VariantId(5)).await,
        Err(ClientError::InvalidResponse(_))
    ));
    let err = desk.add_line(&doc, input(20)).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
    assert!(mock.writes().is_empty());
}

#[tokio::test]
async fn test_receipt_supplier_resolved_through_source_order() {
    let mock = receiving_backend().await;
    let desk = ReceiptDesk::new(mock.desk(4, ActorRole::Staff));

    let doc = desk.show(ReceiptId(11)).await.unwrap();
    assert_eq!(doc.view.header.source, "#1");
    assert_eq!(doc.view.header.supplier, "#2");
    let ledger = desk.ledger().await.unwrap();
    assert_eq!(
        doc.receipt.domain.resolve_supplier(&ledger.orders),
        Some(SupplierId(2))
    );
}

fn roster() -> serde_json::Value {
    json!([
        { "macalamviec": 2, "tenca": "Ca chiều", "giobatdau": "13:00:00", "gioketthuc": "17:00:00" },
        { "macalamviec": 1, "tenca": "Ca sáng", "giobatdau": "08:00:00", "gioketthuc": "12:00:00" }
    ])
}

#[tokio::test]
async fn test_overlapping_shift_is_not_posted() {
    let mock = MockBackend::start().await;
    mock.get("/calamviec", roster());
    let desk = WorkShiftDesk::new(mock.desk(1, ActorRole::Manager));

    let listed = desk.list().await.unwrap();
    assert_eq!(listed[0].domain.id, WorkShiftId(1));

    let err = desk
        .create("Ca giữa", ShiftWindow::parse("11:00", "15:00").unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Shift(ShiftError::Overlaps {
            id: WorkShiftId(1),
            ..
        })
    ));
    assert!(mock.writes().is_empty());
}

#[tokio::test]
async fn test_back_to_back_shift_is_created() {
    let mock = MockBackend::start().await;
    mock.get("/calamviec", roster()).on(
        Method::POST,
        "/calamviec",
        201,
        json!({ "macalamviec": 3, "tenca": "Ca trưa" }),
    );
    let desk = WorkShiftDesk::new(mock.desk(1, ActorRole::Manager));

    let id = desk
        .create("Ca trưa", ShiftWindow::parse("12:00", "13:00").unwrap(), Some("Nghỉ trưa"))
        .await
        .unwrap();
    assert_eq!(id, Some(WorkShiftId(3)));

    let body = mock.calls_to(&Method::POST, "/calamviec")[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(body["giobatdau"], "12:00:00");
    assert_eq!(body["gioketthuc"], "13:00:00");
}
