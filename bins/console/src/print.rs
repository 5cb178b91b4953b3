//! Plain-text tables on stdout.

use atelier_client::desk::{Listing, ShiftClosePreview};
use atelier_client::wire::{Loaded, WorkShiftRecord};
use atelier_core::view::{
    PurchaseOrderDetailView, PurchaseOrderRow, ReceiptDetailView, ReceiptRow, ShiftCloseRow,
    VoucherRow,
};
use atelier_core::workflow::ActionSet;
use atelier_shared::types::money::format_vnd;
use chrono::NaiveDate;

fn day(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn actions(set: ActionSet) -> String {
    set.iter()
        .map(|action| action.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn footer<T>(listing: &Listing<T>) {
    if let Some(banner) = &listing.banner {
        println!("! {banner}");
    }
    let meta = &listing.page.meta;
    println!(
        "-- trang {}/{} ({} dòng)",
        meta.page, meta.total_pages, meta.total
    );
}

pub fn purchase_orders(listing: &Listing<PurchaseOrderRow>) {
    for row in &listing.page.data {
        println!(
            "#{:<5} {:<10} {:<24} {:>14} {:>14}  {:<12} [{}]",
            row.id,
            day(row.ordered_at),
            row.supplier,
            format_vnd(row.total_amount),
            format_vnd(row.remaining),
            row.status_label,
            actions(row.actions)
        );
    }
    footer(listing);
}

pub fn purchase_order(view: &PurchaseOrderDetailView) {
    let header = &view.header;
    println!("Phiếu đặt hàng #{} ({})", header.id, header.status_label);
    println!("Nhà cung cấp: {}", header.supplier);
    println!("Nhân viên:    {}", header.employee);
    println!(
        "Ngày đặt:     {}  giao dự kiến: {}",
        day(header.ordered_at),
        day(header.expected_at)
    );
    if let Some(note) = &view.note {
        println!("Ghi chú:      {note}");
    }
    for line in &view.lines {
        println!(
            "  {:<32} {:>5} x {:>12} = {:>14}",
            line.variant,
            line.quantity,
            format_vnd(line.unit_price),
            format_vnd(line.line_total)
        );
    }
    println!(
        "Tổng {}  cọc {}  còn lại {}",
        format_vnd(view.computed.total_amount),
        format_vnd(header.deposit),
        format_vnd(view.computed.remaining)
    );
    if let Some(divergence) = view.divergence() {
        println!(
            "! Tổng lưu trên phiếu ({}) khác tổng tính từ dòng",
            format_vnd(divergence.stored.total_amount)
        );
    }
    println!("Thao tác: [{}]", actions(header.actions));
}

pub fn receipts(listing: &Listing<ReceiptRow>) {
    for row in &listing.page.data {
        println!(
            "#{:<5} {:<10} {:<6} {:<24} {:<20} {:<12} [{}]",
            row.id,
            day(row.received_at),
            row.source,
            row.supplier,
            row.employee,
            row.status_label,
            actions(row.actions)
        );
    }
    footer(listing);
}

pub fn receipt(view: &ReceiptDetailView) {
    let header = &view.header;
    println!("Phiếu nhập kho #{} ({})", header.id, header.status_label);
    println!("Phiếu đặt:    {}", header.source);
    println!("Nhà cung cấp: {}", header.supplier);
    println!("Nhân viên:    {}", header.employee);
    println!("Ngày nhập:    {}", day(header.received_at));
    for line in &view.lines {
        println!("  {:<32} {:>5}  {}", line.variant, line.quantity, line.note);
    }
    println!("Tổng số lượng: {}", view.total_quantity);
    println!("Thao tác: [{}]", actions(header.actions));
}

pub fn shift_closes(listing: &Listing<ShiftCloseRow>) {
    for row in &listing.page.data {
        println!(
            "#{:<5} {:<10} {:<20} {:>14} {:>5} đơn  lệch {:>12}  {:<12} [{}]",
            row.id,
            day(Some(row.closed_date)),
            row.employee,
            format_vnd(row.total_revenue),
            row.order_count,
            format_vnd(row.cash_variance),
            row.status_label,
            actions(row.actions)
        );
    }
    footer(listing);
}

pub fn preview(preview: &ShiftClosePreview) {
    let s = &preview.snapshot;
    println!("Chốt ca ngày {} (nhân viên #{})", day(Some(s.date)), s.employee_id);
    println!("  Số đơn:       {}", s.order_count);
    println!("  Doanh thu:    {}", format_vnd(s.total_revenue));
    println!("  Tiền mặt:     {}", format_vnd(s.cash_amount));
    println!("  Chuyển khoản: {}", format_vnd(s.bank_transfer_amount));
    println!("  Khác:         {}", format_vnd(s.other_amount));
    if let Some(existing) = preview.existing {
        println!("! Ngày này đã có phiếu chốt ca #{existing}");
    }
}

pub fn vouchers(listing: &Listing<VoucherRow>) {
    for row in &listing.page.data {
        println!(
            "#{:<4} {:<12} {:<28} {:<10}-{:<10} {:>4}/{:<4} {}",
            row.id,
            row.code,
            row.discount,
            day(Some(row.start_date)),
            day(Some(row.end_date)),
            row.quantity_used,
            row.quantity_total,
            row.status_label
        );
    }
    footer(listing);
}

pub fn work_shifts(shifts: &[Loaded<WorkShiftRecord>]) {
    for shift in shifts {
        let s = &shift.domain;
        println!(
            "#{:<4} {}-{}  {:<16} {}",
            s.id,
            s.start,
            s.end,
            s.name,
            s.description.as_deref().unwrap_or("")
        );
    }
}
