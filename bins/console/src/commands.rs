//! Command dispatch.

use anyhow::{Context, Result, bail};
use atelier_client::auth::Authenticator;
use atelier_client::desk::{
    DeskContext, PurchaseOrderDesk, ReceiptDesk, ShiftCloseDesk, VoucherDesk, WorkShiftDesk,
};
use atelier_client::{ClientConfig, ClientError};
use atelier_core::shift::ShiftWindow;
use atelier_core::view::ListQuery;
use atelier_core::voucher::VoucherStatus;
use atelier_core::workflow::{DocumentKind, DocumentStatus, normalize_status};
use atelier_shared::text::fold;
use atelier_shared::types::{
    EmployeeId, PageRequest, PurchaseOrderId, ReceiptId, ShiftCloseId, WorkShiftId,
};
use atelier_shared::{AppConfig, SessionStore};

use crate::cli::{CloseCommand, Command, DocumentCommand, ListArgs, ShiftCommand, VoucherCommand};
use crate::print;

/// Configuration plus the session, shared by every command.
pub struct Console {
    config: ClientConfig,
    auth: Authenticator,
}

impl Console {
    pub fn new(app: &AppConfig) -> Result<Self> {
        let config = ClientConfig::from_app(app);
        let auth = Authenticator::new(&config, SessionStore::new(app.session.file.clone()))?;
        Ok(Self { config, auth })
    }

    fn desk(&self) -> Result<DeskContext> {
        let (http, actor) = self.auth.authorized()?;
        Ok(DeskContext::new(http, actor, self.config.clone()))
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Login { username, password } => {
                let session = self.auth.login(&username, &password).await?;
                println!(
                    "Đã đăng nhập: {} ({})",
                    session.profile.full_name, session.profile.role
                );
            }
            Command::Logout => {
                self.auth.logout()?;
                println!("Đã đăng xuất");
            }
            Command::Whoami => {
                let session = self.auth.session()?;
                println!(
                    "#{} {} ({}) từ {}",
                    session.profile.id,
                    session.profile.full_name,
                    session.profile.role,
                    session.logged_in_at.format("%d/%m/%Y %H:%M")
                );
            }
            Command::Po(cmd) => self.purchase_orders(cmd).await?,
            Command::Receipt(cmd) => self.receipts(cmd).await?,
            Command::Close(cmd) => self.shift_closes(cmd).await?,
            Command::Voucher(VoucherCommand::List(args)) => self.vouchers(&args).await?,
            Command::Shift(cmd) => self.work_shifts(cmd).await?,
        }
        Ok(())
    }

    async fn purchase_orders(&self, command: DocumentCommand) -> Result<()> {
        let desk = PurchaseOrderDesk::new(self.desk()?);
        let id = match command {
            DocumentCommand::List(args) => {
                let query = document_query(DocumentKind::PurchaseOrder, &args);
                if let Some(listing) = desk.list(&query, page(&args)).await? {
                    print::purchase_orders(&listing);
                }
                return Ok(());
            }
            DocumentCommand::Show { id }
            | DocumentCommand::Send { id }
            | DocumentCommand::Approve { id }
            | DocumentCommand::Reject { id, .. } => PurchaseOrderId(id),
        };

        let doc = desk.show(id).await?;
        let doc = match command {
            DocumentCommand::Send { .. } => desk.send(&doc).await?,
            DocumentCommand::Approve { .. } => desk.approve(&doc).await?,
            DocumentCommand::Reject { reason, .. } => desk.reject(&doc, &reason).await?,
            _ => doc,
        };
        print::purchase_order(&doc.view);
        Ok(())
    }

    async fn receipts(&self, command: DocumentCommand) -> Result<()> {
        let desk = ReceiptDesk::new(self.desk()?);
        let id = match command {
            DocumentCommand::List(args) => {
                let query = document_query(DocumentKind::WarehouseReceipt, &args);
                if let Some(listing) = desk.list(&query, page(&args)).await? {
                    print::receipts(&listing);
                }
                return Ok(());
            }
            DocumentCommand::Show { id }
            | DocumentCommand::Send { id }
            | DocumentCommand::Approve { id }
            | DocumentCommand::Reject { id, .. } => ReceiptId(id),
        };

        let doc = desk.show(id).await?;
        let doc = match command {
            DocumentCommand::Send { .. } => desk.send(&doc).await?,
            DocumentCommand::Approve { .. } => desk.approve(&doc).await?,
            DocumentCommand::Reject { reason, .. } => desk.reject(&doc, &reason).await?,
            _ => doc,
        };
        print::receipt(&doc.view);
        Ok(())
    }

    async fn shift_closes(&self, command: CloseCommand) -> Result<()> {
        let ctx = self.desk()?;
        let me = ctx.actor.id;
        let desk = ShiftCloseDesk::new(ctx);

        match command {
            CloseCommand::List(args) => {
                let query = document_query(DocumentKind::ShiftClose, &args);
                if let Some(listing) = desk.list(&query, page(&args)).await? {
                    print::shift_closes(&listing);
                }
            }
            CloseCommand::Preview { date, employee } => {
                let date = date.unwrap_or_else(|| self.config.today());
                let employee = employee.map_or(me, EmployeeId);
                let preview = desk.preview(employee, date).await?;
                print::preview(&preview);
            }
            CloseCommand::Create {
                date,
                expense,
                cash,
                note,
            } => {
                let date = date.unwrap_or_else(|| self.config.today());
                match desk.create(date, expense, cash, note).await? {
                    Some(id) => println!("Đã chốt ca ngày {} (#{id})", date.format("%d/%m/%Y")),
                    None => println!("Đã chốt ca ngày {}", date.format("%d/%m/%Y")),
                }
            }
            CloseCommand::Approve { id } => {
                let report = desk.show(ShiftCloseId(id)).await?;
                let report = desk.approve(&report).await?;
                println!("#{id}: {}", report.domain.status.label());
            }
            CloseCommand::Reject { id, reason } => {
                let report = desk.show(ShiftCloseId(id)).await?;
                let report = desk.reject(&report, &reason).await?;
                println!("#{id}: {}", report.domain.status.label());
            }
        }
        Ok(())
    }

    async fn vouchers(&self, args: &ListArgs) -> Result<()> {
        let desk = VoucherDesk::new(self.desk()?);
        let mut query = ListQuery::new();
        if let Some(term) = &args.search {
            query = query.with_search(term.clone());
        }
        if let Some(raw) = &args.status {
            let status = parse_voucher_status(raw)
                .with_context(|| format!("unknown voucher status '{raw}'"))?;
            query = query.with_status(status);
        }
        if let Some(listing) = desk.list(&query, page(args)).await? {
            print::vouchers(&listing);
        }
        Ok(())
    }

    async fn work_shifts(&self, command: ShiftCommand) -> Result<()> {
        let desk = WorkShiftDesk::new(self.desk()?);
        match command {
            ShiftCommand::List => print::work_shifts(&desk.list().await?),
            ShiftCommand::Check {
                name,
                start,
                end,
                exclude,
            } => {
                let window = ShiftWindow::parse(&start, &end).map_err(ClientError::from)?;
                desk.check(&name, &window, exclude.map(WorkShiftId)).await?;
                println!("Ca '{}' {}-{} hợp lệ", name.trim(), window.start, window.end);
            }
        }
        Ok(())
    }
}

fn page(args: &ListArgs) -> PageRequest {
    PageRequest::new(args.page, args.per_page)
}

fn document_query(kind: DocumentKind, args: &ListArgs) -> ListQuery<DocumentStatus> {
    let mut query = ListQuery::new();
    if let Some(term) = &args.search {
        query = query.with_search(term.clone());
    }
    if let Some(raw) = &args.status {
        query = query.with_status(normalize_status(kind, raw));
    }
    query
}

fn parse_voucher_status(raw: &str) -> Result<VoucherStatus> {
    let folded = fold(raw).replace(' ', "_");
    for status in [
        VoucherStatus::Upcoming,
        VoucherStatus::Ongoing,
        VoucherStatus::Ended,
        VoucherStatus::OutOfStock,
    ] {
        if folded == status.as_str() || folded == fold(status.label()).replace(' ', "_") {
            return Ok(status);
        }
    }
    bail!("expected upcoming, ongoing, ended or out_of_stock")
}
