//! Command-line arguments.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Back-office console for the Atelier store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        /// Account name
        #[arg(long, short)]
        username: String,

        /// Password
        #[arg(long, env = "ATELIER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved session
    Logout,

    /// Show the logged-in employee
    Whoami,

    /// Purchase orders (phiếu đặt hàng)
    #[command(subcommand)]
    Po(DocumentCommand),

    /// Warehouse receipts (phiếu nhập kho)
    #[command(subcommand)]
    Receipt(DocumentCommand),

    /// Shift closing (chốt ca)
    #[command(subcommand)]
    Close(CloseCommand),

    /// Discount vouchers
    #[command(subcommand)]
    Voucher(VoucherCommand),

    /// Work shifts
    #[command(subcommand)]
    Shift(ShiftCommand),
}

/// Commands shared by purchase orders and receipts.
impl Command {
    /// Name of the command group, for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Po(_) => "po",
            Self::Receipt(_) => "receipt",
            Self::Close(_) => "close",
            Self::Voucher(_) => "voucher",
            Self::Shift(_) => "shift",
        }
    }
}

#[derive(Subcommand)]
pub enum DocumentCommand {
    /// List documents
    List(ListArgs),

    /// Show one document with its lines
    Show {
        /// Document id
        id: i64,
    },

    /// Send a new document for review
    Send {
        /// Document id
        id: i64,
    },

    /// Approve a pending document
    Approve {
        /// Document id
        id: i64,
    },

    /// Reject a pending document
    Reject {
        /// Document id
        id: i64,

        /// Reason kept in the note
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand)]
pub enum CloseCommand {
    /// List shift-closing reports
    List(ListArgs),

    /// Show what closing a day would record
    Preview {
        /// Day to close (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Employee id (defaults to yourself)
        #[arg(long)]
        employee: Option<i64>,
    },

    /// Close your shift
    Create {
        /// Day to close (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Cash spent during the shift
        #[arg(long, default_value = "0")]
        expense: Decimal,

        /// Cash counted in the drawer
        #[arg(long)]
        cash: Decimal,

        /// Note
        #[arg(long)]
        note: Option<String>,
    },

    /// Approve a report
    Approve {
        /// Report id
        id: i64,
    },

    /// Reject a report
    Reject {
        /// Report id
        id: i64,

        /// Reason kept in the note
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand)]
pub enum VoucherCommand {
    /// List vouchers with their current status
    List(ListArgs),
}

#[derive(Subcommand)]
pub enum ShiftCommand {
    /// List work shifts by start time
    List,

    /// Check a shift against the saved ones without saving it
    Check {
        /// Shift name
        #[arg(long)]
        name: String,

        /// Start time (HH:MM)
        #[arg(long)]
        start: String,

        /// End time (HH:MM)
        #[arg(long)]
        end: String,

        /// Shift being edited, left out of the overlap check
        #[arg(long)]
        exclude: Option<i64>,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Search text (accents and case ignored)
    #[arg(long, short)]
    pub search: Option<String>,

    /// Status filter ("chờ duyệt", "approved", ...)
    #[arg(long)]
    pub status: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = 20)]
    pub per_page: u32,
}
