//! Client error types.

use atelier_core::closing::ClosingError;
use atelier_core::purchasing::PurchasingError;
use atelier_core::receiving::ReceivingError;
use atelier_core::shift::ShiftError;
use atelier_core::voucher::VoucherError;
use atelier_core::workflow::WorkflowError;
use atelier_shared::AppError;
use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error status.
    #[error("Backend rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The body's `message` field, or the status reason.
        message: String,
    },

    /// Missing or expired token.
    #[error("Authentication required")]
    Unauthorized,

    /// A submit is already running on this desk.
    #[error("Another save is still in progress")]
    Busy,

    /// A multi-step write stopped half way.
    #[error("{step} failed after earlier steps were saved: {source}")]
    PartialWrite {
        /// The step that failed.
        step: &'static str,
        /// Why it failed.
        #[source]
        source: Box<ClientError>,
    },

    /// The write was saved but the document could not be reloaded.
    #[error("Saved, but reloading failed: {0}")]
    ReloadFailed(#[source] Box<ClientError>),

    /// The body could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Workflow refused the action locally.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Purchase order rule violated.
    #[error(transparent)]
    Purchasing(#[from] PurchasingError),

    /// Receipt rule violated.
    #[error(transparent)]
    Receiving(#[from] ReceivingError),

    /// Shift-close rule violated.
    #[error(transparent)]
    Closing(#[from] ClosingError),

    /// Voucher rule violated.
    #[error(transparent)]
    Voucher(#[from] VoucherError),

    /// Work shift rule violated.
    #[error(transparent)]
    Shift(#[from] ShiftError),

    /// Session or configuration failure.
    #[error(transparent)]
    App(#[from] AppError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Returns true if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Busy
                | Self::Workflow(_)
                | Self::Purchasing(_)
                | Self::Receiving(_)
                | Self::Closing(_)
                | Self::Voucher(_)
                | Self::Shift(_)
        )
    }

    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http(_) => 503,
            Self::Rejected { status, .. } => *status,
            Self::Unauthorized => 401,
            Self::Busy => 429,
            Self::PartialWrite { source, .. } | Self::ReloadFailed(source) => source.status_code(),
            Self::InvalidResponse(_) | Self::Serialization(_) => 502,
            Self::Workflow(e) => e.status_code(),
            Self::Purchasing(e) => e.status_code(),
            Self::Receiving(e) => e.status_code(),
            Self::Closing(e) => e.status_code(),
            Self::Voucher(e) => e.status_code(),
            Self::Shift(e) => e.status_code(),
            Self::App(e) => e.status_code(),
        }
    }

    /// Message shown to the operator.
    ///
    /// Transport failures get a generic retry hint; everything else shows
    /// its own text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Không thể kết nối máy chủ. Vui lòng thử lại.".to_string(),
            Self::Unauthorized => "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.".to_string(),
            Self::Busy => "Đang lưu, vui lòng chờ.".to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::PartialWrite { step, source } => {
                format!("Lưu chưa hoàn tất ({step}): {}. Hãy tải lại.", source.user_message())
            }
            Self::ReloadFailed(source) => {
                format!("Đã lưu nhưng không tải lại được: {}. Hãy tải lại.", source.user_message())
            }
            other => other.to_string(),
        }
    }
}
