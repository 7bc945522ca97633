use thiserror::Error;

/// Why the server refused a login step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthRejection {
    InvalidPhoneNumber,
    InvalidOtp,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Caught locally, before any network call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The server refused a phone number or OTP. `message` is shown verbatim.
    #[error("{message}")]
    AuthRejected {
        reason: AuthRejection,
        message: String,
    },

    /// Any other server-side failure, carrying the server's message text
    #[error("{0}")]
    Server(String),

    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    #[error("You need to log in first")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AuthRejected,
    Server,
    SessionExpired,
    NotAuthenticated,
    Storage,
    Network,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::AuthRejected => "AUTH_REJECTED",
            ErrorKind::Server => "SERVER_ERROR",
            ErrorKind::SessionExpired => "SESSION_EXPIRED",
            ErrorKind::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorKind::Storage => "STORAGE_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
        }
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::AuthRejected { .. } => ErrorKind::AuthRejected,
            AppError::Server(_) => ErrorKind::Server,
            AppError::SessionExpired => ErrorKind::SessionExpired,
            AppError::NotAuthenticated => ErrorKind::NotAuthenticated,
            AppError::Storage(_) => ErrorKind::Storage,
            AppError::Network(_) => ErrorKind::Network,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
