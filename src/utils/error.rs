use thiserror::Error;

/// Failures reachable from network I/O against the catalog backend.
///
/// The set is closed: transport and parsing errors are folded into one of
/// these four kinds at the point of failure, so callers can match exhaustively.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid endpoint: {url}")]
    InvalidEndpoint { url: String },

    #[error("Invalid response: server answered with HTTP {status}")]
    InvalidResponse { status: u16 },

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Transport failure: {reason}")]
    TransportFailure { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidEndpoint,
    InvalidResponse,
    InvalidPayload,
    TransportFailure,
}

/// User-presentable text for a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
}

impl DomainError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        DomainError::InvalidPayload {
            reason: reason.into(),
        }
    }

    pub fn transport_failure(reason: impl Into<String>) -> Self {
        DomainError::TransportFailure {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidEndpoint { .. } => ErrorKind::InvalidEndpoint,
            DomainError::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            DomainError::InvalidPayload { .. } => ErrorKind::InvalidPayload,
            DomainError::TransportFailure { .. } => ErrorKind::TransportFailure,
        }
    }

    pub fn alert(&self) -> Alert {
        match self.kind() {
            ErrorKind::InvalidEndpoint => Alert {
                title: "Server Error",
                message: "There is an issue connecting to the server. Please try again later or contact support.",
            },
            ErrorKind::InvalidResponse => Alert {
                title: "Server Error",
                message: "Invalid response from the server. Please try again later or contact support.",
            },
            ErrorKind::InvalidPayload => Alert {
                title: "Server Error",
                message: "The data returned from the server was invalid. Please contact support.",
            },
            ErrorKind::TransportFailure => Alert {
                title: "Server Error",
                message: "Unable to complete your request at this time. Please check your internet connection.",
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Domain(e) => {
                let alert = e.alert();
                format!("{}: {}", alert.title, alert.message)
            }
            AppError::HttpClientError(_) => {
                "Could not initialise the HTTP client. Check the TLS setup of this machine.".to_string()
            }
            AppError::IoError(e) => format!("Could not read a local file: {}", e),
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Domain(e) => match e.kind() {
                ErrorKind::TransportFailure => 2,
                ErrorKind::InvalidEndpoint
                | ErrorKind::InvalidResponse
                | ErrorKind::InvalidPayload => 1,
            },
            AppError::HttpClientError(_) | AppError::IoError(_) => 3,
            AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
