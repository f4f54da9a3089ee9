use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterlinkError {
    #[error("Failed to build request to {service}: {message}")]
    RequestBuild { service: String, message: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not decode response from {url} (HTTP {http_status}): {source}")]
    Decode {
        url: String,
        http_status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Password is {length} bytes, bcrypt accepts at most {max}")]
    PasswordTooLong { length: usize, max: usize },

    #[error("Stored password hash is malformed: {reason}")]
    InvalidPasswordHash { reason: String },

    #[error("Password does not match")]
    PasswordMismatch,

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    RequestBuild,
    Transport,
    Decode,
    Credential,
    Configuration,
}

impl InterlinkError {
    pub fn request_build(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RequestBuild {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RequestBuild { .. } => ErrorCategory::RequestBuild,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::Hashing(_)
            | Self::PasswordTooLong { .. }
            | Self::InvalidPasswordHash { .. }
            | Self::PasswordMismatch => ErrorCategory::Credential,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// True when the request never produced a response, including timeouts.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::RequestBuild => "Check the identifiers and payload passed to the call",
            ErrorCategory::Transport => {
                "Check that the peer service is reachable and the timeout is large enough"
            }
            ErrorCategory::Decode => "The peer answered with an unexpected body; check its version",
            ErrorCategory::Credential => "Check the password and the stored hash",
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
        }
    }
}

pub type Result<T> = std::result::Result<T, InterlinkError>;
