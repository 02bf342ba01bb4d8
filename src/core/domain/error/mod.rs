use std::time::Duration;
use thiserror::Error;

/// The main error type for osnap operations.
///
/// This enum represents all possible errors that can occur while talking to
/// the oVirt API, loading configuration, or driving a snapshot through its
/// lifecycle. Callers decide whether an error is fatal for the run or only
/// for the VM it belongs to.
#[derive(Error, Debug)]
pub enum OsnapError {
    /// Represents transport failures (DNS, TLS, refused connections, ...)
    ///
    /// # Fields
    /// * `0` - A description of what went wrong while sending the request
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents a non-success HTTP status returned by the API
    ///
    /// The display form is the plain status line (e.g. `409 Conflict`).
    ///
    /// # Fields
    /// * `kind` - Classification of the status, derived once by the client
    /// * `status` - The numeric HTTP status code
    /// * `reason` - The canonical reason phrase or response text
    #[error("{status} {reason}")]
    Api {
        kind: ApiErrorKind,
        status: u16,
        reason: String,
    },

    /// Represents XML payloads that could not be encoded or decoded
    ///
    /// # Fields
    /// * `0` - Details reported by the XML (de)serializer
    #[error("XML error: {0}")]
    Xml(String),

    /// Represents configuration loading failures
    ///
    /// # Fields
    /// * `0` - A description of the configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents validation failures with detailed context
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The cluster filter did not match any cluster known to the API
    #[error("Unknown cluster {0}")]
    ClusterNotFound(String),

    /// The API accepted a snapshot request but did not return an identifier
    #[error("Snapshot job for VM {vm} was created without an id")]
    MissingSnapshotId { vm: String },

    /// The snapshot reached a terminal failure status
    #[error("Snapshot ended with status '{0}'")]
    SnapshotFailed(String),

    /// The snapshot did not reach a terminal status within the poll timeout
    #[error("Snapshot {snapshot} did not finish within {waited:?}")]
    SnapshotTimeout { snapshot: String, waited: Duration },

    /// Every delete attempt was answered with a conflict
    #[error("Max retries reached after {attempts} attempts")]
    MaxRetriesReached { attempts: u32 },
}

impl OsnapError {
    /// Returns the API error kind if this error came from an HTTP status.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            OsnapError::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if the remote reported a transient state conflict.
    pub fn is_conflict(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Conflict)
    }
}

/// Classification of HTTP error statuses returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// `409 Conflict`: the resource is locked by another operation.
    Conflict,
    /// `404 Not Found`.
    NotFound,
    /// `401 Unauthorized` or `403 Forbidden`.
    Unauthorized,
    /// Any `5xx` status.
    Server,
    /// Any other non-success status.
    Other,
}

impl ApiErrorKind {
    /// Derives the kind from a numeric HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            409 => ApiErrorKind::Conflict,
            404 => ApiErrorKind::NotFound,
            401 | 403 => ApiErrorKind::Unauthorized,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with an OsnapError
pub type OsnapResult<T> = Result<T, OsnapError>;
