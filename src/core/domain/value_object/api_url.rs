use crate::core::domain::error::{OsnapResult, ValidationError};
use url::Url;

const MAX_URL_LENGTH: usize = 2083; // RFC 7230 practical limit
const ALLOWED_SCHEMES: [&str; 2] = ["https", "http"];

/// A validated base URL of the oVirt REST API
/// (e.g. `https://engine.example.com/ovirt-engine/api`).
///
/// The stored URL always ends with a slash so that relative endpoint paths
/// such as `vms/123/snapshots` resolve below it instead of replacing the
/// last path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Validates and normalizes the given URL.
    pub fn new(url: &str) -> Result<Self, ValidationError> {
        validate_url(url)?;
        let normalized = format!("{}/", url.trim_end_matches('/'));
        Url::parse(&normalized)
            .map(Self)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Resolves an API path (`vms`, `vms/{id}/snapshots`, ...) against the base.
    pub fn endpoint(&self, path: &str) -> OsnapResult<Url> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|e| ValidationError::Format(format!("Invalid API path '{}': {}", path, e)).into())
    }
}

/// Validates an API base URL.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Field {
            field: "api.url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed =
        Url::parse(url).map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "api.url".to_string(),
            message: "URL must contain a host".to_string(),
        });
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::Format(
            "URL must not contain a query or fragment".to_string(),
        ));
    }

    Ok(())
}
