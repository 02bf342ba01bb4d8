use crate::core::domain::error::ValidationError;

/// A validated oVirt username, usually qualified with its authorization
/// domain (e.g. `admin@internal`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUsername(String);

impl ApiUsername {
    /// Validates and wraps a username.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "api.user".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.len() > 128 {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed 128 characters (got {})",
            username.len()
        )));
    }
    let allowed =
        |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '@';
    if !username.chars().all(allowed) {
        return Err(ValidationError::Format(
            "Username contains invalid characters. Allowed: alphanumeric, -, _, ., @".to_string(),
        ));
    }
    if username.starts_with('@') || username.ends_with('@') {
        return Err(ValidationError::ConstraintViolation(
            "Username and domain around '@' cannot be empty".to_string(),
        ));
    }
    Ok(())
}
