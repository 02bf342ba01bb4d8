use crate::core::domain::error::ValidationError;
use std::fmt;

/// An API password (plaintext, kept in memory for basic auth only).
///
/// `Debug` output is redacted so the password never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiPassword(String);

impl ApiPassword {
    /// Validates and wraps a password.
    pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
        let password = password.into();
        validate_password(&password)?;
        Ok(Self(password))
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiPassword(***)")
    }
}

/// Validates a password.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "api.password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    if password.len() > 1024 {
        return Err(ValidationError::Format(
            "Password cannot exceed 1024 characters".to_string(),
        ));
    }
    Ok(())
}
