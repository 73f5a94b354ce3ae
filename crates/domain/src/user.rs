//! Admin account types and validation rules.
//!
//! Password rules follow the OWASP Authentication and Password Storage cheat
//! sheets.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use vitrin_core::{AppError, AppResult};

/// Validated admin login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a username from user input.
    ///
    /// Names are trimmed and lowercased; 3-64 characters of ASCII letters,
    /// digits, `.`, `_` or `-`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_lowercase();

        if !(3..=64).contains(&value.chars().count()) {
            return Err(AppError::Validation(
                "username must be between 3 and 64 characters".to_owned(),
            ));
        }

        if !value.chars().all(|character| {
            character.is_ascii_alphanumeric() || matches!(character, '.' | '_' | '-')
        }) {
            return Err(AppError::Validation(
                "username may only contain letters, digits, '.', '_' and '-'".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the normalized username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Username {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Minimum password length for admin accounts (NIST SP800-63B).
pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Maximum password length to allow passphrases (OWASP recommendation: at least 64).
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password against OWASP and NIST rules.
///
/// - Min length is 10 characters.
/// - Max length is 128 characters (protects against Argon2id DoS).
/// - Rejects common breached passwords from an embedded list.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    if is_common_password(password) {
        return Err(AppError::Validation(
            "this password is too common and has appeared in data breaches".to_owned(),
        ));
    }

    Ok(())
}

fn is_common_password(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORDS.iter().any(|entry| *entry == lowered)
}

/// Top breached passwords of at least the minimum length.
static COMMON_PASSWORDS: &[&str] = &[
    "1234567890",
    "qwertyuiop",
    "password12",
    "password123",
    "password1234",
    "iloveyou123",
    "1q2w3e4r5t",
    "1qaz2wsx3edc",
    "qwerty12345",
    "qwerty123456",
    "administrator",
    "admin12345",
    "admin123456",
    "welcome123",
    "letmein123",
    "0987654321",
    "1111111111",
    "0000000000",
    "asdfghjkl1",
    "zxcvbnm123",
];
