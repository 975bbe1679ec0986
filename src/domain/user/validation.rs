//! User validation rules
//!
//! Explicit per-field checks evaluated by `validate_new_user` and
//! `validate_user_update`, which collect every violation instead of
//! stopping at the first one.

use thiserror::Error;
use validator::ValidateEmail;

/// A single field-level rule violation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserFieldError {
    #[error("username is required")]
    UsernameRequired,

    #[error("username must be at least {0} characters")]
    UsernameTooShort(usize),

    #[error("username must be at most {0} characters")]
    UsernameTooLong(usize),

    #[error("email is required")]
    EmailRequired,

    #[error("email '{0}' is not a valid email address")]
    EmailInvalid(String),

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("password must be at most {0} characters")]
    PasswordTooLong(usize),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Every rule violation found in a request, in field order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<UserFieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: UserFieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[UserFieldError] {
        &self.0
    }

    /// Ok when no rule was violated, otherwise the full list
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn check(&mut self, result: Result<(), UserFieldError>) {
        if let Err(error) = result {
            self.push(error);
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a username
///
/// Rules: length 3-50 (character set is unrestricted, display names are
/// allowed as usernames)
pub fn validate_username(username: &str) -> Result<(), UserFieldError> {
    let length = username.chars().count();

    if length < MIN_USERNAME_LENGTH {
        return Err(UserFieldError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if length > MAX_USERNAME_LENGTH {
        return Err(UserFieldError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address syntactically
pub fn validate_email(email: &str) -> Result<(), UserFieldError> {
    if !email.validate_email() {
        return Err(UserFieldError::EmailInvalid(email.to_string()));
    }

    Ok(())
}

/// Validate a plaintext password
///
/// Rules: minimum 6 characters, maximum 128
pub fn validate_password(password: &str) -> Result<(), UserFieldError> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(UserFieldError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(UserFieldError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate a creation payload, collecting every violation.
///
/// All three fields are required on create; an empty value reports the
/// required-field error rather than the length/format one.
pub fn validate_new_user(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if username.is_empty() {
        errors.push(UserFieldError::UsernameRequired);
    } else {
        errors.check(validate_username(username));
    }

    if email.is_empty() {
        errors.push(UserFieldError::EmailRequired);
    } else {
        errors.check(validate_email(email));
    }

    if password.is_empty() {
        errors.push(UserFieldError::PasswordRequired);
    } else {
        errors.check(validate_password(password));
    }

    errors.into_result()
}

/// Validate an update payload, collecting every violation.
///
/// Only fields present in the request are validated; the record already
/// exists, so absent fields keep their stored values.
pub fn validate_user_update(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Some(username) = username {
        errors.check(validate_username(username));
    }

    if let Some(email) = email {
        errors.check(validate_email(email));
    }

    if let Some(password) = password {
        errors.check(validate_password(password));
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Username tests

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("jdoe").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("john doe").is_ok());
        assert!(validate_username(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(UserFieldError::UsernameTooShort(3))
        );
    }

    #[test]
    fn test_username_too_long() {
        assert_eq!(
            validate_username(&"a".repeat(51)),
            Err(UserFieldError::UsernameTooLong(50))
        );
    }

    // Email tests

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("j@example.com").is_ok());
        assert!(validate_email("john.doe+tag@sub.example.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(UserFieldError::EmailInvalid("not-an-email".to_string()))
        );
        assert!(validate_email("missing@tld@double.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    // Password tests

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("12345"),
            Err(UserFieldError::PasswordTooShort(6))
        );
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        // "héllö" is 5 characters but 7 bytes
        assert_eq!(
            validate_password("héllö"),
            Err(UserFieldError::PasswordTooShort(6))
        );
        assert!(validate_password("héllös").is_ok());
    }

    #[test]
    fn test_password_too_long() {
        assert_eq!(
            validate_password(&"a".repeat(129)),
            Err(UserFieldError::PasswordTooLong(128))
        );
    }

    // Create-context tests

    #[test]
    fn test_validate_new_user_ok() {
        assert!(validate_new_user("jdoe", "j@example.com", "secret").is_ok());
    }

    #[test]
    fn test_validate_new_user_collects_every_violation() {
        let errors = validate_new_user("", "", "").unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                UserFieldError::UsernameRequired,
                UserFieldError::EmailRequired,
                UserFieldError::PasswordRequired,
            ]
        );
    }

    #[test]
    fn test_validate_new_user_mixed_violations() {
        let errors = validate_new_user("ab", "bad-email", "secret").unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                UserFieldError::UsernameTooShort(3),
                UserFieldError::EmailInvalid("bad-email".to_string()),
            ]
        );
    }

    #[test]
    fn test_validation_errors_display_joins_messages() {
        let errors = validate_new_user("", "j@example.com", "").unwrap_err();
        let message = errors.to_string();

        assert!(message.contains("username is required"));
        assert!(message.contains("password is required"));
        assert!(message.contains("; "));
    }

    // Update-context tests

    #[test]
    fn test_validate_user_update_absent_fields_pass() {
        assert!(validate_user_update(None, None, None).is_ok());
    }

    #[test]
    fn test_validate_user_update_present_fields_checked() {
        let errors =
            validate_user_update(Some("ab"), None, Some("123")).unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                UserFieldError::UsernameTooShort(3),
                UserFieldError::PasswordTooShort(6),
            ]
        );
    }

    #[test]
    fn test_validate_user_update_ok() {
        assert!(validate_user_update(None, Some("new@example.com"), None).is_ok());
    }
}
