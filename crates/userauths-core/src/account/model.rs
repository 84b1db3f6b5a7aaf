//! Account domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::identity::{CredentialHolder, LoginIdentity};
use crate::error::{Result, UserAuthsError};
use crate::fields::{
    MAX_EMAIL_LENGTH, MAX_FULL_NAME_LENGTH, MAX_PHONE_LENGTH, MAX_USERNAME_LENGTH, check_length,
    check_optional_length, is_blank,
};
use crate::ids::AccountId;

/// The authentication identity record.
///
/// `email` is the login identifier; `username` is a unique handle that
/// defaults to the email local-part. Both are unique across accounts, which
/// the repository enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the repository on first insert.
    pub id: Option<AccountId>,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// Opaque hash produced by an external password hasher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl Account {
    /// Creates an unsaved account with only the login email set.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            username: String::new(),
            email: email.into(),
            full_name: None,
            phone: None,
            password_hash: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// The part of `email` before the `@`.
    pub fn local_part(&self) -> Result<&str> {
        email_local_part(&self.email)
    }

    /// Runs the save-time fix-ups, then checks field constraints.
    ///
    /// A blank `full_name` or `username` becomes the email local-part.
    /// Explicit values are never touched. Fails with `EmailFormat` before
    /// anything is modified when the email is malformed.
    pub fn prepare_for_save(&mut self) -> Result<()> {
        let local_part = self.local_part()?.to_string();

        if is_blank(self.full_name.as_deref()) {
            self.full_name = Some(local_part.clone());
        }
        if self.username.is_empty() {
            self.username = local_part;
        }

        self.validate()
    }

    /// Field-level constraints only; uniqueness is a storage concern.
    pub fn validate(&self) -> Result<()> {
        check_length("email", &self.email, MAX_EMAIL_LENGTH)?;
        check_length("username", &self.username, MAX_USERNAME_LENGTH)?;
        check_optional_length("full_name", self.full_name.as_deref(), MAX_FULL_NAME_LENGTH)?;
        check_optional_length("phone", self.phone.as_deref(), MAX_PHONE_LENGTH)?;
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

impl LoginIdentity for Account {
    fn login_identifier(&self) -> &str {
        &self.email
    }
}

impl CredentialHolder for Account {
    fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
    }
}

/// Splits `email` on `@` and returns the part before it.
///
/// The address must contain exactly one `@` with a non-empty local part.
pub fn email_local_part(email: &str) -> Result<&str> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(_domain), None) if !local.is_empty() => Ok(local),
        _ => Err(UserAuthsError::email_format(email)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_derive_from_local_part() {
        let mut account = Account::new("bob@example.com");
        account.prepare_for_save().unwrap();

        assert_eq!(account.username, "bob");
        assert_eq!(account.full_name.as_deref(), Some("bob"));
    }

    #[test]
    fn test_empty_string_full_name_counts_as_blank() {
        let mut account = Account::new("carol@example.org").with_full_name("");
        account.prepare_for_save().unwrap();

        assert_eq!(account.full_name.as_deref(), Some("carol"));
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let mut account = Account::new("bob@example.com")
            .with_username("bobby")
            .with_full_name("Robert Tables");
        account.prepare_for_save().unwrap();

        assert_eq!(account.username, "bobby");
        assert_eq!(account.full_name.as_deref(), Some("Robert Tables"));
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let mut account = Account::new("dave@example.com");
        account.prepare_for_save().unwrap();
        let first = account.clone();
        account.prepare_for_save().unwrap();

        assert_eq!(account, first);
    }

    #[test]
    fn test_malformed_email_fails_without_mutation() {
        let mut account = Account::new("not-an-email");
        let err = account.prepare_for_save().unwrap_err();

        assert!(err.is_email_format());
        assert!(account.username.is_empty());
        assert!(account.full_name.is_none());
    }

    #[test]
    fn test_local_part_rules() {
        assert_eq!(email_local_part("a@b").unwrap(), "a");
        assert_eq!(email_local_part("first.last@example.com").unwrap(), "first.last");
        assert!(email_local_part("a@b@c").is_err());
        assert!(email_local_part("@example.com").is_err());
        assert!(email_local_part("").is_err());
    }

    #[test]
    fn test_long_phone_is_rejected() {
        let mut account = Account::new("eve@example.com").with_phone("+1 555 0100 0100 99");
        let err = account.prepare_for_save().unwrap_err();

        assert_eq!(
            err,
            UserAuthsError::invalid_field("phone", "19 characters exceeds the maximum of 15")
        );
    }

    #[test]
    fn test_display_is_email() {
        let account = Account::new("bob@example.com").with_full_name("Bob");
        assert_eq!(account.to_string(), "bob@example.com");
        assert_eq!(account.login_identifier(), "bob@example.com");
    }

    #[test]
    fn test_credential_slot() {
        let mut account = Account::new("bob@example.com");
        assert!(!account.has_usable_password());

        account.set_password_hash("argon2$opaque".to_string());
        assert_eq!(account.password_hash(), Some("argon2$opaque"));
        assert!(account.has_usable_password());
    }
}
