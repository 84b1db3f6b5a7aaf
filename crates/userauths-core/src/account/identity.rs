//! Capabilities an authentication backend needs from an account.
//!
//! Accounts expose these through traits rather than a framework base type,
//! so any record can serve as a login subject.

/// A record that can be looked up by a login identifier.
pub trait LoginIdentity {
    fn login_identifier(&self) -> &str;
}

/// A record that carries a password credential.
///
/// Hashing and verification happen elsewhere; the holder only stores the
/// opaque result.
pub trait CredentialHolder {
    fn password_hash(&self) -> Option<&str>;

    fn set_password_hash(&mut self, hash: String);

    fn has_usable_password(&self) -> bool {
        self.password_hash().is_some_and(|hash| !hash.is_empty())
    }
}
