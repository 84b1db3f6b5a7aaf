//! Inputs for registration and patch-style edits.
//!
//! In every change set `None` leaves a field alone and `Some(value)`
//! overwrites it. An empty string clears an optional field, which for
//! `full_name`, `username` and `image` means the save-time default is
//! derived again on the next persist.

use userauths_core::account::Account;
use userauths_core::fields::non_empty;
use userauths_core::profile::Profile;

/// Data collected by a sign-up form.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl NewAccount {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn into_account(self) -> Account {
        Account {
            id: None,
            username: self.username.unwrap_or_default(),
            email: self.email,
            full_name: self.full_name.and_then(non_empty),
            phone: self.phone.and_then(non_empty),
            password_hash: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl AccountChanges {
    pub fn apply_to(self, account: &mut Account) {
        if let Some(username) = self.username {
            account.username = username;
        }
        if let Some(email) = self.email {
            account.email = email;
        }
        if let Some(full_name) = self.full_name {
            account.full_name = non_empty(full_name);
        }
        if let Some(phone) = self.phone {
            account.phone = non_empty(phone);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub image: Option<String>,
    pub full_name: Option<String>,
    pub about: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        [
            &self.image,
            &self.full_name,
            &self.about,
            &self.gender,
            &self.country,
            &self.state,
            &self.address,
        ]
        .iter()
        .all(|field| field.is_none())
    }

    pub fn apply_to(self, profile: &mut Profile) {
        overwrite(&mut profile.image, self.image);
        overwrite(&mut profile.full_name, self.full_name);
        overwrite(&mut profile.about, self.about);
        overwrite(&mut profile.gender, self.gender);
        overwrite(&mut profile.country, self.country);
        overwrite(&mut profile.state, self.state);
        overwrite(&mut profile.address, self.address);
    }
}

fn overwrite(field: &mut Option<String>, change: Option<String>) {
    if let Some(value) = change {
        *field = non_empty(value);
    }
}
