//! Mocked user accounts
//!
//! Registration, credential checks and profile edits operate on plain values.
//! Persisting the results is left to [`crate::store::Session`].

use crate::core::notice::UserFacing;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub password: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Please fill all required fields")]
    MissingFields,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter your password")]
    MissingPassword,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,
    #[error("Please sign in to continue")]
    NotSignedIn,
}

impl UserFacing for AccountError {
    fn title(&self) -> &'static str {
        match self {
            AccountError::MissingEmail | AccountError::MissingPassword => "Missing Information",
            AccountError::InvalidEmail => "Invalid Email",
            AccountError::InvalidCredentials => "Unable to sign in",
            AccountError::NotSignedIn => "Sign in required",
            AccountError::EmailTaken => "Error creating account",
            AccountError::MissingFields
            | AccountError::PasswordMismatch
            | AccountError::TermsNotAccepted => "Please check the form",
        }
    }
}

/// Accepts `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates a sign-up form against the already registered users.
pub fn register(users: &[User], form: SignUpForm) -> Result<User, AccountError> {
    if blank(&form.first_name)
        || blank(&form.last_name)
        || blank(&form.email)
        || form.password.is_empty()
    {
        return Err(AccountError::MissingFields);
    }
    if form.password != form.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }
    if !form.accept_terms {
        return Err(AccountError::TermsNotAccepted);
    }
    if !is_valid_email(form.email.trim()) {
        return Err(AccountError::InvalidEmail);
    }
    let email = form.email.trim().to_string();
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
        return Err(AccountError::EmailTaken);
    }

    debug!(%email, "Registering user");
    Ok(User {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email,
        phone: form.phone.trim().to_string(),
        address: form.address.trim().to_string(),
        password: form.password,
    })
}

/// Finds the registered user matching `email` and `password`.
pub fn authenticate<'a>(
    users: &'a [User],
    email: &str,
    password: &str,
) -> Result<&'a User, AccountError> {
    if email.is_empty() {
        return Err(AccountError::MissingEmail);
    }
    if password.is_empty() {
        return Err(AccountError::MissingPassword);
    }
    if !email.contains('@') {
        return Err(AccountError::InvalidEmail);
    }
    users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .ok_or(AccountError::InvalidCredentials)
}

/// Applies `form` on top of `user`. Name and email must stay non-empty and the
/// email may not belong to another registered user.
pub fn update_profile(
    users: &[User],
    user: &User,
    form: ProfileForm,
) -> Result<User, AccountError> {
    let pick = |new: Option<String>, old: &str| {
        new.map_or_else(|| old.to_string(), |v| v.trim().to_string())
    };
    let updated = User {
        first_name: pick(form.first_name, &user.first_name),
        last_name: pick(form.last_name, &user.last_name),
        email: pick(form.email, &user.email),
        phone: pick(form.phone, &user.phone),
        address: pick(form.address, &user.address),
        password: user.password.clone(),
    };
    if blank(&updated.first_name) || blank(&updated.last_name) || blank(&updated.email) {
        return Err(AccountError::MissingFields);
    }
    if !is_valid_email(&updated.email) {
        return Err(AccountError::InvalidEmail);
    }
    let taken = users.iter().any(|u| {
        !u.email.eq_ignore_ascii_case(&user.email) && u.email.eq_ignore_ascii_case(&updated.email)
    });
    if taken {
        return Err(AccountError::EmailTaken);
    }
    Ok(updated)
}
