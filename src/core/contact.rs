use crate::core::account::is_valid_email;
use crate::core::notice::UserFacing;
use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill all required fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl UserFacing for ContactError {
    fn title(&self) -> &'static str {
        match self {
            ContactError::MissingFields => "Please fill all required fields",
            ContactError::InvalidEmail => "Invalid email address",
        }
    }
}

pub fn validate(form: &ContactForm) -> Result<(), ContactError> {
    if [&form.name, &form.email, &form.message]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(ContactError::MissingFields);
    }
    if !is_valid_email(form.email.trim()) {
        return Err(ContactError::InvalidEmail);
    }
    Ok(())
}
