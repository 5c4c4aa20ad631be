//! Users Data

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Shortest accepted password.
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("name is required")]
    MissingName,

    #[error("a valid email address is required")]
    InvalidEmail,

    #[error("password must be at least 8 characters")]
    PasswordTooShort,
}

/// New User Data
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Trim name and email, lowercase the email and check the password length.
    ///
    /// # Errors
    ///
    /// Returns a [`UserValidationError`] for a blank name, an email without a
    /// local part and domain, or a short password.
    pub fn normalized(mut self) -> Result<Self, UserValidationError> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();

        if self.name.is_empty() {
            return Err(UserValidationError::MissingName);
        }

        let valid_email = self
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

        if !valid_email {
            return Err(UserValidationError::InvalidEmail);
        }

        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(UserValidationError::PasswordTooShort);
        }

        Ok(self)
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for NewUser {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
