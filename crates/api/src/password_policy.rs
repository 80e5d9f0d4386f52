// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy for user-account registration.

use thiserror::Error;

/// Violations of the account password policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password and confirmation differ.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,

    /// Password is shorter than the minimum length.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Too few character classes are present.
    #[error(
        "Password needs {required} of 4 character classes \
         (uppercase, lowercase, digit, symbol); it has {found}"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password equals the login or display name.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },
}

/// Account password requirements.
///
/// Defaults: at least 12 characters drawn from at least 3 of the 4
/// character classes.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
    /// How many of the 4 character classes must appear.
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 12,
            min_complexity: 3,
        }
    }
}

/// Counts the character classes a password draws from: uppercase,
/// lowercase, digit, and anything else (symbol).
fn character_classes(password: &str) -> usize {
    let classes: [bool; 4] = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    classes.into_iter().filter(|present| *present).count()
}

impl PasswordPolicy {
    /// Checks a candidate password at registration time.
    ///
    /// The password must match its confirmation, meet the length and
    /// complexity floors, and must not equal the login or display name
    /// (compared case-insensitively).
    ///
    /// # Errors
    ///
    /// Returns the first [`PasswordPolicyError`] the candidate violates.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        login_name: &str,
        display_name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.len() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let found: usize = character_classes(password);
        if found < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found,
            });
        }

        let lowered: String = password.to_lowercase();
        for (field, forbidden) in [("login_name", login_name), ("display_name", display_name)] {
            if lowered == forbidden.to_lowercase() {
                return Err(PasswordPolicyError::MatchesForbiddenField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}
