//! Sign-in, sign-up and profile forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    /// Checked after trimming; the stored value is trimmed too.
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    /// Empty means "no avatar".
    #[validate(custom(function = "validate_avatar_url"))]
    pub avatar_url: String,
}

const USERNAME_MIN_CHARS: usize = 3;

fn validate_username(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() >= USERNAME_MIN_CHARS {
        return Ok(());
    }
    let mut error = ValidationError::new("length");
    error.message = Some("Username must be at least 3 characters".into());
    Err(error)
}

fn validate_avatar_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || url::Url::parse(value).is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("url");
    error.message = Some("Please enter a valid URL".into());
    Err(error)
}

/// First message per failing field, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, failures)| {
            let first = failures.first()?;
            let message = first
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
            Some((field.to_string(), message))
        })
        .collect()
}

/// Validate `form`, flattening failures into [`FieldErrors`].
pub fn check<F: Validate>(form: &F) -> Result<(), FieldErrors> {
    form.validate().map_err(|errors| field_errors(&errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_email_and_password_length() {
        let errors = check(&LoginForm {
            email: "not-an-email".into(),
            password: "12345".into(),
        })
        .expect_err("both fields invalid");
        assert_eq!(errors["email"], "Please enter a valid email address");
        assert_eq!(errors["password"], "Password must be at least 6 characters");

        assert!(check(&LoginForm {
            email: "reader@example.com".into(),
            password: "123456".into(),
        })
        .is_ok());
    }

    #[test]
    fn signup_confirmation_must_match() {
        let errors = check(&SignupForm {
            email: "reader@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        })
        .expect_err("mismatch");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["confirm_password"], "Passwords do not match");
    }

    #[test]
    fn profile_avatar_may_be_blank() {
        assert!(check(&ProfileForm {
            username: "ada".into(),
            avatar_url: String::new(),
        })
        .is_ok());
        let errors = check(&ProfileForm {
            username: "al".into(),
            avatar_url: "not a url".into(),
        })
        .expect_err("both invalid");
        assert_eq!(errors["username"], "Username must be at least 3 characters");
        assert_eq!(errors["avatar_url"], "Please enter a valid URL");
    }

    #[test]
    fn profile_username_is_measured_without_padding() {
        let errors = check(&ProfileForm {
            username: "  a ".into(),
            avatar_url: String::new(),
        })
        .expect_err("one visible character");
        assert_eq!(errors["username"], "Username must be at least 3 characters");

        assert!(check(&ProfileForm {
            username: " ada ".into(),
            avatar_url: String::new(),
        })
        .is_ok());
    }
}
