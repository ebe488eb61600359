//! Form validation for the login and registration screens.
//!
//! Validation runs in the reducer on submit. A form that fails validation
//! never reaches the backend; the per-field messages land in state for the
//! UI to render next to the inputs.

use crate::state::{LoginForm, RegisterForm};

/// Per-field validation messages. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Email field message.
    pub email: Option<String>,
    /// Password field message.
    pub password: Option<String>,
    /// First name field message.
    pub first_name: Option<String>,
    /// Last name field message.
    pub last_name: Option<String>,
    /// Phone number field message.
    pub phone_number: Option<String>,
}

impl FieldErrors {
    /// Whether every field passed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
    }
}

/// Validate the login form: email well-formed, password present.
#[must_use]
pub fn validate_login(form: &LoginForm) -> FieldErrors {
    FieldErrors {
        email: email_error(&form.email),
        password: if form.password.is_empty() {
            Some("Password is required".to_string())
        } else {
            None
        },
        ..FieldErrors::default()
    }
}

/// Validate the registration form.
///
/// On top of the login rules, the password needs at least 8 characters,
/// names are required and capped at 50, and the optional phone number is
/// capped at 20.
#[must_use]
pub fn validate_register(form: &RegisterForm) -> FieldErrors {
    FieldErrors {
        email: email_error(&form.email),
        password: password_error(&form.password),
        first_name: name_error(&form.first_name, "First name"),
        last_name: name_error(&form.last_name, "Last name"),
        phone_number: if form.phone_number.chars().count() > 20 {
            Some("Phone number must be less than 20 characters".to_string())
        } else {
            None
        },
    }
}

fn email_error(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Email is required".to_string());
    }
    if !well_formed_email(value) {
        return Some("Please enter a valid email".to_string());
    }
    None
}

fn password_error(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Password is required".to_string());
    }
    if value.chars().count() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    None
}

fn name_error(value: &str, label: &str) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{label} is required"));
    }
    if value.chars().count() > 50 {
        return Some(format!("{label} must be less than 50 characters"));
    }
    None
}

// One `@` with something on both sides and no whitespace. The backend does
// the real verification by sending mail there.
fn well_formed_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            email: "user@example.com".to_string(),
            password: "longenough".to_string(),
            first_name: "Mila".to_string(),
            last_name: "Petrov".to_string(),
            phone_number: String::new(),
        }
    }

    #[test]
    fn test_login_accepts_filled_form() {
        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate_login(&form).is_clean());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
        assert_eq!(errors.password.as_deref(), Some("Password is required"));
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        let errors = validate_login(&form);
        assert_eq!(errors.email.as_deref(), Some("Please enter a valid email"));
    }

    #[test]
    fn test_login_does_not_enforce_password_length() {
        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(validate_login(&form).is_clean());
    }

    #[test]
    fn test_register_accepts_filled_form() {
        assert!(validate_register(&register_form()).is_clean());
    }

    #[test]
    fn test_register_enforces_password_length() {
        let form = RegisterForm {
            password: "seven77".to_string(),
            ..register_form()
        };
        let errors = validate_register(&form);
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_register_caps_name_length() {
        let form = RegisterForm {
            first_name: "x".repeat(51),
            ..register_form()
        };
        let errors = validate_register(&form);
        assert_eq!(
            errors.first_name.as_deref(),
            Some("First name must be less than 50 characters")
        );
    }

    #[test]
    fn test_register_phone_is_optional_but_capped() {
        assert!(validate_register(&register_form()).is_clean());

        let form = RegisterForm {
            phone_number: "0".repeat(21),
            ..register_form()
        };
        let errors = validate_register(&form);
        assert_eq!(
            errors.phone_number.as_deref(),
            Some("Phone number must be less than 20 characters")
        );
    }

    #[test]
    fn test_email_with_spaces_is_rejected() {
        let form = LoginForm {
            email: "user @example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate_login(&form).email.is_some());
    }
}
