pub mod session;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::validation::{self, MISMATCH};

// Re-export necessary items
pub use session::Session;

/// Credentials sent to the login endpoint.
///
/// Error codes: `email` → `required` | `invalid`; `password` → `required` | `min_length`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validation::email")]
    pub email: String,
    #[validate(custom = "validation::password")]
    pub password: String,
    /// Optional "remember me" flag, forwarded as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember: Option<bool>,
}

/// The registration form as filled in by the user.
///
/// Error codes: `name` → `required`; `email` → `required` | `invalid`;
/// `password` → `required` | `min_length`; `confirm_password` → `required` | `mismatch`;
/// `accept_terms` → `required`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(custom = "validation::required")]
    pub name: String,
    #[validate(custom = "validation::email")]
    pub email: String,
    #[validate(custom = "validation::password")]
    pub password: String,
    #[validate(custom = "validation::required")]
    pub confirm_password: String,
    /// Checked in [`RegisterForm::check`].
    pub accept_terms: bool,
}

/// Body sent to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    /// Runs the field rules plus the terms and password confirmation checks.
    ///
    /// A mismatch is reported on `confirm_password` alongside any field errors.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = validation::collect(self.validate());
        if let Err(error) = validation::accepted(self.accept_terms) {
            errors.add("accept_terms", error);
        }
        if !self.confirm_password.is_empty() && self.password != self.confirm_password {
            errors.add("confirm_password", validator::ValidationError::new(MISMATCH));
        }
        validation::finish(errors)
    }

    pub fn into_request(self) -> Result<RegisterRequest, ValidationErrors> {
        self.check()?;
        Ok(RegisterRequest {
            name: self.name,
            email: self.email,
            password: self.password,
            password_confirmation: self.confirm_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{first_code, INVALID, MIN_LENGTH, REQUIRED};
    use serde_json::json;
    use validator::Validate;

    fn valid_register() -> RegisterForm {
        RegisterForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            accept_terms: true,
        }
    }

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            remember: None,
        };
        assert!(valid_login.validate().is_ok());

        let empty_login = LoginRequest::default();
        let errors = empty_login.validate().unwrap_err();
        assert_eq!(first_code(&errors, "email").as_deref(), Some(REQUIRED));
        assert_eq!(first_code(&errors, "password").as_deref(), Some(REQUIRED));

        let invalid_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "123".to_string(),
            remember: Some(true),
        };
        let errors = invalid_login.validate().unwrap_err();
        assert_eq!(first_code(&errors, "email").as_deref(), Some(INVALID));
        assert_eq!(first_code(&errors, "password").as_deref(), Some(MIN_LENGTH));
    }

    #[test]
    fn test_login_request_serialization() {
        let login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            remember: None,
        };
        assert_eq!(
            serde_json::to_value(&login).unwrap(),
            json!({ "email": "test@example.com", "password": "password123" })
        );
    }

    #[test]
    fn test_register_form_validation() {
        assert!(valid_register().check().is_ok());

        let mismatched = RegisterForm {
            confirm_password: "password124".to_string(),
            ..valid_register()
        };
        let errors = mismatched.check().unwrap_err();
        assert_eq!(first_code(&errors, "confirm_password").as_deref(), Some(MISMATCH));

        let no_terms = RegisterForm {
            accept_terms: false,
            ..valid_register()
        };
        let errors = no_terms.check().unwrap_err();
        assert_eq!(first_code(&errors, "accept_terms").as_deref(), Some(REQUIRED));

        let errors = RegisterForm::default().check().unwrap_err();
        for field in ["name", "email", "password", "confirm_password", "accept_terms"] {
            assert_eq!(first_code(&errors, field).as_deref(), Some(REQUIRED), "{}", field);
        }
    }

    #[test]
    fn test_register_request_body() {
        let request = valid_register().into_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "password123",
                "password_confirmation": "password123"
            })
        );
    }
}
