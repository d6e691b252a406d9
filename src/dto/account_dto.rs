use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::password_strength;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "password_strength"))]
    pub password: String,
    pub password_confirm: String,
}

/// Password change. `email` identifies the account when nobody is logged in.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub email: Option<String>,
    pub old_pwd: String,
    #[validate(custom(function = "password_strength"))]
    pub new_pwd: String,
    pub new_pwd_confirm: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub surname: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorQuery {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str) -> RegisterForm {
        RegisterForm {
            username: "jdoe".into(),
            name: "Doe".into(),
            surname: "John".into(),
            email: "jdoe@example.com".into(),
            password: password.into(),
            password_confirm: password.into(),
        }
    }

    #[test]
    fn register_form_enforces_password_rule() {
        assert!(register("Password!123").validate().is_ok());
        let errs = register("password").validate().unwrap_err();
        assert!(errs.field_errors().contains_key("password"));
    }

    #[test]
    fn register_form_rejects_bad_email() {
        let mut form = register("Password!123");
        form.email = "not-an-email".into();
        assert!(form.validate().is_err());
    }
}
