use validator::{Validate, ValidationError};

/// Characters accepted as the mandatory special character of a password.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()-+";

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// At least 8 characters with an uppercase letter, a lowercase letter, a
/// digit and one of [`PASSWORD_SPECIALS`].
pub fn password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if long_enough && has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::new("password_complexity"))
    }
}
