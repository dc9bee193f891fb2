use crate::errors::AppError;

const MAX_TEXT_LEN: usize = 200;
const MAX_SETTING_KEY_LEN: usize = 64;

/// Trims `value` and rejects it when blank or overly long.
pub fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Setting keys are lowercase identifiers: `[a-z0-9_]{1,64}`.
pub fn validate_setting_key(key: &str) -> Result<(), AppError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_SETTING_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Setting key '{key}' must match [a-z0-9_]{{1,{MAX_SETTING_KEY_LEN}}}"
        )))
    }
}

/// Language codes: 2 to 8 lowercase letters, optionally with a `-` region part.
pub fn normalize_language_code(code: &str) -> Result<String, AppError> {
    let code = code.trim().to_ascii_lowercase();
    let valid = (2..=8).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_lowercase() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-');
    if valid {
        Ok(code)
    } else {
        Err(AppError::Validation(format!(
            "Language code '{code}' is not a valid short code"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("title", "  Skills ").unwrap(), "Skills");
        assert!(require_text("title", "   ").is_err());
        assert!(require_text("title", &"x".repeat(201)).is_err());
    }

    #[test]
    fn test_setting_keys() {
        assert!(validate_setting_key("primary_color").is_ok());
        assert!(validate_setting_key("font2").is_ok());
        assert!(validate_setting_key("Primary-Color").is_err());
        assert!(validate_setting_key("").is_err());
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(normalize_language_code(" EN ").unwrap(), "en");
        assert_eq!(normalize_language_code("pt-br").unwrap(), "pt-br");
        assert!(normalize_language_code("e").is_err());
        assert!(normalize_language_code("en_1").is_err());
        assert!(normalize_language_code("-en").is_err());
    }
}
