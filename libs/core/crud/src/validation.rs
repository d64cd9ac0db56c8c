//! Field validators for `#[validate(custom(function = ...))]`

use mongodb::bson::oid::ObjectId;
use validator::ValidationError;

/// Reference fields must hold a 24-hex ObjectId
pub fn object_id(value: &str) -> Result<(), ValidationError> {
    ObjectId::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("object_id").with_message("Invalid ObjectId".into()))
}

/// Non-negative decimal such as `12`, `12.5` or `0.99`
pub fn decimal_string(value: &str) -> Result<(), ValidationError> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let valid = digits(whole) && fraction.is_none_or(digits);

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("decimal").with_message("must be a decimal number".into()))
    }
}
