//! Listing field rules.

use url::Url;

use bazaar_core::error::{AppError, ErrorKind};

pub const TITLE_MIN_LEN: usize = 5;
pub const TITLE_MAX_LEN: usize = 100;
pub const BODY_MIN_LEN: usize = 10;
pub const BODY_MAX_LEN: usize = 1000;
/// Highest accepted price.
pub const PRICE_MAX: f64 = 1_000_000.0;

const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

pub fn validate_title(title: &str) -> Result<(), AppError> {
    validate_text("title", title, TITLE_MIN_LEN, TITLE_MAX_LEN)
}

pub fn validate_body(body: &str) -> Result<(), AppError> {
    validate_text("body", body, BODY_MIN_LEN, BODY_MAX_LEN)
}

/// Minimum length counts the trimmed text, maximum counts the raw text.
fn validate_text(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    if trimmed.chars().count() < min {
        return Err(AppError::invalid_input(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if value.chars().count() > max {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// The URL must be absolute and end in `.png`, `.jpg` or `.jpeg` (any case).
pub fn validate_image_url(image_url: &str) -> Result<(), AppError> {
    if image_url.trim().is_empty() {
        return Err(AppError::invalid_input("image_url is required"));
    }

    Url::parse(image_url).map_err(|e| {
        AppError::with_source(
            ErrorKind::InvalidInput,
            format!("image_url is not an absolute URL: {e}"),
            e,
        )
    })?;

    let lower = image_url.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(AppError::invalid_input(
            "image_url must point to a .png, .jpg or .jpeg file",
        ));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::invalid_input("price must be greater than 0"));
    }
    if price > PRICE_MAX {
        return Err(AppError::invalid_input(format!(
            "price must not exceed {PRICE_MAX}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("Bike for sale").is_ok());
        assert!(validate_title("Bike").is_err());
        assert!(validate_title("   Bike    ").is_err());
        assert!(validate_title(&"t".repeat(100)).is_ok());
        assert!(validate_title(&"t".repeat(101)).is_err());
    }

    #[test]
    fn test_body_bounds() {
        assert!(validate_body("Barely used, great condition").is_ok());
        assert!(validate_body("too short").is_err());
        assert!(validate_body(&"b".repeat(1001)).is_err());
    }

    #[test]
    fn test_image_url_rules() {
        assert!(validate_image_url("http://x.test/a.jpg").is_ok());
        assert!(validate_image_url("https://cdn.example.com/photos/BIKE.PNG").is_ok());
        assert!(validate_image_url("https://cdn.example.com/bike.jpeg").is_ok());
        assert_eq!(
            validate_image_url("/relative/bike.png").unwrap_err().kind,
            ErrorKind::InvalidInput
        );
        assert!(validate_image_url("https://cdn.example.com/bike.gif").is_err());
        assert!(validate_image_url("").is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(1_000_000.0).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-5.0).is_err());
        assert!(validate_price(1_000_000.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }
}
