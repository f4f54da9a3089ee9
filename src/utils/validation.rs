use crate::utils::error::{InterlinkError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(InterlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(InterlinkError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(InterlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(InterlinkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// An empty identifier would address a different route on the peer.
pub fn require_identifier(service: &str, field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InterlinkError::request_build(
            service,
            format!("{} cannot be empty or whitespace-only", field_name),
        ));
    }
    // URL normalization drops these as path segments.
    if is_dot_segment(value) {
        return Err(InterlinkError::request_build(
            service,
            format!("{} cannot be '{}'", field_name, value),
        ));
    }
    Ok(())
}

pub(crate) fn is_dot_segment(value: &str) -> bool {
    matches!(value, "." | "..")
}
