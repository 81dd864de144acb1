use crate::utils::error::{AppError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses `url_str` as an absolute http(s) URL. Used for both configured base
/// URLs and every request the transport issues.
pub fn parse_http_url(url_str: &str) -> std::result::Result<Url, String> {
    if url_str.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    let url = Url::parse(url_str).map_err(|e| format!("Invalid URL format: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("Unsupported URL scheme: {}", scheme)),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    parse_http_url(url_str)
        .map(|_| ())
        .map_err(|reason| AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason,
        })
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
