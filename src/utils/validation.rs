use crate::utils::error::{EtlError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 端點必須是 http(s) URL
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field, endpoint, format!("not a URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            endpoint,
            format!("endpoint must use http or https, not {}", scheme),
        )),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "path contains null bytes"));
    }
    Ok(())
}

/// Paths that must end in one of `extensions`, e.g. the CSV export.
pub fn validate_extension(field: &str, path: &str, extensions: &[&str]) -> Result<()> {
    let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
    match extension {
        Some(ext) if extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)) => Ok(()),
        _ => Err(invalid(
            field,
            path,
            format!("expected a .{} file", extensions.join(" or .")),
        )),
    }
}

pub fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "cannot be empty"));
    }
    Ok(())
}

pub fn validate_at_least(field: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("must be at least {}", min)));
    }
    Ok(())
}

/// A share of the venue, between 0 and 1 inclusive.
pub fn validate_share(field: &str, share: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&share) {
        return Err(invalid(field, share, "must be between 0 and 1"));
    }
    Ok(())
}
