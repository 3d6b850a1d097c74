use crate::utils::error::{AppError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> AppError {
    AppError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 驗證資料庫位址：必須是 http(s) 並帶主機名稱
///
/// The REST prefix is appended to this URL, so query strings and fragments
/// are rejected.
pub fn validate_store_url(field: &str, raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(invalid(field, raw, "store URL is empty"));
    }

    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            raw,
            format!("scheme '{}' is not http or https", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field, raw, "store URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(field, raw, "store URL must not carry a query or fragment"));
    }
    Ok(())
}

/// 快照檔必須是 `.json`
pub fn validate_snapshot_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() || path.contains('\0') {
        return Err(invalid(field, path, "snapshot path is empty or malformed"));
    }

    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(invalid(field, path, "snapshot must be a .json file"));
    }
    Ok(())
}

pub fn validate_min_seconds(field: &str, seconds: u64, min: u64) -> Result<()> {
    if seconds < min {
        return Err(invalid(field, seconds, format!("at least {}s required", min)));
    }
    Ok(())
}

pub fn require<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AppError::MissingConfigError {
        field: field.to_string(),
    })
}

/// Blank values are reported without echoing them, since the field may hold
/// a key.
pub fn validate_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "<blank>", "must not be blank"));
    }
    Ok(())
}

pub fn validate_temperature(field: &str, value: f64) -> Result<()> {
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(field, value, "sampling temperature must be within 0.0..=2.0"));
    }
    Ok(())
}
