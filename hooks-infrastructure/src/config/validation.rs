use anyhow::{anyhow, Result};
use reqwest::Url;

pub fn validate_http_url(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }
    let url = Url::parse(value).map_err(|err| anyhow!("invalid {}: {}", field, err))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("{} must use http or https", field));
    }
    Ok(())
}

/// Database names are interpolated into DDL, so only plain identifiers pass.
pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }
    let mut chars = value.chars();
    let leading_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !leading_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(anyhow!("{} must be a plain identifier", field));
    }
    Ok(())
}
