use crate::utils::error::{ReceiptError, Result};
use crate::utils::logger::LogFormat;
use reqwest::Url;
use std::net::{SocketAddr, ToSocketAddrs};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReceiptError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 驗證 `host:port` 格式，主機名稱 (如 localhost) 需可解析
pub fn validate_bind_address(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.parse::<SocketAddr>().is_ok() {
        return Ok(());
    }

    let (host, port) = value.rsplit_once(':').ok_or_else(|| {
        ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected host:port".to_string(),
        }
    })?;

    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected host:port with a numeric port".to_string(),
        });
    }

    match value.to_socket_addrs().map(|mut addrs| addrs.next().is_some()) {
        Ok(true) => Ok(()),
        _ => Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Cannot resolve host '{}'", host),
        }),
    }
}

pub fn validate_log_format(field_name: &str, value: &str) -> Result<LogFormat> {
    LogFormat::parse(value).ok_or_else(|| ReceiptError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "Unsupported format. Valid formats: compact, json".to_string(),
    })
}
