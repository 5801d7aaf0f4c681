//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use mailgate_core::error::{MailgateError, Result};

pub use schema::{HostSection, MailgateConfig, PolicySection};

pub fn load_from_file(path: &str) -> Result<MailgateConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MailgateError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MailgateConfig> {
    let cfg: MailgateConfig = serde_yaml::from_str(s)
        .map_err(|e| MailgateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
