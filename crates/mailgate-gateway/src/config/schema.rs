use std::net::SocketAddr;

use serde::Deserialize;
use mailgate_core::error::{MailgateError, Result};

use crate::policy::domains::compile_domain_set;
use crate::policy::engine::DEFAULT_DENY_MESSAGE;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailgateConfig {
    pub version: u32,

    #[serde(default)]
    pub host: HostSection,

    #[serde(default)]
    pub policy: PolicySection,
}

impl Default for MailgateConfig {
    fn default() -> Self {
        Self {
            version: 1,
            host: HostSection::default(),
            policy: PolicySection::default(),
        }
    }
}

impl MailgateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MailgateError::UnsupportedVersion);
        }

        self.host.validate()?;
        self.policy.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Upper bound for a single before-hook run (custom validators included).
    /// Unset means the host waits as long as the hook takes.
    #[serde(default)]
    pub validator_timeout_ms: Option<u64>,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            validator_timeout_ms: None,
        }
    }
}

impl HostSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if let Some(ms) = self.validator_timeout_ms {
            if !(100..=60000).contains(&ms) {
                return Err(MailgateError::BadRequest(
                    "host.validator_timeout_ms must be between 100 and 60000".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            MailgateError::BadRequest(format!(
                "host.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    /// `None` => built-in free-domain table. An explicit empty list blocks nothing.
    #[serde(default)]
    pub blocked_domains: Option<Vec<String>>,

    #[serde(default)]
    pub allowed_domains: Vec<String>,

    #[serde(default = "default_deny_message")]
    pub deny_message: String,

    #[serde(default = "default_check_on_sign_in")]
    pub check_on_sign_in: bool,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            blocked_domains: None,
            allowed_domains: Vec::new(),
            deny_message: default_deny_message(),
            check_on_sign_in: default_check_on_sign_in(),
        }
    }
}

impl PolicySection {
    pub fn validate(&self) -> Result<()> {
        if self.deny_message.trim().is_empty() {
            return Err(MailgateError::BadRequest(
                "policy.deny_message must not be blank".into(),
            ));
        }
        if let Some(blocked) = &self.blocked_domains {
            compile_domain_set(blocked).map_err(|e| {
                MailgateError::BadRequest(format!("policy.blocked_domains: {}", e.client_message()))
            })?;
        }
        compile_domain_set(&self.allowed_domains).map_err(|e| {
            MailgateError::BadRequest(format!("policy.allowed_domains: {}", e.client_message()))
        })?;
        Ok(())
    }
}

fn default_deny_message() -> String {
    DEFAULT_DENY_MESSAGE.into()
}
fn default_check_on_sign_in() -> bool {
    true
}
