use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use mailgate_core::email::extract_domain;
use mailgate_core::error::{MailgateError, Result, MALFORMED_EMAIL_MESSAGE};

use super::domains::{builtin_blocklist, compile_domain_set};
use super::validator::DomainValidator;
use crate::config::schema::PolicySection;

pub const DEFAULT_DENY_MESSAGE: &str =
    "Please use your corporate email address. Free email providers are not allowed.";

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyKind {
    /// No domain could be extracted. Independent of configuration.
    MalformedEmail,
    /// A rule rejected the domain.
    PolicyDenied,
}

/// Decision from policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny { kind: DenyKind, msg: String },
}

impl PolicyDecision {
    fn malformed() -> Self {
        PolicyDecision::Deny {
            kind: DenyKind::MalformedEmail,
            msg: MALFORMED_EMAIL_MESSAGE.to_string(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    /// Turn a denial into the error the host surfaces as "bad request".
    pub fn into_result(self) -> Result<()> {
        match self {
            PolicyDecision::Allow => Ok(()),
            PolicyDecision::Deny { kind: DenyKind::MalformedEmail, .. } => {
                Err(MailgateError::MalformedEmail)
            }
            PolicyDecision::Deny { kind: DenyKind::PolicyDenied, msg } => {
                Err(MailgateError::PolicyDenied(msg))
            }
        }
    }
}

/// Which rule decides for a given policy. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    CustomValidator,
    Allowlist,
    Blocklist,
}

impl RuleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleMode::CustomValidator => "custom_validator",
            RuleMode::Allowlist => "allowlist",
            RuleMode::Blocklist => "blocklist",
        }
    }
}

/// Deployment-wide email domain policy.
/// Construct once at startup, then share via Arc.
pub struct DomainPolicy {
    blocked: HashSet<String>,
    allowed: HashSet<String>,
    validator: Option<Arc<dyn DomainValidator>>,
    deny_message: String,
    check_on_sign_in: bool,
}

impl fmt::Debug for DomainPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainPolicy")
            .field("mode", &self.mode())
            .field("blocked", &self.blocked.len())
            .field("allowed", &self.allowed.len())
            .field("deny_message", &self.deny_message)
            .field("check_on_sign_in", &self.check_on_sign_in)
            .finish()
    }
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self {
            blocked: builtin_blocklist(),
            allowed: HashSet::new(),
            validator: None,
            deny_message: DEFAULT_DENY_MESSAGE.to_string(),
            check_on_sign_in: true,
        }
    }
}

impl DomainPolicy {
    pub fn builder() -> DomainPolicyBuilder {
        DomainPolicyBuilder::default()
    }

    /// Compile the YAML policy section. Custom validators are attached in code.
    pub fn from_config(section: &PolicySection) -> Result<Self> {
        let mut b = Self::builder()
            .allowed_domains(&section.allowed_domains)
            .deny_message(section.deny_message.clone())
            .check_on_sign_in(section.check_on_sign_in);
        if let Some(blocked) = &section.blocked_domains {
            b = b.blocked_domains(blocked);
        }
        b.build()
    }

    pub fn mode(&self) -> RuleMode {
        if self.validator.is_some() {
            RuleMode::CustomValidator
        } else if !self.allowed.is_empty() {
            RuleMode::Allowlist
        } else {
            RuleMode::Blocklist
        }
    }

    pub fn deny_message(&self) -> &str {
        &self.deny_message
    }
    pub fn check_on_sign_in(&self) -> bool {
        self.check_on_sign_in
    }
    pub fn blocked_domains(&self) -> &HashSet<String> {
        &self.blocked
    }
    pub fn allowed_domains(&self) -> &HashSet<String> {
        &self.allowed
    }

    /// Evaluate one submitted address.
    ///
    /// An absent or empty email passes: whether the field is required is the
    /// host's concern. Rules are tried in precedence order (custom validator,
    /// allowlist, blocklist) and only the first applicable one is consulted.
    /// A validator error is returned as `ValidatorFailure`, never as a decision.
    pub async fn evaluate(&self, email: Option<&str>) -> Result<PolicyDecision> {
        let email = match email {
            Some(e) if !e.is_empty() => e,
            _ => return Ok(PolicyDecision::Allow),
        };
        tracing::debug!(%email, "checking email domain");

        let Some(domain) = extract_domain(email) else {
            tracing::debug!(%email, "no domain in address");
            return Ok(PolicyDecision::malformed());
        };

        let mode = self.mode();
        let allowed = match &self.validator {
            Some(v) => v.validate(email, &domain).await.map_err(|e| match e {
                MailgateError::ValidatorFailure(_) => e,
                other => MailgateError::ValidatorFailure(other.to_string()),
            })?,
            None if mode == RuleMode::Allowlist => self.allowed.contains(&domain),
            None => !self.blocked.contains(&domain),
        };

        tracing::debug!(%domain, mode = mode.as_str(), allowed, "email domain evaluated");

        if allowed {
            Ok(PolicyDecision::Allow)
        } else {
            Ok(PolicyDecision::Deny {
                kind: DenyKind::PolicyDenied,
                msg: self.deny_message.clone(),
            })
        }
    }
}

/// Builder for [`DomainPolicy`]. Unset options take the documented defaults.
#[derive(Default)]
pub struct DomainPolicyBuilder {
    blocked: Option<Vec<String>>,
    allowed: Vec<String>,
    validator: Option<Arc<dyn DomainValidator>>,
    deny_message: Option<String>,
    check_on_sign_in: Option<bool>,
}

impl DomainPolicyBuilder {
    /// Replace the built-in blocklist.
    pub fn blocked_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked = Some(domains.into_iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    /// A non-empty allowlist switches the policy into allowlist mode.
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed = domains.into_iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn validator<V: DomainValidator + 'static>(self, v: V) -> Self {
        self.shared_validator(Arc::new(v))
    }

    pub fn shared_validator(mut self, v: Arc<dyn DomainValidator>) -> Self {
        self.validator = Some(v);
        self
    }

    pub fn deny_message(mut self, msg: impl Into<String>) -> Self {
        self.deny_message = Some(msg.into());
        self
    }

    pub fn check_on_sign_in(mut self, on: bool) -> Self {
        self.check_on_sign_in = Some(on);
        self
    }

    pub fn build(self) -> Result<DomainPolicy> {
        let blocked = match &self.blocked {
            Some(raw) => compile_domain_set(raw)?,
            None => builtin_blocklist(),
        };
        let allowed = compile_domain_set(&self.allowed)?;

        let deny_message = self
            .deny_message
            .unwrap_or_else(|| DEFAULT_DENY_MESSAGE.to_string());
        if deny_message.trim().is_empty() {
            return Err(MailgateError::BadRequest("deny message must not be blank".into()));
        }

        Ok(DomainPolicy {
            blocked,
            allowed,
            validator: self.validator,
            deny_message,
            check_on_sign_in: self.check_on_sign_in.unwrap_or(true),
        })
    }
}
