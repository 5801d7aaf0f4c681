//! Shared application state for the mailgate host.
//!
//! Compiles the domain policy once, binds it into the hook registry, and
//! hands both to the HTTP layer behind `Arc`s.

use std::sync::Arc;
use std::time::Duration;

use mailgate_core::error::Result;

use crate::config::MailgateConfig;
use crate::hooks::{EmailDomainHook, HookRegistry, InterceptionPoint};
use crate::policy::DomainPolicy;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    hooks: Arc<HookRegistry>,
}

struct AppStateInner {
    cfg: MailgateConfig,
    policy: Arc<DomainPolicy>,
}

impl AppState {
    /// Build state from config alone (no custom validator).
    pub fn new(cfg: MailgateConfig) -> Result<Self> {
        let policy = DomainPolicy::from_config(&cfg.policy)?;

        if !cfg.policy.allowed_domains.is_empty() && cfg.policy.blocked_domains.is_some() {
            tracing::warn!("policy.blocked_domains is ignored while allowed_domains is set");
        }

        Ok(Self::with_policy(cfg, policy))
    }

    /// Build state around an already constructed policy, e.g. one carrying a
    /// custom validator. `cfg.policy` is not consulted.
    pub fn with_policy(cfg: MailgateConfig, policy: DomainPolicy) -> Self {
        let policy = Arc::new(policy);

        let hooks = HookRegistry::new()
            .with_hook_timeout(cfg.host.validator_timeout_ms.map(Duration::from_millis));
        hooks.register(Arc::new(EmailDomainHook::new(Arc::clone(&policy))));

        for point in InterceptionPoint::ALL {
            tracing::debug!(%point, hooks = ?hooks.registered(point), "before hooks bound");
        }
        tracing::info!(mode = policy.mode().as_str(), check_on_sign_in = policy.check_on_sign_in(), "domain policy installed");

        Self {
            inner: Arc::new(AppStateInner { cfg, policy }),
            hooks: Arc::new(hooks),
        }
    }

    pub fn cfg(&self) -> &MailgateConfig {
        &self.inner.cfg
    }

    pub fn policy(&self) -> Arc<DomainPolicy> {
        Arc::clone(&self.inner.policy)
    }

    pub fn hooks(&self) -> Arc<HookRegistry> {
        Arc::clone(&self.hooks)
    }
}
