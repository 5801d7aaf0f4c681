use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use mailgate_core::error::{MailgateError, Result};

use super::point::InterceptionPoint;
use super::registry::{BeforeHook, HookContext};
use crate::policy::DomainPolicy;

/// Runs the domain policy over the `email` field of the request body.
pub struct EmailDomainHook {
    policy: Arc<DomainPolicy>,
}

impl EmailDomainHook {
    pub fn new(policy: Arc<DomainPolicy>) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl BeforeHook for EmailDomainHook {
    fn id(&self) -> &'static str {
        "email-domain-policy"
    }

    fn matches(&self, point: InterceptionPoint) -> bool {
        !point.is_sign_in() || self.policy.check_on_sign_in()
    }

    async fn before(&self, ctx: &HookContext) -> Result<()> {
        let email = email_field(&ctx.body)?;
        let decision = self.policy.evaluate(email).await.map_err(|e| {
            tracing::warn!(point = %ctx.point, error = %e, "email domain check could not decide");
            e
        })?;
        decision.into_result()
    }
}

// Missing or null => absent. Anything that is not a string has no domain.
fn email_field(body: &Value) -> Result<Option<&str>> {
    match body.get("email") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(MailgateError::MalformedEmail),
    }
}
