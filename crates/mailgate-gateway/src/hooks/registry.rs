use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use mailgate_core::error::{MailgateError, Result};

use super::point::InterceptionPoint;

/// What a before-hook sees: the point being intercepted and the request body.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub point: InterceptionPoint,
    pub body: Value,
}

impl HookContext {
    pub fn new(point: InterceptionPoint, body: Value) -> Self {
        Self { point, body }
    }
}

/// Check run before an intercepted operation completes.
/// `Ok(())` lets the request through unmodified; any error aborts it.
#[async_trait]
pub trait BeforeHook: Send + Sync {
    fn id(&self) -> &'static str;
    fn matches(&self, point: InterceptionPoint) -> bool;
    async fn before(&self, ctx: &HookContext) -> Result<()>;
}

/// Explicit map from interception point to its ordered before-hooks.
#[derive(Default)]
pub struct HookRegistry {
    before: DashMap<InterceptionPoint, Vec<Arc<dyn BeforeHook>>>,
    hook_timeout: Option<Duration>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            before: DashMap::new(),
            hook_timeout: None,
        }
    }

    /// Bound each hook run. Elapsed counts as a validator failure.
    pub fn with_hook_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.hook_timeout = timeout;
        self
    }

    /// Bind `hook` to every point it matches, after already registered hooks.
    pub fn register(&self, hook: Arc<dyn BeforeHook>) {
        for point in InterceptionPoint::ALL {
            if hook.matches(point) {
                self.before.entry(point).or_default().push(Arc::clone(&hook));
            }
        }
    }

    pub fn registered(&self, point: InterceptionPoint) -> Vec<&'static str> {
        self.before
            .get(&point)
            .map(|e| e.value().iter().map(|h| h.id()).collect())
            .unwrap_or_default()
    }

    /// Run the hooks bound to `ctx.point` in order; the first error wins.
    pub async fn run_before(&self, ctx: &HookContext) -> Result<()> {
        // Clone out so no map guard is held across an await.
        let hooks = match self.before.get(&ctx.point) {
            Some(e) => e.value().clone(),
            None => return Ok(()),
        };

        for hook in hooks {
            match self.hook_timeout {
                Some(limit) => tokio::time::timeout(limit, hook.before(ctx))
                    .await
                    .map_err(|_| {
                        MailgateError::ValidatorFailure(format!(
                            "hook {} timed out after {}ms",
                            hook.id(),
                            limit.as_millis()
                        ))
                    })??,
                None => hook.before(ctx).await?,
            }
        }
        Ok(())
    }
}
