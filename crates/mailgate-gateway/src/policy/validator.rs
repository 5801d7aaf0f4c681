//! Custom validator seam.
//!
//! A validator decides allow (`true`) or deny (`false`) for a domain and fully
//! overrides the configured domain sets. Validators are always async so the
//! evaluator never branches on how a predicate happens to be written.

use std::future::Future;

use async_trait::async_trait;

use mailgate_core::error::Result;

#[async_trait]
pub trait DomainValidator: Send + Sync {
    /// `domain` is already lowercase. An `Err` means "no answer", never "deny".
    async fn validate(&self, email: &str, domain: &str) -> Result<bool>;
}

/// Adapts an async closure, e.g. one that queries a lookup service.
pub struct FnValidator<F> {
    f: F,
}

impl<F, Fut> FnValidator<F>
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> DomainValidator for FnValidator<F>
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool>> + Send + 'static,
{
    async fn validate(&self, email: &str, domain: &str) -> Result<bool> {
        (self.f)(email.to_string(), domain.to_string()).await
    }
}

/// Adapts a plain predicate.
pub struct SyncValidator<F> {
    f: F,
}

impl<F> SyncValidator<F>
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> DomainValidator for SyncValidator<F>
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    async fn validate(&self, email: &str, domain: &str) -> Result<bool> {
        Ok((self.f)(email, domain))
    }
}
