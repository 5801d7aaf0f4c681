//! Interception binding.
//!
//! The host resolves an [`InterceptionPoint`] per request and runs every
//! before-hook registered for it. The email domain policy is one such hook.

pub mod email_domain;
pub mod point;
pub mod registry;

pub use email_domain::EmailDomainHook;
pub use point::InterceptionPoint;
pub use registry::{BeforeHook, HookContext, HookRegistry};
