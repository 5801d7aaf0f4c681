//! Policy layer (domain sets, custom validators, the evaluator).
//!
//! Compiles policy configuration into lookup sets once at startup; the
//! evaluator then answers allow/deny per request without any shared mutable
//! state.

pub mod domains;
pub mod engine;
pub mod validator;

pub use engine::{DenyKind, DomainPolicy, DomainPolicyBuilder, PolicyDecision, RuleMode};
pub use validator::{DomainValidator, FnValidator, SyncValidator};
