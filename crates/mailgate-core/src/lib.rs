//! mailgate core: email domain primitives, the built-in free-domain table, and
//! the error surface shared by the gateway and its hooks.
//!
//! This crate carries no runtime dependencies so the domain helpers can be used
//! outside of any authentication pipeline.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MailgateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod email;
pub mod error;
pub mod free_domains;

pub use error::{ClientCode, MailgateError, Result};
pub use email::extract_domain;
pub use free_domains::{is_free_domain, is_free_email_domain, FREE_EMAIL_DOMAINS};
