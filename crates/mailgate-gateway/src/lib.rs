//! mailgate gateway library entry.
//!
//! Wires the config loader, the domain policy engine, and the interception
//! hooks into a small HTTP host. It is intended to be consumed by the binary
//! (`main.rs`), by integration tests, and by hosts embedding the policy
//! directly.

pub mod app_state;
pub mod config;
pub mod hooks;
pub mod policy;
pub mod router;
pub mod transport;
