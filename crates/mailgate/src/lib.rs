//! Top-level facade crate for mailgate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use mailgate_core::*;
}

pub mod gateway {
    pub use mailgate_gateway::*;
}
