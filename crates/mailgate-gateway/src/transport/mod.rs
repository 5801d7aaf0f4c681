//! Transport layer modules.
//!
//! - `http`: runs before-hooks for intercepted auth requests and maps
//!   failures to client-visible responses.

pub mod http;
