//! Email address helpers.
//!
//! Only the minimum needed to find a domain is done here; full address syntax
//! checks are left to whoever owns the sign-in form.

/// Extract the lowercase domain of `email`.
///
/// The domain is everything after the first `@`. Returns `None` when there is
/// no `@` or nothing follows it.
pub fn extract_domain(email: &str) -> Option<String> {
    let (_, domain) = email.split_once('@')?;
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_lowercase())
}
