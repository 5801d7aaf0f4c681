//! Domain set compilation.
//!
//! Entries are trimmed and lowercased so lookups can compare against the
//! already-normalized domain of an incoming address.

use std::collections::HashSet;

use mailgate_core::error::{MailgateError, Result};
use mailgate_core::FREE_EMAIL_DOMAINS;

/// Normalize one configured domain entry.
pub fn normalize_entry(raw: &str) -> Result<String> {
    let d = raw.trim();
    if d.is_empty() {
        return Err(MailgateError::BadRequest("empty domain entry".into()));
    }
    if d.contains('@') || d.chars().any(char::is_whitespace) {
        return Err(MailgateError::BadRequest(format!(
            "invalid domain entry: {raw} (expected a bare domain like example.com)"
        )));
    }
    Ok(d.to_lowercase())
}

pub fn compile_domain_set<I, S>(raw: I) -> Result<HashSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(|s| normalize_entry(s.as_ref())).collect()
}

/// The default blocklist: the built-in free-domain table.
pub fn builtin_blocklist() -> HashSet<String> {
    FREE_EMAIL_DOMAINS.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn entries_are_trimmed_and_lowercased() {
        let set = compile_domain_set([" MyCompany.com ", "partner.io"]).unwrap();
        assert!(set.contains("mycompany.com"));
        assert!(set.contains("partner.io"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn rejects_addresses_and_blanks() {
        assert!(compile_domain_set(["user@gmail.com"]).is_err());
        assert!(compile_domain_set(["   "]).is_err());
        assert!(compile_domain_set(["my company.com"]).is_err());
    }

    #[test]
    fn builtin_blocklist_matches_table() {
        let set = builtin_blocklist();
        assert_eq!(set.len(), FREE_EMAIL_DOMAINS.len());
        assert!(set.contains("gmail.com"));
    }
}
