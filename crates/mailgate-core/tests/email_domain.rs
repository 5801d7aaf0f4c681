//! Domain extraction and free-domain table tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mailgate_core::{extract_domain, is_free_domain, is_free_email_domain, FREE_EMAIL_DOMAINS};

#[test]
fn domain_is_lowercased_remainder_after_first_at() {
    assert_eq!(extract_domain("User@MyCompany.COM").as_deref(), Some("mycompany.com"));
    assert_eq!(extract_domain("a@b@c.com").as_deref(), Some("b@c.com"));
}

#[test]
fn no_domain_is_none() {
    for bad in ["nodomain", "user@", "", "@"] {
        assert!(extract_domain(bad).is_none(), "input={bad:?}");
    }
}

#[test]
fn empty_local_part_still_has_domain() {
    assert_eq!(extract_domain("@gmail.com").as_deref(), Some("gmail.com"));
}

#[test]
fn table_is_sorted_lowercase_and_unique() {
    for pair in FREE_EMAIL_DOMAINS.windows(2) {
        assert!(pair[0] < pair[1], "out of order or duplicate: {} / {}", pair[0], pair[1]);
    }
    for d in FREE_EMAIL_DOMAINS {
        assert_eq!(*d, d.to_lowercase());
        assert!(!d.contains('@'));
    }
}

#[test]
fn free_email_checks_builtin_table() {
    assert!(is_free_email_domain("someone@gmail.com"));
    assert!(is_free_email_domain("someone@Outlook.com"));
    assert!(!is_free_email_domain("someone@mycompany.com"));
    assert!(!is_free_email_domain("nodomain"));
    assert!(!is_free_email_domain("user@"));
}

#[test]
fn free_domain_expects_normalized_input() {
    assert!(is_free_domain("yahoo.com"));
    assert!(!is_free_domain("YAHOO.COM"));
}
