//! Hook registry resolution and the email domain hook.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use mailgate_core::error::{MailgateError, Result};
use mailgate_gateway::hooks::{
    BeforeHook, EmailDomainHook, HookContext, HookRegistry, InterceptionPoint,
};
use mailgate_gateway::policy::{DomainPolicy, FnValidator};

struct Recorder {
    id: &'static str,
    fail: bool,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl BeforeHook for Recorder {
    fn id(&self) -> &'static str {
        self.id
    }
    fn matches(&self, point: InterceptionPoint) -> bool {
        point == InterceptionPoint::MagicLink
    }
    async fn before(&self, _ctx: &HookContext) -> Result<()> {
        self.log.lock().unwrap().push(self.id);
        if self.fail {
            return Err(MailgateError::PolicyDenied(format!("{} said no", self.id)));
        }
        Ok(())
    }
}

fn email_hook(policy: DomainPolicy) -> HookRegistry {
    let reg = HookRegistry::new();
    reg.register(Arc::new(EmailDomainHook::new(Arc::new(policy))));
    reg
}

fn ctx(point: InterceptionPoint, email: &str) -> HookContext {
    HookContext::new(point, json!({ "email": email, "callbackURL": "/dashboard" }))
}

#[test]
fn point_paths_round_trip() {
    for p in InterceptionPoint::ALL {
        assert_eq!(InterceptionPoint::from_path(p.path()), Some(p));
    }
    assert_eq!(InterceptionPoint::from_path("/sign-out"), None);
    assert_eq!(InterceptionPoint::MagicLink.to_string(), "/sign-in/magic-link");
}

#[test]
fn sign_in_points_follow_check_on_sign_in() {
    let on = email_hook(DomainPolicy::default());
    for p in InterceptionPoint::ALL {
        assert_eq!(on.registered(p), vec!["email-domain-policy"], "point={p}");
    }

    let off = email_hook(DomainPolicy::builder().check_on_sign_in(false).build().unwrap());
    assert_eq!(off.registered(InterceptionPoint::MagicLink), vec!["email-domain-policy"]);
    assert_eq!(off.registered(InterceptionPoint::SignUpEmail), vec!["email-domain-policy"]);
    assert!(off.registered(InterceptionPoint::SignInEmail).is_empty());
    assert!(off.registered(InterceptionPoint::EmailOtp).is_empty());
}

#[tokio::test]
async fn magic_link_is_always_checked() {
    let reg = email_hook(DomainPolicy::builder().check_on_sign_in(false).build().unwrap());

    let err = reg
        .run_before(&ctx(InterceptionPoint::MagicLink, "user@gmail.com"))
        .await
        .expect_err("must deny");
    assert!(matches!(err, MailgateError::PolicyDenied(_)));

    // Unchecked sign-in point lets the same address through.
    reg.run_before(&ctx(InterceptionPoint::SignInEmail, "user@gmail.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn body_email_field_variants() {
    let reg = email_hook(DomainPolicy::default());
    let point = InterceptionPoint::MagicLink;

    reg.run_before(&HookContext::new(point, json!({}))).await.unwrap();
    reg.run_before(&HookContext::new(point, json!({ "email": null }))).await.unwrap();
    reg.run_before(&HookContext::new(point, json!({ "email": "" }))).await.unwrap();

    let err = reg
        .run_before(&HookContext::new(point, json!({ "email": 42 })))
        .await
        .expect_err("must fail");
    assert!(matches!(err, MailgateError::MalformedEmail));

    let err = reg.run_before(&ctx(point, "nodomain")).await.expect_err("must fail");
    assert!(matches!(err, MailgateError::MalformedEmail));
}

#[tokio::test]
async fn hooks_run_in_order_and_first_error_aborts() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let reg = HookRegistry::new();
    for (id, fail) in [("first", false), ("second", true), ("third", false)] {
        reg.register(Arc::new(Recorder { id, fail, log: Arc::clone(&log) }));
    }

    let err = reg
        .run_before(&ctx(InterceptionPoint::MagicLink, "user@mycompany.com"))
        .await
        .expect_err("second hook denies");
    assert_eq!(err.client_message(), "second said no");
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);

    // Unbound point: nothing runs.
    reg.run_before(&ctx(InterceptionPoint::SignUpEmail, "user@mycompany.com"))
        .await
        .unwrap();
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn slow_validator_times_out_as_failure() {
    let policy = DomainPolicy::builder()
        .validator(FnValidator::new(|_: String, _: String| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(true)
        }))
        .build()
        .unwrap();
    let reg = HookRegistry::new().with_hook_timeout(Some(Duration::from_millis(20)));
    reg.register(Arc::new(EmailDomainHook::new(Arc::new(policy))));

    let err = reg
        .run_before(&ctx(InterceptionPoint::SignUpEmail, "user@mycompany.com"))
        .await
        .expect_err("must time out");
    match err {
        MailgateError::ValidatorFailure(msg) => assert!(msg.contains("timed out")),
        other => panic!("unexpected error: {other:?}"),
    }
}
