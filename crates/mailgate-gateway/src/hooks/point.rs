use std::fmt;

/// Named stage of the authentication pipeline where before-hooks may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptionPoint {
    /// Request a magic sign-in link.
    MagicLink,
    /// Email + password sign-up.
    SignUpEmail,
    /// Email + password sign-in.
    SignInEmail,
    /// Send a one-time sign-in code by email.
    EmailOtp,
}

impl InterceptionPoint {
    pub const ALL: [InterceptionPoint; 4] = [
        InterceptionPoint::MagicLink,
        InterceptionPoint::SignUpEmail,
        InterceptionPoint::SignInEmail,
        InterceptionPoint::EmailOtp,
    ];

    /// Stable path identifier, as the auth pipeline names the operation.
    pub fn path(self) -> &'static str {
        match self {
            InterceptionPoint::MagicLink => "/sign-in/magic-link",
            InterceptionPoint::SignUpEmail => "/sign-up/email",
            InterceptionPoint::SignInEmail => "/sign-in/email",
            InterceptionPoint::EmailOtp => "/email-otp/send-verification-otp",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }

    /// Sign-in style points are only checked when the policy opts in.
    /// The magic-link request is always checked since it can create accounts.
    pub fn is_sign_in(self) -> bool {
        matches!(self, InterceptionPoint::SignInEmail | InterceptionPoint::EmailOtp)
    }
}

impl fmt::Display for InterceptionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
