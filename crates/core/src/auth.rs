use serde::{Deserialize, Serialize};

/// Signed-in user as stored in the server session.
///
/// `subject` is the opaque id issued by the identity provider; role
/// assignments are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates an identity with an explicit display name.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
        }
    }

    /// Creates an identity from provider claims, falling back to the local
    /// part of an email-shaped subject when no usable name was supplied.
    #[must_use]
    pub fn from_claims(
        subject: impl Into<String>,
        display_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        let subject = subject.into();
        let display_name = display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                subject
                    .split_once('@')
                    .map_or(subject.as_str(), |(local, _)| local)
                    .to_owned()
            });
        let email = email.filter(|email| !email.trim().is_empty());

        Self {
            subject,
            display_name,
            email,
        }
    }

    /// Returns the identity provider's subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the name shown in the UI.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email claim, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
