use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Identity attached to outgoing requests.
///
/// `Anonymous` decorates nothing. `Basic` is applied by the transport through
/// its native basic-auth support; [`Credential::credential`] exposes the
/// encoded token for callers that need it directly.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credential {
    #[default]
    Anonymous,
    Basic { username: String, password: String },
}

impl Credential {
    pub fn anonymous() -> Self {
        Credential::Anonymous
    }

    /// Empty strings are accepted as-is.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Base64 of `username:password`, or `None` for anonymous access.
    pub fn credential(&self) -> Option<String> {
        match self {
            Credential::Anonymous => None,
            Credential::Basic { username, password } => {
                Some(BASE64.encode(format!("{username}:{password}")))
            }
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Credential::Anonymous => None,
            Credential::Basic { username, .. } => Some(username),
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            Credential::Anonymous => None,
            Credential::Basic { password, .. } => Some(password),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credential::Anonymous)
    }
}

// Keeps passwords out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Anonymous => f.write_str("Anonymous"),
            Credential::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}
