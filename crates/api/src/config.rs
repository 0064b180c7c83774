use std::path::PathBuf;
use std::time::Duration;

use atlassian_rest_auth::Credential;

/// Default request timeout handed to the HTTP engine.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Session-wide settings, fixed once the session is opened.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub credential: Credential,
    /// Verbose tracing of every exchange.
    pub debug: bool,
    /// PEM bundle of additional trusted roots.
    pub ca_bundle: Option<PathBuf>,
    /// File the session cookies are loaded from and saved to.
    pub cookie_file: Option<PathBuf>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub accept_invalid_certs: bool,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
            debug: false,
            ca_bundle: None,
            cookie_file: None,
            headers: Vec::new(),
            timeout: Some(DEFAULT_TIMEOUT),
            accept_invalid_certs: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(path.into());
        self
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables certificate verification. Only for test instances.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Sets a header on every request, replacing any earlier value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_content_type(self, value: impl Into<String>) -> Self {
        self.with_header("Content-Type", value)
    }

    pub fn with_accept(self, value: impl Into<String>) -> Self {
        self.with_header("Accept", value)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
