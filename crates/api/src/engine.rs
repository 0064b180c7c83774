//! reqwest-backed connector.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use atlassian_rest_auth::Credential;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Certificate, Client, Method};
use tracing::{debug, warn};
use url::Url;

use crate::config::TransportConfig;
use crate::connector::{Connector, Session};
use crate::error::{ApiError, Result, TransportErrorKind};
use crate::request::{HttpMethod, RequestSpec};
use crate::response::RawResponse;

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Session = ReqwestSession;

    fn connect(&self, config: &TransportConfig) -> Result<ReqwestSession> {
        let base_url = Url::parse(&config.base_url)?;

        let mut builder = Client::builder()
            .user_agent(format!("atlassian-rest/{}", env!("CARGO_PKG_VERSION")))
            .connection_verbose(config.debug);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(path) = &config.ca_bundle {
            let pem = fs::read(path).map_err(|e| {
                ApiError::Config(format!("Unable to read CA bundle {}: {e}", path.display()))
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                ApiError::Config(format!("Invalid CA bundle {}: {e}", path.display()))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let cookies = match &config.cookie_file {
            Some(path) => {
                let cookies = CookieFile::load(path.clone(), base_url)?;
                builder = builder.cookie_provider(Arc::clone(&cookies.jar));
                Some(cookies)
            }
            None => None,
        };

        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Unable to build HTTP client: {e}")))?;

        Ok(ReqwestSession {
            client,
            credential: config.credential.clone(),
            cookies,
        })
    }
}

pub struct ReqwestSession {
    client: Client,
    credential: Credential,
    cookies: Option<CookieFile>,
}

#[async_trait]
impl Session for ReqwestSession {
    async fn execute(&mut self, request: &RequestSpec) -> Result<RawResponse> {
        let url = request.url()?;
        let mut req = self.client.request(request.method.into(), url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Credential::Basic { username, password } = &self.credential {
            req = req.basic_auth(username, Some(password));
        }

        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        let response = req.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    fn close(self) {
        if let Some(cookies) = self.cookies {
            if let Err(err) = cookies.save() {
                warn!(error = %err, "Failed to save session cookies");
            }
        }
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    let kind = if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_body() || err.is_decode() {
        TransportErrorKind::Body
    } else if err.is_request() {
        TransportErrorKind::Request
    } else {
        TransportErrorKind::Other
    };
    ApiError::transport(kind, err.to_string())
}

/// Session cookies persisted one `name=value` pair per line.
struct CookieFile {
    path: PathBuf,
    url: Url,
    jar: Arc<Jar>,
}

impl CookieFile {
    fn load(path: PathBuf, url: Url) -> Result<Self> {
        let jar = Jar::default();
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                ApiError::Config(format!("Unable to read cookie file {}: {e}", path.display()))
            })?;
            for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
                jar.add_cookie_str(line, &url);
            }
            debug!(path = %path.display(), "Loaded session cookies");
        }
        Ok(Self {
            path,
            url,
            jar: Arc::new(jar),
        })
    }

    /// Rewrites the file from the jar; an empty jar leaves an empty file.
    fn save(&self) -> std::io::Result<()> {
        let header = self.jar.cookies(&self.url);
        let lines: Vec<&str> = header
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split("; ").filter(|c| !c.is_empty()).collect())
            .unwrap_or_default();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, lines.join("\n"))?;
        debug!(path = %self.path.display(), count = lines.len(), "Saved session cookies");
        Ok(())
    }
}
