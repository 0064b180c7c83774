use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::TransportConfig;
use crate::connector::{Connector, Session};
use crate::engine::ReqwestConnector;
use crate::error::{ApiError, Result};
use crate::request::{HttpMethod, Params, RequestSpec};
use crate::response::classify;
use crate::transport::Transport;

/// Lifecycle of the underlying engine session.
#[derive(Debug, Default)]
pub enum SessionState<S> {
    #[default]
    Uninitialized,
    Ready(S),
    Closed,
}

impl<S> SessionState<S> {
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }
}

/// Transport that drives any [`Connector`] through the call lifecycle:
/// lazy session opening, request building, execution and status
/// classification.
pub struct HttpTransport<C: Connector = ReqwestConnector> {
    connector: C,
    config: TransportConfig,
    session: SessionState<C::Session>,
    last_status: Option<u16>,
    data: Option<Value>,
}

impl HttpTransport<ReqwestConnector> {
    pub fn new(config: TransportConfig) -> Self {
        Self::with_connector(config, ReqwestConnector)
    }
}

impl<C: Connector> HttpTransport<C> {
    pub fn with_connector(config: TransportConfig, connector: C) -> Self {
        Self {
            connector,
            config,
            session: SessionState::Uninitialized,
            last_status: None,
            data: None,
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_ready()
    }

    async fn call(&mut self, request: RequestSpec) -> Result<Value> {
        self.last_status = None;
        self.data = None;

        if !self.session.is_ready() {
            self.init()?;
        }

        let debug_mode = self.config.debug;
        if debug_mode {
            // Bodies and header values can hold passwords or session cookies.
            let header_names: Vec<&str> =
                request.headers.iter().map(|(name, _)| name.as_str()).collect();
            info!(
                method = %request.method,
                url = %request.url()?,
                headers = ?header_names,
                body_len = request.body.as_ref().map_or(0, String::len),
                "Sending request"
            );
        } else {
            debug!(method = %request.method, path = %request.path, "Sending request");
        }

        let SessionState::Ready(session) = &mut self.session else {
            return Err(ApiError::NotInitialized);
        };
        let response = session.execute(&request).await?;
        self.last_status = Some(response.status);

        if debug_mode {
            info!(
                status = response.status,
                bytes = response.body.len(),
                body = %String::from_utf8_lossy(&response.body),
                "Received response"
            );
        } else {
            debug!(status = response.status, "Received response");
        }

        let value = classify(&response)?;
        self.data = Some(value.clone());
        Ok(value)
    }
}

#[async_trait]
impl<C: Connector> Transport for HttpTransport<C> {
    fn configure(&mut self, config: TransportConfig) -> Result<()> {
        if self.session.is_ready() {
            return Err(ApiError::AlreadyInitialized);
        }
        self.config = config;
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        if self.session.is_ready() {
            return Err(ApiError::AlreadyInitialized);
        }
        let session = self.connector.connect(&self.config)?;
        self.session = SessionState::Ready(session);
        debug!(base_url = %self.config.base_url, "Transport session opened");
        Ok(())
    }

    async fn call_endpoint(
        &mut self,
        path: &str,
        parameters: Params,
        method: HttpMethod,
    ) -> Result<Value> {
        let request = RequestSpec::build(&self.config, path, parameters, method)?;
        self.call(request).await
    }

    fn result_http_code(&self) -> Result<u16> {
        if !self.session.is_ready() {
            return Err(ApiError::NotInitialized);
        }
        self.last_status.ok_or(ApiError::NoResult)
    }

    fn result(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    fn close(&mut self) {
        if !self.session.is_ready() {
            return;
        }
        if let SessionState::Ready(session) =
            std::mem::replace(&mut self.session, SessionState::Closed)
        {
            session.close();
            debug!(base_url = %self.config.base_url, "Transport session closed");
        }
        self.last_status = None;
        self.data = None;
    }
}

impl<C: Connector> Drop for HttpTransport<C> {
    fn drop(&mut self) {
        self.close();
    }
}
