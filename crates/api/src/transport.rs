use async_trait::async_trait;
use serde_json::Value;

use crate::config::TransportConfig;
use crate::error::Result;
use crate::request::{HttpMethod, Params};

/// Capability interface every transport implementation provides.
///
/// Endpoint façades depend only on [`Transport::call_endpoint`]. Calls take
/// `&mut self`: one request is in flight per instance. Use one transport per
/// concurrent caller.
#[async_trait]
pub trait Transport: Send {
    /// Replaces the session configuration. Fails with
    /// [`crate::ApiError::AlreadyInitialized`] once a session is open.
    fn configure(&mut self, config: TransportConfig) -> Result<()>;

    /// Opens the session. Fails with [`crate::ApiError::AlreadyInitialized`]
    /// when one is already open.
    fn init(&mut self) -> Result<()>;

    /// Performs one call and returns the decoded body.
    async fn call_endpoint(
        &mut self,
        path: &str,
        parameters: Params,
        method: HttpMethod,
    ) -> Result<Value>;

    /// Status code of the last completed exchange.
    fn result_http_code(&self) -> Result<u16>;

    /// Decoded body of the last successful call.
    fn result(&self) -> Option<&Value>;

    /// Releases the session. Calling again, or calling before `init`, is a no-op.
    fn close(&mut self);

    async fn get(&mut self, path: &str) -> Result<Value> {
        self.call_endpoint(path, Params::new(), HttpMethod::Get).await
    }
}
