//! The seam between the transport lifecycle and a concrete HTTP engine.
//!
//! A [`Connector`] opens a [`Session`] from the session configuration; the
//! session performs exchanges until it is closed. [`crate::HttpTransport`]
//! owns exactly one session at a time and is generic over the connector, so
//! engines are swapped at construction time without touching callers.

use async_trait::async_trait;

use crate::config::TransportConfig;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::response::RawResponse;

#[async_trait]
pub trait Session: Send {
    /// Performs one exchange. Failures below HTTP are reported as
    /// [`crate::ApiError::Transport`]; any status code is a completed exchange.
    async fn execute(&mut self, request: &RequestSpec) -> Result<RawResponse>;

    /// Releases the session's resources.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

pub trait Connector: Send + Sync {
    type Session: Session;

    fn connect(&self, config: &TransportConfig) -> Result<Self::Session>;
}
