//! Transport core shared by the Jira and Crowd endpoint façades.
//!
//! [`Transport::call_endpoint`] is the single integration point: it builds a
//! per-call [`RequestSpec`], opens the session on first use, executes the
//! exchange through a [`Connector`] and classifies the status code into
//! [`ApiError`] kinds.

pub mod client;
pub mod config;
pub mod connector;
pub mod engine;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use atlassian_rest_auth::Credential;
pub use client::{HttpTransport, SessionState};
pub use config::TransportConfig;
pub use connector::{Connector, Session};
pub use engine::{ReqwestConnector, ReqwestSession};
pub use error::{ApiError, Result, TransportErrorKind};
pub use request::{HttpMethod, ParamValue, Params, RequestSpec};
pub use response::RawResponse;
pub use transport::Transport;
