pub mod auth;
pub mod call;
pub mod crowd;
pub mod jira;

use anyhow::{anyhow, Result};
use atlassian_rest_api::{ApiError, Transport};
use serde_json::Value;
use tracing::debug;

use crate::output::{self, OutputFormat};

/// Prints the outcome of one call and closes the transport.
///
/// A 204 answer counts as success with nothing to print.
pub(crate) fn finish<T: Transport + ?Sized>(
    transport: &mut T,
    result: atlassian_rest_api::Result<Value>,
    format: OutputFormat,
) -> Result<()> {
    if let Ok(status) = transport.result_http_code() {
        debug!(status, "Call completed");
    }
    transport.close();

    match result {
        Ok(value) => output::print(&value, format),
        Err(ApiError::NoContent) => Ok(()),
        Err(err) => Err(with_suggestion(err)),
    }
}

fn with_suggestion(err: ApiError) -> anyhow::Error {
    match err.suggestion() {
        Some(hint) => anyhow!("{err}\nHint: {hint}"),
        None => anyhow!(err),
    }
}
