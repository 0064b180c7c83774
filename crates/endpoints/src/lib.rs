//! Per-resource methods for the Jira and Crowd REST APIs.
//!
//! Every method maps its arguments to a path and a parameter set and hands
//! them to [`Transport::call_endpoint`]; results and errors come back
//! unchanged. Façades borrow the transport mutably for their lifetime, so any
//! [`Transport`] implementation can sit underneath.

pub mod crowd;
pub mod jira;

use atlassian_rest_api::{ApiError, Params, Result};

pub use atlassian_rest_api::Transport;

/// Encodes one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds `{"user": ..}` or `{"group": ..}`, failing unless exactly one is given.
pub(crate) fn user_or_group(user: Option<&str>, group: Option<&str>) -> Result<Params> {
    match (user, group) {
        (Some(user), None) => Ok(Params::new().with("user", user)),
        (None, Some(group)) => Ok(Params::new().with("group", group)),
        _ => Err(ApiError::Parameter("User or group should be given".to_string())),
    }
}
