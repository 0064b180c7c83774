//! Jira REST API (`/rest/api/2`) resources.

mod jql;
mod project;
mod user;

pub use jql::{JqlEndpoint, SearchOptions};
pub use project::ProjectEndpoint;
pub use user::{UserEndpoint, UserSearchOptions};
