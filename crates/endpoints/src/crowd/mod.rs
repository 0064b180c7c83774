//! Crowd REST API (`/rest/usermanagement/1`) resources.

mod authentication;
mod user;

pub use authentication::AuthenticationEndpoint;
pub use user::{NewUser, UserEndpoint};
