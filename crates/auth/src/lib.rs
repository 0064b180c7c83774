//! Identity material for outgoing requests and on-disk password storage.

mod credential;
mod store;

pub use credential::Credential;
pub use store::{password_key, CredentialStore};
