use atlassian_rest_api::{HttpMethod, Params, Result, Transport};
use serde_json::Value;

use crate::segment;

const ENDPOINT: &str = "user";

/// Fields sent when creating or updating a Crowd user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
}

impl NewUser {
    fn params(&self) -> Params {
        Params::new()
            .with("name", self.username.as_str())
            .with("first-name", self.first_name.as_str())
            .with("last-name", self.last_name.as_str())
            .with(
                "display-name",
                format!("{} {}", self.first_name, self.last_name),
            )
            .with("email", self.email.as_str())
            .with("active", self.active)
    }
}

pub struct UserEndpoint<'a, T: Transport + ?Sized> {
    client: &'a mut T,
}

impl<'a, T: Transport + ?Sized> UserEndpoint<'a, T> {
    pub fn new(client: &'a mut T) -> Self {
        Self { client }
    }

    fn path_for(resource: &str, username: &str) -> String {
        format!("{resource}?username={}", segment(username))
    }

    /// Looks up a user; `expand` includes the user's attributes.
    pub async fn find(&mut self, username: &str, expand: bool) -> Result<Value> {
        let params = Params::new()
            .with("username", username)
            .with_opt("expand", expand.then_some("attributes"));
        self.client
            .call_endpoint(ENDPOINT, params, HttpMethod::Get)
            .await
    }

    pub async fn create(&mut self, user: &NewUser) -> Result<Value> {
        self.client
            .call_endpoint(ENDPOINT, user.params(), HttpMethod::Post)
            .await
    }

    /// Replaces the details of `username`; renames when `user.username` differs.
    pub async fn update(&mut self, username: &str, user: &NewUser) -> Result<Value> {
        let path = Self::path_for(ENDPOINT, username);
        self.client
            .call_endpoint(&path, user.params(), HttpMethod::Put)
            .await
    }

    pub async fn delete(&mut self, username: &str) -> Result<Value> {
        let params = Params::new().with("username", username);
        self.client
            .call_endpoint(ENDPOINT, params, HttpMethod::Delete)
            .await
    }

    pub async fn update_password(&mut self, username: &str, password: &str) -> Result<Value> {
        let path = Self::path_for("user/password", username);
        let params = Params::new().with("value", password);
        self.client
            .call_endpoint(&path, params, HttpMethod::Put)
            .await
    }

    pub async fn mail_password_reset_link(&mut self, username: &str) -> Result<Value> {
        let path = Self::path_for("user/mail/password", username);
        self.client
            .call_endpoint(&path, Params::new(), HttpMethod::Post)
            .await
    }

    /// Groups the user is a direct member of.
    pub async fn direct_groups(&mut self, username: &str) -> Result<Value> {
        let params = Params::new().with("username", username);
        self.client
            .call_endpoint("user/group/direct", params, HttpMethod::Get)
            .await
    }

    /// Groups the user belongs to, including through nested groups.
    pub async fn nested_groups(&mut self, username: &str) -> Result<Value> {
        let params = Params::new().with("username", username);
        self.client
            .call_endpoint("user/group/nested", params, HttpMethod::Get)
            .await
    }
}
