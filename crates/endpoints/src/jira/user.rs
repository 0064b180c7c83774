use atlassian_rest_api::{HttpMethod, Params, Result, Transport};
use serde_json::Value;

use crate::segment;

const ENDPOINT: &str = "user";

#[derive(Debug, Clone, Default)]
pub struct UserSearchOptions {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub include_active: Option<bool>,
    pub include_inactive: Option<bool>,
}

/// Jira users. None of these resources can be accessed anonymously.
pub struct UserEndpoint<'a, T: Transport + ?Sized> {
    client: &'a mut T,
}

impl<'a, T: Transport + ?Sized> UserEndpoint<'a, T> {
    pub fn new(client: &'a mut T) -> Self {
        Self { client }
    }

    pub async fn find(&mut self, username: &str) -> Result<Value> {
        let params = Params::new().with("username", username);
        self.client
            .call_endpoint(ENDPOINT, params, HttpMethod::Get)
            .await
    }

    /// Modifies a user. Only the fields present in `fields` are changed.
    pub async fn update(&mut self, username: &str, fields: Params) -> Result<Value> {
        let path = format!("{ENDPOINT}?username={}", segment(username));
        self.client
            .call_endpoint(&path, fields, HttpMethod::Put)
            .await
    }

    /// Creates a user. Jira generates a password when `fields` carries none.
    pub async fn add(&mut self, username: &str, fields: Params) -> Result<Value> {
        let mut params = Params::new().with("name", username);
        for (key, value) in fields.iter() {
            params.insert(key, value.clone());
        }
        self.client
            .call_endpoint(ENDPOINT, params, HttpMethod::Post)
            .await
    }

    pub async fn delete(&mut self, username: &str) -> Result<Value> {
        let params = Params::new().with("username", username);
        self.client
            .call_endpoint(ENDPOINT, params, HttpMethod::Delete)
            .await
    }

    pub async fn find_avatars(&mut self, username: &str) -> Result<Value> {
        let params = Params::new().with("username", username);
        self.client
            .call_endpoint(&format!("{ENDPOINT}/avatars"), params, HttpMethod::Get)
            .await
    }

    pub async fn update_password(&mut self, username: &str, password: &str) -> Result<Value> {
        let path = format!("{ENDPOINT}/password?username={}", segment(username));
        let params = Params::new().with("password", password);
        self.client
            .call_endpoint(&path, params, HttpMethod::Put)
            .await
    }

    /// Users matching `query`, with the match highlighted.
    pub async fn picker(
        &mut self,
        query: &str,
        max_results: Option<u32>,
        show_avatar: Option<bool>,
        exclude: Option<&str>,
    ) -> Result<Value> {
        let params = Params::new()
            .with("query", query)
            .with_opt("maxResults", max_results)
            .with_opt("showAvatar", show_avatar)
            .with_opt("exclude", exclude);
        self.client
            .call_endpoint(&format!("{ENDPOINT}/picker"), params, HttpMethod::Get)
            .await
    }

    pub async fn search(&mut self, username: &str, options: &UserSearchOptions) -> Result<Value> {
        let params = Params::new()
            .with("username", username)
            .with_opt("startAt", options.start_at)
            .with_opt("maxResults", options.max_results)
            .with_opt("includeActive", options.include_active)
            .with_opt("includeInactive", options.include_inactive);
        self.client
            .call_endpoint(&format!("{ENDPOINT}/search"), params, HttpMethod::Get)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;

    #[tokio::test]
    async fn test_update_keeps_username_in_query() {
        let mut transport = RecordingTransport::default();
        let fields = Params::new().with("emailAddress", "bob@example.com");
        UserEndpoint::new(&mut transport)
            .update("bob smith", fields)
            .await
            .unwrap();

        let (path, params, method) = transport.last();
        assert_eq!(path, "user?username=bob%20smith");
        assert_eq!(*method, HttpMethod::Put);
        assert_eq!(params.to_query(), "emailAddress=bob%40example.com");
    }

    #[tokio::test]
    async fn test_add_puts_name_first() {
        let mut transport = RecordingTransport::default();
        let fields = Params::new()
            .with("emailAddress", "bob@example.com")
            .with("displayName", "Bob");
        UserEndpoint::new(&mut transport)
            .add("bob", fields)
            .await
            .unwrap();

        let (path, params, method) = transport.last();
        assert_eq!(path, "user");
        assert_eq!(*method, HttpMethod::Post);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "emailAddress", "displayName"]);
    }

    #[tokio::test]
    async fn test_delete_and_picker() {
        let mut transport = RecordingTransport::default();
        let mut users = UserEndpoint::new(&mut transport);
        users.delete("bob").await.unwrap();
        users.picker("bo", Some(5), None, Some("alice")).await.unwrap();

        let (path, params, method) = &transport.calls[0];
        assert_eq!(path, "user");
        assert_eq!(*method, HttpMethod::Delete);
        assert_eq!(params.to_query(), "username=bob");

        let (path, params, _) = &transport.calls[1];
        assert_eq!(path, "user/picker");
        assert_eq!(params.to_query(), "query=bo&maxResults=5&exclude=alice");
    }

    #[tokio::test]
    async fn test_update_password_targets_password_resource() {
        let mut transport = RecordingTransport::default();
        UserEndpoint::new(&mut transport)
            .update_password("bob", "n3w")
            .await
            .unwrap();

        let (path, params, method) = transport.last();
        assert_eq!(path, "user/password?username=bob");
        assert_eq!(*method, HttpMethod::Put);
        assert_eq!(params.to_query(), "password=n3w");
    }
}
