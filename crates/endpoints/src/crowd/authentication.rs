use atlassian_rest_api::{HttpMethod, Params, Result, Transport};
use serde_json::Value;

use crate::segment;

pub struct AuthenticationEndpoint<'a, T: Transport + ?Sized> {
    client: &'a mut T,
}

impl<'a, T: Transport + ?Sized> AuthenticationEndpoint<'a, T> {
    pub fn new(client: &'a mut T) -> Self {
        Self { client }
    }

    /// Checks a user's password. The transport's own credential identifies
    /// the calling application.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<Value> {
        let path = format!("authentication?username={}", segment(username));
        let params = Params::new().with("value", password);
        self.client
            .call_endpoint(&path, params, HttpMethod::Post)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;

    #[tokio::test]
    async fn test_authenticate_sends_password_as_value() {
        let mut transport = RecordingTransport::default();
        AuthenticationEndpoint::new(&mut transport)
            .authenticate("jane+doe", "pw")
            .await
            .unwrap();

        let (path, params, method) = transport.last();
        assert_eq!(path, "authentication?username=jane%2Bdoe");
        assert_eq!(*method, HttpMethod::Post);
        assert_eq!(params.to_query(), "value=pw");
    }
}
