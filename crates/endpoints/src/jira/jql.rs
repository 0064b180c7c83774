use atlassian_rest_api::{HttpMethod, Params, Result, Transport};
use serde_json::Value;
use tracing::debug;

/// Optional search arguments; unset fields are left out of the request.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub validate_query: Option<bool>,
    /// Comma-separated field list.
    pub fields: Option<String>,
    pub expand: Option<String>,
}

pub struct JqlEndpoint<'a, T: Transport + ?Sized> {
    client: &'a mut T,
}

impl<'a, T: Transport + ?Sized> JqlEndpoint<'a, T> {
    pub fn new(client: &'a mut T) -> Self {
        Self { client }
    }

    /// Searches for issues using JQL.
    pub async fn search(&mut self, jql: &str, options: &SearchOptions) -> Result<Value> {
        debug!(jql, start_at = ?options.start_at, max_results = ?options.max_results, "Searching issues");

        let params = Params::new()
            .with("jql", jql)
            .with_opt("startAt", options.start_at)
            .with_opt("maxResults", options.max_results)
            .with_opt("validateQuery", options.validate_query)
            .with_opt("fields", options.fields.as_deref())
            .with_opt("expand", options.expand.as_deref());

        self.client
            .call_endpoint("search", params, HttpMethod::Get)
            .await
    }
}
