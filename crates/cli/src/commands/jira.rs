use anyhow::Result;
use atlassian_rest_api::Transport;
use atlassian_rest_endpoints::jira::{
    JqlEndpoint, ProjectEndpoint, SearchOptions, UserEndpoint, UserSearchOptions,
};
use clap::{Args, Subcommand};
use tracing::info;

use crate::output::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct JiraArgs {
    #[command(subcommand)]
    pub command: JiraCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum JiraCommand {
    /// Project lookups
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Search issues with JQL
    Search(SearchArgs),
    /// User lookups
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// List all visible projects
    List,
    /// Show one project
    Get { key: String },
    /// List the project's components
    Components { key: String },
    /// List the project's versions
    Versions { key: String },
    /// List the project's roles, or one role with its actors
    Roles {
        key: String,
        #[arg(long)]
        role_id: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// JQL query (e.g. "project = TEST AND status = Open")
    pub jql: String,
    #[arg(long)]
    pub start_at: Option<u32>,
    #[arg(long)]
    pub max_results: Option<u32>,
    /// Comma-separated list of fields to return
    #[arg(long)]
    pub fields: Option<String>,
    #[arg(long)]
    pub expand: Option<String>,
    /// Ask the server to validate the query
    #[arg(long)]
    pub validate: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Show one user
    Get { username: String },
    /// Find users by name, username or email fragment
    Search {
        query: String,
        #[arg(long)]
        max_results: Option<u32>,
        #[arg(long)]
        include_inactive: bool,
    },
}

pub async fn execute<T: Transport + ?Sized>(
    args: JiraArgs,
    transport: &mut T,
    format: OutputFormat,
) -> Result<()> {
    let result = match args.command {
        JiraCommand::Project(command) => {
            let mut projects = ProjectEndpoint::new(&mut *transport);
            match command {
                ProjectCommand::List => projects.find_all().await,
                ProjectCommand::Get { key } => projects.find(&key).await,
                ProjectCommand::Components { key } => projects.find_components(&key).await,
                ProjectCommand::Versions { key } => projects.find_versions(&key).await,
                ProjectCommand::Roles { key, role_id: None } => projects.find_roles(&key).await,
                ProjectCommand::Roles {
                    key,
                    role_id: Some(role_id),
                } => projects.find_role(&key, &role_id).await,
            }
        }
        JiraCommand::Search(args) => {
            info!(jql = %args.jql, "Searching issues");
            let options = SearchOptions {
                start_at: args.start_at,
                max_results: args.max_results,
                validate_query: args.validate.then_some(true),
                fields: args.fields,
                expand: args.expand,
            };
            JqlEndpoint::new(&mut *transport)
                .search(&args.jql, &options)
                .await
        }
        JiraCommand::User(command) => {
            let mut users = UserEndpoint::new(&mut *transport);
            match command {
                UserCommand::Get { username } => users.find(&username).await,
                UserCommand::Search {
                    query,
                    max_results,
                    include_inactive,
                } => {
                    let options = UserSearchOptions {
                        max_results,
                        include_inactive: include_inactive.then_some(true),
                        ..Default::default()
                    };
                    users.search(&query, &options).await
                }
            }
        }
    };

    super::finish(transport, result, format)
}
