use anyhow::{Context, Result};
use atlassian_rest_api::Transport;
use atlassian_rest_endpoints::crowd::{AuthenticationEndpoint, UserEndpoint};
use clap::{Args, Subcommand, ValueEnum};

use crate::output::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct CrowdArgs {
    #[command(subcommand)]
    pub command: CrowdCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CrowdCommand {
    /// User lookups
    #[command(subcommand)]
    User(UserCommand),
    /// Check a user's password against Crowd
    Authenticate(AuthenticateArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Membership {
    Direct,
    Nested,
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Show one user
    Get {
        username: String,
        /// Include the user's attributes
        #[arg(long)]
        attributes: bool,
    },
    /// List the groups a user belongs to
    Groups {
        username: String,
        #[arg(long, value_enum, default_value = "direct")]
        membership: Membership,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AuthenticateArgs {
    pub username: String,
    /// Password to check (falls back to CROWD_USER_PASSWORD env)
    #[arg(long, env = "CROWD_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn execute<T: Transport + ?Sized>(
    args: CrowdArgs,
    transport: &mut T,
    format: OutputFormat,
) -> Result<()> {
    let result = match args.command {
        CrowdCommand::User(command) => {
            let mut users = UserEndpoint::new(&mut *transport);
            match command {
                UserCommand::Get {
                    username,
                    attributes,
                } => users.find(&username, attributes).await,
                UserCommand::Groups {
                    username,
                    membership: Membership::Direct,
                } => users.direct_groups(&username).await,
                UserCommand::Groups {
                    username,
                    membership: Membership::Nested,
                } => users.nested_groups(&username).await,
            }
        }
        CrowdCommand::Authenticate(args) => {
            let password = args
                .password
                .context("Give --password or set CROWD_USER_PASSWORD")?;
            AuthenticationEndpoint::new(&mut *transport)
                .authenticate(&args.username, &password)
                .await
        }
    };

    super::finish(transport, result, format)
}
