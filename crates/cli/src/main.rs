mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use atlassian_rest_api::{Credential, HttpTransport};
use atlassian_rest_auth::{password_key, CredentialStore};
use atlassian_rest_config::{Config, Product};
use clap::{Parser, Subcommand};
use commands::auth::{self, AuthCommand};
use output::OutputFormat;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "atlassian-rest", version, about = "Jira and Crowd REST client", long_about = None)]
struct Cli {
    /// Profile to use from config file
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Path to config file (defaults to ~/.atlassian-rest/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for command results
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    /// Enable verbose logging and trace every HTTP exchange
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: RestCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum RestCommand {
    /// Call any endpoint directly
    Call(commands::call::CallArgs),
    /// Jira commands
    Jira(commands::jira::JiraArgs),
    /// Crowd commands
    Crowd(commands::crowd::CrowdArgs),
    /// Profile and password management
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config_path = cli.config.clone();
    let mut config = Config::load(config_path.as_ref())?;
    let store = CredentialStore::open_default()?;

    match cli.command {
        RestCommand::Call(args) => {
            let mut transport =
                build_transport(&config, cli.profile.as_deref(), &store, args.product.into(), cli.debug)?;
            commands::call::execute(args, &mut transport, cli.output).await?
        }
        RestCommand::Jira(args) => {
            let mut transport =
                build_transport(&config, cli.profile.as_deref(), &store, Product::Jira, cli.debug)?;
            commands::jira::execute(args, &mut transport, cli.output).await?
        }
        RestCommand::Crowd(args) => {
            let mut transport =
                build_transport(&config, cli.profile.as_deref(), &store, Product::Crowd, cli.debug)?;
            commands::crowd::execute(args, &mut transport, cli.output).await?
        }
        RestCommand::Auth(command) => auth::handle(
            command,
            cli.profile.as_deref(),
            &mut config,
            config_path.as_deref(),
            &store,
            cli.output,
        )?,
    }

    Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug {
        "info,atlassian_rest=debug,atlassian_rest_api=debug,atlassian_rest_endpoints=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

/// Password lookup: profile-specific env var, generic env var, credentials file.
fn resolve_password(profile: &str, store: &CredentialStore) -> Result<Option<String>> {
    let profile_env_var = format!("ATLASSIAN_REST_PASSWORD_{}", profile.to_uppercase());
    let from_env = std::env::var(&profile_env_var)
        .ok()
        .or_else(|| std::env::var("ATLASSIAN_REST_PASSWORD").ok())
        .filter(|p| !p.is_empty());

    match from_env {
        Some(password) => Ok(Some(password)),
        None => store.get_secret(&password_key(profile)),
    }
}

fn build_transport(
    config: &Config,
    requested: Option<&str>,
    store: &CredentialStore,
    product: Product,
    debug: bool,
) -> Result<HttpTransport> {
    let (name, profile) = config
        .resolve_profile(requested)
        .ok_or_else(|| anyhow!("No profile configured. Run `atlassian-rest auth login` first."))?;

    let credential = if profile.username.is_some() {
        let password = resolve_password(name, store)?.ok_or_else(|| {
            anyhow!(
                "No password found for profile '{name}'. Set ATLASSIAN_REST_PASSWORD_{} or run `atlassian-rest auth login --profile {name}`",
                name.to_uppercase()
            )
        })?;
        profile.credential(Some(password))
    } else {
        Credential::anonymous()
    };

    let mut transport_config = profile.transport_config(product, credential)?;
    transport_config.debug |= debug;
    debug!(profile = name, %product, base_url = %transport_config.base_url, "Using profile");

    Ok(HttpTransport::new(transport_config))
}
