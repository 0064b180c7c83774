use std::path::Path;

use anyhow::{anyhow, Context, Result};
use atlassian_rest_auth::{password_key, CredentialStore};
use atlassian_rest_config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use url::Url;

use crate::output::{self, OutputFormat};

const DEFAULT_PROFILE: &str = "default";

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Add or update a profile and store its password
    Login(LoginArgs),
    /// Remove the stored password (and optionally the profile)
    Logout(LogoutArgs),
    /// List configured profiles
    List,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Jira REST base URL (e.g. https://jira.example.com/rest/api/2).
    #[arg(long)]
    pub jira_url: Option<String>,
    /// Crowd REST base URL (e.g. https://crowd.example.com/rest/usermanagement/1).
    #[arg(long)]
    pub crowd_url: Option<String>,
    /// User (or Crowd application) name used for Basic authentication.
    #[arg(long)]
    pub username: Option<String>,
    /// Password to store (falls back to an interactive prompt).
    #[arg(long)]
    pub password: Option<String>,
    /// Mark this profile as the default one.
    #[arg(long)]
    pub default: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LogoutArgs {
    /// Remove the profile from config entirely (not just the stored password).
    #[arg(long)]
    pub remove_profile: bool,
}

pub fn handle(
    command: AuthCommand,
    profile: Option<&str>,
    config: &mut Config,
    config_path: Option<&Path>,
    store: &CredentialStore,
    format: OutputFormat,
) -> Result<()> {
    match command {
        AuthCommand::Login(args) => {
            let name = profile.unwrap_or(DEFAULT_PROFILE);
            login(name, args, config, config_path, store)
        }
        AuthCommand::Logout(args) => {
            let name = profile
                .or(config.default_profile.as_deref())
                .unwrap_or(DEFAULT_PROFILE)
                .to_string();
            logout(&name, args, config, config_path, store)
        }
        AuthCommand::List => list_profiles(config, store, format),
    }
}

fn validate_url(raw: Option<String>) -> Result<Option<String>> {
    raw.map(|raw| {
        Url::parse(&raw)
            .map(|_| raw.trim_end_matches('/').to_string())
            .with_context(|| format!("Invalid REST base URL: {raw}"))
    })
    .transpose()
}

fn login(
    name: &str,
    args: LoginArgs,
    config: &mut Config,
    config_path: Option<&Path>,
    store: &CredentialStore,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("Profile name cannot be empty"));
    }

    let jira_url = validate_url(args.jira_url)?;
    let crowd_url = validate_url(args.crowd_url)?;

    let entry = config.profiles.entry(name.to_string()).or_default();
    if jira_url.is_some() {
        entry.jira_url = jira_url;
    }
    if crowd_url.is_some() {
        entry.crowd_url = crowd_url;
    }
    if entry.jira_url.is_none() && entry.crowd_url.is_none() {
        return Err(anyhow!("Give at least one of --jira-url or --crowd-url"));
    }
    if args.username.is_some() {
        entry.username = args.username;
    }

    if entry.username.is_some() {
        let password = match args.password {
            Some(password) if !password.is_empty() => password,
            _ => read_password_from_stdin().context("Failed to read password from prompt")?,
        };
        if password.is_empty() {
            return Err(anyhow!("Password cannot be empty"));
        }
        store
            .set_secret(&password_key(name), &password)
            .context("Failed to store password")?;
    }

    if args.default || config.default_profile.is_none() {
        config.default_profile = Some(name.to_string());
    }

    config
        .save(config_path)
        .context("Unable to persist configuration file")?;

    tracing::info!(profile = %name, "Profile saved");
    Ok(())
}

fn logout(
    name: &str,
    args: LogoutArgs,
    config: &mut Config,
    config_path: Option<&Path>,
    store: &CredentialStore,
) -> Result<()> {
    if config.profile(name).is_none() {
        return Err(anyhow!("Profile '{name}' does not exist"));
    }

    store
        .delete_secret(&password_key(name))
        .context("Failed to delete stored password")?;

    if args.remove_profile {
        config.profiles.remove(name);
        if config.default_profile.as_deref() == Some(name) {
            config.default_profile = config.profiles.keys().next().cloned();
        }
    }

    config
        .save(config_path)
        .context("Unable to persist configuration file")?;
    tracing::info!(profile = %name, "Credentials removed");
    Ok(())
}

fn list_profiles(config: &Config, store: &CredentialStore, format: OutputFormat) -> Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        name: &'a str,
        jira_url: Option<&'a str>,
        crowd_url: Option<&'a str>,
        username: Option<&'a str>,
        has_password: bool,
        is_default: bool,
    }

    let mut rows = Vec::new();
    for (name, profile) in &config.profiles {
        rows.push(Row {
            name,
            jira_url: profile.jira_url.as_deref(),
            crowd_url: profile.crowd_url.as_deref(),
            username: profile.username.as_deref(),
            has_password: store.get_secret(&password_key(name))?.is_some(),
            is_default: config.default_profile.as_deref() == Some(name.as_str()),
        });
    }

    if rows.is_empty() {
        tracing::info!("No profiles configured yet. Use `atlassian-rest auth login` to add one.");
    }

    output::print(&serde_json::to_value(&rows)?, format)
}

fn read_password_from_stdin() -> Result<String> {
    use std::io::{self, Write};

    eprint!("Enter password: ");
    io::stderr().flush().context("Failed to flush stderr")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
