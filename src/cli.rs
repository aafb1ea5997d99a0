use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ergal", version, about = "Describe, store and call HTTP API profiles")]
pub struct Cli {
    #[arg(long, global = true, help = "Profile name to use")]
    pub profile: Option<String>,
    #[arg(long, global = true, help = "Use the disposable test store")]
    pub test: bool,
    #[arg(long, global = true, help = "Path to an alternate store file")]
    pub store: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the profile, or open it if it already exists
    Init(InitArgs),
    /// Show the profile
    Show,
    /// List every profile in the store
    List,
    /// Delete the profile from the store
    Rm,
    /// Make the profile the default for later commands
    Use,
    /// Replace the base url
    Base(BaseArgs),
    /// Set the authentication scheme
    Auth(AuthArgs),
    /// Manage endpoints
    Endpoint(EndpointArgs),
    /// Call an endpoint and print the raw response
    Call(CallArgs),
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long, help = "Base url of the API, e.g. https://api.example.com")]
    pub base: String,
}

#[derive(Debug, Args)]
pub struct BaseArgs {
    #[arg(help = "New base url")]
    pub base: String,
}

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[arg(help = "Auth method: none, basic, key-header or key-query")]
    pub method: String,
    #[arg(
        long = "param",
        short = 'p',
        value_parser = parse_param,
        action = ArgAction::Append,
        help = "Auth parameter as key=value (repeatable)"
    )]
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct EndpointArgs {
    #[command(subcommand)]
    pub command: EndpointCommand,
}

#[derive(Debug, Subcommand)]
pub enum EndpointCommand {
    Add(EndpointAddArgs),
    Ls,
}

#[derive(Debug, Args)]
pub struct EndpointAddArgs {
    #[arg(long, help = "Endpoint path, e.g. /users")]
    pub path: String,
    #[arg(long, help = "HTTP method, e.g. get")]
    pub method: String,
}

#[derive(Debug, Args)]
pub struct CallArgs {
    #[arg(help = "Path of a stored endpoint")]
    pub path: String,
    #[arg(long, help = "Pick the endpoint with this method when a path has several")]
    pub method: Option<String>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }

    Ok((key.to_string(), value.to_string()))
}
