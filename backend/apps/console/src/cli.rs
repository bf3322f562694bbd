use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "sideline")]
#[command(about = "Sideline console: sessions, rosters and scouting from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL
    #[arg(long, global = true, env = "SIDELINE_API_URL", default_value = "http://localhost:3001")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "SIDELINE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Account email; when set with a password the console signs in first
    #[arg(long, global = true, env = "SIDELINE_EMAIL")]
    pub email: Option<String>,

    #[arg(long, global = true, env = "SIDELINE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the signed-in user
    Whoami,
    /// Sign in and print the session user
    Login,
    /// Sign in, then end the session
    Logout,
    /// Rate a password without sending it anywhere
    Password {
        candidate: String,
    },
    /// List one page of a collection
    List(ListArgs),
    /// Show a single record
    Get(GetArgs),
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub resource: ResourceKind,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct GetArgs {
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Record id as the backend numbers it
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Players,
    Teams,
    Recruits,
    Reports,
    Schedule,
}

impl Cli {
    /// Email and password, when both were given
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}
