//! Command-line and environment configuration.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

/// Local API examples server.
#[derive(Debug, Parser)]
#[command(name = "local-api-examples")]
#[command(about = "CRUD examples over an in-process document store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print a signed preview token to use as the `payload-token` cookie
    IssueToken {
        /// Token subject (the previewing user)
        #[arg(long, default_value = "admin")]
        subject: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Secret used to sign and verify preview tokens
    #[arg(long, env = "PAYLOAD_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Store location; only `memory://` is supported
    #[arg(long, env = "DATABASE_URI", default_value = "memory://local")]
    pub database_uri: String,

    /// Mailbox capacity of each collection actor
    #[arg(long, env = "STORE_CHANNEL_CAPACITY", default_value_t = 32)]
    pub channel_capacity: usize,

    /// Load sample posts and products at start-up
    #[arg(long, env = "SEED_DATA")]
    pub seed: bool,

    /// Lifetime of tokens minted by `issue-token`
    #[arg(long, env = "PREVIEW_TOKEN_TTL_SECS", default_value_t = 7200)]
    pub preview_ttl_secs: u64,
}

impl Config {
    /// Defaults for everything but the secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            secret: secret.into(),
            database_uri: "memory://local".to_string(),
            channel_capacity: 32,
            seed: false,
            preview_ttl_secs: 7200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_subcommand() {
        let cli = Cli::parse_from([
            "local-api-examples",
            "--secret",
            "s3cret",
            "--bind",
            "0.0.0.0:8080",
            "--seed",
            "issue-token",
            "--subject",
            "editor",
        ]);
        assert_eq!(cli.config.secret, "s3cret");
        assert_eq!(cli.config.bind.port(), 8080);
        assert!(cli.config.seed);
        assert!(matches!(
            cli.command,
            Some(Command::IssueToken { ref subject }) if subject == "editor"
        ));
    }

    #[test]
    fn missing_secret_is_rejected() {
        if std::env::var_os("PAYLOAD_SECRET").is_none() {
            assert!(Cli::try_parse_from(["local-api-examples"]).is_err());
        }
    }
}
