//! Command-line interface definitions

use std::net::SocketAddr;

use clap::{Parser, Subcommand, ValueEnum};

/// Longest accepted cookie session lifetime: ten years.
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "authlab")]
#[command(about = "Signed bearer tokens and cookie sessions, side by side")]
pub struct Cli {
    /// Secret key used to sign and verify tokens
    #[arg(long, env = "AUTHLAB_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Token time-to-live in seconds
    #[arg(long, env = "AUTHLAB_TOKEN_TTL", default_value_t = 3600, global = true)]
    pub ttl: i64,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    ///
    /// Endpoints: POST /register, POST /login, GET /profile (Bearer),
    /// POST /session/login, GET /session/profile, POST /session/logout.
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Cookie session lifetime in seconds
        #[arg(
            long,
            default_value_t = 86_400,
            value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_TTL_SECS)
        )]
        session_ttl: i64,

        /// Seconds between sweeps of expired sessions
        #[arg(long, default_value_t = 60)]
        sweep_interval: u64,
    },

    /// Issue a token for a subject and print it
    Issue {
        /// Subject (username) to put in the token
        subject: String,
    },

    /// Verify a token against the current time
    Verify {
        /// Token to verify
        token: String,
    },

    /// Print a token's header and claims without verifying it
    Inspect {
        /// Token to decode
        token: String,
    },

    /// Hash a password with Argon2id
    HashPassword {
        /// Password to hash
        password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_defaults() {
        let cli = Cli::try_parse_from(["authlab", "--secret", "s", "serve"]).unwrap();
        assert_eq!(cli.secret.as_deref(), Some("s"));
        match cli.command {
            Commands::Serve {
                addr,
                session_ttl,
                sweep_interval,
            } => {
                assert_eq!(addr.port(), 3000);
                assert_eq!(session_ttl, 86_400);
                assert_eq!(sweep_interval, 60);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn session_ttl_must_be_positive_and_bounded() {
        let too_long = (MAX_SESSION_TTL_SECS + 1).to_string();
        for value in ["0", "-5", too_long.as_str(), "9223372036854775807"] {
            let parsed = Cli::try_parse_from(["authlab", "serve", "--session-ttl", value]);
            assert!(parsed.is_err(), "accepted --session-ttl {value}");
        }

        let max = MAX_SESSION_TTL_SECS.to_string();
        let cli = Cli::try_parse_from(["authlab", "serve", "--session-ttl", max.as_str()]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve { session_ttl, .. } if session_ttl == MAX_SESSION_TTL_SECS
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["authlab", "issue", "taro", "--ttl", "60"]).unwrap();
        assert_eq!(cli.ttl, 60);
        assert!(matches!(cli.command, Commands::Issue { ref subject } if subject == "taro"));
    }
}
