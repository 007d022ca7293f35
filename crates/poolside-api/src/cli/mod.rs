//! CLI command definitions for the `poolside` binary.

pub mod admin;
pub mod messages;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use poolside_types::auth::Role;

/// Swimming pool reservation service.
#[derive(Parser)]
#[command(name = "poolside", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for info, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config and HOST).
        #[arg(long)]
        host: Option<String>,

        /// Export spans to stdout through OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// List the message registry, or check it for consistency.
    Messages {
        /// Validate that every category is registered exactly once; exit non-zero otherwise.
        #[arg(long)]
        check: bool,
    },

    /// Create a staff account (ADMIN by default).
    #[command(name = "create-admin")]
    CreateAdmin {
        /// Login email.
        email: String,

        /// Display name.
        #[arg(long)]
        name: String,

        /// Contact phone.
        #[arg(long)]
        phone: Option<String>,

        /// Role to assign (USER, ADMIN or TREASURER).
        #[arg(long, default_value = "ADMIN")]
        role: Role,

        /// Password (prompted with confirmation when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Log filter directive implied by `--quiet` and `-v`.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,poolside=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_admin_parses_role() {
        let cli = Cli::parse_from([
            "poolside",
            "create-admin",
            "caja@piscina.cl",
            "--name",
            "Caja",
            "--role",
            "treasurer",
        ]);
        match cli.command {
            Commands::CreateAdmin { email, role, password, .. } => {
                assert_eq!(email, "caja@piscina.cl");
                assert_eq!(role, Role::Treasurer);
                assert!(password.is_none());
            }
            _ => panic!("expected create-admin"),
        }
    }

    #[test]
    fn test_log_directive() {
        let quiet = Cli::parse_from(["poolside", "--quiet", "messages"]);
        assert_eq!(quiet.log_directive(), "error");
        let verbose = Cli::parse_from(["poolside", "-vv", "serve"]);
        assert_eq!(verbose.log_directive(), "trace");
    }
}
