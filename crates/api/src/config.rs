#![forbid(unsafe_code)]
//! Command-line and environment configuration for the `cp_api` binary.

use crate::auth::DEFAULT_TOKEN_TTL_SECS;
use clap::{Args, Parser, Subcommand};
use cp_core::{AgencyType, Role};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cp_api")]
#[command(about = "Civic complaint reporting API and admin tooling")]
#[command(version)]
pub struct Cli {
    /// Directory holding the SQLite database
    #[arg(long, global = true, env = "CP_STORAGE_DIR", default_value = ".civic_petitions")]
    pub storage_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, env = "CP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the reporting API over HTTP
    Serve(ServeArgs),
    /// Register an agency
    CreateAgency(CreateAgencyArgs),
    /// Register a user
    CreateUser(CreateUserArgs),
    /// Print a bearer token for an existing user
    IssueToken(IssueTokenArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TokenArgs {
    /// HMAC secret for bearer tokens (at least 16 bytes)
    #[arg(long, env = "CP_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Token lifetime in seconds
    #[arg(long, env = "CP_TOKEN_TTL_SECS", default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: u64,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "CP_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    #[command(flatten)]
    pub token: TokenArgs,

    /// Agency type that forms the institution statistics dimension
    #[arg(long, default_value = "CENTRAL", value_parser = parse_agency_type)]
    pub institution_type: AgencyType,
}

#[derive(Args, Debug)]
pub struct CreateAgencyArgs {
    #[arg(long)]
    pub name: String,

    /// CENTRAL or LOCAL
    #[arg(long = "type", value_parser = parse_agency_type)]
    pub agency_type: AgencyType,

    #[arg(long)]
    pub region_code: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub login_id: String,

    #[arg(long)]
    pub display_name: String,

    /// USER or AGENCY
    #[arg(long, default_value = "USER", value_parser = parse_role)]
    pub role: Role,

    /// Agency the user works for (staff accounts)
    #[arg(long)]
    pub agency_no: Option<i64>,

    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,
}

#[derive(Args, Debug)]
pub struct IssueTokenArgs {
    #[arg(long)]
    pub user_no: i64,

    #[command(flatten)]
    pub token: TokenArgs,
}

fn parse_agency_type(value: &str) -> Result<AgencyType, String> {
    AgencyType::parse(value).ok_or_else(|| format!("unknown agency type: {value}"))
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from([
            "cp_api",
            "serve",
            "--token-secret",
            "0123456789abcdef",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "info");
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind, "0.0.0.0:8080");
        assert_eq!(args.token.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(args.institution_type, AgencyType::Central);
    }

    #[test]
    fn create_user_parses_role_case_insensitively() {
        let cli = Cli::try_parse_from([
            "cp_api",
            "--storage-dir",
            "/tmp/cp",
            "create-user",
            "--login-id",
            "clerk",
            "--display-name",
            "Clerk",
            "--role",
            "agency",
            "--agency-no",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.storage_dir, PathBuf::from("/tmp/cp"));
        let Command::CreateUser(args) = cli.command else {
            panic!("expected create-user");
        };
        assert_eq!(args.role, Role::Agency);
        assert_eq!(args.agency_no, Some(3));
    }

    #[test]
    fn unknown_agency_type_is_rejected() {
        let err = Cli::try_parse_from(["cp_api", "create-agency", "--name", "X", "--type", "PLANET"])
            .unwrap_err();
        assert!(err.to_string().contains("unknown agency type"));
    }
}
