#![forbid(unsafe_code)]

use crate::auth::{IdentityConfig, IdentityError, IdentityProvider};
use crate::config::{Cli, Command, CreateAgencyArgs, CreateUserArgs, IssueTokenArgs, ServeArgs, TokenArgs};
use crate::dto::AgencyDto;
use crate::routes::build_router;
use crate::state::{ApiSettings, AppState};
use crate::support::{now_ms_i64, now_unix_secs, ts_ms_to_rfc3339};
use cp_core::ids::IdError;
use cp_core::{AgencyNo, Subject, UserNo};
use cp_storage::{CreateAgencyRequest, CreateUserRequest, SqliteStore, StoreError};
use serde_json::json;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("identity: {0}")]
    Identity(#[from] IdentityError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl From<IdError> for CommandError {
    fn from(err: IdError) -> Self {
        CommandError::InvalidArgument(err.message())
    }
}

pub async fn run(cli: Cli) -> Result<(), CommandError> {
    let storage_dir = cli.storage_dir;
    match cli.command {
        Command::Serve(args) => serve(&storage_dir, args).await,
        Command::CreateAgency(args) => create_agency(&storage_dir, args),
        Command::CreateUser(args) => create_user(&storage_dir, args),
        Command::IssueToken(args) => issue_token(&storage_dir, args),
    }
}

fn identity_provider(token: TokenArgs) -> Result<IdentityProvider, CommandError> {
    let config = IdentityConfig::new(token.token_secret.into_bytes(), token.token_ttl_secs)?;
    Ok(IdentityProvider::new(config))
}

async fn serve(storage_dir: &Path, args: ServeArgs) -> Result<(), CommandError> {
    let identity = identity_provider(args.token)?;
    let store = SqliteStore::open(storage_dir)?;
    let settings = ApiSettings {
        institution_type: args.institution_type,
    };
    let app = build_router(AppState::new(store, identity, settings));

    let listener = TcpListener::bind(&args.bind).await?;
    info!(
        bind = %args.bind,
        storage_dir = %storage_dir.display(),
        institution_type = settings.institution_type.as_str(),
        "reporting api listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("reporting api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn create_agency(storage_dir: &Path, args: CreateAgencyArgs) -> Result<(), CommandError> {
    let mut store = SqliteStore::open(storage_dir)?;
    let agency = store.create_agency(CreateAgencyRequest {
        agency_type: args.agency_type,
        agency_name: args.name,
        region_code: args.region_code,
        created_at_ms: now_ms_i64(),
    })?;
    info!(agency_no = %agency.agency_no, "agency created");
    println!("{}", serde_json::to_string_pretty(&AgencyDto::from(agency))?);
    Ok(())
}

fn create_user(storage_dir: &Path, args: CreateUserArgs) -> Result<(), CommandError> {
    let agency_no = args.agency_no.map(AgencyNo::try_new).transpose()?;
    let mut store = SqliteStore::open(storage_dir)?;
    let user = store.create_user(CreateUserRequest {
        login_id: args.login_id,
        display_name: args.display_name,
        role: args.role,
        agency_no,
        birth_date: args.birth_date,
        created_at_ms: now_ms_i64(),
    })?;
    info!(user_no = %user.user_no, "user created");
    let out = json!({
        "userNo": user.user_no.get(),
        "loginId": user.login_id,
        "displayName": user.display_name,
        "role": user.role.as_str(),
        "agencyNo": user.agency_no.map(AgencyNo::get),
        "birthDate": user.birth_date,
        "createdAt": ts_ms_to_rfc3339(user.created_at_ms),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn issue_token(storage_dir: &Path, args: IssueTokenArgs) -> Result<(), CommandError> {
    let user_no = UserNo::try_new(args.user_no)?;
    let identity = identity_provider(args.token)?;
    let store = SqliteStore::open(storage_dir)?;
    let user = store.get_user(user_no)?;
    let token = identity.issue(&Subject::new(user.user_no, user.role), now_unix_secs());
    println!("{token}");
    Ok(())
}
