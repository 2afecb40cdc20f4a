//! Server entry point.
//!
//! # Responsibility
//! - Load configuration, initialize logging, open and migrate the database.
//! - Seed the single configured credential, then serve the portfolio routes.

use eportfolio_api::{router, AppState, Config};
use eportfolio_core::model::user::Credential;
use eportfolio_core::repo::user_repo::{SqliteUserRepo, UserRepository};
use eportfolio_core::{init_logging, CredentialVerifier};
use log::info;
use std::error::Error;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("eportfolio_api: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    init_logging(&config.log_level, &config.log_dir)?;

    let conn = eportfolio_core::db::open_db(&config.db_path)?;
    seed_credential(&conn, &config)?;

    let verifier = CredentialVerifier::new(config.secret.as_bytes(), config.token_ttl_secs);
    let state = AppState::new(conn, verifier);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(
        "event=server_start module=main addr={} db={}",
        config.addr, config.db_path
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// Inserts or replaces the configured credential so login works from the
/// first request, including on a fresh database file.
fn seed_credential(conn: &rusqlite::Connection, config: &Config) -> Result<(), Box<dyn Error>> {
    let users = SqliteUserRepo::try_new(conn)?;
    users.upsert(&Credential {
        username: config.username.clone(),
        password_hash: config.password_hash.clone(),
    })?;
    info!(
        "event=credential_seed module=main username={}",
        config.username
    );
    Ok(())
}
