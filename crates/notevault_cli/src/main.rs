//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notevault_core` linkage and configuration from the environment.
//! - Exercise one register/login/note/logout round-trip against the
//!   configured store.
//!
//! Exit codes: 0 ok, 1 runtime failure, 2 configuration failure.

use notevault_core::{
    init_logging_from_config, AuthError, CoreConfig, NoteVault, RequestContext,
};
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SMOKE_DEADLINE: Duration = Duration::from_secs(10);

fn main() -> ExitCode {
    println!("notevault_core ping={}", notevault_core::ping());
    println!("notevault_core version={}", notevault_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    match run_smoke(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_smoke module=cli status=error");
            eprintln!("smoke run failed: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_smoke(config: &CoreConfig) -> Result<(), String> {
    let vault = NoteVault::bootstrap(config).map_err(|err| err.to_string())?;
    let ctx = RequestContext::with_timeout(SMOKE_DEADLINE);
    let auth = vault.auth();

    let username = smoke_username();
    let password = "smoke-password";
    auth.register(&ctx, &username, password)
        .map_err(|err| public(&err))?;
    let token = auth
        .login(&ctx, &username, password)
        .map_err(|err| public(&err))?;
    let identity = auth
        .authenticate(Some(token.as_str()))
        .map_err(|err| public(&err))?;

    let notes = vault.notes();
    let note_id = notes
        .create_note(&ctx, &identity, "smoke note")
        .map_err(|err| err.public_message().to_string())?;
    let listed = notes
        .list_notes(&ctx, &identity)
        .map_err(|err| err.public_message().to_string())?;
    let outcome = notes
        .delete_note(&ctx, &identity, note_id)
        .map_err(|err| err.public_message().to_string())?;
    auth.logout(token.as_str());

    println!(
        "smoke user_id={} listed={} delete={:?} session_after_logout={}",
        identity.user_id(),
        listed.len(),
        outcome,
        auth.resolve(Some(token.as_str())).is_authenticated()
    );

    drop(auth);
    drop(notes);
    vault.shutdown().map_err(|err| err.to_string())
}

fn public(err: &AuthError) -> String {
    err.public_message().to_string()
}

fn smoke_username() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    format!("smoke-{nanos}")
}
