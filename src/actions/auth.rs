//! Authentication action implementations.
//!
//! Login drives the device authorization flow; logout clears both the
//! credential store and the in-memory session; status reports the cached
//! identity without touching the network.

use chrono::DateTime;
use clap::ArgMatches;
use color_print::cprintln;

use crate::actions::{format_requested, output_format, CliActionError};
use crate::banner;
use crate::context::ExecutionContext;
use crate::device_flow::run_login_flow;
use crate::format::Formattable;
use crate::model::AuthStatus;

/// Run the interactive device-code login flow.
pub async fn login(ctx: &mut ExecutionContext) -> Result<(), CliActionError> {
    let base_url = ctx.api.base_url().to_string();
    let http = ctx.api.http().clone();
    run_login_flow(&http, &base_url, ctx.api.session_mut()).await?;
    Ok(())
}

/// Remove stored credentials and clear the session. Idempotent.
pub fn logout(ctx: &mut ExecutionContext) -> Result<(), CliActionError> {
    ctx.api.session_mut().clear()?;
    println!("Logged out. Credentials removed.");
    Ok(())
}

/// Report whether the user is authenticated and as whom.
pub fn status(ctx: &ExecutionContext, matches: &ArgMatches) -> Result<(), CliActionError> {
    let session = ctx.api.session();

    let credential = match session.current_credential() {
        Some(credential) => credential,
        None => {
            println!("You are not authenticated. Use 'lattice auth login' to log in.");
            return Ok(());
        }
    };

    let expires_at = DateTime::from_timestamp_millis(credential.expires_at)
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());

    if format_requested(matches) {
        let status = AuthStatus {
            name: credential.user.name.clone(),
            email: credential.user.email.clone(),
            user_id: credential.user.id,
            token_expires_at: expires_at,
        };
        let format = output_format(matches)?;
        println!("{}", status.format(&format)?);
        return Ok(());
    }

    cprintln!(
        "<green>Authenticated as {} ({})</green>",
        credential.user.name,
        credential.user.email
    );
    println!("Access token expires at {}", expires_at);
    banner::print_context(&ctx.configuration);
    Ok(())
}
