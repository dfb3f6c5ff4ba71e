use ::common::api::{Capability, LoginRequest};
use tracing::warn;

use crate::api::ApiClient;
use crate::api::session::{EstablishedSession, establish_session, refresh_user};
use crate::args::{
    LoginArgs, PermissionAvailableArgs, PermissionCommands, PermissionSetArgs, WhoamiArgs,
};
use crate::commands::{CommandContext, join_lines};
use crate::session_store::{SessionStorage, SessionStore};
use crate::validate::unique_permissions;
use crate::view::account::{render_permissions_table, user_lines};
use crate::view::render_output;

pub async fn handle_login(ctx: &CommandContext, args: LoginArgs) -> anyhow::Result<()> {
    let credentials = LoginRequest {
        email: args.email.trim().to_string(),
        password: args.password,
    };
    let session = establish_session(&ctx.client, &ctx.base, &credentials, &ctx.session).await?;
    println!("{}", login_message(&session));
    Ok(())
}

fn login_message(session: &EstablishedSession) -> String {
    match &session.user {
        Some(user) => format!("logged in as {} <{}>", user.display_name, user.email),
        None => "logged in; user details unavailable (run `ihub whoami --refresh`)".to_string(),
    }
}

pub fn handle_logout(ctx: &CommandContext) -> anyhow::Result<()> {
    ctx.session.clear()?;
    println!("logged out");
    Ok(())
}

pub async fn handle_whoami(ctx: &CommandContext, args: WhoamiArgs) -> anyhow::Result<()> {
    println!("{}", whoami(ctx, args).await?);
    Ok(())
}

pub async fn whoami(ctx: &CommandContext, args: WhoamiArgs) -> anyhow::Result<String> {
    let api = ctx.api()?;
    let cached = if args.refresh { None } else { ctx.session.user() };
    let user = match cached {
        Some(user) => user,
        None => refresh_user(&api, &ctx.session).await?,
    };
    render_output(&user, args.output.mode(), |user| join_lines(user_lines(user)))
}

pub async fn handle_permissions(
    ctx: &CommandContext,
    command: PermissionCommands,
) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::Permission)?;
    let output = match command {
        PermissionCommands::Available(args) => available_permissions(&api, args).await?,
        PermissionCommands::Set(args) => set_permissions(&api, &ctx.session, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn available_permissions(
    api: &ApiClient,
    args: PermissionAvailableArgs,
) -> anyhow::Result<String> {
    let permissions = api.available_permissions().await?;
    render_output(&permissions, args.output.mode(), |permissions| {
        if permissions.is_empty() {
            "no permissions available".to_string()
        } else {
            render_permissions_table(permissions)
        }
    })
}

/// Replaces the user's tag set and refreshes the cached record with the answer.
pub async fn set_permissions<S: SessionStorage>(
    api: &ApiClient,
    session: &SessionStore<S>,
    args: PermissionSetArgs,
) -> anyhow::Result<String> {
    let permissions = unique_permissions(&args.permissions)?;
    let user = api.update_permissions(permissions).await?;
    if let Err(err) = session.set_user(&user) {
        warn!(?err, "failed to cache updated user record");
    }
    Ok(join_lines(user_lines(&user)))
}
