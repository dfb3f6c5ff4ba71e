use ::common::api::{Capability, CreatePathRequest};

use crate::api::ApiClient;
use crate::args::{IdArgs, PathCommands, PathCreateArgs, PathListArgs, PathUpdateArgs, ShowArgs};
use crate::commands::{CommandContext, join_lines};
use crate::validate::validate_name;
use crate::view::registry::{path_lines, render_paths_table};
use crate::view::render_output;

pub async fn handle_paths(ctx: &CommandContext, command: PathCommands) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::ApiManager)?;
    let output = match command {
        PathCommands::List(args) => list_paths(&api, args).await?,
        PathCommands::Show(args) => show_path(&api, args).await?,
        PathCommands::Create(args) => create_path(&api, args).await?,
        PathCommands::Update(args) => update_path(&api, args).await?,
        PathCommands::Delete(args) => delete_path(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn list_paths(api: &ApiClient, args: PathListArgs) -> anyhow::Result<String> {
    let paths = api.paths().list_scoped(args.integration_id).await?;
    render_output(&paths, args.output.mode(), |paths| {
        if paths.is_empty() {
            "no paths found".to_string()
        } else {
            render_paths_table(paths)
        }
    })
}

pub async fn show_path(api: &ApiClient, args: ShowArgs) -> anyhow::Result<String> {
    let path = api.paths().get(args.id).await?;
    render_output(&path, args.output.mode(), |path| join_lines(path_lines(path)))
}

pub async fn create_path(api: &ApiClient, args: PathCreateArgs) -> anyhow::Result<String> {
    validate_name("path name", &args.name)?;
    let payload = CreatePathRequest {
        name: args.name.trim().to_string(),
        path: args.path,
        integration_id: args.integration_id,
    };
    let path = api.paths().create(&payload).await?;
    Ok(join_lines(path_lines(&path)))
}

pub async fn update_path(api: &ApiClient, args: PathUpdateArgs) -> anyhow::Result<String> {
    let current = api.paths().get(args.id).await?;
    let payload = CreatePathRequest {
        name: args
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or(current.name),
        path: args.path.unwrap_or(current.path),
        integration_id: args.integration_id.unwrap_or(current.integration_id),
    };
    validate_name("path name", &payload.name)?;
    let path = api.paths().update(args.id, &payload).await?;
    Ok(join_lines(path_lines(&path)))
}

pub async fn delete_path(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.paths().delete(args.id).await?;
    Ok(format!("deleted path {}", args.id))
}
