use ::common::api::{Capability, CreateRequestRequest};

use crate::api::ApiClient;
use crate::args::{
    IdArgs, RequestCommands, RequestCreateArgs, RequestListArgs, RequestUpdateArgs, ShowArgs,
};
use crate::commands::{CommandContext, join_lines, merge_json, merge_map};
use crate::validate::{collapse_pairs, collapse_pairs_to_json, validate_name};
use crate::view::account::request_test_lines;
use crate::view::registry::{render_requests_table, request_lines};
use crate::view::render_output;

pub async fn handle_requests(
    ctx: &CommandContext,
    command: RequestCommands,
) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::ApiManager)?;
    let output = match command {
        RequestCommands::List(args) => list_requests(&api, args).await?,
        RequestCommands::Show(args) => show_request(&api, args).await?,
        RequestCommands::Create(args) => create_request(&api, args).await?,
        RequestCommands::Update(args) => update_request(&api, args).await?,
        RequestCommands::Delete(args) => delete_request(&api, args).await?,
        RequestCommands::Test(args) => test_request(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn list_requests(api: &ApiClient, args: RequestListArgs) -> anyhow::Result<String> {
    let requests = api.requests().list_scoped(args.path_id).await?;
    render_output(&requests, args.output.mode(), |requests| {
        if requests.is_empty() {
            "no requests found".to_string()
        } else {
            render_requests_table(requests)
        }
    })
}

pub async fn show_request(api: &ApiClient, args: ShowArgs) -> anyhow::Result<String> {
    let request = api.requests().get(args.id).await?;
    render_output(&request, args.output.mode(), |request| {
        join_lines(request_lines(request))
    })
}

pub async fn create_request(api: &ApiClient, args: RequestCreateArgs) -> anyhow::Result<String> {
    validate_name("request name", &args.name)?;
    let payload = CreateRequestRequest {
        name: args.name.trim().to_string(),
        http_method: args.method.into(),
        path_id: args.path_id,
        content_type: args.content_type.into(),
        body_fields: collapse_pairs(&args.body),
        header_fields: collapse_pairs(&args.headers),
        param_fields: collapse_pairs(&args.params),
        request_example: collapse_pairs_to_json(&args.example),
    };
    let request = api.requests().create(&payload).await?;
    Ok(join_lines(request_lines(&request)))
}

pub async fn update_request(api: &ApiClient, args: RequestUpdateArgs) -> anyhow::Result<String> {
    let current = api.requests().get(args.id).await?;
    let payload = CreateRequestRequest {
        name: args
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or(current.name),
        http_method: args.method.map(Into::into).unwrap_or(current.http_method),
        path_id: args.path_id.unwrap_or(current.path_id),
        content_type: args
            .content_type
            .map(Into::into)
            .unwrap_or(current.content_type),
        body_fields: merge_map(&args.body, false, current.body_fields),
        header_fields: merge_map(&args.headers, false, current.header_fields),
        param_fields: merge_map(&args.params, false, current.param_fields),
        request_example: merge_json(&args.example, false, current.request_example),
    };
    validate_name("request name", &payload.name)?;
    let request = api.requests().update(args.id, &payload).await?;
    Ok(join_lines(request_lines(&request)))
}

pub async fn delete_request(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.requests().delete(args.id).await?;
    Ok(format!("deleted request {}", args.id))
}

pub async fn test_request(api: &ApiClient, args: ShowArgs) -> anyhow::Result<String> {
    let result = api.requests().test(args.id).await?;
    render_output(&result, args.output.mode(), |result| {
        join_lines(request_test_lines(result))
    })
}
