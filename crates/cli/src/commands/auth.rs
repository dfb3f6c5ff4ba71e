use ::common::api::{Capability, CreateAuthenticationRequest};

use crate::api::ApiClient;
use crate::args::{
    AuthCommands, AuthCreateArgs, AuthListArgs, AuthTestArgs, AuthUpdateArgs, IdArgs, ShowArgs,
};
use crate::commands::{CommandContext, join_lines, merge_json, merge_map};
use crate::validate::{collapse_pairs, collapse_pairs_to_json, validate_description, validate_name};
use crate::view::account::authentication_test_lines;
use crate::view::registry::{authentication_lines, render_authentications_table};
use crate::view::render_output;

pub async fn handle_auth(ctx: &CommandContext, command: AuthCommands) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::ApiManager)?;
    let output = match command {
        AuthCommands::List(args) => list_authentications(&api, args).await?,
        AuthCommands::Show(args) => show_authentication(&api, args).await?,
        AuthCommands::Create(args) => create_authentication(&api, args).await?,
        AuthCommands::Update(args) => update_authentication(&api, args).await?,
        AuthCommands::Delete(args) => delete_authentication(&api, args).await?,
        AuthCommands::Test(args) => test_authentication(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn list_authentications(api: &ApiClient, args: AuthListArgs) -> anyhow::Result<String> {
    let auths = api.authentications().list_scoped(args.owner_id).await?;
    render_output(&auths, args.output.mode(), |auths| {
        if auths.is_empty() {
            "no authentications found".to_string()
        } else {
            render_authentications_table(auths)
        }
    })
}

pub async fn show_authentication(api: &ApiClient, args: ShowArgs) -> anyhow::Result<String> {
    let auth = api.authentications().get(args.id).await?;
    render_output(&auth, args.output.mode(), |auth| {
        join_lines(authentication_lines(auth))
    })
}

pub async fn create_authentication(
    api: &ApiClient,
    args: AuthCreateArgs,
) -> anyhow::Result<String> {
    validate_name("authentication name", &args.name)?;
    validate_description(&args.description)?;
    let payload = CreateAuthenticationRequest {
        name: args.name.trim().to_string(),
        description: args.description,
        owner_id: args.owner_id,
        url: args.url,
        authentication_type: args.auth_type.into(),
        content_type: args.content_type.into(),
        request_body: collapse_pairs_to_json(&args.body),
        headers: collapse_pairs(&args.headers),
    };
    let auth = api.authentications().create(&payload).await?;
    Ok(join_lines(authentication_lines(&auth)))
}

pub async fn update_authentication(
    api: &ApiClient,
    args: AuthUpdateArgs,
) -> anyhow::Result<String> {
    let current = api.authentications().get(args.id).await?;
    let payload = CreateAuthenticationRequest {
        name: args
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or(current.name),
        description: args.description.unwrap_or(current.description),
        owner_id: args.owner_id.unwrap_or(current.owner_id),
        url: args.url.unwrap_or(current.url),
        authentication_type: args
            .auth_type
            .map(Into::into)
            .unwrap_or(current.authentication_type),
        content_type: args
            .content_type
            .map(Into::into)
            .unwrap_or(current.content_type),
        request_body: merge_json(&args.body, args.clear_body, current.request_body),
        headers: merge_map(&args.headers, args.clear_headers, current.headers),
    };
    validate_name("authentication name", &payload.name)?;
    validate_description(&payload.description)?;
    let auth = api.authentications().update(args.id, &payload).await?;
    Ok(join_lines(authentication_lines(&auth)))
}

pub async fn delete_authentication(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.authentications().delete(args.id).await?;
    Ok(format!("deleted authentication {}", args.id))
}

pub async fn test_authentication(api: &ApiClient, args: AuthTestArgs) -> anyhow::Result<String> {
    let result = api.authentications().test(&args.name).await?;
    render_output(&result, args.output.mode(), |result| {
        join_lines(authentication_test_lines(result))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{AuthTypeArg, ContentTypeArg, OutputFormatArgs};
    use crate::commands::test_util::logged_in;
    use httpmock::Method::{GET, POST, PUT};
    use httpmock::MockServer;
    use serde_json::{Value, json};

    fn auth_json(headers: Value) -> Value {
        json!({
            "id": 4,
            "nome": "crm-prod",
            "descricao": "",
            "ownerId": 1,
            "ownerNome": "acme",
            "url": "https://crm.example.com/token",
            "authenticationType": "OAUTH2",
            "contentType": "APPLICATION_JSON",
            "requestBody": {"grant_type": "client_credentials"},
            "headers": headers,
            "responseFields": null,
            "createdAt": "2025-01-01T00:00:00",
            "updatedAt": "2025-01-01T00:00:00"
        })
    }

    #[tokio::test]
    async fn create_sends_collapsed_maps_with_templates_verbatim() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/register/authentication")
                    .json_body(json!({
                        "nome": "crm-prod",
                        "descricao": "",
                        "ownerId": 1,
                        "url": "https://crm.example.com/token",
                        "authenticationType": "OAUTH2",
                        "contentType": "APPLICATION_JSON",
                        "requestBody": {"grant_type": "client_credentials"},
                        "headers": {"Authorization": "Bearer ${accessToken}"}
                    }));
                then.status(201)
                    .json_body(auth_json(json!({"Authorization": "Bearer ${accessToken}"})));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = create_authentication(
            &api,
            AuthCreateArgs {
                name: "crm-prod".into(),
                description: String::new(),
                owner_id: 1,
                url: "https://crm.example.com/token".into(),
                auth_type: AuthTypeArg::Oauth2,
                content_type: ContentTypeArg::Json,
                headers: vec![
                    ("Authorization".into(), "Basic old".into()),
                    ("Authorization".into(), "Bearer ${accessToken}".into()),
                ],
                body: vec![("grant_type".into(), "client_credentials".into())],
            },
        )
        .await
        .expect("create");

        create.assert_async().await;
        assert!(out.contains("  Authorization: Bearer ${accessToken}"));
    }

    #[tokio::test]
    async fn update_keeps_headers_unless_replaced_or_cleared() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/register/authentication/4");
                then.status(200)
                    .json_body(auth_json(json!({"X-Tenant": "acme"})));
            })
            .await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/register/authentication/4")
                    .json_body_partial(r#"{"url": "https://crm.example.com/v2/token", "headers": {}}"#);
                then.status(200).json_body(auth_json(json!({})));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        update_authentication(
            &api,
            AuthUpdateArgs {
                id: 4,
                name: None,
                description: None,
                owner_id: None,
                url: Some("https://crm.example.com/v2/token".into()),
                auth_type: None,
                content_type: None,
                headers: vec![],
                body: vec![],
                clear_headers: true,
                clear_body: false,
            },
        )
        .await
        .expect("update");
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_reports_extracted_fields() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/register/authentication/test/crm-prod")
                    .query_param("registerTest", "true");
                then.status(200).json_body(json!({
                    "success": true,
                    "statusCode": 200,
                    "statusMessage": "OK",
                    "responseHeaders": {},
                    "responseBody": "{\"accessToken\":\"abc\"}",
                    "extractedFields": {"accessToken": "string"},
                    "errorMessage": null,
                    "responseTimeMs": 31
                }));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = test_authentication(
            &api,
            AuthTestArgs {
                name: "crm-prod".into(),
                output: OutputFormatArgs {
                    json: false,
                    yaml: false,
                },
            },
        )
        .await
        .expect("test");
        assert!(out.contains("result: success"));
        assert!(out.contains("  accessToken: string"));
    }
}
