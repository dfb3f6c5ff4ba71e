use std::collections::BTreeMap;

use ::common::api::{Capability, CreateIntegrationRequest, EntityId};
use tracing::debug;

use crate::api::ApiClient;
use crate::args::{
    IdArgs, IntegrationCommands, IntegrationCreateArgs, IntegrationFieldsArgs,
    IntegrationListArgs, IntegrationUpdateArgs, ShowArgs,
};
use crate::commands::{CommandContext, join_lines, merge_map};
use crate::template::{available_fields, unknown_references};
use crate::validate::{collapse_pairs, validate_name};
use crate::view::registry::{integration_lines, render_integrations_table};
use crate::view::render_output;

pub async fn handle_integrations(
    ctx: &CommandContext,
    command: IntegrationCommands,
) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::ApiManager)?;
    let output = match command {
        IntegrationCommands::List(args) => list_integrations(&api, args).await?,
        IntegrationCommands::Show(args) => show_integration(&api, args).await?,
        IntegrationCommands::Create(args) => create_integration(&api, args).await?,
        IntegrationCommands::Update(args) => update_integration(&api, args).await?,
        IntegrationCommands::Delete(args) => delete_integration(&api, args).await?,
        IntegrationCommands::Fields(args) => list_reference_fields(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn list_integrations(
    api: &ApiClient,
    args: IntegrationListArgs,
) -> anyhow::Result<String> {
    let integrations = api.integrations().list_scoped(args.owner_id).await?;
    render_output(&integrations, args.output.mode(), |integrations| {
        if integrations.is_empty() {
            "no integrations found".to_string()
        } else {
            render_integrations_table(integrations)
        }
    })
}

pub async fn show_integration(api: &ApiClient, args: ShowArgs) -> anyhow::Result<String> {
    let integration = api.integrations().get(args.id).await?;
    render_output(&integration, args.output.mode(), |integration| {
        join_lines(integration_lines(integration))
    })
}

pub async fn create_integration(
    api: &ApiClient,
    args: IntegrationCreateArgs,
) -> anyhow::Result<String> {
    validate_name("integration name", &args.name)?;
    let headers = collapse_pairs(&args.headers);
    warn_unknown_references(api, args.authentication_id, &headers).await;
    let payload = CreateIntegrationRequest {
        name: args.name.trim().to_string(),
        description: args.description,
        base_url: args.base_url,
        owner_id: args.owner_id,
        authentication_id: args.authentication_id,
        headers,
    };
    let integration = api.integrations().create(&payload).await?;
    Ok(join_lines(integration_lines(&integration)))
}

pub async fn update_integration(
    api: &ApiClient,
    args: IntegrationUpdateArgs,
) -> anyhow::Result<String> {
    let current = api.integrations().get(args.id).await?;
    let payload = CreateIntegrationRequest {
        name: args
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or(current.name),
        description: args.description.unwrap_or(current.description),
        base_url: args.base_url.unwrap_or(current.base_url),
        owner_id: args.owner_id.unwrap_or(current.owner_id),
        authentication_id: args
            .authentication_id
            .unwrap_or(current.authentication_id),
        headers: merge_map(&args.headers, args.clear_headers, current.headers),
    };
    validate_name("integration name", &payload.name)?;
    warn_unknown_references(api, payload.authentication_id, &payload.headers).await;
    let integration = api.integrations().update(args.id, &payload).await?;
    Ok(join_lines(integration_lines(&integration)))
}

pub async fn delete_integration(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.integrations().delete(args.id).await?;
    Ok(format!("deleted integration {}", args.id))
}

/// Field names usable as `${name}` in headers of integrations bound to the profile.
pub async fn list_reference_fields(
    api: &ApiClient,
    args: IntegrationFieldsArgs,
) -> anyhow::Result<String> {
    let auth = api.authentications().get(args.authentication_id).await?;
    let fields = available_fields(Some(&auth));
    render_output(&fields, args.output.mode(), |fields| {
        if fields.is_empty() {
            format!(
                "authentication '{}' exposes no fields; run `ihub auth test --name {}` first",
                auth.name, auth.name
            )
        } else {
            fields
                .iter()
                .map(|field| format!("${{{field}}}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })
}

/// The backend resolves references; this only flags likely typos.
async fn warn_unknown_references(
    api: &ApiClient,
    authentication_id: EntityId,
    headers: &BTreeMap<String, String>,
) {
    if headers.is_empty() {
        return;
    }
    let auth = match api.authentications().get(authentication_id).await {
        Ok(auth) => auth,
        Err(err) => {
            debug!(%err, "skipping reference check");
            return;
        }
    };
    let unknown = unknown_references(headers.values(), Some(&auth));
    if !unknown.is_empty() {
        eprintln!(
            "warning: authentication '{}' does not expose: {}",
            auth.name,
            unknown.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::OutputFormatArgs;
    use crate::commands::test_util::logged_in;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::{Value, json};

    fn auth_json(fields: Value) -> Value {
        json!({
            "id": 4,
            "nome": "crm-prod",
            "descricao": "",
            "ownerId": 1,
            "ownerNome": "acme",
            "url": "https://crm.example.com/token",
            "authenticationType": "BEARER",
            "contentType": "APPLICATION_JSON",
            "responseFields": fields,
            "createdAt": "2025-01-01T00:00:00",
            "updatedAt": "2025-01-01T00:00:00"
        })
    }

    #[tokio::test]
    async fn fields_lists_references_in_map_order() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/register/authentication/4");
                then.status(200).json_body(auth_json(
                    json!({"expiresIn": "number", "accessToken": "string"}),
                ));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = list_reference_fields(
            &api,
            IntegrationFieldsArgs {
                authentication_id: 4,
                output: OutputFormatArgs {
                    json: false,
                    yaml: false,
                },
            },
        )
        .await
        .expect("fields");
        assert_eq!(out, "${accessToken}\n${expiresIn}");
    }

    #[tokio::test]
    async fn fields_explains_empty_profiles() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/register/authentication/4");
                then.status(200).json_body(auth_json(Value::Null));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = list_reference_fields(
            &api,
            IntegrationFieldsArgs {
                authentication_id: 4,
                output: OutputFormatArgs {
                    json: false,
                    yaml: false,
                },
            },
        )
        .await
        .expect("fields");
        assert!(out.contains("exposes no fields"));
    }

    #[tokio::test]
    async fn create_sends_headers_and_tolerates_failed_reference_lookup() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/register/authentication/4");
                then.status(404);
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/integration").json_body(json!({
                    "nome": "crm",
                    "description": "",
                    "baseUrl": "https://crm.example.com",
                    "ownerId": 1,
                    "authenticationId": 4,
                    "headers": {"Authorization": "Bearer ${accessToken}"}
                }));
                then.status(201).json_body(json!({
                    "id": 8,
                    "nome": "crm",
                    "description": "",
                    "baseUrl": "https://crm.example.com",
                    "ownerId": 1,
                    "ownerNome": "acme",
                    "authenticationId": 4,
                    "authenticationNome": "crm-prod",
                    "headers": {"Authorization": "Bearer ${accessToken}"},
                    "createdAt": "2025-01-01T00:00:00",
                    "updatedAt": "2025-01-01T00:00:00"
                }));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = create_integration(
            &api,
            IntegrationCreateArgs {
                name: "crm".into(),
                description: String::new(),
                base_url: "https://crm.example.com".into(),
                owner_id: 1,
                authentication_id: 4,
                headers: vec![("Authorization".into(), "Bearer ${accessToken}".into())],
            },
        )
        .await
        .expect("create");
        create.assert_async().await;
        assert!(out.contains("authentication: crm-prod (4)"));
    }
}
