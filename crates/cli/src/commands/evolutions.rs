use ::common::api::{Capability, CreateEvolutionRequest, Evolution};

use crate::api::ApiClient;
use crate::args::{
    EvolutionCommands, EvolutionCreateArgs, EvolutionListArgs, EvolutionUpdateArgs, IdArgs,
};
use crate::commands::{CommandContext, join_lines};
use crate::validate::{validate_description, validate_name};
use crate::view::evolution::{evolution_lines, redact_evolutions, render_evolutions_table};
use crate::view::render_output;

pub async fn handle_evolutions(
    ctx: &CommandContext,
    command: EvolutionCommands,
) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::EvolutionManager)?;
    let output = match command {
        EvolutionCommands::List(args) => list_evolutions(&api, args).await?,
        EvolutionCommands::Create(args) => create_evolution(&api, args).await?,
        EvolutionCommands::Update(args) => update_evolution(&api, args).await?,
        EvolutionCommands::Delete(args) => delete_evolution(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn list_evolutions(api: &ApiClient, args: EvolutionListArgs) -> anyhow::Result<String> {
    let evolutions = api.evolutions().list().await?;
    let evolutions = if args.show_keys {
        evolutions
    } else {
        redact_evolutions(&evolutions)
    };
    render_output(&evolutions, args.output.mode(), |evolutions| {
        if evolutions.is_empty() {
            "no evolution services found".to_string()
        } else {
            render_evolutions_table(evolutions, args.show_keys)
        }
    })
}

pub async fn create_evolution(
    api: &ApiClient,
    args: EvolutionCreateArgs,
) -> anyhow::Result<String> {
    validate_name("evolution name", &args.name)?;
    validate_description(&args.description)?;
    let payload = CreateEvolutionRequest {
        name: args.name.trim().to_string(),
        description: args.description,
        url: args.url,
        api_key: args.api_key,
        owner_id: args.owner_id,
    };
    let evolution = api.evolutions().create(&payload).await?;
    Ok(join_lines(evolution_lines(&evolution)))
}

/// Evolutions have no item endpoint, so the current record comes from the list.
async fn find_evolution(api: &ApiClient, id: i64) -> anyhow::Result<Evolution> {
    api.evolutions()
        .list()
        .await?
        .into_iter()
        .find(|evolution| evolution.id == id)
        .ok_or_else(|| anyhow::anyhow!("evolution {} not found", id))
}

pub async fn update_evolution(
    api: &ApiClient,
    args: EvolutionUpdateArgs,
) -> anyhow::Result<String> {
    let current = find_evolution(api, args.id).await?;
    let payload = CreateEvolutionRequest {
        name: args
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or(current.name),
        description: args.description.unwrap_or(current.description),
        url: args.url.unwrap_or(current.url),
        api_key: args.api_key.unwrap_or(current.api_key),
        owner_id: args.owner_id.unwrap_or(current.owner_id),
    };
    validate_name("evolution name", &payload.name)?;
    validate_description(&payload.description)?;
    let evolution = api.evolutions().update(args.id, &payload).await?;
    Ok(join_lines(evolution_lines(&evolution)))
}

pub async fn delete_evolution(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.evolutions().delete(args.id).await?;
    Ok(format!("deleted evolution {}", args.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::OutputFormatArgs;
    use crate::commands::test_util::logged_in;
    use httpmock::Method::{GET, PUT};
    use httpmock::MockServer;
    use serde_json::{Value, json};

    fn evolution_json(id: i64, key: &str) -> Value {
        json!({
            "id": id,
            "nome": "evo-main",
            "descricao": "",
            "url": "https://evo.example.com",
            "apiKey": key,
            "ownerId": 1,
            "ownerNome": "acme",
            "createdAt": "2025-01-01T00:00:00",
            "updatedAt": "2025-01-01T00:00:00"
        })
    }

    #[tokio::test]
    async fn json_list_redacts_keys_by_default() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/evolution");
                then.status(200).json_body(json!([evolution_json(2, "k-123")]));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = list_evolutions(
            &api,
            EvolutionListArgs {
                show_keys: false,
                output: OutputFormatArgs {
                    json: true,
                    yaml: false,
                },
            },
        )
        .await
        .expect("list");
        assert!(out.contains("[redacted]"));
        assert!(!out.contains("k-123"));
    }

    #[tokio::test]
    async fn update_reads_current_record_from_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/evolution");
                then.status(200).json_body(json!([
                    evolution_json(1, "other"),
                    evolution_json(2, "k-123")
                ]));
            })
            .await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT).path("/api/evolution/2").json_body(json!({
                    "nome": "evo-main",
                    "descricao": "",
                    "url": "https://evo2.example.com",
                    "apiKey": "k-123",
                    "ownerId": 1
                }));
                then.status(200).json_body(evolution_json(2, "k-123"));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        update_evolution(
            &api,
            EvolutionUpdateArgs {
                id: 2,
                name: None,
                description: None,
                url: Some("https://evo2.example.com".into()),
                api_key: None,
                owner_id: None,
            },
        )
        .await
        .expect("update");
        put.assert_async().await;

        let err = update_evolution(
            &api,
            EvolutionUpdateArgs {
                id: 99,
                name: None,
                description: None,
                url: None,
                api_key: None,
                owner_id: None,
            },
        )
        .await
        .expect_err("missing");
        assert!(err.to_string().contains("evolution 99 not found"));
    }
}
