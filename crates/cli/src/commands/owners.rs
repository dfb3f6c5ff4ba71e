use ::common::api::{Capability, CreateOwnerRequest};

use crate::api::ApiClient;
use crate::args::{IdArgs, OwnerCommands, OwnerCreateArgs, OwnerListArgs, OwnerUpdateArgs, ShowArgs};
use crate::commands::{CommandContext, join_lines};
use crate::validate::{validate_description, validate_name};
use crate::view::registry::{owner_lines, render_owners_table};
use crate::view::render_output;

pub async fn handle_owners(ctx: &CommandContext, command: OwnerCommands) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::ApiManager)?;
    let output = match command {
        OwnerCommands::List(args) => list_owners(&api, args).await?,
        OwnerCommands::Show(args) => show_owner(&api, args).await?,
        OwnerCommands::Create(args) => create_owner(&api, args).await?,
        OwnerCommands::Update(args) => update_owner(&api, args).await?,
        OwnerCommands::Delete(args) => delete_owner(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

pub async fn list_owners(api: &ApiClient, args: OwnerListArgs) -> anyhow::Result<String> {
    let owners = api.owners().list().await?;
    render_output(&owners, args.output.mode(), |owners| {
        if owners.is_empty() {
            "no owners found".to_string()
        } else {
            render_owners_table(owners)
        }
    })
}

pub async fn show_owner(api: &ApiClient, args: ShowArgs) -> anyhow::Result<String> {
    let owner = api.owners().get(args.id).await?;
    render_output(&owner, args.output.mode(), |owner| {
        join_lines(owner_lines(owner))
    })
}

pub async fn create_owner(api: &ApiClient, args: OwnerCreateArgs) -> anyhow::Result<String> {
    validate_name("owner name", &args.name)?;
    validate_description(&args.description)?;
    let payload = CreateOwnerRequest {
        name: args.name.trim().to_string(),
        description: args.description,
    };
    let owner = api.owners().create(&payload).await?;
    Ok(join_lines(owner_lines(&owner)))
}

pub async fn update_owner(api: &ApiClient, args: OwnerUpdateArgs) -> anyhow::Result<String> {
    let current = api.owners().get(args.id).await?;
    let payload = CreateOwnerRequest {
        name: args
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or(current.name),
        description: args.description.unwrap_or(current.description),
    };
    validate_name("owner name", &payload.name)?;
    validate_description(&payload.description)?;
    let owner = api.owners().update(args.id, &payload).await?;
    Ok(join_lines(owner_lines(&owner)))
}

pub async fn delete_owner(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.owners().delete(args.id).await?;
    Ok(format!("deleted owner {}", args.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::OutputFormatArgs;
    use crate::commands::test_util::{logged_in, owner_json};
    use httpmock::Method::{GET, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    fn table() -> OutputFormatArgs {
        OutputFormatArgs {
            json: false,
            yaml: false,
        }
    }

    #[tokio::test]
    async fn list_renders_table_or_empty_message() {
        let server = MockServer::start_async().await;
        let mut mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/owner");
                then.status(200).json_body(json!([owner_json(1, "acme")]));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = list_owners(&api, OwnerListArgs { output: table() })
            .await
            .expect("list");
        assert!(out.starts_with("ID"));
        assert!(out.contains("acme"));

        mock.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/owner");
                then.status(200).json_body(json!([]));
            })
            .await;
        let out = list_owners(&api, OwnerListArgs { output: table() })
            .await
            .expect("list");
        assert_eq!(out, "no owners found");
    }

    #[tokio::test]
    async fn update_merges_omitted_fields_from_current() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/owner/1");
                then.status(200).json_body(json!({
                    "id": 1,
                    "nome": "acme",
                    "descricao": "Acme Corp",
                    "createdAt": "2025-01-01T00:00:00",
                    "updatedAt": "2025-01-01T00:00:00"
                }));
            })
            .await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/owner/1")
                    .json_body(json!({"nome": "acme-br", "descricao": "Acme Corp"}));
                then.status(200).json_body(owner_json(1, "acme-br"));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = update_owner(
            &api,
            OwnerUpdateArgs {
                id: 1,
                name: Some("acme-br".into()),
                description: None,
            },
        )
        .await
        .expect("update");
        put.assert_async().await;
        assert!(out.contains("name: acme-br"));
    }

    #[tokio::test]
    async fn update_trims_name_like_create() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/owner/1");
                then.status(200).json_body(owner_json(1, "acme"));
            })
            .await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/owner/1")
                    .json_body_partial(r#"{"nome": "acme-br"}"#);
                then.status(200).json_body(owner_json(1, "acme-br"));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        update_owner(
            &api,
            OwnerUpdateArgs {
                id: 1,
                name: Some("  acme-br \t".into()),
                description: None,
            },
        )
        .await
        .expect("update");
        put.assert_async().await;
    }

    #[tokio::test]
    async fn list_renders_records_with_null_description() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/owner");
                then.status(200).json_body(json!([{
                    "id": 5,
                    "nome": "initech",
                    "descricao": null,
                    "createdAt": "2025-01-01T00:00:00",
                    "updatedAt": "2025-01-01T00:00:00"
                }]));
            })
            .await;
        let api = logged_in(server.url("")).api().expect("api");

        let out = list_owners(&api, OwnerListArgs { output: table() })
            .await
            .expect("null description decodes");
        assert!(out.contains("initech"), "{out}");
    }

    #[tokio::test]
    async fn create_rejects_blank_name_without_calling_backend() {
        let server = MockServer::start_async().await;
        let api = logged_in(server.url("")).api().expect("api");
        let err = create_owner(
            &api,
            OwnerCreateArgs {
                name: "  ".into(),
                description: String::new(),
            },
        )
        .await
        .expect_err("blank name");
        assert!(err.to_string().contains("owner name cannot be empty"));
    }
}
