use ::common::api::{Capability, CreateInstanceRequest};

use crate::api::ApiClient;
use crate::args::{
    IdArgs, InstanceCommands, InstanceConnectArgs, InstanceCreateArgs, InstanceListArgs,
    InstanceStateArgs, InstanceWebhookArgs,
};
use crate::commands::{CommandContext, join_lines};
use crate::validate::validate_instance_name;
use crate::view::evolution::{
    connect_lines, connect_view, instance_lines, logout_line, render_instances_table, state_lines,
};
use crate::view::render_output;

pub async fn handle_instances(
    ctx: &CommandContext,
    command: InstanceCommands,
) -> anyhow::Result<()> {
    let api = ctx.gated_api(Capability::EvolutionManager)?;
    let output = match command {
        InstanceCommands::List(args) => list_instances(&api, args).await?,
        InstanceCommands::Create(args) => create_instance(&api, args).await?,
        InstanceCommands::Delete(args) => delete_instance(&api, args).await?,
        InstanceCommands::Connect(args) => connect_instance(&api, args).await?,
        InstanceCommands::Logout(args) => logout_instance(&api, args).await?,
        InstanceCommands::State(args) => instance_state(&api, args).await?,
        InstanceCommands::Webhook(args) => set_instance_webhook(&api, args).await?,
    };
    println!("{output}");
    Ok(())
}

/// The backend has no parent filter for instances; narrowing happens here.
pub async fn list_instances(api: &ApiClient, args: InstanceListArgs) -> anyhow::Result<String> {
    let mut instances = api.instances().list().await?;
    if let Some(evolution_id) = args.evolution_id {
        instances.retain(|instance| instance.evolution_id == evolution_id);
    }
    render_output(&instances, args.output.mode(), |instances| {
        if instances.is_empty() {
            "no instances found".to_string()
        } else {
            render_instances_table(instances)
        }
    })
}

pub async fn create_instance(api: &ApiClient, args: InstanceCreateArgs) -> anyhow::Result<String> {
    validate_instance_name(&args.name)?;
    let payload = CreateInstanceRequest {
        instance_name: args.name.trim().to_string(),
        qrcode: !args.no_qrcode,
        evolution_id: args.evolution_id,
        integration: args.integration,
        webhook_url: args.webhook_url,
    };
    let instance = api.instances().create(&payload).await?;
    Ok(join_lines(instance_lines(&instance)))
}

pub async fn delete_instance(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    api.instances().delete(args.id).await?;
    Ok(format!("deleted instance {}", args.id))
}

pub async fn connect_instance(
    api: &ApiClient,
    args: InstanceConnectArgs,
) -> anyhow::Result<String> {
    let response = api.instances().connect(args.id).await?;
    let view = connect_view(&response, args.show_qr);
    render_output(&view, args.output.mode(), |_| {
        join_lines(connect_lines(&response, args.show_qr))
    })
}

pub async fn logout_instance(api: &ApiClient, args: IdArgs) -> anyhow::Result<String> {
    let response = api.instances().logout(args.id).await?;
    Ok(logout_line(&response))
}

pub async fn instance_state(api: &ApiClient, args: InstanceStateArgs) -> anyhow::Result<String> {
    let response = api.instances().connection_state(args.id).await?;
    render_output(&response, args.output.mode(), |response| {
        join_lines(state_lines(response))
    })
}

pub async fn set_instance_webhook(
    api: &ApiClient,
    args: InstanceWebhookArgs,
) -> anyhow::Result<String> {
    let instance = api.instances().set_webhook(args.id, args.url).await?;
    Ok(join_lines(instance_lines(&instance)))
}
