pub mod echo;
pub mod kickban;
pub mod manage;
pub mod ping;
pub mod rapsheet;
pub mod settings;
pub mod warn;

use std::sync::Arc;

use thiserror::Error;
use tracing::error;
use twilight_model::{
    application::interaction::{Interaction, InteractionData},
    channel::message::{Embed, MessageFlags},
    guild::Permissions,
    http::interaction::{
        InteractionResponse,
        InteractionResponseData,
        InteractionResponseType
    },
    id::Id
};
use twilight_util::builder::InteractionResponseDataBuilder;
use warden_core::db::ActorPermissions;

use crate::{context::Ctx, embeds};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to parse command options: {0}")]
    Parse(#[from] twilight_interactions::error::ParseError),

    #[error(transparent)]
    Http(#[from] twilight_http::Error),

    #[error("command invoked outside a guild")]
    NoGuild,

    #[error("interaction has no author")]
    NoAuthor
}

/// Entry point for every interaction delivered by the gateway. A handler
/// failure is caught here and converted into a generic ephemeral error
/// response instead of propagating.
pub async fn handle(ctx: Arc<Ctx>, interaction: Interaction) {
    let Some(InteractionData::ApplicationCommand(data)) =
        interaction.data.clone()
    else {
        return;
    };

    let registry = ctx.commands();

    let Some(entry) = registry.get(data.name.as_str()) else {
        tracing::warn!(command = %data.name, "unknown command invocation");
        return;
    };

    if let Err(err) = (entry.run)(ctx.clone(), interaction.clone(), *data).await
    {
        error!(command = entry.name, error = %err, "command handler failed");

        let embed =
            embeds::error_embed("Error", "An error occurred while running this command.");
        let _ = respond(&ctx, &interaction, ephemeral_embed(embed)).await;
    }
}

pub async fn respond(
    ctx: &Ctx,
    interaction: &Interaction,
    data: InteractionResponseData
) -> Result<(), twilight_http::Error> {
    ctx.http
        .interaction(ctx.application_id)
        .create_response(interaction.id, &interaction.token, &InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data)
        })
        .await?;

    Ok(())
}

pub fn embed_response(embed: Embed) -> InteractionResponseData {
    InteractionResponseDataBuilder::new().embeds([embed]).build()
}

pub fn ephemeral_embed(embed: Embed) -> InteractionResponseData {
    InteractionResponseDataBuilder::new()
        .embeds([embed])
        .flags(MessageFlags::EPHEMERAL)
        .build()
}

pub fn text_response(content: impl Into<String>) -> InteractionResponseData {
    InteractionResponseDataBuilder::new().content(content).build()
}

pub fn ephemeral_text(content: impl Into<String>) -> InteractionResponseData {
    InteractionResponseDataBuilder::new()
        .content(content)
        .flags(MessageFlags::EPHEMERAL)
        .build()
}

pub fn guild_id(interaction: &Interaction) -> Result<u64, HandlerError> {
    interaction
        .guild_id
        .map(Id::get)
        .ok_or(HandlerError::NoGuild)
}

pub fn author_id(interaction: &Interaction) -> Result<u64, HandlerError> {
    interaction
        .author_id()
        .map(Id::get)
        .ok_or(HandlerError::NoAuthor)
}

/// The acting member's permissions as resolved by Discord for this
/// interaction, reduced to the capabilities the guard understands.
pub fn actor_permissions(interaction: &Interaction) -> ActorPermissions {
    let Some(perms) =
        interaction.member.as_ref().and_then(|member| member.permissions)
    else {
        return ActorPermissions::empty();
    };

    let mut actor = ActorPermissions::empty();

    if perms.contains(Permissions::KICK_MEMBERS) {
        actor |= ActorPermissions::KICK_MEMBERS;
    }
    if perms.contains(Permissions::BAN_MEMBERS) {
        actor |= ActorPermissions::BAN_MEMBERS;
    }
    if perms.contains(Permissions::ADMINISTRATOR) {
        actor |= ActorPermissions::ADMINISTRATOR;
    }

    actor
}
