//! The `/kick` and `/ban` commands: guard, platform action, audit record,
//! response, then the fire-and-forget log notice.

use std::sync::Arc;

use twilight_interactions::command::{
    CommandModel,
    CreateCommand,
    ResolvedUser
};
use twilight_model::{
    application::interaction::{
        Interaction,
        application_command::CommandData
    },
    guild::Permissions
};
use warden_core::{
    db::ModAction,
    moderation::{Capability, executor, notifier, require}
};

use super::{
    HandlerError,
    actor_permissions,
    author_id,
    embed_response,
    ephemeral_embed,
    guild_id,
    respond
};
use crate::{
    context::Ctx,
    embeds,
    registry::{CommandEntry, CommandFuture}
};

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "kick",
    desc = "Kick a user and log it",
    dm_permission = false,
    default_permissions = "Self::default_permissions"
)]
pub struct KickCommand {
    #[command(desc = "User to kick")]
    pub user: ResolvedUser,
    #[command(desc = "Reason for the kick")]
    pub reason: String
}

impl KickCommand {
    const fn default_permissions() -> Permissions {
        Permissions::KICK_MEMBERS
    }
}

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "ban",
    desc = "Ban a user and log it",
    dm_permission = false,
    default_permissions = "Self::default_permissions"
)]
pub struct BanCommand {
    #[command(desc = "User to ban")]
    pub user: ResolvedUser,
    #[command(desc = "Reason for the ban")]
    pub reason: String
}

impl BanCommand {
    const fn default_permissions() -> Permissions {
        Permissions::BAN_MEMBERS
    }
}

pub fn kick_entry() -> CommandEntry {
    CommandEntry {
        name: "kick",
        definition: || KickCommand::create_command().into(),
        run: run_kick
    }
}

pub fn ban_entry() -> CommandEntry {
    CommandEntry {
        name: "ban",
        definition: || BanCommand::create_command().into(),
        run: run_ban
    }
}

fn run_kick(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = KickCommand::from_interaction(data.into())?;

        moderate(
            ctx,
            interaction,
            ModAction::Kick,
            Capability::CanKick,
            options.user.resolved.id.get(),
            options.reason
        )
        .await
    })
}

fn run_ban(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = BanCommand::from_interaction(data.into())?;

        moderate(
            ctx,
            interaction,
            ModAction::Ban,
            Capability::CanBan,
            options.user.resolved.id.get(),
            options.reason
        )
        .await
    })
}

pub(super) async fn moderate(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    action: ModAction,
    capability: Capability,
    target_id: u64,
    reason: String
) -> Result<(), HandlerError> {
    let guild = guild_id(&interaction)?;
    let moderator = author_id(&interaction)?;

    if let Err(err) = require(actor_permissions(&interaction), capability) {
        let embed = embeds::execution_error(&err);
        respond(&ctx, &interaction, ephemeral_embed(embed)).await?;

        return Ok(());
    }

    let result = executor::execute(
        ctx.platform.as_ref(),
        ctx.store.as_ref(),
        action,
        guild,
        target_id,
        moderator,
        &reason
    )
    .await;

    match result {
        Ok(record) => {
            let embed =
                embeds::action_embed(&record, embeds::action_color(action));
            respond(&ctx, &interaction, embed_response(embed)).await?;

            // the invoker response is already out; the log notice must
            // never delay or fail it
            let ctx = ctx.clone();
            tokio::spawn(async move {
                notifier::notify(
                    ctx.platform.as_ref(),
                    ctx.store.as_ref(),
                    record.guild_id,
                    &record
                )
                .await;
            });
        }
        Err(err) => {
            let embed = embeds::execution_error(&err);
            respond(&ctx, &interaction, ephemeral_embed(embed)).await?;
        }
    }

    Ok(())
}
