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
use twilight_util::builder::embed::{
    EmbedBuilder,
    EmbedFieldBuilder,
    EmbedFooterBuilder
};
use warden_core::moderation::{Capability, rapsheet, require};

use super::{actor_permissions, ephemeral_embed, guild_id, respond};
use crate::{
    context::Ctx,
    embeds,
    registry::{CommandEntry, CommandFuture}
};

// embeds carry at most 25 fields; older entries beyond that are summarized
// in the footer
const MAX_ENTRIES: usize = 25;

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "rapsheet",
    desc = "Show all moderation actions (warnings, kicks, bans) for a user",
    dm_permission = false,
    default_permissions = "Self::default_permissions"
)]
pub struct RapsheetCommand {
    #[command(desc = "User to look up")]
    pub user: ResolvedUser
}

impl RapsheetCommand {
    const fn default_permissions() -> Permissions {
        Permissions::KICK_MEMBERS
    }
}

pub fn entry() -> CommandEntry {
    CommandEntry {
        name: "rapsheet",
        definition: || RapsheetCommand::create_command().into(),
        run
    }
}

fn run(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = RapsheetCommand::from_interaction(data.into())?;
        let guild = guild_id(&interaction)?;

        if let Err(err) =
            require(actor_permissions(&interaction), Capability::CanKick)
        {
            let embed = embeds::execution_error(&err);
            respond(&ctx, &interaction, ephemeral_embed(embed)).await?;

            return Ok(());
        }

        let target = &options.user.resolved;
        let title = format!("Rap Sheet for {}", target.name);

        let sheet =
            match rapsheet::fetch(ctx.store.as_ref(), guild, target.id.get())
                .await
            {
                Ok(sheet) => sheet,
                Err(err) => {
                    let embed = embeds::error_embed(
                        "Error",
                        &format!("An error occurred: {err}")
                    );
                    respond(&ctx, &interaction, ephemeral_embed(embed))
                        .await?;

                    return Ok(());
                }
            };

        if sheet.is_empty() {
            let embed = EmbedBuilder::new()
                .title(title)
                .description("No moderation actions found.")
                .color(embeds::GREEN)
                .build();
            respond(&ctx, &interaction, ephemeral_embed(embed)).await?;

            return Ok(());
        }

        let mut builder =
            EmbedBuilder::new().title(title).color(embeds::ORANGE);

        if let Some(ts) = embeds::now() {
            builder = builder.timestamp(ts);
        }

        let total = sheet.len();

        for (index, entry) in
            sheet.entries().iter().take(MAX_ENTRIES).enumerate()
        {
            let moderator = entry
                .moderator_id
                .map(embeds::mention)
                .unwrap_or_else(|| "Unknown".to_string());

            let at = entry
                .timestamp
                .map(|ts| {
                    ts.to_chrono().format("%Y-%m-%d %H:%M UTC").to_string()
                })
                .unwrap_or_else(|| "unknown".to_string());

            builder = builder.field(EmbedFieldBuilder::new(
                format!("{}. {}", index + 1, entry.action.label()),
                format!(
                    "By: {moderator}\nReason: {}\nAt: {at}",
                    embeds::reason_text(&entry.reason)
                )
            ));
        }

        if total > MAX_ENTRIES {
            builder = builder.footer(EmbedFooterBuilder::new(format!(
                "Showing {MAX_ENTRIES} of {total} actions"
            )));
        }

        respond(&ctx, &interaction, ephemeral_embed(builder.build())).await?;

        Ok(())
    })
}
