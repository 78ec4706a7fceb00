//! The `/bot` management group: status, reload, info.

use std::{
    sync::{Arc, atomic::Ordering},
    time::Duration
};

use tracing::info;
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::application::interaction::{
    Interaction,
    application_command::CommandData
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};
use warden_core::db::ActorPermissions;

use super::{
    actor_permissions,
    embed_response,
    ephemeral_text,
    respond,
    text_response
};
use crate::{
    context::Ctx,
    embeds,
    registry::{self, CommandEntry, CommandFuture, CommandRegistry}
};

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "bot",
    desc = "Bot management commands",
    dm_permission = false
)]
pub enum BotCommand {
    #[command(name = "status")]
    Status(StatusCommand),
    #[command(name = "reload")]
    Reload(ReloadCommand),
    #[command(name = "info")]
    Info(InfoCommand)
}

#[derive(CommandModel, CreateCommand)]
#[command(name = "status", desc = "Show bot status and statistics")]
pub struct StatusCommand;

#[derive(CommandModel, CreateCommand)]
#[command(name = "reload", desc = "Reload and re-register bot commands")]
pub struct ReloadCommand;

#[derive(CommandModel, CreateCommand)]
#[command(name = "info", desc = "Show bot information")]
pub struct InfoCommand;

pub fn entry() -> CommandEntry {
    CommandEntry {
        name: "bot",
        definition: || BotCommand::create_command().into(),
        run
    }
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();

    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn run(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = BotCommand::from_interaction(data.into())?;

        match options {
            BotCommand::Status(_) => {
                let statistics = format!(
                    "**Servers:** {}\n**Commands:** {}\n**Events:** {}",
                    ctx.guilds.load(Ordering::Relaxed),
                    ctx.commands().len(),
                    ctx.events.len()
                );
                let performance = format!(
                    "**Latency:** {}ms\n**Uptime:** {}",
                    ctx.latency_ms.load(Ordering::Relaxed),
                    format_uptime(ctx.started.elapsed())
                );

                let embed = EmbedBuilder::new()
                    .title("Bot Status")
                    .color(embeds::GREEN)
                    .field(
                        EmbedFieldBuilder::new("Statistics", statistics)
                            .inline()
                    )
                    .field(
                        EmbedFieldBuilder::new("Performance", performance)
                            .inline()
                    )
                    .build();

                respond(&ctx, &interaction, embed_response(embed)).await?;
            }
            BotCommand::Reload(_) => {
                let perms = actor_permissions(&interaction);

                if !perms.contains(ActorPermissions::ADMINISTRATOR) {
                    respond(
                        &ctx,
                        &interaction,
                        ephemeral_text(
                            "You need Administrator permissions to use this \
                             command."
                        )
                    )
                    .await?;

                    return Ok(());
                }

                let fresh = Arc::new(CommandRegistry::new());

                match registry::sync(&ctx, &fresh).await {
                    Ok(count) => {
                        ctx.swap_commands(fresh);
                        info!(commands = count, "command registry reloaded");

                        respond(
                            &ctx,
                            &interaction,
                            text_response(format!(
                                "Reloaded {count} commands."
                            ))
                        )
                        .await?;
                    }
                    Err(err) => {
                        respond(
                            &ctx,
                            &interaction,
                            ephemeral_text(format!("Reload failed: {err}"))
                        )
                        .await?;
                    }
                }
            }
            BotCommand::Info(_) => {
                let embed = EmbedBuilder::new()
                    .title("Bot Information")
                    .description(
                        "Guild moderation with a persistent audit log: \
                         warnings, kicks and bans are recorded and can be \
                         mirrored to a log channel."
                    )
                    .color(embeds::BLURPLE)
                    .build();

                respond(&ctx, &interaction, embed_response(embed)).await?;
            }
        }

        Ok(())
    })
}
