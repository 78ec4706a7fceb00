use std::sync::Arc;

use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::{
    application::interaction::{
        Interaction,
        application_command::CommandData
    },
    id::{Id, marker::ChannelMarker}
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};
use warden_core::db::GuildFlag;

use super::{
    ephemeral_embed,
    embed_response,
    guild_id,
    respond,
    text_response
};
use crate::{
    context::Ctx,
    embeds,
    registry::{CommandEntry, CommandFuture}
};

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "settings",
    desc = "Bot settings for the server",
    dm_permission = false
)]
pub enum SettingsCommand {
    #[command(name = "show")]
    Show(ShowCommand),
    #[command(name = "setlog")]
    SetLog(SetLogCommand),
    #[command(name = "togglefun")]
    ToggleFun(ToggleFunCommand),
    #[command(name = "togglemodlog")]
    ToggleModlog(ToggleModlogCommand)
}

#[derive(CommandModel, CreateCommand)]
#[command(name = "show", desc = "Show current settings")]
pub struct ShowCommand;

#[derive(CommandModel, CreateCommand)]
#[command(name = "setlog", desc = "Set the moderation log channel")]
pub struct SetLogCommand {
    #[command(desc = "Log channel", channel_types = "guild_text")]
    pub channel: Id<ChannelMarker>
}

#[derive(CommandModel, CreateCommand)]
#[command(name = "togglefun", desc = "Enable or disable fun commands")]
pub struct ToggleFunCommand {
    #[command(desc = "Whether fun commands are enabled")]
    pub enabled: bool
}

#[derive(CommandModel, CreateCommand)]
#[command(name = "togglemodlog", desc = "Enable or disable moderation logs")]
pub struct ToggleModlogCommand {
    #[command(desc = "Whether moderation logs are enabled")]
    pub enabled: bool
}

pub fn entry() -> CommandEntry {
    CommandEntry {
        name: "settings",
        definition: || SettingsCommand::create_command().into(),
        run
    }
}

fn enabled_text(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}

fn run(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = SettingsCommand::from_interaction(data.into())?;
        let guild = guild_id(&interaction)?;

        let outcome = match options {
            SettingsCommand::Show(_) => {
                match ctx.store.settings(guild).await {
                    Ok(settings) => {
                        let log_channel = settings
                            .log_channel_id
                            .map(embeds::channel_mention)
                            .unwrap_or_else(|| "Not set".to_string());

                        let embed = EmbedBuilder::new()
                            .title("Server Settings")
                            .color(embeds::BLURPLE)
                            .field(EmbedFieldBuilder::new(
                                "Log Channel",
                                log_channel
                            ))
                            .field(
                                EmbedFieldBuilder::new(
                                    "Fun Commands",
                                    enabled_text(settings.fun_enabled)
                                )
                                .inline()
                            )
                            .field(
                                EmbedFieldBuilder::new(
                                    "Mod Logs",
                                    enabled_text(settings.modlog_enabled)
                                )
                                .inline()
                            )
                            .build();

                        respond(&ctx, &interaction, embed_response(embed))
                            .await?;

                        return Ok(());
                    }
                    Err(err) => Err(err)
                }
            }
            SettingsCommand::SetLog(opts) => {
                let channel = opts.channel.get();

                ctx.store.set_log_channel(guild, channel).await.map(|()| {
                    format!(
                        "Log channel set to {}",
                        embeds::channel_mention(channel)
                    )
                })
            }
            SettingsCommand::ToggleFun(opts) => ctx
                .store
                .set_flag(guild, GuildFlag::Fun, opts.enabled)
                .await
                .map(|()| {
                    format!(
                        "Fun commands {}.",
                        enabled_text(opts.enabled).to_lowercase()
                    )
                }),
            SettingsCommand::ToggleModlog(opts) => ctx
                .store
                .set_flag(guild, GuildFlag::Modlog, opts.enabled)
                .await
                .map(|()| {
                    format!(
                        "Moderation logs {}.",
                        enabled_text(opts.enabled).to_lowercase()
                    )
                })
        };

        match outcome {
            Ok(message) => {
                respond(&ctx, &interaction, text_response(message)).await?;
            }
            Err(err) => {
                let embed = embeds::error_embed(
                    "Error",
                    &format!("An error occurred: {err}")
                );
                respond(&ctx, &interaction, ephemeral_embed(embed)).await?;
            }
        }

        Ok(())
    })
}
