use std::sync::{Arc, atomic::Ordering};

use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::application::interaction::{
    Interaction,
    application_command::CommandData
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

use super::{embed_response, respond};
use crate::{
    context::Ctx,
    embeds,
    registry::{CommandEntry, CommandFuture}
};

#[derive(CommandModel, CreateCommand)]
#[command(name = "ping", desc = "Check the bot's latency")]
pub struct PingCommand;

pub fn entry() -> CommandEntry {
    CommandEntry {
        name: "ping",
        definition: || PingCommand::create_command().into(),
        run
    }
}

fn run(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    _data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let latency = ctx.latency_ms.load(Ordering::Relaxed);

        let mut builder = EmbedBuilder::new()
            .title("Pong!")
            .description(format!("Bot latency: `{latency}ms`"))
            .color(embeds::GREEN);

        if let Some(author) = interaction.author() {
            builder = builder.footer(EmbedFooterBuilder::new(format!(
                "Requested by {}",
                author.name
            )));
        }

        respond(&ctx, &interaction, embed_response(builder.build())).await?;

        Ok(())
    })
}
