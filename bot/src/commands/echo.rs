use std::sync::Arc;

use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::application::interaction::{
    Interaction,
    application_command::CommandData
};

use super::{respond, text_response};
use crate::{
    context::Ctx,
    registry::{CommandEntry, CommandFuture}
};

#[derive(CommandModel, CreateCommand)]
#[command(name = "echo", desc = "Repeats what users say")]
pub struct EchoCommand {
    #[command(desc = "Say something")]
    pub message: String
}

pub fn entry() -> CommandEntry {
    CommandEntry {
        name: "echo",
        definition: || EchoCommand::create_command().into(),
        run
    }
}

fn run(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = EchoCommand::from_interaction(data.into())?;

        respond(&ctx, &interaction, text_response(options.message)).await?;

        Ok(())
    })
}
