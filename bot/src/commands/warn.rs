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
use warden_core::{db::ModAction, moderation::Capability};

use super::kickban::moderate;
use crate::{
    context::Ctx,
    registry::{CommandEntry, CommandFuture}
};

#[derive(CommandModel, CreateCommand)]
#[command(
    name = "warn",
    desc = "Warn a user and log it",
    dm_permission = false,
    default_permissions = "Self::default_permissions"
)]
pub struct WarnCommand {
    #[command(desc = "User to warn")]
    pub user: ResolvedUser,
    #[command(desc = "Reason for the warning")]
    pub reason: String
}

impl WarnCommand {
    const fn default_permissions() -> Permissions {
        Permissions::KICK_MEMBERS
    }
}

pub fn entry() -> CommandEntry {
    CommandEntry {
        name: "warn",
        definition: || WarnCommand::create_command().into(),
        run
    }
}

fn run(
    ctx: Arc<Ctx>,
    interaction: Interaction,
    data: CommandData
) -> CommandFuture {
    Box::pin(async move {
        let options = WarnCommand::from_interaction(data.into())?;

        moderate(
            ctx,
            interaction,
            ModAction::Warn,
            Capability::CanKick,
            options.user.resolved.id.get(),
            options.reason
        )
        .await
    })
}
