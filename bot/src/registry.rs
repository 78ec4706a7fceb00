use std::{future::Future, pin::Pin, sync::Arc};

use twilight_model::{
    application::{
        command::Command,
        interaction::{Interaction, application_command::CommandData}
    },
    id::Id
};
use warden_core::env;

use crate::{
    commands::{self, HandlerError},
    context::Ctx
};

pub type CommandFuture =
    Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send>>;

pub struct CommandEntry {
    pub name: &'static str,
    pub definition: fn() -> Command,
    pub run: fn(Arc<Ctx>, Interaction, CommandData) -> CommandFuture
}

/// Every chat command the bot serves, listed explicitly. Built once at
/// startup and read-only afterwards; `/bot reload` builds a fresh registry
/// and swaps it in as a whole.
pub struct CommandRegistry {
    entries: Vec<CommandEntry>
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: vec![
                commands::ping::entry(),
                commands::echo::entry(),
                commands::kickban::kick_entry(),
                commands::kickban::ban_entry(),
                commands::warn::entry(),
                commands::rapsheet::entry(),
                commands::settings::entry(),
                commands::manage::entry(),
            ]
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn definitions(&self) -> Vec<Command> {
        self.entries.iter().map(|entry| (entry.definition)()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares the registry's commands with the platform: to the dev guild
/// when one is configured (instant availability), globally otherwise.
pub async fn sync(
    ctx: &Ctx,
    registry: &CommandRegistry
) -> Result<usize, twilight_http::Error> {
    let definitions = registry.definitions();
    let client = ctx.http.interaction(ctx.application_id);

    match env().dev_guild {
        Some(guild_id) => {
            client
                .set_guild_commands(Id::new(guild_id), &definitions)
                .await?;
        }
        None => {
            client.set_global_commands(&definitions).await?;
        }
    }

    Ok(definitions.len())
}
