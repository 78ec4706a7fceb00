use std::sync::Arc;

use tracing::debug;
use twilight_model::gateway::payload::incoming::MemberAdd;
use warden_core::env;

use super::EventFuture;
use crate::context::Ctx;

/// Greets joining members in the guild's welcome channel, when a channel
/// with the configured name exists. Silent no-op otherwise.
pub fn on_member_add(ctx: Arc<Ctx>, event: MemberAdd) -> EventFuture {
    Box::pin(async move {
        let channels = match ctx.http.guild_channels(event.guild_id).await {
            Ok(response) => match response.models().await {
                Ok(channels) => channels,
                Err(err) => {
                    debug!(error = %err, "failed to read guild channels");
                    return;
                }
            },
            Err(err) => {
                debug!(error = %err, "failed to list guild channels");
                return;
            }
        };

        let Some(channel) = channels.iter().find(|channel| {
            channel.name.as_deref() == Some(env().welcome_channel.as_str())
        }) else {
            return;
        };

        let greeting = format!(
            "Welcome <@{}>, Hope you enjoy your stay here.",
            event.member.user.id.get()
        );

        if let Err(err) =
            ctx.http.create_message(channel.id).content(&greeting).await
        {
            debug!(error = %err, "welcome message dropped");
        }
    })
}
