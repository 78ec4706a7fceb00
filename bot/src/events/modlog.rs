use std::sync::Arc;

use tracing::warn;
use twilight_model::gateway::payload::incoming::BanAdd;
use warden_core::{
    db::{ModAction, ModLog},
    moderation::notifier
};

use super::EventFuture;
use crate::context::Ctx;

/// Passive ban observer: records bans performed outside the bot. A ban
/// issued through `/ban` reaches this handler too; the resulting duplicate
/// record is tolerated by readers and carries no moderator.
pub fn on_ban_add(ctx: Arc<Ctx>, event: BanAdd) -> EventFuture {
    Box::pin(async move {
        let record = ModLog::new(
            ModAction::Ban,
            event.guild_id.get(),
            event.user.id.get(),
            None,
            "(unknown)"
        );

        if let Err(err) = ctx.store.insert(&record).await {
            warn!(
                guild_id = record.guild_id,
                user_id = record.user_id,
                error = %err,
                "failed to record observed ban"
            );
            return;
        }

        notifier::notify(
            ctx.platform.as_ref(),
            ctx.store.as_ref(),
            record.guild_id,
            &record
        )
        .await;
    })
}
