use tracing::info;

use super::{
    error::{ExecutionError, PlatformError},
    platform::Platform,
    store::AuditStore
};
use crate::db::{ModAction, ModLog};

/// Runs one moderation action end to end: platform side effect first,
/// audit record second. A platform denial writes nothing, so the audit log
/// never contains an action that did not happen. A failed write after a
/// successful platform action surfaces as a logging failure, since the
/// in-guild effect cannot be rolled back.
pub async fn execute(
    platform: &dyn Platform,
    store: &dyn AuditStore,
    action: ModAction,
    guild_id: u64,
    user_id: u64,
    moderator_id: u64,
    reason: &str
) -> Result<ModLog, ExecutionError> {
    let side_effect = match action {
        ModAction::Kick => platform.kick(guild_id, user_id, reason).await,
        ModAction::Ban => platform.ban(guild_id, user_id, reason).await,
        // ? a warning has no platform side effect; the record is the action
        ModAction::Warn => Ok(())
    };

    match side_effect {
        Ok(()) => {}
        // a target that already left resolves the same way as a denial
        Err(PlatformError::Forbidden | PlatformError::NotFound) => {
            return Err(ExecutionError::PlatformForbidden(action));
        }
        Err(PlatformError::Other(detail)) => {
            return Err(ExecutionError::Platform { action, detail });
        }
    }

    let record =
        ModLog::new(action, guild_id, user_id, Some(moderator_id), reason);

    store
        .insert(&record)
        .await
        .map_err(|source| ExecutionError::Persistence { action, source })?;

    info!(guild_id, user_id, moderator_id, %action, "moderation action recorded");

    Ok(record)
}
