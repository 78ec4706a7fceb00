use tracing::debug;

use super::{platform::Platform, store::AuditStore};
use crate::db::ModLog;

/// Mirrors a recorded action to the guild's log channel, if one is
/// configured. Best effort: every failure is swallowed here, and the
/// invoker-facing response never waits on this path.
pub async fn notify(
    platform: &dyn Platform,
    store: &dyn AuditStore,
    guild_id: u64,
    record: &ModLog
) {
    let settings = match store.settings(guild_id).await {
        Ok(settings) => settings,
        Err(err) => {
            debug!(guild_id, error = %err, "settings lookup failed, skipping log notice");
            return;
        }
    };

    let Some(channel_id) = settings.log_channel_id else {
        return;
    };

    if let Err(err) = platform.send_notice(channel_id, record).await {
        debug!(guild_id, channel_id, error = %err, "log notice dropped");
    }
}
