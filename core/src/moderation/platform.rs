use async_trait::async_trait;

use super::error::PlatformError;
use crate::db::modlog::ModLog;

/// Membership actions and the log-channel side channel, as offered by the
/// chat platform. The bot implements this over its HTTP client; tests use
/// recording fakes.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn kick(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str
    ) -> Result<(), PlatformError>;

    async fn ban(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str
    ) -> Result<(), PlatformError>;

    async fn send_notice(
        &self,
        channel_id: u64,
        record: &ModLog
    ) -> Result<(), PlatformError>;
}
