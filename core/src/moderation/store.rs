use async_trait::async_trait;
use bson::Document;
use futures::TryStreamExt;

use super::error::StoreError;
use crate::db::{GuildFlag, GuildSettings, ModLog, doc};

/// The two record collections behind the moderation pipeline. Writes are
/// atomic per single document; there are no cross-record transactions.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert(&self, record: &ModLog) -> Result<(), StoreError>;

    async fn history(
        &self,
        guild_id: u64,
        user_id: u64
    ) -> Result<Vec<ModLog>, StoreError>;

    /// Returns defaults, never a not-found error, when the guild has no
    /// settings document yet.
    async fn settings(&self, guild_id: u64)
    -> Result<GuildSettings, StoreError>;

    /// Upsert. The channel is not validated here; the notifier checks it
    /// lazily at use time.
    async fn set_log_channel(
        &self,
        guild_id: u64,
        channel_id: u64
    ) -> Result<(), StoreError>;

    async fn set_flag(
        &self,
        guild_id: u64,
        flag: GuildFlag,
        value: bool
    ) -> Result<(), StoreError>;
}

/// Production store over the `mod_logs` and `guild_settings` collections.
pub struct MongoAuditStore;

#[async_trait]
impl AuditStore for MongoAuditStore {
    async fn insert(&self, record: &ModLog) -> Result<(), StoreError> {
        record.insert_one().await?;

        Ok(())
    }

    async fn history(
        &self,
        guild_id: u64,
        user_id: u64
    ) -> Result<Vec<ModLog>, StoreError> {
        let cursor = ModLog::find(doc! {
            "guild_id": guild_id as i64,
            "user_id": user_id as i64
        })
        .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn settings(
        &self,
        guild_id: u64
    ) -> Result<GuildSettings, StoreError> {
        let found =
            GuildSettings::find_one(doc! {"_id": guild_id as i64}).await?;

        if let Some(settings) = found {
            return Ok(settings);
        }

        // created lazily on first read
        let settings = GuildSettings::defaults(guild_id);
        settings.insert_one().await?;

        Ok(settings)
    }

    async fn set_log_channel(
        &self,
        guild_id: u64,
        channel_id: u64
    ) -> Result<(), StoreError> {
        GuildSettings::update_one(
            doc! {"_id": guild_id as i64},
            doc! {"$set": {"log_channel_id": channel_id as i64}}
        )
        .await?;

        Ok(())
    }

    async fn set_flag(
        &self,
        guild_id: u64,
        flag: GuildFlag,
        value: bool
    ) -> Result<(), StoreError> {
        let mut fields = Document::new();
        fields.insert(flag.key(), value);

        GuildSettings::update_one(
            doc! {"_id": guild_id as i64},
            doc! {"$set": fields}
        )
        .await?;

        Ok(())
    }
}
