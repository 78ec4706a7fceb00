use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::{Client, error::ErrorType, request::AuditLogReason};
use twilight_model::id::Id;
use warden_core::{
    db::ModLog,
    moderation::{Platform, PlatformError}
};

use crate::embeds;

/// `Platform` implementation over the Discord REST API.
pub struct DiscordPlatform {
    http: Arc<Client>
}

impl DiscordPlatform {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

fn map_error(err: twilight_http::Error) -> PlatformError {
    match err.kind() {
        ErrorType::Response { status, .. } if status.get() == 403 => {
            PlatformError::Forbidden
        }
        ErrorType::Response { status, .. } if status.get() == 404 => {
            PlatformError::NotFound
        }
        _ => PlatformError::Other(err.to_string())
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn kick(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str
    ) -> Result<(), PlatformError> {
        let mut request = self
            .http
            .remove_guild_member(Id::new(guild_id), Id::new(user_id));

        if !reason.is_empty() {
            request = request.reason(reason);
        }

        request.await.map_err(map_error)?;

        Ok(())
    }

    async fn ban(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str
    ) -> Result<(), PlatformError> {
        let mut request =
            self.http.create_ban(Id::new(guild_id), Id::new(user_id));

        if !reason.is_empty() {
            request = request.reason(reason);
        }

        request.await.map_err(map_error)?;

        Ok(())
    }

    async fn send_notice(
        &self,
        channel_id: u64,
        record: &ModLog
    ) -> Result<(), PlatformError> {
        let embed =
            embeds::action_embed(record, embeds::action_color(record.action));

        self.http
            .create_message(Id::new(channel_id))
            .embeds(&[embed])
            .await
            .map_err(map_error)?;

        Ok(())
    }
}
