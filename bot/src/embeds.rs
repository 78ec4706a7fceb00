use twilight_model::{channel::message::Embed, util::Timestamp};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};
use warden_core::{
    db::{ModAction, ModLog},
    moderation::ExecutionError
};

pub const RED: u32 = 0xED4245;
pub const ORANGE: u32 = 0xE67E22;
pub const GREEN: u32 = 0x57F287;
pub const BLURPLE: u32 = 0x5865F2;

pub fn mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}

pub fn channel_mention(channel_id: u64) -> String {
    format!("<#{channel_id}>")
}

pub fn now() -> Option<Timestamp> {
    Timestamp::from_secs(chrono::Utc::now().timestamp()).ok()
}

pub fn reason_text(reason: &str) -> String {
    if reason.is_empty() {
        "No reason provided.".to_string()
    } else {
        reason.to_string()
    }
}

pub fn action_color(action: ModAction) -> u32 {
    match action {
        ModAction::Kick | ModAction::Ban => RED,
        ModAction::Warn => ORANGE
    }
}

/// The User / Moderator / Reason layout shared by every moderation
/// response and log notice.
pub fn action_embed(record: &ModLog, color: u32) -> Embed {
    let moderator = record
        .moderator_id
        .map(mention)
        .unwrap_or_else(|| "Unknown".to_string());

    let mut builder = EmbedBuilder::new()
        .title(record.action.headline())
        .color(color)
        .field(EmbedFieldBuilder::new("User", mention(record.user_id)).inline())
        .field(EmbedFieldBuilder::new("Moderator", moderator).inline())
        .field(
            EmbedFieldBuilder::new("Reason", reason_text(&record.reason))
                .inline()
        );

    if let Some(ts) = now() {
        builder = builder.timestamp(ts);
    }

    builder.build()
}

pub fn error_embed(title: &str, description: &str) -> Embed {
    EmbedBuilder::new()
        .title(title)
        .description(description)
        .color(RED)
        .build()
}

pub fn missing_permissions(description: &str) -> Embed {
    error_embed("Missing Permissions", description)
}

/// One embed per failure class; the persistence case must read as a
/// logging failure, never as a failed action.
pub fn execution_error(err: &ExecutionError) -> Embed {
    match err {
        ExecutionError::Unauthorized(capability) => missing_permissions(
            &format!("You do not have permission to {capability}.")
        ),
        ExecutionError::PlatformForbidden(action) => missing_permissions(
            &format!("I do not have permission to {action} this user.")
        ),
        ExecutionError::Persistence { action, .. } => error_embed(
            "Logging Failed",
            &format!(
                "The {action} was carried out, but the action could not be \
                 logged."
            )
        ),
        ExecutionError::Platform { .. } => {
            error_embed("Error", &format!("An error occurred: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_embed_carries_the_record_fields() {
        let record =
            ModLog::new(ModAction::Warn, 1, 2, Some(3), "posting spam");

        let embed = action_embed(&record, action_color(record.action));

        assert_eq!(embed.title.as_deref(), Some("User Warned"));
        assert_eq!(embed.color, Some(ORANGE));
        assert_eq!(embed.fields.len(), 3);
        assert_eq!(embed.fields[0].value, "<@2>");
        assert_eq!(embed.fields[1].value, "<@3>");
        assert_eq!(embed.fields[2].value, "posting spam");
    }

    #[test]
    fn empty_reason_is_displayed_as_a_placeholder() {
        let record = ModLog::new(ModAction::Kick, 1, 2, Some(3), "");

        let embed = action_embed(&record, action_color(record.action));

        assert_eq!(embed.fields[2].value, "No reason provided.");
    }

    #[test]
    fn observed_bans_have_no_moderator_mention() {
        let record = ModLog::new(ModAction::Ban, 1, 2, None, "(unknown)");

        let embed = action_embed(&record, action_color(record.action));

        assert_eq!(embed.fields[1].value, "Unknown");
    }

    #[test]
    fn persistence_failure_reads_as_a_logging_failure() {
        use warden_core::moderation::StoreError;

        let err = ExecutionError::Persistence {
            action: ModAction::Kick,
            source: StoreError::Backend("connection reset".to_string())
        };

        let embed = execution_error(&err);

        assert_eq!(embed.title.as_deref(), Some("Logging Failed"));
        assert!(embed.description.as_deref().unwrap().contains("kick"));
        assert!(!embed.description.as_deref().unwrap().contains("failed to kick"));
    }
}
