use mongo_document::Document;
use serde::{Deserialize, Serialize};

/// Per-guild configuration, at most one document per guild. An absent
/// document is equivalent to all defaults.
#[derive(Clone, Debug, PartialEq, Eq, Document, Serialize, Deserialize)]
#[document(collection = "guild_settings")]
pub struct GuildSettings {
    #[serde(rename = "_id")]
    pub guild_id: u64,
    #[serde(default)]
    pub log_channel_id: Option<u64>,
    #[serde(default = "enabled")]
    pub fun_enabled: bool,
    #[serde(default = "enabled")]
    pub modlog_enabled: bool
}

fn enabled() -> bool {
    true
}

impl GuildSettings {
    pub fn defaults(guild_id: u64) -> Self {
        Self {
            guild_id,
            log_channel_id: None,
            fun_enabled: true,
            modlog_enabled: true
        }
    }
}
