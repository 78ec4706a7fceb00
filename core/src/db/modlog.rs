use bson::{DateTime, oid::ObjectId};
use mongo_document::Document;
use serde::{Deserialize, Serialize};

use super::enums::ModAction;

/// One moderation action, append-only. Records are never updated or
/// deleted; duplicate records for the same real event are tolerated by
/// readers.
#[derive(Clone, Debug, Document, Serialize, Deserialize)]
#[document(collection = "mod_logs")]
pub struct ModLog {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub guild_id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub moderator_id: Option<u64>,
    pub action: ModAction,
    pub reason: String,
    #[serde(default)]
    pub timestamp: Option<DateTime>
}

impl ModLog {
    pub fn new(
        action: ModAction,
        guild_id: u64,
        user_id: u64,
        moderator_id: Option<u64>,
        reason: &str
    ) -> Self {
        Self {
            id: None,
            guild_id,
            user_id,
            moderator_id,
            action,
            reason: reason.to_string(),
            timestamp: Some(DateTime::now())
        }
    }

    // ? records written by older deployments may lack a timestamp;
    // ? they sort before everything else
    pub fn sort_key(&self) -> DateTime {
        self.timestamp.unwrap_or(DateTime::from_millis(i64::MIN))
    }
}
