use super::{error::StoreError, store::AuditStore};
use crate::db::ModLog;

/// All recorded actions for one user in one guild, ordered oldest first.
/// One-shot: a fresh query is issued on every `fetch`, nothing is cached.
pub struct RapSheet {
    entries: Vec<ModLog>
}

impl RapSheet {
    /// Distinguishes the explicit "no actions found" outcome from an
    /// error; an empty sheet is a successful query.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ModLog] {
        &self.entries
    }
}

impl IntoIterator for RapSheet {
    type Item = ModLog;
    type IntoIter = std::vec::IntoIter<ModLog>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

pub async fn fetch(
    store: &dyn AuditStore,
    guild_id: u64,
    user_id: u64
) -> Result<RapSheet, StoreError> {
    let mut entries = store.history(guild_id, user_id).await?;

    // stable sort: equal timestamps keep their insertion order
    entries.sort_by_key(ModLog::sort_key);

    Ok(RapSheet { entries })
}
