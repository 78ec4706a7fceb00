//! End-to-end pipeline tests over an in-memory store and a recording
//! platform double, so the platform side effect and the audit write can be
//! asserted independently.

use warden_core::{
    db::{GuildFlag, ModAction, ModLog},
    moderation::{ExecutionError, executor, notifier, rapsheet}
};

use crate::support::{FakePlatform, MemoryStore};

const GUILD: u64 = 1001;
const TARGET: u64 = 2002;
const MODERATOR: u64 = 3003;
const LOG_CHANNEL: u64 = 4004;

mod support {
    use std::{
        collections::{HashMap, HashSet},
        sync::{
            Mutex,
            atomic::{AtomicBool, Ordering}
        }
    };

    use async_trait::async_trait;
    use warden_core::{
        db::{GuildFlag, GuildSettings, ModLog},
        moderation::{AuditStore, Platform, PlatformError, StoreError}
    };

    #[derive(Default)]
    pub struct FakePlatform {
        pub kicked: Mutex<HashSet<(u64, u64)>>,
        pub banned: Mutex<HashSet<(u64, u64)>>,
        pub notices: Mutex<Vec<(u64, ModLog)>>,
        pub deny_membership: AtomicBool,
        pub drop_notices: AtomicBool
    }

    impl FakePlatform {
        pub fn denying() -> Self {
            Self {
                deny_membership: AtomicBool::new(true),
                ..Self::default()
            }
        }

        pub fn notices_to(&self, channel_id: u64) -> Vec<ModLog> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .filter(|(channel, _)| *channel == channel_id)
                .map(|(_, record)| record.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Platform for FakePlatform {
        async fn kick(
            &self,
            guild_id: u64,
            user_id: u64,
            _reason: &str
        ) -> Result<(), PlatformError> {
            if self.deny_membership.load(Ordering::Relaxed) {
                return Err(PlatformError::Forbidden);
            }

            self.kicked.lock().unwrap().insert((guild_id, user_id));

            Ok(())
        }

        async fn ban(
            &self,
            guild_id: u64,
            user_id: u64,
            _reason: &str
        ) -> Result<(), PlatformError> {
            if self.deny_membership.load(Ordering::Relaxed) {
                return Err(PlatformError::Forbidden);
            }

            self.banned.lock().unwrap().insert((guild_id, user_id));

            Ok(())
        }

        async fn send_notice(
            &self,
            channel_id: u64,
            record: &ModLog
        ) -> Result<(), PlatformError> {
            if self.drop_notices.load(Ordering::Relaxed) {
                return Err(PlatformError::NotFound);
            }

            self.notices
                .lock()
                .unwrap()
                .push((channel_id, record.clone()));

            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemoryStore {
        pub records: Mutex<Vec<ModLog>>,
        pub settings: Mutex<HashMap<u64, GuildSettings>>,
        pub fail_inserts: AtomicBool
    }

    impl MemoryStore {
        pub fn failing_inserts() -> Self {
            Self {
                fail_inserts: AtomicBool::new(true),
                ..Self::default()
            }
        }

        pub fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AuditStore for MemoryStore {
        async fn insert(&self, record: &ModLog) -> Result<(), StoreError> {
            if self.fail_inserts.load(Ordering::Relaxed) {
                return Err(StoreError::Backend("insert refused".to_string()));
            }

            self.records.lock().unwrap().push(record.clone());

            Ok(())
        }

        async fn history(
            &self,
            guild_id: u64,
            user_id: u64
        ) -> Result<Vec<ModLog>, StoreError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.guild_id == guild_id && r.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn settings(
            &self,
            guild_id: u64
        ) -> Result<GuildSettings, StoreError> {
            Ok(self
                .settings
                .lock()
                .unwrap()
                .entry(guild_id)
                .or_insert_with(|| GuildSettings::defaults(guild_id))
                .clone())
        }

        async fn set_log_channel(
            &self,
            guild_id: u64,
            channel_id: u64
        ) -> Result<(), StoreError> {
            self.settings
                .lock()
                .unwrap()
                .entry(guild_id)
                .or_insert_with(|| GuildSettings::defaults(guild_id))
                .log_channel_id = Some(channel_id);

            Ok(())
        }

        async fn set_flag(
            &self,
            guild_id: u64,
            flag: GuildFlag,
            value: bool
        ) -> Result<(), StoreError> {
            let mut settings = self.settings.lock().unwrap();
            let entry = settings
                .entry(guild_id)
                .or_insert_with(|| GuildSettings::defaults(guild_id));

            match flag {
                GuildFlag::Fun => entry.fun_enabled = value,
                GuildFlag::Modlog => entry.modlog_enabled = value
            }

            Ok(())
        }
    }
}

#[tokio::test]
async fn empty_history_is_an_explicit_outcome() {
    let store = MemoryStore::default();

    let sheet = rapsheet::fetch(&store, GUILD, TARGET).await.unwrap();

    assert!(sheet.is_empty());
    assert_eq!(sheet.len(), 0);
}

#[tokio::test]
async fn repeated_warns_accumulate_in_order() {
    let platform = FakePlatform::default();
    let store = MemoryStore::default();

    for n in 0..5 {
        executor::execute(
            &platform,
            &store,
            ModAction::Warn,
            GUILD,
            TARGET,
            MODERATOR,
            &format!("offense {n}")
        )
        .await
        .unwrap();
    }

    let sheet = rapsheet::fetch(&store, GUILD, TARGET).await.unwrap();

    assert_eq!(sheet.len(), 5);
    assert!(sheet.entries().iter().all(|r| r.action == ModAction::Warn));
    assert!(
        sheet
            .entries()
            .windows(2)
            .all(|pair| pair[0].sort_key() <= pair[1].sort_key())
    );
}

#[tokio::test]
async fn denied_kick_writes_no_record() {
    let platform = FakePlatform::denying();
    let store = MemoryStore::default();

    let before = store.record_count();

    let err = executor::execute(
        &platform,
        &store,
        ModAction::Kick,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::PlatformForbidden(ModAction::Kick)
    ));
    assert_eq!(store.record_count(), before);
    assert!(platform.kicked.lock().unwrap().is_empty());
}

#[tokio::test]
async fn denied_ban_writes_no_record() {
    let platform = FakePlatform::denying();
    let store = MemoryStore::default();

    let err = executor::execute(
        &platform,
        &store,
        ModAction::Ban,
        GUILD,
        TARGET,
        MODERATOR,
        ""
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::PlatformForbidden(ModAction::Ban)
    ));
    assert_eq!(store.record_count(), 0);
    assert!(platform.banned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_write_still_leaves_target_kicked() {
    let platform = FakePlatform::default();
    let store = MemoryStore::failing_inserts();

    let err = executor::execute(
        &platform,
        &store,
        ModAction::Kick,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap_err();

    // the two facts are independent: the message reports a logging
    // failure, while the member really was removed
    assert!(matches!(
        err,
        ExecutionError::Persistence {
            action: ModAction::Kick,
            ..
        }
    ));
    assert!(platform.kicked.lock().unwrap().contains(&(GUILD, TARGET)));
    assert_eq!(store.record_count(), 0);
}

#[tokio::test]
async fn warn_never_touches_the_platform() {
    // membership actions would fail, a warn must not care
    let platform = FakePlatform::denying();
    let store = MemoryStore::default();

    let record = executor::execute(
        &platform,
        &store,
        ModAction::Warn,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap();

    assert_eq!(record.moderator_id, Some(MODERATOR));
    assert_eq!(record.reason, "spam");
    assert_eq!(store.record_count(), 1);
    assert!(platform.kicked.lock().unwrap().is_empty());
    assert!(platform.banned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn untouched_guild_gets_default_settings() {
    use warden_core::moderation::AuditStore;

    let store = MemoryStore::default();

    let settings = store.settings(GUILD).await.unwrap();

    assert_eq!(settings.log_channel_id, None);
    assert!(settings.fun_enabled);
    assert!(settings.modlog_enabled);
}

#[tokio::test]
async fn settings_reads_are_idempotent() {
    use warden_core::moderation::AuditStore;

    let store = MemoryStore::default();

    let first = store.settings(GUILD).await.unwrap();
    let second = store.settings(GUILD).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn notices_follow_the_log_channel_setting() {
    use warden_core::moderation::AuditStore;

    let platform = FakePlatform::default();
    let store = MemoryStore::default();

    // no log channel configured yet: the first warn produces no notice
    let first = executor::execute(
        &platform,
        &store,
        ModAction::Warn,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap();
    notifier::notify(&platform, &store, GUILD, &first).await;

    assert!(platform.notices.lock().unwrap().is_empty());

    store.set_log_channel(GUILD, LOG_CHANNEL).await.unwrap();

    let second = executor::execute(
        &platform,
        &store,
        ModAction::Warn,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap();
    notifier::notify(&platform, &store, GUILD, &second).await;

    let notices = platform.notices_to(LOG_CHANNEL);

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].user_id, TARGET);
    assert_eq!(notices[0].reason, "spam");
}

// modlog_enabled is stored but not yet consulted anywhere in the
// pipeline; this pins the current behavior so gating it later is a
// deliberate change.
#[tokio::test]
async fn notifier_ignores_modlog_flag() {
    use warden_core::moderation::AuditStore;

    let platform = FakePlatform::default();
    let store = MemoryStore::default();

    store.set_log_channel(GUILD, LOG_CHANNEL).await.unwrap();
    store.set_flag(GUILD, GuildFlag::Modlog, false).await.unwrap();

    let record = executor::execute(
        &platform,
        &store,
        ModAction::Warn,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap();
    notifier::notify(&platform, &store, GUILD, &record).await;

    assert_eq!(platform.notices_to(LOG_CHANNEL).len(), 1);
}

#[tokio::test]
async fn unreachable_log_channel_is_swallowed() {
    use std::sync::atomic::Ordering;

    use warden_core::moderation::AuditStore;

    let platform = FakePlatform::default();
    platform.drop_notices.store(true, Ordering::Relaxed);

    let store = MemoryStore::default();
    store.set_log_channel(GUILD, LOG_CHANNEL).await.unwrap();

    let record = executor::execute(
        &platform,
        &store,
        ModAction::Warn,
        GUILD,
        TARGET,
        MODERATOR,
        "spam"
    )
    .await
    .unwrap();

    // must simply return; the command's success response already went out
    notifier::notify(&platform, &store, GUILD, &record).await;

    assert!(platform.notices.lock().unwrap().is_empty());
}

#[tokio::test]
async fn records_without_timestamps_sort_first() {
    use warden_core::moderation::AuditStore;

    let store = MemoryStore::default();

    store
        .insert(&ModLog::new(ModAction::Warn, GUILD, TARGET, None, "recent"))
        .await
        .unwrap();

    // a record written before timestamps existed
    store
        .insert(&ModLog {
            id: None,
            guild_id: GUILD,
            user_id: TARGET,
            moderator_id: None,
            action: ModAction::Ban,
            reason: "(unknown)".to_string(),
            timestamp: None
        })
        .await
        .unwrap();

    let sheet = rapsheet::fetch(&store, GUILD, TARGET).await.unwrap();

    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.entries()[0].timestamp, None);
    assert_eq!(sheet.entries()[1].reason, "recent");
}
