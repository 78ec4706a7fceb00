use std::{
    sync::{
        Arc,
        RwLock,
        atomic::AtomicU64
    },
    time::Instant
};

use twilight_http::Client;
use twilight_model::id::{Id, marker::ApplicationMarker};
use warden_core::moderation::{AuditStore, Platform};

use crate::{events::EventRegistry, registry::CommandRegistry};

/// Process-wide bot state. Built once in `main`, shared behind an `Arc`;
/// everything except the command registry is read-only after startup.
pub struct Ctx {
    pub http: Arc<Client>,
    pub application_id: Id<ApplicationMarker>,
    pub store: Arc<dyn AuditStore>,
    pub platform: Arc<dyn Platform>,
    pub commands: RwLock<Arc<CommandRegistry>>,
    pub events: EventRegistry,
    pub started: Instant,
    pub latency_ms: AtomicU64,
    pub guilds: AtomicU64
}

impl Ctx {
    pub fn commands(&self) -> Arc<CommandRegistry> {
        self.commands
            .read()
            .expect("command registry lock poisoned")
            .clone()
    }

    /// The one sanctioned mutation after startup: an explicit reload swaps
    /// the whole registry at once.
    pub fn swap_commands(&self, registry: Arc<CommandRegistry>) {
        *self
            .commands
            .write()
            .expect("command registry lock poisoned") = registry;
    }
}
