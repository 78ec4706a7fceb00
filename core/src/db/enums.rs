use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Privilege flags of the acting member, as resolved by the platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ActorPermissions: u32 {
        const KICK_MEMBERS  = 1 << 0;
        const BAN_MEMBERS   = 1 << 1;
        const ADMINISTRATOR = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModAction {
    Kick,
    Ban,
    Warn
}

impl ModAction {
    pub fn label(self) -> &'static str {
        match self {
            ModAction::Kick => "Kick",
            ModAction::Ban => "Ban",
            ModAction::Warn => "Warn"
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            ModAction::Kick => "User Kicked",
            ModAction::Ban => "User Banned",
            ModAction::Warn => "User Warned"
        }
    }
}

impl fmt::Display for ModAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModAction::Kick => "kick",
            ModAction::Ban => "ban",
            ModAction::Warn => "warn"
        })
    }
}

/// Toggleable per-guild settings, addressed by their document key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuildFlag {
    Fun,
    Modlog
}

impl GuildFlag {
    pub fn key(self) -> &'static str {
        match self {
            GuildFlag::Fun => "fun_enabled",
            GuildFlag::Modlog => "modlog_enabled"
        }
    }
}
