use std::fmt;

use super::error::ExecutionError;
use crate::db::enums::ActorPermissions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    CanKick,
    CanBan
}

impl Capability {
    fn required(self) -> ActorPermissions {
        match self {
            Capability::CanKick => ActorPermissions::KICK_MEMBERS,
            Capability::CanBan => ActorPermissions::BAN_MEMBERS
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::CanKick => "kick members",
            Capability::CanBan => "ban members"
        })
    }
}

/// Pure predicate: no state, no side effects, never errors. Administrators
/// hold every capability.
pub fn authorize(perms: ActorPermissions, capability: Capability) -> bool {
    perms.contains(ActorPermissions::ADMINISTRATOR) ||
        perms.contains(capability.required())
}

pub fn require(
    perms: ActorPermissions,
    capability: Capability
) -> Result<(), ExecutionError> {
    if authorize(perms, capability) {
        Ok(())
    } else {
        Err(ExecutionError::Unauthorized(capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kick_capability_requires_kick_members() {
        assert!(authorize(ActorPermissions::KICK_MEMBERS, Capability::CanKick));
        assert!(!authorize(ActorPermissions::KICK_MEMBERS, Capability::CanBan));
        assert!(!authorize(ActorPermissions::empty(), Capability::CanKick));
    }

    #[test]
    fn ban_capability_requires_ban_members() {
        assert!(authorize(ActorPermissions::BAN_MEMBERS, Capability::CanBan));
        assert!(!authorize(ActorPermissions::BAN_MEMBERS, Capability::CanKick));
    }

    #[test]
    fn administrator_implies_everything() {
        let admin = ActorPermissions::ADMINISTRATOR;

        assert!(authorize(admin, Capability::CanKick));
        assert!(authorize(admin, Capability::CanBan));
    }

    #[test]
    fn require_reports_the_missing_capability() {
        let err = require(ActorPermissions::empty(), Capability::CanBan)
            .unwrap_err();

        assert!(matches!(
            err,
            ExecutionError::Unauthorized(Capability::CanBan)
        ));
    }
}
