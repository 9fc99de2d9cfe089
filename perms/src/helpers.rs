//! Boundary helpers for collaborators.
//!
//! Convenience surface over the resolver: a reusable per-member context for
//! repeated checks, channel visibility filtering, and the management gating
//! rules (hierarchy and escalation guards).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AccessError;
use crate::flags::Permissions;
use crate::models::{Category, Channel, Role};
use crate::resolver::{resolve_effective_permissions, ResolutionContext};

/// A member's workspace-level inputs, reusable across channels.
///
/// Callers that check several channels for one user (visibility filtering,
/// permission-editor previews) build this once and resolve per channel.
#[derive(Debug, Clone, Copy)]
pub struct MemberContext<'a> {
    /// The member's user ID.
    pub user_id: Uuid,
    /// The workspace @everyone base mask.
    pub everyone_mask: Permissions,
    /// Roles held by the member.
    pub roles: &'a [Role],
}

impl MemberContext<'_> {
    /// Resolve the member's effective mask for a channel.
    #[must_use]
    pub fn resolve(
        &self,
        channel: &Channel,
        category: Option<&Category>,
        now: DateTime<Utc>,
    ) -> Permissions {
        resolve_effective_permissions(&ResolutionContext {
            user_id: self.user_id,
            everyone_mask: self.everyone_mask,
            roles: self.roles,
            category,
            channel,
            now,
        })
    }

    /// Whether the member holds `required` in the channel.
    #[must_use]
    pub fn can(
        &self,
        required: Permissions,
        channel: &Channel,
        category: Option<&Category>,
        now: DateTime<Utc>,
    ) -> bool {
        self.resolve(channel, category, now).has(required)
    }

    /// Require `required` in the channel, returning the resolved mask.
    pub fn require(
        &self,
        required: Permissions,
        channel: &Channel,
        category: Option<&Category>,
        now: DateTime<Utc>,
    ) -> Result<Permissions, AccessError> {
        let mask = self.resolve(channel, category, now);
        if mask.has(required) {
            Ok(mask)
        } else {
            Err(AccessError::MissingPermission(required.difference(mask)))
        }
    }

    /// IDs of the channels the member can see (`VIEW_CHANNEL`).
    #[must_use]
    pub fn visible_channels<'c, I>(&self, channels: I, now: DateTime<Utc>) -> Vec<Uuid>
    where
        I: IntoIterator<Item = (&'c Channel, Option<&'c Category>)>,
    {
        channels
            .into_iter()
            .filter(|(channel, category)| {
                self.can(Permissions::VIEW_CHANNEL, channel, *category, now)
            })
            .map(|(channel, _)| channel.id)
            .collect()
    }

    /// The member's highest role position (lower number = higher rank).
    ///
    /// Members with no roles rank below every role.
    #[must_use]
    pub fn highest_role_position(&self) -> i32 {
        self.roles.iter().map(|role| role.position).min().unwrap_or(i32::MAX)
    }
}

/// Check if an actor may manage a target role.
///
/// Rules:
/// 1. Must hold `MANAGE_ROLES`
/// 2. Cannot edit roles at or above the actor's position
/// 3. Cannot grant permissions the actor does not hold (administrators are
///    exempt from this guard only, never from the hierarchy check)
pub fn can_manage_role(
    actor_mask: Permissions,
    actor_highest_position: i32,
    target_role_position: i32,
    new_mask: Option<Permissions>,
) -> Result<(), AccessError> {
    if !actor_mask.has(Permissions::MANAGE_ROLES) && !actor_mask.has(Permissions::ADMINISTRATOR) {
        return Err(AccessError::MissingPermission(Permissions::MANAGE_ROLES));
    }

    if target_role_position <= actor_highest_position {
        return Err(AccessError::RoleHierarchy {
            actor_position: actor_highest_position,
            target_position: target_role_position,
        });
    }

    if !actor_mask.has(Permissions::ADMINISTRATOR) {
        if let Some(new_mask) = new_mask {
            let escalation = new_mask.difference(actor_mask);
            if !escalation.is_empty() {
                return Err(AccessError::CannotEscalate(escalation));
            }
        }
    }

    Ok(())
}

/// Check if an actor may moderate (kick, ban, timeout) a target member.
///
/// Administrators are untouchable, as is anyone at or above the actor's
/// rank (lower number = higher rank).
pub const fn can_moderate_member(
    actor_highest_position: i32,
    target_highest_position: i32,
    target_is_administrator: bool,
) -> Result<(), AccessError> {
    if target_is_administrator {
        return Err(AccessError::CannotModerateAdministrator);
    }

    if target_highest_position <= actor_highest_position {
        return Err(AccessError::RoleHierarchy {
            actor_position: actor_highest_position,
            target_position: target_highest_position,
        });
    }

    Ok(())
}
