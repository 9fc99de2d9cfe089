//! Data model for the permission system.
//!
//! These are immutable snapshots supplied by the role/override stores for a
//! single resolution; the engine never owns or persists them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flags::Permissions;

/// A workspace role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    pub id: Uuid,
    /// Workspace this role belongs to.
    pub workspace_id: Uuid,
    /// Display name.
    pub name: String,
    /// Base capability mask granted workspace-wide.
    pub base_mask: Permissions,
    /// Hierarchy position (lower number = higher rank). Used for management
    /// checks only; base masks union without regard to position.
    pub position: i32,
    /// Whether this is the implicit @everyone role.
    pub is_default: bool,
}

/// Scope an override is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideScope {
    /// Workspace-wide override.
    Workspace,
    /// Override on a channel category.
    Category,
    /// Override on a single channel.
    Channel,
}

/// Who an override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target_type", content = "target_id", rename_all = "lowercase")]
pub enum OverrideTarget {
    /// Members holding the given role.
    Role(Uuid),
    /// A single member.
    User(Uuid),
    /// All members with no more specific override.
    Everyone,
}

/// A permission override: an allow/deny bit-pair attached to a target at a
/// given scope.
///
/// Invariant: `allow & deny == 0`. Violating writes are rejected by
/// [`crate::overrides::validate_override`]; the resolver tolerates legacy
/// rows that predate validation by giving allow precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Override {
    /// Override ID.
    pub id: Uuid,
    /// Scope the override is attached to.
    pub scope: OverrideScope,
    /// Who the override applies to.
    pub target: OverrideTarget,
    /// Bits granted.
    pub allow: Permissions,
    /// Bits revoked.
    pub deny: Permissions,
    /// Expiry; `None` means permanent.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Override {
    /// Whether the override has expired as of `now`.
    ///
    /// An override expiring exactly at `now` is already expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A channel category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: Uuid,
    /// Workspace this category belongs to.
    pub workspace_id: Uuid,
    /// Overrides attached to the category.
    pub overrides: Vec<Override>,
}

/// A channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID.
    pub id: Uuid,
    /// Workspace this channel belongs to.
    pub workspace_id: Uuid,
    /// Category the channel is organized under, if any.
    pub category_id: Option<Uuid>,
    /// When set, the channel reuses that category's overrides instead of its
    /// own. A dangling reference is treated as unsynced at resolution time.
    pub permission_sync_id: Option<Uuid>,
    /// Overrides attached to the channel. Not consulted while synced.
    pub overrides: Vec<Override>,
    /// The channel's own overrides as they were when sync was enabled.
    #[serde(default)]
    pub archived_overrides: Vec<Override>,
}

impl Channel {
    /// Whether the channel currently reuses a category's overrides.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.permission_sync_id.is_some()
    }
}

/// A workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace ID.
    pub id: Uuid,
    /// Base mask held by every member (the @everyone mask).
    pub everyone_mask: Permissions,
    /// All roles defined in the workspace.
    pub roles: Vec<Role>,
}
