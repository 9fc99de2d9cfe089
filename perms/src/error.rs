//! Permission Engine Error Types

use thiserror::Error;
use uuid::Uuid;

use crate::flags::Permissions;

/// An override whose allow and deny masks overlap.
///
/// Raised at write time; never raised during resolution (the resolver
/// defensively gives allow precedence instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("allow and deny masks overlap: {overlap:?}")]
pub struct InvalidOverrideError {
    /// The bits present in both masks.
    pub overlap: Permissions,
}

/// A flag name that is not part of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission flag: {0}")]
pub struct UnknownFlagError(pub String);

/// A template name that is not part of the template library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission template: {0}")]
pub struct UnknownTemplateError(pub String);

/// Errors from the channel/category sync state machine.
///
/// Only the admin-triggered transitions raise these. A dangling sync
/// reference observed at resolution time is normalized to unsynced with a
/// logged warning instead, because a permission check must never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The referenced category no longer exists.
    #[error("channel {channel_id} references missing category {category_id}")]
    DanglingReference {
        /// The channel holding the stale reference.
        channel_id: Uuid,
        /// The category id that failed to resolve.
        category_id: Uuid,
    },

    /// The category belongs to a different workspace.
    #[error("category {category_id} belongs to a different workspace than channel {channel_id}")]
    CrossWorkspace {
        /// The channel being synced.
        channel_id: Uuid,
        /// The foreign category.
        category_id: Uuid,
    },

    /// `enable_sync` on a channel that is already synced.
    #[error("channel {channel_id} is already synced to category {category_id}")]
    AlreadySynced {
        /// The channel.
        channel_id: Uuid,
        /// The category it is currently synced to.
        category_id: Uuid,
    },

    /// `break_sync` on a channel that is not synced.
    #[error("channel {0} is not synced to a category")]
    NotSynced(Uuid),
}

/// Access check errors returned by the boundary helpers.
///
/// Collaborators map these to user-facing denials (typically a 403); no
/// internal detail beyond the missing capability is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Caller lacks a required permission.
    #[error("missing permission: {0:?}")]
    MissingPermission(Permissions),

    /// Role hierarchy violation (lower position number = higher rank).
    #[error("cannot modify a role at position {target_position} (your position: {actor_position})")]
    RoleHierarchy {
        /// The actor's highest role position.
        actor_position: i32,
        /// The targeted role's position.
        target_position: i32,
    },

    /// Attempted to grant permissions not held.
    #[error("cannot grant permissions you do not hold: {0:?}")]
    CannotEscalate(Permissions),

    /// Attempted to moderate an administrator.
    #[error("cannot moderate an administrator")]
    CannotModerateAdministrator,
}
