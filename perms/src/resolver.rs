//! Permission resolution logic.
//!
//! Computes the effective capability mask for a (user, channel) pair.
//!
//! Resolution order:
//! 1. Start with the workspace @everyone mask
//! 2. Union the base masks of the user's roles
//! 3. `ADMINISTRATOR` short-circuits to every capability
//! 4. Apply the category override layer (only while the channel is synced)
//! 5. Apply the channel override layer
//!
//! Within each layer: the @everyone override first, then the combined role
//! overrides, then the user override. The channel layer's user override is
//! therefore the single highest-priority input overall.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::flags::Permissions;
use crate::models::{Category, Channel, Override, OverrideTarget, Role};

/// Everything one resolution reads, gathered by the caller from the
/// role/override stores.
///
/// The resolver holds no state of its own; each call receives its own
/// immutable snapshot, so concurrent resolutions need no locking.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// The user being resolved.
    pub user_id: Uuid,
    /// The workspace @everyone base mask.
    pub everyone_mask: Permissions,
    /// Roles held by the user (excluding @everyone).
    pub roles: &'a [Role],
    /// The channel's category, if the caller could resolve one.
    pub category: Option<&'a Category>,
    /// The channel being resolved.
    pub channel: &'a Channel,
    /// Resolution instant; overrides expiring at or before it are ignored.
    pub now: DateTime<Utc>,
}

/// Compute the effective permission mask for a context.
///
/// Total over well-formed input: missing data reads as empty, malformed
/// overrides (overlapping allow/deny, which validation should have rejected
/// at write time) get allow precedence, and a dangling sync reference
/// degrades to unsynced with a logged warning. This function never fails a
/// permission check by raising.
#[must_use]
pub fn resolve_effective_permissions(ctx: &ResolutionContext<'_>) -> Permissions {
    let mut mask = ctx.everyone_mask;

    for role in ctx.roles {
        mask |= role.base_mask;
    }

    // Administrators bypass the override layers entirely.
    if mask.has(Permissions::ADMINISTRATOR) {
        return Permissions::all();
    }

    let role_ids: HashSet<Uuid> = ctx.roles.iter().map(|role| role.id).collect();

    // Category layer, only while the channel syncs to it. Category changes
    // must never leak into an unsynced channel.
    if let Some(sync_id) = ctx.channel.permission_sync_id {
        match ctx.category {
            Some(category) if category.id == sync_id => {
                mask = apply_layer(mask, &category.overrides, &role_ids, ctx.user_id, ctx.now);
            }
            _ => {
                tracing::warn!(
                    channel_id = %ctx.channel.id,
                    category_id = %sync_id,
                    "dangling permission sync reference, treating channel as unsynced"
                );
            }
        }
    }

    apply_layer(mask, &ctx.channel.overrides, &role_ids, ctx.user_id, ctx.now)
}

/// Apply one override layer to a mask.
///
/// Buckets the layer's non-expired overrides by target kind in a single
/// pass (no per-role rescans), then applies @everyone, combined roles, and
/// the user override in that order. Within each bucket allow wins over
/// deny, so role iteration order cannot change the result.
fn apply_layer(
    mask: Permissions,
    overrides: &[Override],
    role_ids: &HashSet<Uuid>,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Permissions {
    let mut everyone_allow = Permissions::empty();
    let mut everyone_deny = Permissions::empty();
    let mut role_allow = Permissions::empty();
    let mut role_deny = Permissions::empty();
    let mut user_allow = Permissions::empty();
    let mut user_deny = Permissions::empty();

    for ovr in overrides {
        if ovr.is_expired(now) {
            continue;
        }

        match ovr.target {
            OverrideTarget::Everyone => {
                everyone_allow |= ovr.allow;
                everyone_deny |= ovr.deny;
            }
            OverrideTarget::Role(role_id) if role_ids.contains(&role_id) => {
                role_allow |= ovr.allow;
                role_deny |= ovr.deny;
            }
            OverrideTarget::User(id) if id == user_id => {
                user_allow |= ovr.allow;
                user_deny |= ovr.deny;
            }
            OverrideTarget::Role(_) | OverrideTarget::User(_) => {}
        }
    }

    mask.apply(everyone_allow, everyone_deny.difference(everyone_allow))
        .apply(role_allow, role_deny.difference(role_allow))
        .apply(user_allow, user_deny.difference(user_allow))
}
