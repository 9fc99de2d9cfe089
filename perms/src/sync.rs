//! Channel/category permission sync state machine.
//!
//! A channel is either `Synced(category_id)` — it reuses its category's
//! overrides — or `Unsynced` — it maintains its own. Exactly two
//! admin-triggered transitions exist; the resolver never transitions state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::SyncError;
use crate::models::{Category, Channel, Override, OverrideScope};

/// Sync state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Channel reuses the overrides of the given category.
    Synced(Uuid),
    /// Channel maintains its own overrides.
    Unsynced,
}

impl Channel {
    /// Current sync state.
    #[must_use]
    pub const fn sync_state(&self) -> SyncState {
        match self.permission_sync_id {
            Some(category_id) => SyncState::Synced(category_id),
            None => SyncState::Unsynced,
        }
    }
}

/// `Unsynced -> Synced`: start reusing a category's overrides.
///
/// The channel's own overrides are archived so a later [`break_sync`] can
/// still inspect them; they are not consulted while synced. Fails if the
/// channel is already synced or the category belongs to another workspace.
pub fn enable_sync(channel: &mut Channel, category: &Category) -> Result<(), SyncError> {
    if let Some(category_id) = channel.permission_sync_id {
        return Err(SyncError::AlreadySynced {
            channel_id: channel.id,
            category_id,
        });
    }
    if category.workspace_id != channel.workspace_id {
        return Err(SyncError::CrossWorkspace {
            channel_id: channel.id,
            category_id: category.id,
        });
    }

    channel.archived_overrides = std::mem::take(&mut channel.overrides);
    channel.permission_sync_id = Some(category.id);
    Ok(())
}

/// `Synced -> Unsynced`: stop reusing the category's overrides.
///
/// Before flipping, the currently effective (non-expired at `now`) category
/// overrides are snapshotted into the channel's own override set, re-scoped
/// to the channel, so every member's resolved mask is unchanged at the
/// instant of the transition.
///
/// If the sync reference is dangling the channel was already effectively
/// unsynced, so there is nothing to snapshot; the stale reference is
/// cleared with a warning.
pub fn break_sync(
    channel: &mut Channel,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> Result<(), SyncError> {
    let Some(sync_id) = channel.permission_sync_id else {
        return Err(SyncError::NotSynced(channel.id));
    };

    match category {
        Some(category) if category.id == sync_id => {
            channel.overrides = category
                .overrides
                .iter()
                .filter(|ovr| !ovr.is_expired(now))
                .map(|ovr| Override {
                    id: Uuid::new_v4(),
                    scope: OverrideScope::Channel,
                    ..ovr.clone()
                })
                .collect();
        }
        _ => {
            tracing::warn!(
                channel_id = %channel.id,
                category_id = %sync_id,
                "breaking dangling permission sync reference, nothing to snapshot"
            );
        }
    }

    channel.permission_sync_id = None;
    Ok(())
}
