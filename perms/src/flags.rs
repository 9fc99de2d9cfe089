//! Permission flag registry and the `Permissions` mask type.
//!
//! Flags are organized into categories:
//! - General (bits 0-7): Workspace and channel administration
//! - Membership (bits 8-12): Member management permissions
//! - Text (bits 13-21): Message and media permissions
//! - Threads (bits 22-24): Thread permissions
//! - Voice (bits 25-30): Voice channel permissions
//! - Webhooks (bit 31): Webhook management
//!
//! Bit positions are part of the persisted format (allow/deny masks are
//! stored as 64-bit integers) and are additive-only: new flags append,
//! existing positions are never reassigned.

use bitflags::bitflags;

use crate::error::UnknownFlagError;

bitflags! {
    /// Capability flags represented as a 64-bit bitfield.
    ///
    /// Stored as BIGINT columns by the role/override stores.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Permissions: u64 {
        // === General (bits 0-7) ===
        /// Permission to see a channel and its metadata
        const VIEW_CHANNEL       = 1 << 0;
        /// Permission to edit and delete channels
        const MANAGE_CHANNEL     = 1 << 1;
        /// Permission to create, edit, and delete roles
        const MANAGE_ROLES       = 1 << 2;
        /// Permission to modify workspace settings
        const MANAGE_WORKSPACE   = 1 << 3;
        /// Permission to create invite links
        const CREATE_INVITE      = 1 << 4;
        /// Permission to manage (revoke) invite links
        const MANAGE_INVITES     = 1 << 5;
        /// Permission to view the workspace audit log
        const VIEW_AUDIT_LOG     = 1 << 6;
        /// Bypass all overrides and hold every capability
        const ADMINISTRATOR      = 1 << 7;

        // === Membership (bits 8-12) ===
        /// Permission to change one's own nickname
        const CHANGE_NICKNAME    = 1 << 8;
        /// Permission to change other members' nicknames
        const MANAGE_NICKNAMES   = 1 << 9;
        /// Permission to kick members from the workspace
        const KICK_MEMBERS       = 1 << 10;
        /// Permission to ban members from the workspace
        const BAN_MEMBERS        = 1 << 11;
        /// Permission to timeout members (temporary mute)
        const TIMEOUT_MEMBERS    = 1 << 12;

        // === Text (bits 13-21) ===
        /// Permission to send text messages in channels
        const SEND_MESSAGES      = 1 << 13;
        /// Permission to read a channel's message history
        const READ_MESSAGE_HISTORY = 1 << 14;
        /// Permission to delete messages from other members
        const MANAGE_MESSAGES    = 1 << 15;
        /// Permission to embed links in messages (auto-preview)
        const EMBED_LINKS        = 1 << 16;
        /// Permission to attach files to messages
        const ATTACH_FILES       = 1 << 17;
        /// Permission to add reactions to messages
        const ADD_REACTIONS      = 1 << 18;
        /// Permission to use emoji from other workspaces
        const USE_EXTERNAL_EMOJI = 1 << 19;
        /// Permission to mention @everyone and @here
        const MENTION_EVERYONE   = 1 << 20;
        /// Permission to pin and unpin messages
        const PIN_MESSAGES       = 1 << 21;

        // === Threads (bits 22-24) ===
        /// Permission to create threads
        const CREATE_THREADS     = 1 << 22;
        /// Permission to send messages in threads
        const SEND_THREAD_MESSAGES = 1 << 23;
        /// Permission to archive and delete threads
        const MANAGE_THREADS     = 1 << 24;

        // === Voice (bits 25-30) ===
        /// Permission to connect to voice channels
        const CONNECT            = 1 << 25;
        /// Permission to speak in voice channels
        const SPEAK              = 1 << 26;
        /// Permission to share screen or video
        const STREAM             = 1 << 27;
        /// Permission to mute other members in voice channels
        const MUTE_MEMBERS       = 1 << 28;
        /// Permission to deafen other members in voice channels
        const DEAFEN_MEMBERS     = 1 << 29;
        /// Permission to move members between voice channels
        const MOVE_MEMBERS       = 1 << 30;

        // === Webhooks (bit 31) ===
        /// Permission to create, edit, and delete webhooks
        const MANAGE_WEBHOOKS    = 1 << 31;
    }
}

impl Permissions {
    // === Resolution Primitives ===

    /// Apply an allow/deny override pair to this mask.
    ///
    /// Denied bits are cleared first, then allowed bits are set, so a bit
    /// present in both masks ends up granted. Well-formed overrides never
    /// overlap (see [`crate::overrides::validate_override`]); the allow
    /// precedence here is the defensive resolution-time behavior for data
    /// that predates validation.
    #[must_use]
    pub const fn apply(self, allow: Self, deny: Self) -> Self {
        self.difference(deny).union(allow)
    }

    /// Check if this permission set includes the specified permission(s).
    ///
    /// # Examples
    ///
    /// ```
    /// use beacon_perms::Permissions;
    ///
    /// let perms = Permissions::SEND_MESSAGES | Permissions::CONNECT;
    /// assert!(perms.has(Permissions::SEND_MESSAGES));
    /// assert!(!perms.has(Permissions::BAN_MEMBERS));
    /// ```
    #[must_use]
    pub const fn has(self, permission: Self) -> bool {
        self.contains(permission)
    }

    // === Registry Lookup ===

    /// Look up the bit position of a flag by its registered name.
    ///
    /// The registry is closed at build time; unregistered names fail with
    /// [`UnknownFlagError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use beacon_perms::Permissions;
    ///
    /// assert_eq!(Permissions::bit_of("VIEW_CHANNEL").unwrap(), 0);
    /// assert!(Permissions::bit_of("FLY_TO_THE_MOON").is_err());
    /// ```
    pub fn bit_of(name: &str) -> Result<u32, UnknownFlagError> {
        Self::from_name(name)
            .map(|flag| flag.bits().trailing_zeros())
            .ok_or_else(|| UnknownFlagError(name.to_string()))
    }

    // === Database Conversion ===

    /// Create a mask from a database BIGINT value.
    ///
    /// Reinterprets the i64 bit pattern as u64. Unknown bits are silently
    /// dropped to stay forward compatible with masks written by newer
    /// versions of the registry.
    #[must_use]
    pub const fn from_db(value: i64) -> Self {
        Self::from_bits_truncate(value as u64)
    }

    /// Convert the mask to a database BIGINT value.
    #[must_use]
    pub const fn to_db(self) -> i64 {
        self.bits() as i64
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}
