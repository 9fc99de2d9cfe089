//! Template library: named allow/deny bundles for populating overrides.
//!
//! Templates are fixed at build time. Applying one only constructs an
//! [`Override`]; persisting it belongs to the override-write collaborator,
//! and no resolution happens here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::UnknownTemplateError;
use crate::flags::Permissions;
use crate::models::{Override, OverrideScope, OverrideTarget};

/// Names of the built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateName {
    /// Ordinary text-channel participation.
    Member,
    /// View and read history, no posting.
    Readonly,
    /// Message and thread moderation on top of participation.
    Moderator,
    /// Voice channel participation.
    VoiceParticipant,
    /// Revokes posting, reacting, and speaking.
    Muted,
}

impl TemplateName {
    /// All built-in templates.
    pub const ALL: [Self; 5] = [
        Self::Member,
        Self::Readonly,
        Self::Moderator,
        Self::VoiceParticipant,
        Self::Muted,
    ];

    /// The template's allow/deny bundle.
    ///
    /// Every bundle keeps allow and deny disjoint, so overrides built from
    /// templates always pass write-time validation.
    #[must_use]
    pub const fn bundle(self) -> (Permissions, Permissions) {
        match self {
            Self::Member => (
                Permissions::VIEW_CHANNEL
                    .union(Permissions::READ_MESSAGE_HISTORY)
                    .union(Permissions::SEND_MESSAGES)
                    .union(Permissions::EMBED_LINKS)
                    .union(Permissions::ATTACH_FILES)
                    .union(Permissions::ADD_REACTIONS)
                    .union(Permissions::CREATE_THREADS)
                    .union(Permissions::SEND_THREAD_MESSAGES),
                Permissions::empty(),
            ),
            Self::Readonly => (
                Permissions::VIEW_CHANNEL.union(Permissions::READ_MESSAGE_HISTORY),
                Permissions::SEND_MESSAGES,
            ),
            Self::Moderator => (
                Permissions::VIEW_CHANNEL
                    .union(Permissions::READ_MESSAGE_HISTORY)
                    .union(Permissions::SEND_MESSAGES)
                    .union(Permissions::MANAGE_MESSAGES)
                    .union(Permissions::PIN_MESSAGES)
                    .union(Permissions::MANAGE_THREADS)
                    .union(Permissions::MUTE_MEMBERS),
                Permissions::empty(),
            ),
            Self::VoiceParticipant => (
                Permissions::VIEW_CHANNEL
                    .union(Permissions::CONNECT)
                    .union(Permissions::SPEAK)
                    .union(Permissions::STREAM),
                Permissions::empty(),
            ),
            Self::Muted => (
                Permissions::empty(),
                Permissions::SEND_MESSAGES
                    .union(Permissions::SEND_THREAD_MESSAGES)
                    .union(Permissions::ADD_REACTIONS)
                    .union(Permissions::SPEAK)
                    .union(Permissions::STREAM),
            ),
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Readonly => "readonly",
            Self::Moderator => "moderator",
            Self::VoiceParticipant => "voice-participant",
            Self::Muted => "muted",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateName {
    type Err = UnknownTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "readonly" => Ok(Self::Readonly),
            "moderator" => Ok(Self::Moderator),
            "voice-participant" => Ok(Self::VoiceParticipant),
            "muted" => Ok(Self::Muted),
            other => Err(UnknownTemplateError(other.to_string())),
        }
    }
}

/// Construct an override from a template's bundle.
///
/// The caller persists the result through the override-write collaborator.
#[must_use]
pub fn apply_template(
    name: TemplateName,
    scope: OverrideScope,
    target: OverrideTarget,
) -> Override {
    let (allow, deny) = name.bundle();
    Override {
        id: Uuid::new_v4(),
        scope,
        target,
        allow,
        deny,
        expires_at: None,
    }
}
