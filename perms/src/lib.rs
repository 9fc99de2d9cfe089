//! Beacon Permission Engine
//!
//! Pure permission resolution for workspace channels: given a user, a
//! channel, and a snapshot of the surrounding role/override data, compute
//! the single effective capability mask governing what the user may do.
//!
//! The engine performs no I/O and holds no state; all role/override
//! fetching, persistence, and transport belong to the embedding
//! application.

pub mod error;
pub mod flags;
pub mod helpers;
pub mod models;
pub mod overrides;
pub mod resolver;
pub mod sync;
pub mod templates;

pub use error::{
    AccessError, InvalidOverrideError, SyncError, UnknownFlagError, UnknownTemplateError,
};
pub use flags::Permissions;
pub use helpers::{can_manage_role, can_moderate_member, MemberContext};
pub use models::{Category, Channel, Override, OverrideScope, OverrideTarget, Role, Workspace};
pub use overrides::{combine_overrides, validate_override};
pub use resolver::{resolve_effective_permissions, ResolutionContext};
pub use sync::{break_sync, enable_sync, SyncState};
pub use templates::{apply_template, TemplateName};
