//! Override validation and combination.

use crate::error::InvalidOverrideError;
use crate::flags::Permissions;
use crate::models::Override;

/// Validate an allow/deny pair at write time.
///
/// Rejects any pair whose masks overlap. Stores must call this before
/// persisting an override; the resolver never re-checks, it only tolerates.
pub const fn validate_override(
    allow: Permissions,
    deny: Permissions,
) -> Result<(), InvalidOverrideError> {
    let overlap = allow.intersection(deny);
    if overlap.is_empty() {
        Ok(())
    } else {
        Err(InvalidOverrideError { overlap })
    }
}

/// Reduce overrides from the same layer and target kind into one pair.
///
/// `allow` is the union of all allows; `deny` is the union of all denies
/// minus anything allowed. Allow wins when two overrides in the combination
/// disagree, which makes the result independent of iteration order: a user
/// holding several roles with conflicting channel overrides resolves the
/// same mask no matter how the store ordered the rows.
pub fn combine_overrides<'a, I>(overrides: I) -> (Permissions, Permissions)
where
    I: IntoIterator<Item = &'a Override>,
{
    let mut allow = Permissions::empty();
    let mut deny = Permissions::empty();

    for ovr in overrides {
        allow |= ovr.allow;
        deny |= ovr.deny;
    }

    (allow, deny.difference(allow))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::{OverrideScope, OverrideTarget};

    fn role_override(allow: Permissions, deny: Permissions) -> Override {
        Override {
            id: Uuid::new_v4(),
            scope: OverrideScope::Channel,
            target: OverrideTarget::Role(Uuid::new_v4()),
            allow,
            deny,
            expires_at: None,
        }
    }

    #[test]
    fn test_validate_disjoint_pair() {
        assert!(validate_override(Permissions::SEND_MESSAGES, Permissions::CONNECT).is_ok());
        assert!(validate_override(Permissions::empty(), Permissions::empty()).is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let allow = Permissions::SEND_MESSAGES | Permissions::VIEW_CHANNEL;
        let deny = Permissions::SEND_MESSAGES | Permissions::CONNECT;

        let err = validate_override(allow, deny).unwrap_err();
        assert_eq!(err.overlap, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_combine_unions_allows_and_denies() {
        let overrides = [
            role_override(Permissions::ATTACH_FILES, Permissions::empty()),
            role_override(Permissions::empty(), Permissions::SEND_MESSAGES),
        ];

        let (allow, deny) = combine_overrides(&overrides);
        assert_eq!(allow, Permissions::ATTACH_FILES);
        assert_eq!(deny, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_combine_allow_wins_on_conflict() {
        let overrides = [
            role_override(Permissions::SEND_MESSAGES, Permissions::empty()),
            role_override(Permissions::empty(), Permissions::SEND_MESSAGES),
        ];

        let (allow, deny) = combine_overrides(&overrides);
        assert!(allow.has(Permissions::SEND_MESSAGES));
        assert!(!deny.has(Permissions::SEND_MESSAGES));
    }

    #[test]
    fn test_combine_is_order_independent() {
        let a = role_override(Permissions::VIEW_CHANNEL, Permissions::SPEAK);
        let b = role_override(Permissions::SPEAK, Permissions::SEND_MESSAGES);
        let c = role_override(Permissions::empty(), Permissions::VIEW_CHANNEL);

        let forward = combine_overrides([&a, &b, &c]);
        let reverse = combine_overrides([&c, &b, &a]);

        assert_eq!(forward, reverse);
        // Every denied-then-allowed bit ends up allowed.
        assert_eq!(forward.0, Permissions::VIEW_CHANNEL | Permissions::SPEAK);
        assert_eq!(forward.1, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_combine_empty_set() {
        let (allow, deny) = combine_overrides(std::iter::empty::<&Override>());
        assert!(allow.is_empty());
        assert!(deny.is_empty());
    }
}
