use crate::abilities::AbilitySpecHandle;
use crate::core::EntityId;
use crate::tags::Tag;

/// Why an ability did not activate.
///
/// Activation failures leave every component untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActivationError {
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("{owner} has no ability with handle {handle}")]
    UnknownAbility {
        owner: EntityId,
        handle: AbilitySpecHandle,
    },

    #[error("{owner} lacks the tags required by {ability}")]
    MissingRequiredTags { owner: EntityId, ability: Tag },

    #[error("{ability} is blocked on {owner}")]
    Blocked { owner: EntityId, ability: Tag },

    #[error("{ability} found no targets for {owner}")]
    NoTargets { owner: EntityId, ability: Tag },
}
