//! State enums for qualcode.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EditState
// ---------------------------------------------------------------------------

/// State of a code-hierarchy edit session.
///
/// ```text
/// clean → dirty          (widget reports an edited tree)
/// dirty → dirty          (further edits, or a failed save)
/// dirty → clean          (successful save + refetch)
/// ```
///
/// There is no discard: the only way out of `dirty` is a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    #[default]
    Clean,
    Dirty,
}

impl EditState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Clean => &[Self::Dirty],
            Self::Dirty => &[Self::Dirty, Self::Clean],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_state_transitions() {
        assert!(EditState::Clean.can_transition_to(EditState::Dirty));
        assert!(!EditState::Clean.can_transition_to(EditState::Clean));
        assert!(EditState::Dirty.can_transition_to(EditState::Clean));
        assert!(EditState::Dirty.can_transition_to(EditState::Dirty));
    }

    #[test]
    fn edit_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&EditState::Dirty).unwrap(),
            "\"dirty\""
        );
        assert_eq!(EditState::default(), EditState::Clean);
    }
}
