//! Draft/publish state machine for website records.
//!
//! The machine only decides whether an action is legal and which state it
//! leads to. Validation and persistence are the job of the website service,
//! which runs them between calling [`WebsiteState::apply`] and committing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;

/// Lifecycle state of a website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteState {
    /// Exists only inside an editing session.
    Unsaved,
    /// Persisted, not publicly visible.
    Draft,
    /// Persisted and publicly visible.
    Published,
    /// Removed by its owner. Terminal.
    Deleted,
}

/// Owner-initiated lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    /// Validate and persist the current content.
    Save,
    /// Validate, persist and make publicly visible.
    Publish,
    /// Hide from the public without deleting.
    Unpublish,
    /// Remove permanently.
    Delete,
}

impl fmt::Display for WebsiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unsaved => "unsaved",
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Save => "save",
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleError {
    /// State the record was in.
    pub from: WebsiteState,
    /// Action that was attempted.
    pub action: LifecycleAction,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} a website in the {} state", self.action, self.from)
    }
}

impl std::error::Error for LifecycleError {}

impl From<LifecycleError> for Error {
    fn from(value: LifecycleError) -> Self {
        Self::conflict(value.to_string()).with_details(json!({
            "reason": "illegal_transition",
            "state": value.from,
            "action": value.action,
        }))
    }
}

impl WebsiteState {
    /// Resolve the state reached by applying `action`.
    ///
    /// # Examples
    /// ```
    /// use site_builder::domain::{LifecycleAction, WebsiteState};
    ///
    /// let next = WebsiteState::Unsaved.apply(LifecycleAction::Save).unwrap();
    /// assert_eq!(next, WebsiteState::Draft);
    /// assert!(WebsiteState::Unsaved.apply(LifecycleAction::Publish).is_err());
    /// ```
    pub fn apply(self, action: LifecycleAction) -> Result<Self, LifecycleError> {
        use LifecycleAction as A;
        use WebsiteState as S;

        let next = match (self, action) {
            (S::Deleted, _) => None,
            (S::Unsaved, A::Save) => Some(S::Draft),
            (S::Unsaved, A::Publish | A::Unpublish | A::Delete) => None,
            (S::Draft, A::Save) => Some(S::Draft),
            (S::Published, A::Save) => Some(S::Published),
            (S::Draft | S::Published, A::Publish) => Some(S::Published),
            (S::Draft | S::Published, A::Unpublish) => Some(S::Draft),
            (S::Draft | S::Published, A::Delete) => Some(S::Deleted),
        };
        next.ok_or(LifecycleError { from: self, action })
    }

    /// Whether the record exists in the store.
    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Draft | Self::Published)
    }
}
