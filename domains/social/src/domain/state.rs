//! Friendship state machine
//!
//! A friendship row starts pending and moves through accept, reject, or
//! block. Accepted is the only state counted by `friends_count`. Rejected
//! and blocked are terminal; an accepted friendship can still be blocked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot apply {event} from {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

/// Friendship states, stored on the friendship row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Blocked,
}

impl FriendshipStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Blocked)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [FriendshipStatus] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected, Self::Blocked],
            Self::Accepted => &[Self::Blocked],
            Self::Rejected => &[],
            Self::Blocked => &[],
        }
    }
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Events that trigger friendship state transitions
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipEvent {
    Accept,
    Reject,
    Block,
}

impl std::fmt::Display for FriendshipEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Friendship state machine
pub struct FriendshipStateMachine;

impl FriendshipStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: FriendshipStatus,
        event: FriendshipEvent,
    ) -> Result<FriendshipStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (FriendshipStatus::Pending, FriendshipEvent::Accept) => FriendshipStatus::Accepted,
            (FriendshipStatus::Pending, FriendshipEvent::Reject) => FriendshipStatus::Rejected,
            (FriendshipStatus::Pending, FriendshipEvent::Block) => FriendshipStatus::Blocked,
            (FriendshipStatus::Accepted, FriendshipEvent::Block) => FriendshipStatus::Blocked,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: FriendshipStatus, event: FriendshipEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
