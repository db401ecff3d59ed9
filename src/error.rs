//! Ability-specific error types.
//!
//! No error here ever surfaces to an end user: callers log the value and
//! resolve it by resetting state or ending the ability.  Keeping the
//! taxonomy explicit makes the silent-rejection paths testable.

use std::fmt;

/// Top-level error enum for the transcendence ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityError {
    /// The player character (or one of its required components) could not be
    /// resolved at activation time.  Activation fails closed with no partial
    /// state created.
    MissingPlayer,

    /// The resource commit was denied: not enough mana to pay the
    /// activation cost.
    ResourceDenied {
        /// Mana required to activate.
        required: f32,
        /// Mana actually available.
        available: f32,
    },

    /// A session is already running; the ability cannot be activated twice.
    AlreadyActive,

    /// A prepare request targeted a hammer that cannot be used: the slot is
    /// out of range, the hammer is already mid-preparation, another hand
    /// action is in flight, or the reserve rule rejected the selection.
    InvalidSelection {
        /// Slot index the request validated against.
        slot: usize,
    },

    /// An entity handle went stale mid-operation (enemy or hammer despawned).
    /// The affected operation is aborted; the session continues.
    StaleReference {
        /// Human-readable description of where the lookup occurred.
        context: &'static str,
    },
}

impl fmt::Display for AbilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityError::MissingPlayer => {
                write!(f, "player character could not be resolved")
            }
            AbilityError::ResourceDenied {
                required,
                available,
            } => write!(f, "mana commit denied: need {required}, have {available}"),
            AbilityError::AlreadyActive => {
                write!(f, "a transcendence session is already active")
            }
            AbilityError::InvalidSelection { slot } => {
                write!(f, "hammer selection rejected at slot {slot}")
            }
            AbilityError::StaleReference { context } => {
                write!(f, "stale entity reference during '{context}'")
            }
        }
    }
}

impl std::error::Error for AbilityError {}

/// Convenience alias: a `Result` using `AbilityError` as the error type.
pub type AbilityResult<T> = Result<T, AbilityError>;
