//! Core domain types for Turnstile.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

use serde::{Deserialize, Serialize};

// ============================================================================
// Lock Level
// ============================================================================

/// The stored exclusivity level of a state record.
///
/// A state record carries exactly one lock level: the model is a single-slot
/// lock, not a counter or a stack. The level is created with the record,
/// possibly reset by a release, and destroyed with the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockLevel {
    /// No outstanding exclusivity; any action is admitted.
    #[default]
    None,
    /// A non-exclusive operation is in flight. It may be superseded by
    /// another cancellable or exclusive request.
    Cancellable,
    /// A strict operation is in flight. No further locking action is
    /// admitted until release.
    Exclusive,
}

impl LockLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LockLevel::None => "none",
            LockLevel::Cancellable => "cancellable",
            LockLevel::Exclusive => "exclusive",
        }
    }

    /// Whether any operation is currently considered in flight.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        !matches!(self, LockLevel::None)
    }
}

impl std::fmt::Display for LockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Lock Intent
// ============================================================================

/// The locking effect an action declares for its own dispatch.
///
/// The mapping from action identity to intent is fixed at construction time;
/// an action must report the same intent on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockIntent {
    /// The action does not participate in locking at all.
    #[default]
    None,
    /// The action wants strict mutual exclusion.
    AcquireExclusive,
    /// The action wants weak, replaceable exclusion. Useful for
    /// debounce-like or restartable work.
    AcquireCancellable,
    /// The action signals that the current operation has finished.
    Release,
}

impl LockIntent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LockIntent::None => "none",
            LockIntent::AcquireExclusive => "acquire_exclusive",
            LockIntent::AcquireCancellable => "acquire_cancellable",
            LockIntent::Release => "release",
        }
    }
}

impl std::fmt::Display for LockIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Capability traits
// ============================================================================

/// Storage contract for the lock level on a state record.
///
/// Any state type that exposes a mutable [`LockLevel`] can be driven by the
/// admission guard. The three provided mutators carry the default semantics;
/// implementations may override them (for side-channel bookkeeping), but an
/// override must preserve the effect on the stored level or the guard's
/// admission decisions become inconsistent with observed state.
pub trait LockState {
    fn lock_level(&self) -> LockLevel;

    fn set_lock_level(&mut self, level: LockLevel);

    /// Record that a strict operation is in flight.
    fn set_exclusive(&mut self) {
        self.set_lock_level(LockLevel::Exclusive);
    }

    /// Record that a replaceable operation is in flight.
    fn set_cancellable(&mut self) {
        self.set_lock_level(LockLevel::Cancellable);
    }

    /// Record that no operation is in flight.
    fn clear_lock(&mut self) {
        self.set_lock_level(LockLevel::None);
    }
}

/// Contract for actions that participate in lock-based admission.
///
/// `lock_intent` must be pure: no interior mutation, same answer every call.
pub trait LockAction {
    fn lock_intent(&self) -> LockIntent;
}

/// Capability for the opaque follow-up work a transition function returns.
///
/// The guard never inspects follow-up work; the only thing it needs is a
/// "no follow-up work" value to return when an action is denied. A denied
/// action is routine, not an error, so the caller must treat that value as
/// equivalent to "action accepted but produced nothing to do".
pub trait FollowUp {
    /// The "no follow-up work" value.
    fn none() -> Self;
}

impl FollowUp for () {
    fn none() -> Self {}
}

impl<T> FollowUp for Option<T> {
    fn none() -> Self {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Record {
        level: LockLevel,
        writes: usize,
    }

    impl LockState for Record {
        fn lock_level(&self) -> LockLevel {
            self.level
        }

        fn set_lock_level(&mut self, level: LockLevel) {
            self.writes += 1;
            self.level = level;
        }
    }

    #[test]
    fn default_level_is_none() {
        assert_eq!(LockLevel::default(), LockLevel::None);
        assert!(!LockLevel::default().is_locked());
    }

    #[test]
    fn provided_mutators_write_expected_levels() {
        let mut record = Record::default();

        record.set_exclusive();
        assert_eq!(record.lock_level(), LockLevel::Exclusive);

        record.set_cancellable();
        assert_eq!(record.lock_level(), LockLevel::Cancellable);

        record.clear_lock();
        assert_eq!(record.lock_level(), LockLevel::None);

        assert_eq!(record.writes, 3);
    }

    #[test]
    fn mutators_route_through_set_lock_level() {
        // Overriding the setter is the supported way to add bookkeeping;
        // the provided mutators must all funnel through it.
        let mut record = Record::default();
        record.set_exclusive();
        record.clear_lock();
        assert_eq!(record.writes, 2);
    }

    #[test]
    fn levels_and_intents_display_as_snake_case() {
        assert_eq!(LockLevel::Cancellable.to_string(), "cancellable");
        assert_eq!(LockLevel::Exclusive.to_string(), "exclusive");
        assert_eq!(LockIntent::AcquireExclusive.to_string(), "acquire_exclusive");
        assert_eq!(LockIntent::Release.to_string(), "release");
    }

    #[test]
    fn locked_levels_report_locked() {
        assert!(LockLevel::Cancellable.is_locked());
        assert!(LockLevel::Exclusive.is_locked());
        assert!(!LockLevel::None.is_locked());
    }

    #[test]
    fn follow_up_none_for_option_is_none() {
        let work: Option<u32> = FollowUp::none();
        assert!(work.is_none());
    }
}
