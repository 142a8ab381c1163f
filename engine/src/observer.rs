//! Observability events emitted by the admission guard.
//!
//! Every acquire, skip, and release decision emits exactly one event through
//! an injectable sink. Events are diagnostic only and must not affect
//! control flow: callers may swap in any sink without changing what the
//! guard admits.

use turnstile_types::{LockIntent, LockLevel};

/// Whether a decision let the wrapped transition function run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Denied,
}

/// A single guard decision.
///
/// This is a closed enum - only guard code constructs these variants, so a
/// sink can rely on the set being complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardEvent {
    /// An exclusive lock was taken. `prior` is the level it replaced.
    ExclusiveAcquired { prior: LockLevel },
    /// A cancellable lock was taken. `prior` distinguishes a fresh acquire
    /// (`None`) from a replacement (`Cancellable`).
    CancellableAcquired { prior: LockLevel },
    /// The lock was cleared. `prior` is the level that was released.
    Released { prior: LockLevel },
    /// The action was skipped because a stricter lock is already held.
    Denied {
        held: LockLevel,
        requested: LockIntent,
    },
}

impl GuardEvent {
    #[must_use]
    pub const fn admission(self) -> Admission {
        match self {
            GuardEvent::Denied { .. } => Admission::Denied,
            GuardEvent::ExclusiveAcquired { .. }
            | GuardEvent::CancellableAcquired { .. }
            | GuardEvent::Released { .. } => Admission::Admitted,
        }
    }
}

impl std::fmt::Display for GuardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardEvent::ExclusiveAcquired { .. } => f.write_str("exclusive lock acquired"),
            GuardEvent::CancellableAcquired { .. } => f.write_str("cancellable lock acquired"),
            GuardEvent::Released { .. } => f.write_str("lock released"),
            GuardEvent::Denied { .. } => {
                f.write_str("admission denied: already exclusively locked")
            }
        }
    }
}

/// Sink for guard decisions.
///
/// The default sink logs through `tracing`; tests substitute a recording
/// sink so emitted events can be asserted without capturing process output.
pub trait GuardObserver {
    fn on_event(&self, event: GuardEvent);
}

/// Logs every decision at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GuardObserver for TracingObserver {
    fn on_event(&self, event: GuardEvent) {
        match event {
            GuardEvent::Denied { held, requested } => {
                tracing::debug!(%held, %requested, "{event}");
            }
            GuardEvent::ExclusiveAcquired { prior }
            | GuardEvent::CancellableAcquired { prior }
            | GuardEvent::Released { prior } => {
                tracing::debug!(%prior, "{event}");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GuardObserver for NullObserver {
    fn on_event(&self, _event: GuardEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_is_the_only_denied_admission() {
        let denied = GuardEvent::Denied {
            held: LockLevel::Exclusive,
            requested: LockIntent::AcquireCancellable,
        };
        assert_eq!(denied.admission(), Admission::Denied);

        for admitted in [
            GuardEvent::ExclusiveAcquired {
                prior: LockLevel::None,
            },
            GuardEvent::CancellableAcquired {
                prior: LockLevel::Cancellable,
            },
            GuardEvent::Released {
                prior: LockLevel::Exclusive,
            },
        ] {
            assert_eq!(admitted.admission(), Admission::Admitted);
        }
    }

    #[test]
    fn events_render_the_log_lines() {
        assert_eq!(
            GuardEvent::ExclusiveAcquired {
                prior: LockLevel::None
            }
            .to_string(),
            "exclusive lock acquired"
        );
        assert_eq!(
            GuardEvent::Denied {
                held: LockLevel::Exclusive,
                requested: LockIntent::AcquireExclusive,
            }
            .to_string(),
            "admission denied: already exclusively locked"
        );
    }
}
