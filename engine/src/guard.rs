//! The admission guard - one decision table over (lock level, intent).
//!
//! This module is the single encoding point for admission decisions. The
//! surrounding pipeline delegates every action here instead of consulting
//! the lock level at call sites.
//!
//! # State machine
//!
//! The lock level alone moves through:
//!
//! ```text
//!                      acquire_cancellable (replacement)
//!                              ┌──────┐
//!                              v      │
//! ┌──────┐ acquire_cancellable ┌─────────────┐
//! │ none │ ──────────────────> │ cancellable │
//! └──────┘                     └─────────────┘
//!     │                               │
//!     │ acquire_exclusive             │ acquire_exclusive
//!     v                               v
//! ┌─────────────────────────────────────────────┐
//! │ exclusive    (acquire_*: blocked, skipped)  │
//! └─────────────────────────────────────────────┘
//!
//!     any level ── release ──> none
//! ```
//!
//! No terminal state; the record's lifetime bounds the machine's lifetime.

use turnstile_types::{FollowUp, LockAction, LockIntent, LockLevel, LockState};

use crate::observer::{GuardEvent, GuardObserver, TracingObserver};

/// Gates actions in a state-update pipeline based on their declared
/// [`LockIntent`] and the state record's current [`LockLevel`].
///
/// The guard is a decorator: for an admitted action it updates the lock
/// level first and then invokes the wrapped transition function; for a
/// denied action it returns [`FollowUp::none`] without touching state. It
/// never blocks, never queues, and never spawns work - any asynchronous
/// work is merely described by the value the transition returns.
///
/// Denial is routine, not an error. An action is skipped only when the
/// record is exclusively locked and the action asks to acquire; a
/// cancellable lock never blocks anything - it is advisory, designed so a
/// newer equivalent operation preempts an older one instead of queueing.
///
/// `handle` performs a read-then-write of the lock level and must be
/// invoked serially for any one state record; the surrounding single-writer
/// pipeline owns that guarantee.
pub struct AdmissionGuard<O = TracingObserver> {
    observer: O,
}

impl AdmissionGuard<TracingObserver> {
    /// Guard with the default tracing sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observer: TracingObserver,
        }
    }
}

impl Default for AdmissionGuard<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: GuardObserver> AdmissionGuard<O> {
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Decide one action, updating the lock level and delegating to
    /// `transition` when admitted.
    ///
    /// The transition's return value passes through untouched; a denied
    /// action yields [`FollowUp::none`] instead.
    pub fn handle<S, A, E, F>(&self, state: &mut S, action: &A, transition: F) -> E
    where
        S: LockState,
        A: LockAction,
        E: FollowUp,
        F: FnOnce(&mut S, &A) -> E,
    {
        match action.lock_intent() {
            LockIntent::None => transition(state, action),
            LockIntent::AcquireExclusive => {
                let prior = state.lock_level();
                if prior == LockLevel::Exclusive {
                    self.observer.on_event(GuardEvent::Denied {
                        held: prior,
                        requested: LockIntent::AcquireExclusive,
                    });
                    return E::none();
                }
                state.set_exclusive();
                self.observer
                    .on_event(GuardEvent::ExclusiveAcquired { prior });
                transition(state, action)
            }
            LockIntent::AcquireCancellable => {
                let prior = state.lock_level();
                if prior == LockLevel::Exclusive {
                    self.observer.on_event(GuardEvent::Denied {
                        held: prior,
                        requested: LockIntent::AcquireCancellable,
                    });
                    return E::none();
                }
                // Last writer wins: a prior cancellable level is replaced,
                // not counted.
                state.set_cancellable();
                self.observer
                    .on_event(GuardEvent::CancellableAcquired { prior });
                transition(state, action)
            }
            LockIntent::Release => {
                // Release never gates: it originates from work that was
                // itself admitted earlier, and the transition still runs so
                // completion callbacks can commit their result into state.
                let prior = state.lock_level();
                state.clear_lock();
                self.observer.on_event(GuardEvent::Released { prior });
                transition(state, action)
            }
        }
    }
}

/// A transition function composed with the guard once, ahead of time.
///
/// [`AdmissionGuard::handle`] takes the transition per call; `Guarded` is
/// the decorator shape for callers that build their pipeline up front and
/// then feed it actions.
pub struct Guarded<R, O = TracingObserver> {
    guard: AdmissionGuard<O>,
    reduce: R,
}

impl<R> Guarded<R> {
    #[must_use]
    pub fn new(reduce: R) -> Self {
        Self {
            guard: AdmissionGuard::new(),
            reduce,
        }
    }
}

impl<R, O: GuardObserver> Guarded<R, O> {
    #[must_use]
    pub fn with_observer(reduce: R, observer: O) -> Self {
        Self {
            guard: AdmissionGuard::with_observer(observer),
            reduce,
        }
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        self.guard.observer()
    }

    /// Feed one action through the guard into the wrapped transition.
    pub fn reduce<S, A, E>(&mut self, state: &mut S, action: &A) -> E
    where
        S: LockState,
        A: LockAction,
        E: FollowUp,
        R: FnMut(&mut S, &A) -> E,
    {
        self.guard.handle(state, action, &mut self.reduce)
    }
}
