//! Sample counter feature wired through the admission guard.
//!
//! The smallest useful shape of a guarded pipeline: a slow exclusive
//! increment, a restartable cancellable recompute, a release action that
//! commits the result, and a plain action untouched by the lock.

use std::time::Duration;

use tokio::time::sleep;
use turnstile_types::{LockAction, LockIntent, LockLevel, LockState};

use crate::effect::{CancelKey, Effect};

/// Cancellation key shared by all boost probes: a newer boost (or a tap)
/// supersedes the one in flight.
pub const BOOST_KEY: CancelKey = CancelKey::new("counter.boost");

/// State record for the sample screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    pub counter: i64,
    pub lock_level: LockLevel,
}

impl LockState for CounterState {
    fn lock_level(&self) -> LockLevel {
        self.lock_level
    }

    fn set_lock_level(&mut self, level: LockLevel) {
        self.lock_level = level;
    }
}

/// Actions the sample screen can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    /// Slow increment; wants the pipeline to itself while it runs.
    Tap,
    /// Slow doubling; restartable, a newer boost replaces the old one.
    Boost,
    /// Commit a computed value and release the lock.
    Commit(i64),
    /// Zero the counter; does not participate in locking.
    Reset,
}

impl LockAction for CounterAction {
    fn lock_intent(&self) -> LockIntent {
        match self {
            CounterAction::Tap => LockIntent::AcquireExclusive,
            CounterAction::Boost => LockIntent::AcquireCancellable,
            CounterAction::Commit(_) => LockIntent::Release,
            CounterAction::Reset => LockIntent::None,
        }
    }
}

/// Transition function for [`CounterAction`], parameterized by work timing.
#[derive(Debug, Clone, Copy)]
pub struct CounterFeature {
    tap_duration: Duration,
    boost_duration: Duration,
}

impl CounterFeature {
    #[must_use]
    pub const fn new(tap_duration: Duration, boost_duration: Duration) -> Self {
        Self {
            tap_duration,
            boost_duration,
        }
    }

    /// The wrapped transition function. Runs only for admitted actions; the
    /// guard has already updated the lock level by the time this executes.
    pub fn reduce(&self, state: &mut CounterState, action: &CounterAction) -> Effect<CounterAction> {
        match action {
            CounterAction::Tap => {
                let next = state.counter.saturating_add(1);
                let delay = self.tap_duration;
                // An exclusive operation supersedes any boost still in
                // flight. The guard only clears the gate; dropping the old
                // work is the scheduler's job, so we ask for it here.
                Effect::Sequence(vec![
                    Effect::Cancel(BOOST_KEY),
                    Effect::task(async move {
                        sleep(delay).await;
                        CounterAction::Commit(next)
                    }),
                ])
            }
            CounterAction::Boost => {
                let next = state.counter.saturating_mul(2);
                let delay = self.boost_duration;
                Effect::keyed_task(BOOST_KEY, async move {
                    sleep(delay).await;
                    CounterAction::Commit(next)
                })
            }
            CounterAction::Commit(value) => {
                state.counter = *value;
                Effect::None
            }
            CounterAction::Reset => {
                state.counter = 0;
                Effect::None
            }
        }
    }
}
