//! Admission guard core for Turnstile - lock bookkeeping and gating.
//!
//! This crate contains the guard state machine without TUI dependencies.
//!
//! The core is [`AdmissionGuard`]: a decorator around the transition
//! function of a unidirectional state-update pipeline. Each incoming action
//! declares a [`LockIntent`]; the guard consults the state record's
//! [`LockLevel`], decides whether the transition runs at all, and keeps the
//! level current. Denied actions short-circuit to "no follow-up work" -
//! routinely, not as an error.
//!
//! Everything else here is demonstration glue that exercises the guard: the
//! [`Effect`] model transitions return, the [`Dispatcher`] that executes it
//! with keyed cancellation, and the counter sample the TUI renders.

mod app;
mod config;
mod counter;
mod dispatcher;
mod effect;
mod guard;
mod observer;

pub use app::{App, EventLogEntry};
pub use config::{ConfigError, TurnstileConfig};
pub use counter::{BOOST_KEY, CounterAction, CounterFeature, CounterState};
pub use dispatcher::Dispatcher;
pub use effect::{CancelKey, Effect, Task};
pub use guard::{AdmissionGuard, Guarded};
pub use observer::{Admission, GuardEvent, GuardObserver, NullObserver, TracingObserver};

// Re-export the vocabulary so downstream crates depend on one surface.
pub use turnstile_types::{FollowUp, LockAction, LockIntent, LockLevel, LockState};
