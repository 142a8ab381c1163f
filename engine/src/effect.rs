//! Opaque follow-up work produced by transition functions.
//!
//! The guard passes these values through without looking inside; only the
//! dispatcher interprets them. The shape is a small tagged union: nothing,
//! one action, asynchronous work resolving to an action, a cancellation
//! instruction, or a sequence of the above.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use turnstile_types::FollowUp;

/// Stable identifier for cancellable in-flight work.
///
/// Tasks registered under the same key supersede each other, so a feature
/// can pin one logical operation to one key and let newer dispatches
/// replace older ones instead of queueing behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelKey(&'static str);

impl CancelKey {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CancelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

type BoxedWork<A> = Pin<Box<dyn Future<Output = A> + Send + 'static>>;

/// Asynchronous work that resolves to a follow-up action.
pub struct Task<A> {
    key: Option<CancelKey>,
    work: BoxedWork<A>,
}

impl<A> Task<A> {
    pub fn new(work: impl Future<Output = A> + Send + 'static) -> Self {
        Self {
            key: None,
            work: Box::pin(work),
        }
    }

    /// Work registered under `key`; spawning a newer task with the same key
    /// aborts this one first.
    pub fn keyed(key: CancelKey, work: impl Future<Output = A> + Send + 'static) -> Self {
        Self {
            key: Some(key),
            work: Box::pin(work),
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<CancelKey> {
        self.key
    }

    pub(crate) fn into_parts(self) -> (Option<CancelKey>, BoxedWork<A>) {
        (self.key, self.work)
    }
}

impl<A> fmt::Debug for Task<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Follow-up work returned by a transition function.
#[derive(Debug)]
pub enum Effect<A> {
    /// No follow-up work.
    None,
    /// Re-dispatch one action immediately.
    Action(A),
    /// Run asynchronous work, then dispatch the action it produces.
    Task(Task<A>),
    /// Abort the in-flight task registered under the key, if any.
    Cancel(CancelKey),
    /// Run several effects in order.
    Sequence(Vec<Effect<A>>),
}

impl<A> Effect<A> {
    /// Asynchronous work with no cancellation key.
    pub fn task(work: impl Future<Output = A> + Send + 'static) -> Self {
        Effect::Task(Task::new(work))
    }

    /// Asynchronous work registered under `key`.
    pub fn keyed_task(key: CancelKey, work: impl Future<Output = A> + Send + 'static) -> Self {
        Effect::Task(Task::keyed(key, work))
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

impl<A> FollowUp for Effect<A> {
    fn none() -> Self {
        Effect::None
    }
}
