//! Executes [`Effect`] values outside the guard.
//!
//! The guard only decides admission; somebody still has to run the
//! follow-up work it passes through. This dispatcher is that scheduler for
//! the sample pipeline: tasks run on tokio, a keyed task aborts the
//! in-flight task holding the same key (last writer wins, mirroring the
//! replacement semantics of the cancellable lock level), and finished work
//! hands its action back through a channel so the owner can feed it to the
//! guarded reducer.

use std::collections::HashMap;

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;

use crate::effect::{CancelKey, Effect, Task};

pub struct Dispatcher<A> {
    feedback_tx: mpsc::UnboundedSender<A>,
    feedback_rx: mpsc::UnboundedReceiver<A>,
    in_flight: HashMap<CancelKey, AbortHandle>,
}

impl<A: Send + 'static> Dispatcher<A> {
    #[must_use]
    pub fn new() -> Self {
        let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();
        Self {
            feedback_tx,
            feedback_rx,
            in_flight: HashMap::new(),
        }
    }

    /// Execute one effect. Tasks are spawned on the ambient tokio runtime.
    pub fn run(&mut self, effect: Effect<A>) {
        match effect {
            Effect::None => {}
            Effect::Action(action) => {
                // The receiver lives in self, so the send cannot fail.
                let _ = self.feedback_tx.send(action);
            }
            Effect::Task(task) => self.spawn(task),
            Effect::Cancel(key) => self.cancel(key),
            Effect::Sequence(effects) => {
                for effect in effects {
                    self.run(effect);
                }
            }
        }
    }

    /// Abort the in-flight task registered under `key`.
    ///
    /// Unknown keys are a no-op; an aborted task never delivers its action.
    pub fn cancel(&mut self, key: CancelKey) {
        if let Some(handle) = self.in_flight.remove(&key) {
            handle.abort();
        }
    }

    fn spawn(&mut self, task: Task<A>) {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let (key, work) = task.into_parts();
        if let Some(key) = key
            && let Some(previous) = self.in_flight.insert(key, abort_handle)
        {
            previous.abort();
        }

        let feedback = self.feedback_tx.clone();
        tokio::spawn(async move {
            if let Ok(action) = Abortable::new(work, abort_registration).await {
                let _ = feedback.send(action);
            }
        });
    }

    /// Next completed follow-up action, if any (non-blocking).
    pub fn try_next(&mut self) -> Option<A> {
        self.feedback_rx.try_recv().ok()
    }

    /// Next completed follow-up action, waiting for one to finish.
    pub async fn next(&mut self) -> Option<A> {
        self.feedback_rx.recv().await
    }
}

impl<A: Send + 'static> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{sleep, timeout};

    use super::*;

    const KEY: CancelKey = CancelKey::new("test.probe");

    async fn next_within(dispatcher: &mut Dispatcher<u32>, limit: Duration) -> Option<u32> {
        timeout(limit, dispatcher.next()).await.ok().flatten()
    }

    #[tokio::test]
    async fn keyed_task_aborts_its_in_flight_predecessor() {
        let mut dispatcher = Dispatcher::new();

        // The predecessor would finish first if it were left running.
        dispatcher.run(Effect::keyed_task(KEY, async {
            sleep(Duration::from_millis(50)).await;
            1u32
        }));
        dispatcher.run(Effect::keyed_task(KEY, async {
            sleep(Duration::from_millis(150)).await;
            2u32
        }));

        let delivered = next_within(&mut dispatcher, Duration::from_secs(5)).await;
        assert_eq!(delivered, Some(2), "only the replacement may deliver");

        sleep(Duration::from_millis(100)).await;
        assert_eq!(dispatcher.try_next(), None);
    }

    #[tokio::test]
    async fn cancel_drops_keyed_work_and_ignores_unknown_keys() {
        let mut dispatcher = Dispatcher::new();

        dispatcher.run(Effect::keyed_task(KEY, async {
            sleep(Duration::from_millis(30)).await;
            1u32
        }));
        dispatcher.run(Effect::Cancel(KEY));

        // A key nobody registered: nothing happens.
        dispatcher.run(Effect::Cancel(CancelKey::new("test.other")));

        sleep(Duration::from_millis(100)).await;
        assert_eq!(dispatcher.try_next(), None);
    }

    #[tokio::test]
    async fn actions_and_sequences_deliver_immediately_in_order() {
        let mut dispatcher = Dispatcher::new();

        dispatcher.run(Effect::Sequence(vec![
            Effect::Action(1u32),
            Effect::None,
            Effect::Action(2u32),
        ]));

        assert_eq!(dispatcher.try_next(), Some(1));
        assert_eq!(dispatcher.try_next(), Some(2));
        assert_eq!(dispatcher.try_next(), None);
    }

    #[tokio::test]
    async fn unkeyed_tasks_deliver_their_action() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.run(Effect::task(async { 9u32 }));
        assert_eq!(
            next_within(&mut dispatcher, Duration::from_secs(5)).await,
            Some(9)
        );
    }
}
