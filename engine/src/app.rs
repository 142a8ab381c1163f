//! Demo application state consumed by the TUI.
//!
//! Owns the counter state, the guarded reducer, and the dispatcher, and
//! keeps a short log of guard decisions for display. The TUI and binary
//! only ever talk to [`App`]; the guard stays buried in the pipeline.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use turnstile_types::LockLevel;

use crate::config::TurnstileConfig;
use crate::counter::{CounterAction, CounterFeature, CounterState};
use crate::dispatcher::Dispatcher;
use crate::guard::AdmissionGuard;
use crate::observer::{GuardEvent, GuardObserver, TracingObserver};

/// Cap on the retained guard event log.
const EVENT_LOG_CAP: usize = 64;

/// A guard decision with the tick it was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLogEntry {
    pub tick: u64,
    pub event: GuardEvent,
}

/// Observer that logs through tracing and forwards each event to the app's
/// display log.
struct EventFeed {
    tx: mpsc::UnboundedSender<GuardEvent>,
}

impl GuardObserver for EventFeed {
    fn on_event(&self, event: GuardEvent) {
        TracingObserver.on_event(event);
        // The receiver lives in the App; a failed send means shutdown.
        let _ = self.tx.send(event);
    }
}

/// Application state for the sample screen.
pub struct App {
    state: CounterState,
    feature: CounterFeature,
    guard: AdmissionGuard<EventFeed>,
    dispatcher: Dispatcher<CounterAction>,
    event_rx: mpsc::UnboundedReceiver<GuardEvent>,
    event_log: VecDeque<EventLogEntry>,
    tick: u64,
    should_quit: bool,
    ascii_only: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &TurnstileConfig) -> Self {
        let (tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state: CounterState::default(),
            feature: CounterFeature::new(config.tap_duration(), config.boost_duration()),
            guard: AdmissionGuard::with_observer(EventFeed { tx }),
            dispatcher: Dispatcher::new(),
            event_rx,
            event_log: VecDeque::new(),
            tick: 0,
            should_quit: false,
            ascii_only: config.ascii_only,
        }
    }

    /// Feed one action through the guard and hand any follow-up work to the
    /// dispatcher.
    pub fn dispatch(&mut self, action: CounterAction) {
        let feature = self.feature;
        let effect = self.guard.handle(&mut self.state, &action, |state, action| {
            feature.reduce(state, action)
        });
        self.dispatcher.run(effect);
        self.drain_events();
    }

    /// Advance one frame: deliver finished follow-up actions back into the
    /// pipeline.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        while let Some(action) = self.dispatcher.try_next() {
            self.dispatch(action);
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if self.event_log.len() == EVENT_LOG_CAP {
                self.event_log.pop_front();
            }
            self.event_log.push_back(EventLogEntry {
                tick: self.tick,
                event,
            });
        }
    }

    #[must_use]
    pub fn counter(&self) -> i64 {
        self.state.counter
    }

    #[must_use]
    pub fn lock_level(&self) -> LockLevel {
        self.state.lock_level
    }

    /// Recent guard decisions, oldest first.
    #[must_use]
    pub fn events(&self) -> &VecDeque<EventLogEntry> {
        &self.event_log
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.ascii_only
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;
    use crate::observer::Admission;

    fn fast_config() -> TurnstileConfig {
        TurnstileConfig {
            tap_millis: 5,
            boost_millis: 5,
            ..TurnstileConfig::default()
        }
    }

    /// Tick the app until `done` holds or the deadline passes.
    async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            app.tick();
            if done(app) {
                return;
            }
            sleep(Duration::from_millis(2)).await;
        }
        panic!("pipeline did not settle in time");
    }

    #[tokio::test]
    async fn tap_locks_computes_and_releases() {
        let mut app = App::new(&fast_config());

        app.dispatch(CounterAction::Tap);
        assert_eq!(app.lock_level(), LockLevel::Exclusive);
        assert_eq!(app.counter(), 0, "the commit has not landed yet");

        settle(&mut app, |app| app.counter() == 1).await;
        assert_eq!(app.lock_level(), LockLevel::None);
    }

    #[tokio::test]
    async fn mashing_tap_admits_only_the_first() {
        let mut app = App::new(&fast_config());

        app.dispatch(CounterAction::Tap);
        app.dispatch(CounterAction::Tap);
        app.dispatch(CounterAction::Tap);

        settle(&mut app, |app| app.lock_level() == LockLevel::None).await;
        assert_eq!(app.counter(), 1, "denied taps must not commit");

        let denials = app
            .events()
            .iter()
            .filter(|entry| entry.event.admission() == Admission::Denied)
            .count();
        assert_eq!(denials, 2);
    }

    #[tokio::test]
    async fn newer_boost_supersedes_older_boost() {
        let mut app = App::new(&fast_config());

        app.dispatch(CounterAction::Commit(3));
        app.dispatch(CounterAction::Boost);
        app.dispatch(CounterAction::Boost);

        settle(&mut app, |app| app.counter() == 6).await;
        settle(&mut app, |app| app.lock_level() == LockLevel::None).await;

        // Two admitted acquires, but only the replacement's commit lands,
        // so exactly one release follows them.
        let releases = app
            .events()
            .iter()
            .filter(|entry| matches!(entry.event, GuardEvent::Released { .. }))
            .count();
        assert_eq!(releases, 2, "initial commit plus the surviving boost");

        let acquires = app
            .events()
            .iter()
            .filter(|entry| matches!(entry.event, GuardEvent::CancellableAcquired { .. }))
            .count();
        assert_eq!(acquires, 2);
    }

    #[tokio::test]
    async fn reset_bypasses_the_lock_entirely() {
        let mut app = App::new(&fast_config());

        app.dispatch(CounterAction::Tap);
        assert_eq!(app.lock_level(), LockLevel::Exclusive);

        app.dispatch(CounterAction::Reset);
        assert_eq!(app.counter(), 0);
        assert_eq!(
            app.lock_level(),
            LockLevel::Exclusive,
            "a no-intent action leaves the lock untouched"
        );

        settle(&mut app, |app| app.lock_level() == LockLevel::None).await;
        assert_eq!(app.counter(), 1, "the tap's commit still lands");
    }
}
