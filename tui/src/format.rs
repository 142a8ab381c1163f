//! Pure text formatting for the event log pane.

use turnstile_engine::{EventLogEntry, GuardEvent};

/// One log line per guard decision, oldest-first in the pane.
#[must_use]
pub fn event_line(entry: &EventLogEntry) -> String {
    let EventLogEntry { tick, event } = entry;
    match event {
        GuardEvent::ExclusiveAcquired { prior } | GuardEvent::CancellableAcquired { prior } => {
            format!("t{tick:>5}  {event} (was {prior})")
        }
        GuardEvent::Released { prior } => format!("t{tick:>5}  {event} (held {prior})"),
        GuardEvent::Denied { requested, .. } => {
            format!("t{tick:>5}  {event} ({requested} dropped)")
        }
    }
}

#[cfg(test)]
mod tests {
    use turnstile_engine::{LockIntent, LockLevel};

    use super::*;

    #[test]
    fn lines_carry_tick_and_context() {
        let entry = EventLogEntry {
            tick: 12,
            event: GuardEvent::ExclusiveAcquired {
                prior: LockLevel::Cancellable,
            },
        };
        assert_eq!(
            event_line(&entry),
            "t   12  exclusive lock acquired (was cancellable)"
        );

        let denial = EventLogEntry {
            tick: 13,
            event: GuardEvent::Denied {
                held: LockLevel::Exclusive,
                requested: LockIntent::AcquireCancellable,
            },
        };
        assert_eq!(
            event_line(&denial),
            "t   13  admission denied: already exclusively locked (acquire_cancellable dropped)"
        );
    }
}
