use common::{Event, TickScheduler, TimerId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

/// Playback timer backed by tokio tasks. Each armed timer is one task that
/// pushes `Event::Tick(id)` into the event queue; disarming aborts the task.
///
/// Must be armed from inside a tokio runtime.
pub struct TokioScheduler {
    events: UnboundedSender<Event>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(events: UnboundedSender<Event>) -> Self {
        Self {
            events,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }
}

impl TickScheduler for TokioScheduler {
    fn arm(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if events.send(Event::Tick(id)).is_err() {
                    break;
                }
            }
        });

        trace!(?id, ?period, "timer armed");
        self.tasks.insert(id, task);
        id
    }

    fn disarm(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            trace!(?id, "timer disarmed");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
