#![allow(dead_code)]

use anyhow::Result;
use common::{
    Frame, FrameSink, FrameSource, ItemId, ItemMetadata, LoadError, Loader, PlaybackEngine,
    PlaybackPolicy, Report, Reporter, SaveOutcome, TickScheduler, TimerId,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    armed: BTreeMap<TimerId, (Duration, Duration)>,
    disarmed: Vec<TimerId>,
}

/// Scheduler driven by hand: time only moves when the test calls `advance`.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl ManualScheduler {
    /// Let `elapsed` pass and return every tick that fired, in order.
    pub fn advance(&self, elapsed: Duration) -> Vec<TimerId> {
        let mut state = self.state.borrow_mut();
        let mut ticks = Vec::new();
        for (id, (period, carried)) in state.armed.iter_mut() {
            let mut total = *carried + elapsed;
            while total >= *period {
                ticks.push(*id);
                total -= *period;
            }
            *carried = total;
        }
        ticks
    }

    pub fn armed(&self) -> Vec<TimerId> {
        self.state.borrow().armed.keys().copied().collect()
    }

    pub fn period_of(&self, id: TimerId) -> Option<Duration> {
        self.state.borrow().armed.get(&id).map(|(period, _)| *period)
    }

    pub fn disarmed(&self) -> Vec<TimerId> {
        self.state.borrow().disarmed.clone()
    }
}

impl TickScheduler for ManualScheduler {
    fn arm(&mut self, period: Duration) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        state.armed.insert(id, (period, Duration::ZERO));
        id
    }

    fn disarm(&mut self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        state.armed.remove(&id);
        state.disarmed.push(id);
    }
}

pub fn solid_frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|i| Frame::from_pixel(4, 2, image::Rgb([i as u8, 0, 0])))
        .collect()
}

pub fn source(id: u64, count: usize) -> FrameSource {
    FrameSource::new(ItemId(id), solid_frames(count), ItemMetadata::default())
}

pub fn engine(policy: PlaybackPolicy) -> (PlaybackEngine, ManualScheduler, UnboundedReceiver<Report>) {
    let scheduler = ManualScheduler::default();
    let (reporter, reports) = Reporter::channel();
    let engine = PlaybackEngine::new(Box::new(scheduler.clone()), policy, reporter);
    (engine, scheduler, reports)
}

pub fn drain(reports: &mut UnboundedReceiver<Report>) -> Vec<Report> {
    let mut out = Vec::new();
    while let Ok(report) = reports.try_recv() {
        out.push(report);
    }
    out
}

pub fn statuses(reports: &mut UnboundedReceiver<Report>) -> Vec<String> {
    drain(reports)
        .into_iter()
        .filter_map(|r| match r {
            Report::Status(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Loader backed by a map of item id to frame count. Records every lookup.
#[derive(Clone, Default)]
pub struct FakeLoader {
    pub items: HashMap<u64, usize>,
    pub lookups: Rc<RefCell<Vec<ItemId>>>,
}

impl FakeLoader {
    pub fn with_item(mut self, id: u64, frames: usize) -> Self {
        self.items.insert(id, frames);
        self
    }
}

impl Loader for FakeLoader {
    fn lookup(&self, id: ItemId) -> Result<FrameSource, LoadError> {
        self.lookups.borrow_mut().push(id);
        match self.items.get(&id.0) {
            Some(&count) => Ok(source(id.0, count)),
            None => Err(LoadError::NotFound(id)),
        }
    }
}

/// Sink that remembers what it stored and refuses to store twice.
#[derive(Clone, Default)]
pub struct MemorySink {
    pub saved: Rc<RefCell<Vec<(ItemId, usize)>>>,
}

impl FrameSink for MemorySink {
    fn save_frame(&self, item: ItemId, index: usize, _frame: &Frame) -> Result<SaveOutcome> {
        let path = PathBuf::from(format!("{}/{}.jpg", item, index));
        let mut saved = self.saved.borrow_mut();
        if saved.contains(&(item, index)) {
            return Ok(SaveOutcome::Skipped(path));
        }
        saved.push((item, index));
        Ok(SaveOutcome::Saved(path))
    }
}
