use crate::frames::{Frame, FrameSource};
use crate::report::Reporter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Identity of one armed timer. Every tick carries the id of the timer that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Arms and disarms the recurring timer that drives playback.
pub trait TickScheduler {
    /// Start delivering `Tick(id)` events every `period` until disarmed.
    fn arm(&mut self, period: Duration) -> TimerId;

    /// Stop delivering ticks for `id`. Ticks that were already queued may
    /// still be delivered; the engine drops them by id.
    fn disarm(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameRate {
    #[default]
    Fps24,
    Fps12,
    Fps6,
}

impl FrameRate {
    pub fn fps(self) -> u32 {
        match self {
            FrameRate::Fps24 => 24,
            FrameRate::Fps12 => 12,
            FrameRate::Fps6 => 6,
        }
    }

    /// 24 -> 12 -> 6 -> 24
    pub fn next(self) -> Self {
        match self {
            FrameRate::Fps24 => FrameRate::Fps12,
            FrameRate::Fps12 => FrameRate::Fps6,
            FrameRate::Fps6 => FrameRate::Fps24,
        }
    }

    pub fn period(self) -> Duration {
        Duration::from_secs(1) / self.fps()
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps", self.fps())
    }
}

/// What playback does once it reaches the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EndOfStream {
    #[default]
    Stop,
    Loop,
}

/// What single steps do at either end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepBounds {
    #[default]
    Clamp,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackPolicy {
    pub end_of_stream: EndOfStream,
    pub step_bounds: StepBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unbound,
    Paused,
    Playing,
}

/// Frame-accurate transport over a bound [`FrameSource`].
///
/// The engine never sleeps or spawns anything itself. Playing arms a timer
/// through the [`TickScheduler`] and the owner feeds the resulting ticks back
/// into [`PlaybackEngine::on_tick`]. Only the tick of the currently armed
/// timer has any effect.
pub struct PlaybackEngine {
    source: Option<Arc<FrameSource>>,
    current: usize,
    playing: bool,
    rate: FrameRate,
    policy: PlaybackPolicy,
    timer: Option<TimerId>,
    scheduler: Box<dyn TickScheduler>,
    reporter: Reporter,
}

impl PlaybackEngine {
    pub fn new(scheduler: Box<dyn TickScheduler>, policy: PlaybackPolicy, reporter: Reporter) -> Self {
        Self {
            source: None,
            current: 0,
            playing: false,
            rate: FrameRate::default(),
            policy,
            timer: None,
            scheduler,
            reporter,
        }
    }

    /// Bind a new source. Any running timer is released first.
    pub fn load(&mut self, source: Arc<FrameSource>) {
        self.halt();
        self.current = 0;

        if source.is_empty() {
            log::warn!("refusing to bind item {} without frames", source.item_id());
            self.source = None;
        } else {
            log::info!("bound item {} ({} frames)", source.item_id(), source.len());
            self.source = Some(source);
        }
        self.report_play_info();
    }

    pub fn play_pause(&mut self) {
        if self.playing {
            self.halt();
            self.report_play_info();
            return;
        }

        let Some(last) = self.last_index() else {
            return;
        };

        if self.current >= last && self.policy.end_of_stream == EndOfStream::Stop {
            if last == 0 {
                log::debug!("single frame source, nothing to play");
                return;
            }
            self.current = 0;
        }

        self.playing = true;
        self.arm();
        self.report_play_info();
    }

    /// Stop the timer and pause. Valid in every state, idempotent.
    pub fn stop(&mut self) {
        self.halt();
        self.report_play_info();
    }

    /// Like [`stop`](Self::stop) but silent when already paused.
    pub fn pause(&mut self) {
        if self.playing {
            self.halt();
            self.report_play_info();
        }
    }

    pub fn next_frame(&mut self) {
        self.step(true);
    }

    pub fn last_frame(&mut self) {
        self.step(false);
    }

    /// Jump to `index`, clamped into the bound source.
    pub fn seek(&mut self, index: usize) {
        let Some(last) = self.last_index() else {
            return;
        };
        self.current = index.min(last);
        self.report_play_info();
    }

    pub fn rewind(&mut self) {
        self.seek(0);
    }

    pub fn switch_fps(&mut self) {
        self.rate = self.rate.next();
        if self.playing {
            self.disarm();
            self.arm();
        }
        self.report_play_info();
    }

    pub fn on_tick(&mut self, id: TimerId) {
        if !self.playing || self.timer != Some(id) {
            log::trace!("dropping stale tick {:?}", id);
            return;
        }
        let Some(last) = self.last_index() else {
            self.halt();
            return;
        };

        if self.current >= last {
            match self.policy.end_of_stream {
                EndOfStream::Loop => self.current = 0,
                EndOfStream::Stop => self.halt(),
            }
        } else {
            self.current += 1;
            if self.current == last && self.policy.end_of_stream == EndOfStream::Stop {
                self.halt();
            }
        }
        self.report_play_info();
    }

    pub fn set_policy(&mut self, policy: PlaybackPolicy) {
        self.policy = policy;
        self.report_play_info();
    }

    pub fn policy(&self) -> PlaybackPolicy {
        self.policy
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.source, self.playing) {
            (None, _) => PlaybackState::Unbound,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_index(&self) -> Option<usize> {
        self.source.as_ref().map(|_| self.current)
    }

    pub fn frame_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.len())
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    pub fn source(&self) -> Option<&FrameSource> {
        self.source.as_deref()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.source.as_ref()?.frame(self.current)
    }

    /// Id of the armed timer, if playing.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn play_info(&self) -> String {
        let state = match self.state() {
            PlaybackState::Unbound => "no item",
            PlaybackState::Paused => "⏸ paused",
            PlaybackState::Playing => "▶ playing",
        };
        let end = match self.policy.end_of_stream {
            EndOfStream::Stop => "stop",
            EndOfStream::Loop => "loop",
        };
        let steps = match self.policy.step_bounds {
            StepBounds::Clamp => "clamp",
            StepBounds::Wrap => "wrap",
        };

        let mut lines = Vec::new();
        match &self.source {
            Some(source) => {
                lines.push(format!("Item   {}", source.item_id()));
                lines.push(format!("Frame  {} / {}", self.current, source.len()));
            }
            None => {
                lines.push("Item   -".to_string());
                lines.push("Frame  -".to_string());
            }
        }
        lines.push(format!("Rate   {}", self.rate));
        lines.push(format!("State  {}", state));
        lines.push(format!("End    {}", end));
        lines.push(format!("Steps  {}", steps));
        lines.join("\n")
    }

    fn step(&mut self, forward: bool) {
        let Some(last) = self.last_index() else {
            return;
        };

        self.current = match (self.policy.step_bounds, forward) {
            (_, true) if self.current < last => self.current + 1,
            (_, false) if self.current > 0 => self.current - 1,
            (StepBounds::Clamp, _) => self.current,
            (StepBounds::Wrap, true) => 0,
            (StepBounds::Wrap, false) => last,
        };
        self.report_play_info();
    }

    fn last_index(&self) -> Option<usize> {
        self.source.as_ref().map(|s| s.len().saturating_sub(1))
    }

    fn arm(&mut self) {
        let id = self.scheduler.arm(self.rate.period());
        log::debug!("armed timer {:?} at {}", id, self.rate);
        self.timer = Some(id);
    }

    fn disarm(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.disarm(id);
            log::debug!("disarmed timer {:?}", id);
        }
    }

    fn halt(&mut self) {
        self.disarm();
        self.playing = false;
    }

    fn report_play_info(&self) {
        self.reporter.play_info(self.play_info());
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.disarm();
    }
}
