//! Drives a session from its time source
//!
//! The presentation layer calls [`GameLoop::tap`] on input and
//! [`GameLoop::pump`] from its frame callback. Each processed tick produces a
//! snapshot for the observer; the end of the run is reported exactly once and
//! stops the cadence.

use crate::clock::{FixedStep, TimeSource};
use crate::sim::{GameEvent, Session, SessionPhase, Snapshot, TickOutcome};

/// Receives per-tick output from a [`GameLoop`]
pub trait SessionObserver {
    /// Called after every processed tick
    fn on_frame(&mut self, _snapshot: &Snapshot) {}

    /// Called for each event raised, in order
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called once per session with the final score
    fn on_game_over(&mut self, _final_score: u32, _frames: u64) {}
}

impl SessionObserver for () {}

/// Status after a pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// Not started yet
    Idle,
    /// Running; `ticks` were processed by this pump
    Running { ticks: u32 },
    /// Finished with this score
    Over { final_score: u32 },
}

/// A session plus the clock that paces it
#[derive(Debug)]
pub struct GameLoop<T: TimeSource> {
    session: Session<T>,
    step: FixedStep,
    final_score: Option<u32>,
}

impl<T: TimeSource> GameLoop<T> {
    pub fn new(session: Session<T>) -> Self {
        let step = FixedStep::new(session.settings().tick_interval_ms);
        Self {
            session,
            step,
            final_score: None,
        }
    }

    /// Start the run and the tick cadence
    pub fn start(&mut self) -> bool {
        if !self.session.start() {
            return false;
        }
        self.step.start(self.session.time().now_ms());
        true
    }

    /// Forward a tap; applied on the next tick
    pub fn tap(&mut self) {
        self.session.jump();
    }

    /// Run every tick that is due and report the results
    pub fn pump(&mut self, observer: &mut impl SessionObserver) -> LoopStatus {
        if let Some(final_score) = self.final_score {
            return LoopStatus::Over { final_score };
        }
        if self.session.phase() == SessionPhase::Idle {
            return LoopStatus::Idle;
        }
        // Ended behind our back through `session_mut`
        if !self.session.is_running() {
            self.flush_events(observer);
            return self.report_over(self.session.score(), observer);
        }

        // Shield expiry is real-time, check it even when no tick is due
        self.session.poll_timers();

        let due = self.step.due_ticks(self.session.time().now_ms());
        let mut ticks = 0;
        for _ in 0..due {
            let outcome = self.session.tick();
            ticks += 1;
            observer.on_frame(&self.session.snapshot());
            self.flush_events(observer);

            if let TickOutcome::GameOver { final_score, .. } = outcome {
                return self.report_over(final_score, observer);
            }
            if outcome == TickOutcome::Inactive {
                break;
            }
        }
        self.flush_events(observer);

        LoopStatus::Running { ticks }
    }

    /// Forced stop (app backgrounded, quit)
    pub fn end(&mut self, observer: &mut impl SessionObserver) -> LoopStatus {
        if let Some(final_score) = self.session.end() {
            self.flush_events(observer);
            return self.report_over(final_score, observer);
        }
        match self.final_score {
            Some(final_score) => LoopStatus::Over { final_score },
            None => LoopStatus::Idle,
        }
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<T> {
        &mut self.session
    }

    pub fn is_ticking(&self) -> bool {
        self.step.is_running()
    }

    /// Milliseconds until the next tick is due
    pub fn until_next_ms(&self) -> u64 {
        self.step.until_next_ms()
    }

    fn flush_events(&mut self, observer: &mut impl SessionObserver) {
        for event in self.session.drain_events() {
            observer.on_event(&event);
        }
    }

    fn report_over(&mut self, final_score: u32, observer: &mut impl SessionObserver) -> LoopStatus {
        self.step.stop();
        self.final_score = Some(final_score);
        observer.on_game_over(final_score, self.session.frame());
        LoopStatus::Over { final_score }
    }
}
