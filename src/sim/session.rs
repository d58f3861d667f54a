//! Game session lifecycle
//!
//! `Idle -> Running -> Ended`. A session never re-enters `Running`; a new
//! run gets a new session. Lifecycle misuse (ticking an idle session, tapping
//! after the end) is silently ignored.

use super::state::{EndCause, GameEvent, GameState, SessionPhase, Snapshot};
use super::tick::{TickInput, TickOutcome, tick};
use crate::clock::TimeSource;
use crate::error::ConfigError;
use crate::settings::Settings;

/// One run of the game, owning all of its state
#[derive(Debug)]
pub struct Session<T: TimeSource> {
    settings: Settings,
    state: GameState,
    time: T,
    /// Taps since the last tick collapse into a single impulse
    pending_jump: bool,
}

impl<T: TimeSource> Session<T> {
    /// Validate `settings` and build an idle session
    pub fn new(settings: Settings, seed: u64, time: T) -> Result<Self, ConfigError> {
        settings.validate()?;
        let state = GameState::new(&settings, seed);
        Ok(Self {
            settings,
            state,
            time,
            pending_jump: false,
        })
    }

    /// Reset the run and begin accepting ticks. Only valid from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state.phase != SessionPhase::Idle {
            log::debug!("start() ignored in phase {:?}", self.state.phase);
            return false;
        }
        self.state.reset_for_run(&self.settings);
        self.pending_jump = false;
        log::info!("Run started with seed {}", self.state.seed);
        true
    }

    /// Queue a jump impulse for the next tick
    pub fn jump(&mut self) {
        if self.state.is_running() {
            self.pending_jump = true;
        }
    }

    /// Advance one tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Inactive;
        }
        self.poll_timers();
        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
            now_ms: self.time.now_ms(),
        };
        tick(&mut self.state, &self.settings, &input)
    }

    /// Forced stop. Returns the final score if this call ended the run.
    pub fn end(&mut self) -> Option<u32> {
        self.pending_jump = false;
        self.state.finish(EndCause::Forced)
    }

    /// Expire the shield if its deadline has passed.
    ///
    /// This is the only place invincibility is cleared. Runs independently
    /// of the tick cadence and does nothing unless the session is running.
    pub fn poll_timers(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let now = self.time.now_ms();
        let player = &mut self.state.player;
        match player.shield_deadline_ms {
            Some(deadline) if player.invincible && now >= deadline => {
                player.invincible = false;
                player.shield_deadline_ms = None;
                self.state.events.push(GameEvent::ShieldExpired);
                log::debug!("Shield expired at {now} ms");
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn frame(&self) -> u64 {
        self.state.frame
    }

    pub fn is_invincible(&self) -> bool {
        self.state.player.invincible
    }

    pub fn scroll_speed(&self) -> f32 {
        self.state.difficulty.scroll_speed
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.state.end_cause
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios and tools
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
