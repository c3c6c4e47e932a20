//! Single-owner driver around one engine.
//!
//! The driver owns the engine by value, so ticks and commands are serialized
//! through one `&mut` handle. After every mutation it re-reads the engine's
//! interval and reschedules on change; game over stops the scheduler.
//! Teardown is final: a torn-down driver ignores ticks, commands and restarts.

use std::time::{Duration, Instant};

use log::info;

use crate::core::{GameEngine, GameSnapshot, PieceSource};
use crate::scheduler::TickScheduler;
use crate::types::{Command, TickOutcome};

#[derive(Debug)]
pub struct GameDriver<S> {
    engine: GameEngine<S>,
    scheduler: TickScheduler,
    torn_down: bool,
}

impl<S: PieceSource> GameDriver<S> {
    pub fn new(engine: GameEngine<S>, now: Instant) -> Self {
        let mut scheduler = TickScheduler::new(engine.tick_interval_ms(), now);
        if engine.is_game_over() {
            scheduler.stop();
        }
        Self {
            engine,
            scheduler,
            torn_down: false,
        }
    }

    pub fn engine(&self) -> &GameEngine<S> {
        &self.engine
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Run the tick if one is due at `now`.
    pub fn pump(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.torn_down || !self.scheduler.poll(now) {
            return None;
        }
        let outcome = self.engine.tick();
        self.sync(now);
        Some(outcome)
    }

    /// Forward an input command. Returns whether engine state changed.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let changed = self.engine.apply(command);
        if changed {
            self.sync(now);
        }
        changed
    }

    /// New game, fresh cadence from `now`. No-op after teardown.
    pub fn restart(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.engine.restart();
        self.scheduler.reschedule(self.engine.tick_interval_ms(), now);
    }

    /// Stop ticking for good. Later `pump`, `dispatch` and `restart` calls
    /// do nothing.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.scheduler.stop();
        info!(
            "driver torn down (score {}, level {})",
            self.engine.score(),
            self.engine.level()
        );
    }

    /// How long the caller may wait before the next `pump`.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine.snapshot_into(out);
    }

    pub fn into_engine(self) -> GameEngine<S> {
        self.engine
    }

    fn sync(&mut self, now: Instant) {
        if self.torn_down || self.engine.is_game_over() {
            self.scheduler.stop();
            return;
        }
        let interval = self.engine.tick_interval_ms();
        if interval != self.scheduler.interval_ms() {
            self.scheduler.reschedule(interval, now);
        }
    }
}
