#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for proposing rock and stick placements.
//!
//! The system never decides where an entity lands. It accumulates simulated
//! time, and for each elapsed interval proposes every open interior cell in a
//! seeded random order; the world commits the first candidate that passes its
//! checks.

use std::time::Duration;

use pick_up_sticks_core::{CellCoord, Command, Event};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Spawn cadence and RNG seed for a [`Spawning`] system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Rocks are proposed once per `spawn_interval` of simulated time; a zero
    /// interval disables rock proposals. `rng_seed` fixes the candidate order.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    elapsed: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            elapsed: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the current open cells to emit spawn commands.
    ///
    /// `open_cells` should exclude occupied cells and the player's cell. Rock
    /// spawns are emitted once per elapsed interval; at most one stick spawn
    /// is emitted per call, and only when the world reported
    /// [`Event::ItemNeeded`]. Intervals that elapse while no cell is open are
    /// consumed without proposing anything, so the cadence keeps its phase.
    pub fn handle(&mut self, events: &[Event], open_cells: &[CellCoord], out: &mut Vec<Command>) {
        let mut item_needed = false;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => self.elapsed = self.elapsed.saturating_add(*dt),
                Event::ItemNeeded => item_needed = true,
                _ => {}
            }
        }
        let due = self.take_due_intervals();

        if open_cells.is_empty() {
            return;
        }

        if item_needed {
            let candidates = self.shuffled(open_cells);
            out.push(Command::SpawnItem { candidates });
        }
        for _ in 0..due {
            let candidates = self.shuffled(open_cells);
            out.push(Command::SpawnObstacle { candidates });
        }
    }

    /// Number of whole intervals in the elapsed time, keeping the remainder.
    fn take_due_intervals(&mut self) -> u128 {
        let interval = self.spawn_interval.as_nanos();
        if interval == 0 {
            self.elapsed = Duration::ZERO;
            return 0;
        }

        let elapsed = self.elapsed.as_nanos();
        let remainder = elapsed % interval;
        self.elapsed = Duration::new(
            u64::try_from(remainder / NANOS_PER_SEC).unwrap_or(u64::MAX),
            u32::try_from(remainder % NANOS_PER_SEC).unwrap_or(0),
        );
        elapsed / interval
    }

    fn shuffled(&mut self, open_cells: &[CellCoord]) -> Vec<CellCoord> {
        let mut candidates = open_cells.to_vec();
        candidates.shuffle(&mut self.rng);
        candidates
    }
}
