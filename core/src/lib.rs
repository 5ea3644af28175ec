#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pick Up Sticks engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{collections::BTreeSet, time::Duration};

use serde::{Deserialize, Serialize};

mod errors;

pub use errors::{NoValidSpawnError, OccupancyError, OccupiedCellError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Pick Up Sticks.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Turns the player toward `direction` and attempts a single step.
    MovePlayer {
        /// Direction the player faces and attempts to move in.
        direction: Direction,
    },
    /// Picks up the item located in the cell the player faces.
    CollectItem,
    /// Spends one collected item to remove the rock in the cell the player faces.
    ClearObstacle,
    /// Attempts to spawn a rock on the first acceptable candidate cell.
    SpawnObstacle {
        /// Candidate cells in the order they should be tried.
        candidates: Vec<CellCoord>,
    },
    /// Attempts to spawn a stick on the first acceptable candidate cell.
    SpawnItem {
        /// Candidate cells in the order they should be tried.
        candidates: Vec<CellCoord>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that the player turned but could not step forward.
    PlayerMoveRejected {
        /// Direction the player now faces.
        direction: Direction,
        /// Specific reason the step failed.
        reason: MoveRejection,
    },
    /// Confirms that an item was picked up by the player.
    ItemCollected {
        /// Cell the item occupied.
        cell: CellCoord,
        /// Kind of item that was collected.
        kind: ItemKind,
    },
    /// Reports that a collection attempt found nothing to pick up.
    CollectRejected {
        /// Specific reason the collection failed.
        reason: CollectRejection,
    },
    /// Announces that the board holds no item and a spawn should be proposed.
    ItemNeeded,
    /// Confirms that an item was placed onto the board.
    ItemSpawned {
        /// Cell that received the item.
        cell: CellCoord,
        /// Kind of item that was placed.
        kind: ItemKind,
    },
    /// Reports that no candidate could host a new item.
    ItemSpawnRejected {
        /// Specific reason the spawn failed.
        reason: SpawnRejection,
    },
    /// Confirms that a rock was placed after passing the accessibility check.
    ObstacleSpawned {
        /// Cell that received the rock.
        cell: CellCoord,
        /// Kind of obstacle that was placed.
        kind: ObstacleKind,
    },
    /// Reports that no candidate could host a new rock.
    ObstacleSpawnRejected {
        /// Specific reason the spawn failed.
        reason: SpawnRejection,
    },
    /// Confirms that a rock was removed by spending a collected item.
    ObstacleCleared {
        /// Cell the rock occupied.
        cell: CellCoord,
    },
    /// Reports that a clearing attempt was refused.
    ObstacleClearRejected {
        /// Cell the player faced when the attempt was made.
        cell: CellCoord,
        /// Specific reason the clearing failed.
        reason: ClearRejection,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// The column is the `x` component and the row the `y` component. Ordering is
/// lexicographic on `(column, row)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the adjacent cell in `direction`, or `None` when it would
    /// underflow or overflow the coordinate space.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// Kinds of obstacles that can occupy a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Permanent wall segment on the grid perimeter.
    Border,
    /// Interior rock that may be spawned and later cleared.
    Rock,
}

/// Kinds of collectible items that can occupy a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Stick that can be collected and spent to clear rocks.
    Stick,
}

impl ItemKind {
    /// Reports whether an item of this kind prevents the player from entering its cell.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        match self {
            Self::Stick => true,
        }
    }
}

/// Entity stored in a single occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// Obstacle that blocks both movement and reachability.
    Obstacle(ObstacleKind),
    /// Item that never participates in reachability analysis.
    Item(ItemKind),
}

impl Occupant {
    /// Reports whether the occupant prevents the player from entering the cell.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        match self {
            Self::Obstacle(_) => true,
            Self::Item(kind) => kind.blocks_movement(),
        }
    }

    /// Reports whether the occupant closes the cell for accessibility analysis.
    #[must_use]
    pub const fn blocks_reachability(self) -> bool {
        matches!(self, Self::Obstacle(_))
    }
}

/// Set of cells that obstruct reachability.
///
/// Membership is structural: two sets with the same cells compare and hash
/// equal regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockingSet {
    cells: BTreeSet<CellCoord>,
}

impl BlockingSet {
    /// Creates an empty blocking set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell, returning `true` when it was not already present.
    pub fn insert(&mut self, cell: CellCoord) -> bool {
        self.cells.insert(cell)
    }

    /// Removes a cell, returning `true` when it was present.
    pub fn remove(&mut self, cell: CellCoord) -> bool {
        self.cells.remove(&cell)
    }

    /// Reports whether the cell is blocking.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of blocking cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the set holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates the blocking cells in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<CellCoord> for BlockingSet {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Reasons a player step may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination lies on or beyond the border.
    OutOfBounds,
    /// The destination holds a movement-blocking occupant.
    Blocked,
}

/// Reasons a collection attempt may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectRejection {
    /// The faced cell does not hold an item.
    NothingToCollect,
}

/// Reasons a rock clearing attempt may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearRejection {
    /// The faced cell does not hold a rock.
    NoObstacle,
    /// The faced cell is part of the permanent border.
    Border,
    /// The player has not collected any item to spend.
    InsufficientItems,
}

/// Reasons a spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnRejection {
    /// Every candidate was occupied, outside the interior, or would break accessibility.
    NoValidSpawn,
}

/// Plain gameplay counters maintained by the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of successful player steps.
    pub moves: u32,
    /// Total number of items ever collected.
    pub items_collected: u32,
    /// Items currently held and available to spend.
    pub inventory: u32,
    /// Rocks placed on the board, including the initial layout.
    pub obstacles_spawned: u32,
    /// Rocks removed by spending items.
    pub obstacles_cleared: u32,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Cell currently occupied by the player.
    pub cell: CellCoord,
    /// Direction the player faces.
    pub facing: Direction,
}

impl PlayerSnapshot {
    /// Cell directly in front of the player, if representable.
    #[must_use]
    pub fn facing_cell(&self) -> Option<CellCoord> {
        self.cell.step(self.facing)
    }
}
