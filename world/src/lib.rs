#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Pick Up Sticks.
//!
//! The world owns the occupancy index and the cached accessibility verifier.
//! Every rock placement, including the initial layout, is committed only after
//! the verifier proves that the open interior stays a single connected region,
//! so no open cell can ever become unreachable.

pub mod cache;
pub mod geometry;
pub mod occupancy;
pub mod reachability;
pub mod verifier;

use log::{debug, error, info};
use pick_up_sticks_core::{
    BlockingSet, CellCoord, ClearRejection, CollectRejection, Command, Direction, Event, ItemKind,
    MoveRejection, NoValidSpawnError, ObstacleKind, Occupant, PlayerSnapshot, SpawnRejection, Stats,
    WELCOME_BANNER,
};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use cache::{AccessibilityCache, DEFAULT_CACHE_CAPACITY};
pub use geometry::GridGeometry;
pub use occupancy::OccupancyIndex;
pub use reachability::{FloodSummary, ReachabilityEngine};
pub use verifier::{AccessibilityVerifier, CacheCounters};

const DEFAULT_GRID_SIZE: u32 = 10;
const DEFAULT_INITIAL_OBSTACLES: usize = 5;
const DEFAULT_LAYOUT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;
const MIN_GRID_SIZE: u32 = 3;

/// Largest accepted grid edge length, border included.
///
/// Geometry tables and the occupancy index are dense, so memory grows with
/// the square of the edge length.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Tunable parameters applied when constructing a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    grid_size: u32,
    initial_obstacles: usize,
    cache_capacity: usize,
    seed: u64,
}

impl WorldConfig {
    /// Overrides the edge length of the square grid, border included.
    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Overrides the number of rocks scattered during initialisation.
    #[must_use]
    pub const fn with_initial_obstacles(mut self, initial_obstacles: usize) -> Self {
        self.initial_obstacles = initial_obstacles;
        self
    }

    /// Overrides how many accessibility verdicts are memoised.
    #[must_use]
    pub const fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Overrides the seed driving the initial layout.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Edge length of the square grid, border included.
    #[must_use]
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Number of rocks requested for the initial layout.
    #[must_use]
    pub const fn initial_obstacles(&self) -> usize {
        self.initial_obstacles
    }

    /// Number of accessibility verdicts memoised.
    #[must_use]
    pub const fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Seed driving the initial layout.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_obstacles: DEFAULT_INITIAL_OBSTACLES,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            seed: DEFAULT_LAYOUT_SEED,
        }
    }
}

/// Failures raised while constructing the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The configured grid has no interior cell.
    #[error("grid size {size} leaves no interior; at least 3 is required")]
    GridTooSmall {
        /// Rejected edge length.
        size: u32,
    },
    /// The configured grid exceeds [`MAX_GRID_SIZE`].
    #[error("grid size {size} exceeds the maximum of {MAX_GRID_SIZE}")]
    GridTooLarge {
        /// Rejected edge length.
        size: u32,
    },
}

/// Represents the authoritative Pick Up Sticks world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    verifier: AccessibilityVerifier,
    occupancy: OccupancyIndex,
    player: PlayerSnapshot,
    stats: Stats,
}

impl World {
    /// Creates a world using [`WorldConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::build(WorldConfig::default())
    }

    /// Creates a world using the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::GridTooSmall`] when the grid has no interior and
    /// [`WorldError::GridTooLarge`] when it exceeds [`MAX_GRID_SIZE`].
    pub fn with_config(config: WorldConfig) -> Result<Self, WorldError> {
        let size = config.grid_size;
        if size < MIN_GRID_SIZE {
            return Err(WorldError::GridTooSmall { size });
        }
        if size > MAX_GRID_SIZE {
            return Err(WorldError::GridTooLarge { size });
        }
        Ok(Self::build(config))
    }

    fn build(config: WorldConfig) -> Self {
        let size = config.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let geometry = GridGeometry::new(size);
        let mut occupancy = OccupancyIndex::new(size, size);
        for cell in geometry.border_cells() {
            if let Err(error) = occupancy.place(cell, Occupant::Obstacle(ObstacleKind::Border)) {
                error!("border construction hit an occupied cell: {error}");
                debug_assert!(occupancy.is_open(cell), "{error}");
            }
        }

        let center = size / 2;
        let mut world = Self {
            banner: WELCOME_BANNER,
            verifier: AccessibilityVerifier::new(geometry, config.cache_capacity),
            occupancy,
            player: PlayerSnapshot {
                cell: CellCoord::new(center, center),
                facing: Direction::North,
            },
            stats: Stats::default(),
        };
        world.scatter_initial_layout(config.initial_obstacles, config.seed);
        world
    }

    fn scatter_initial_layout(&mut self, obstacle_count: usize, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut candidates = open_interior(self);
        candidates.shuffle(&mut rng);

        let mut placed = 0;
        for cell in candidates {
            if placed == obstacle_count {
                break;
            }
            if self.place_obstacle_from([cell]).is_ok() {
                placed += 1;
            }
        }
        if placed < obstacle_count {
            info!("initial layout holds {placed} of {obstacle_count} requested rocks");
        }

        let mut item_candidates = open_interior(self);
        item_candidates.shuffle(&mut rng);
        if let Err(error) = self.place_item_from(item_candidates) {
            info!("initial layout has no room for an item: {error}");
        }
    }

    /// Commits a rock to the first candidate that keeps the interior fully accessible.
    ///
    /// A candidate is accepted when it is an interior cell, has no occupant,
    /// is not the player's cell, and adding it to the current obstacle
    /// blocking set leaves every open cell mutually reachable. The check and
    /// the commit happen under the same exclusive borrow, so no other
    /// placement can interleave with a stale snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NoValidSpawnError`] when every candidate is rejected.
    pub fn place_obstacle_from<I>(
        &mut self,
        candidates: I,
    ) -> Result<CellCoord, NoValidSpawnError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let blocking = self.occupancy.current_obstacle_blocking_set();
        let mut examined = 0;
        for cell in candidates {
            examined += 1;
            if cell == self.player.cell || !self.occupancy.is_open(cell) {
                continue;
            }
            if !self.verifier.is_fully_accessible(&blocking, Some(cell)) {
                continue;
            }
            if let Err(error) = self.occupancy.place(cell, Occupant::Obstacle(ObstacleKind::Rock)) {
                error!("occupancy index refused a cell that checked open: {error}");
                debug_assert!(self.occupancy.is_open(cell), "{error}");
                break;
            }
            self.stats.obstacles_spawned = self.stats.obstacles_spawned.saturating_add(1);
            debug!("rock placed at ({}, {})", cell.column(), cell.row());
            return Ok(cell);
        }
        Err(NoValidSpawnError {
            candidates: examined,
        })
    }

    /// Places a stick on the first open interior candidate that is not the player's cell.
    ///
    /// Occupied candidates are skipped before placement is attempted.
    ///
    /// Items never take part in accessibility analysis, so no traversal runs.
    ///
    /// # Errors
    ///
    /// Returns [`NoValidSpawnError`] when every candidate is rejected.
    pub fn place_item_from<I>(&mut self, candidates: I) -> Result<CellCoord, NoValidSpawnError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut examined = 0;
        for cell in candidates {
            examined += 1;
            if cell == self.player.cell
                || !self.verifier.geometry().is_interior(cell)
                || !self.occupancy.is_open(cell)
            {
                continue;
            }
            if let Err(error) = self.occupancy.place(cell, Occupant::Item(ItemKind::Stick)) {
                error!("occupancy index refused a cell that checked open: {error}");
                debug_assert!(self.occupancy.is_open(cell), "{error}");
                break;
            }
            debug!("stick placed at ({}, {})", cell.column(), cell.row());
            return Ok(cell);
        }
        Err(NoValidSpawnError {
            candidates: examined,
        })
    }

    /// Cached accessibility check against the world's geometry.
    pub fn is_fully_accessible(
        &mut self,
        blocking: &BlockingSet,
        candidate: Option<CellCoord>,
    ) -> bool {
        self.verifier.is_fully_accessible(blocking, candidate)
    }

    fn has_item(&self) -> bool {
        self.occupancy
            .iter()
            .any(|(_, occupant)| matches!(occupant, Occupant::Item(_)))
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        self.player.facing = direction;
        let from = self.player.cell;
        let target = from
            .step(direction)
            .filter(|cell| self.verifier.geometry().is_interior(*cell));

        let Some(to) = target else {
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::OutOfBounds,
            });
            return;
        };

        if self.occupancy.is_blocking_for_movement(to) {
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::Blocked,
            });
            return;
        }

        self.player.cell = to;
        self.stats.moves = self.stats.moves.saturating_add(1);
        out_events.push(Event::PlayerMoved { from, to });
    }

    fn collect_item(&mut self, out_events: &mut Vec<Event>) {
        let occupant = self
            .player
            .facing_cell()
            .and_then(|cell| self.occupancy.occupant_at(cell).map(|occupant| (cell, occupant)));

        let Some((cell, Occupant::Item(kind))) = occupant else {
            out_events.push(Event::CollectRejected {
                reason: CollectRejection::NothingToCollect,
            });
            return;
        };

        let _ = self.occupancy.remove(cell);
        self.stats.items_collected = self.stats.items_collected.saturating_add(1);
        self.stats.inventory = self.stats.inventory.saturating_add(1);
        out_events.push(Event::ItemCollected { cell, kind });
        if !self.has_item() {
            out_events.push(Event::ItemNeeded);
        }
    }

    fn clear_obstacle(&mut self, out_events: &mut Vec<Event>) {
        let Some(cell) = self.player.facing_cell() else {
            return;
        };

        let reason = match self.occupancy.occupant_at(cell) {
            Some(Occupant::Obstacle(ObstacleKind::Border)) => ClearRejection::Border,
            Some(Occupant::Obstacle(ObstacleKind::Rock)) if self.stats.inventory == 0 => {
                ClearRejection::InsufficientItems
            }
            Some(Occupant::Obstacle(ObstacleKind::Rock)) => {
                // The freed cell is adjacent to the player's open cell, so it
                // joins the existing single open region instead of forming a
                // new one. No accessibility re-check is required.
                let _ = self.occupancy.remove(cell);
                self.stats.inventory -= 1;
                self.stats.obstacles_cleared = self.stats.obstacles_cleared.saturating_add(1);
                debug!("rock cleared at ({}, {})", cell.column(), cell.row());
                debug_assert!(
                    reachability::is_fully_accessible(
                        self.verifier.geometry(),
                        &self.occupancy.current_obstacle_blocking_set(),
                        None,
                    ),
                    "clearing a rock must keep the open interior connected"
                );
                out_events.push(Event::ObstacleCleared { cell });
                return;
            }
            Some(Occupant::Item(_)) | None => ClearRejection::NoObstacle,
        };

        out_events.push(Event::ObstacleClearRejected { cell, reason });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            if !world.has_item() {
                out_events.push(Event::ItemNeeded);
            }
        }
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::CollectItem => world.collect_item(out_events),
        Command::ClearObstacle => world.clear_obstacle(out_events),
        Command::SpawnObstacle { candidates } => match world.place_obstacle_from(candidates) {
            Ok(cell) => out_events.push(Event::ObstacleSpawned {
                cell,
                kind: ObstacleKind::Rock,
            }),
            Err(error) => {
                info!("skipping rock spawn: {error}");
                out_events.push(Event::ObstacleSpawnRejected {
                    reason: SpawnRejection::NoValidSpawn,
                });
            }
        },
        Command::SpawnItem { candidates } => match world.place_item_from(candidates) {
            Ok(cell) => out_events.push(Event::ItemSpawned {
                cell,
                kind: ItemKind::Stick,
            }),
            Err(error) => {
                info!("skipping stick spawn: {error}");
                out_events.push(Event::ItemSpawnRejected {
                    reason: SpawnRejection::NoValidSpawn,
                });
            }
        },
    }
}

fn open_interior(world: &World) -> Vec<CellCoord> {
    world
        .verifier
        .geometry()
        .interior_cells()
        .iter()
        .copied()
        .filter(|cell| *cell != world.player.cell && world.occupancy.is_open(*cell))
        .collect()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pick_up_sticks_core::{BlockingSet, CellCoord, Occupant, PlayerSnapshot, Stats};

    use super::{CacheCounters, GridGeometry, OccupancyIndex, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the grid geometry.
    #[must_use]
    pub fn geometry(world: &World) -> &GridGeometry {
        world.verifier.geometry()
    }

    /// Edge length of the grid, border included.
    #[must_use]
    pub fn grid_size(world: &World) -> u32 {
        world.verifier.geometry().size()
    }

    /// Interior cells in ascending `(column, row)` order.
    #[must_use]
    pub fn interior_cells(world: &World) -> &[CellCoord] {
        world.verifier.geometry().interior_cells()
    }

    /// Interior cells with no occupant, excluding the player's cell.
    #[must_use]
    pub fn open_interior_cells(world: &World) -> Vec<CellCoord> {
        super::open_interior(world)
    }

    /// Interior cells orthogonally adjacent to `cell`.
    #[must_use]
    pub fn neighbors(world: &World, cell: CellCoord) -> &[CellCoord] {
        world.verifier.geometry().neighbors(cell)
    }

    /// Returns the occupant stored in `cell`, if any.
    #[must_use]
    pub fn occupant_at(world: &World, cell: CellCoord) -> Option<Occupant> {
        world.occupancy.occupant_at(cell)
    }

    /// Provides read-only access to the occupancy index.
    #[must_use]
    pub fn occupancy(world: &World) -> &OccupancyIndex {
        &world.occupancy
    }

    /// Cells currently occupied by obstacles.
    #[must_use]
    pub fn obstacle_blocking_set(world: &World) -> BlockingSet {
        world.occupancy.current_obstacle_blocking_set()
    }

    /// Uncached accessibility check that leaves the verifier cache untouched.
    #[must_use]
    pub fn is_fully_accessible(
        world: &World,
        blocking: &BlockingSet,
        candidate: Option<CellCoord>,
    ) -> bool {
        super::reachability::is_fully_accessible(world.verifier.geometry(), blocking, candidate)
    }

    /// Captures the player's position and facing.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player
    }

    /// Gameplay counters accumulated so far.
    #[must_use]
    pub fn stats(world: &World) -> Stats {
        world.stats
    }

    /// Number of accessibility verdicts currently memoised.
    #[must_use]
    pub fn cache_len(world: &World) -> usize {
        world.verifier.cache().len()
    }

    /// Hit and miss counters of the accessibility cache.
    #[must_use]
    pub fn cache_counters(world: &World) -> CacheCounters {
        world.verifier.counters()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn small_world(size: u32, obstacles: usize) -> World {
        World::with_config(
            WorldConfig::default()
                .with_grid_size(size)
                .with_initial_obstacles(obstacles),
        )
        .expect("valid configuration")
    }

    fn clear_interior(world: &mut World) {
        let cells: Vec<_> = query::interior_cells(world).to_vec();
        for cell in cells {
            let _ = world.occupancy.remove(cell);
        }
    }

    #[test]
    fn default_world_matches_configuration() {
        let world = World::new();
        let geometry = query::geometry(&world);

        assert_eq!(query::grid_size(&world), 10);
        assert!(geometry
            .border_cells()
            .all(|cell| query::occupant_at(&world, cell)
                == Some(Occupant::Obstacle(ObstacleKind::Border))));

        let rocks = query::obstacle_blocking_set(&world)
            .iter()
            .filter(|cell| geometry.is_interior(*cell))
            .count();
        assert_eq!(rocks, DEFAULT_INITIAL_OBSTACLES);
        assert_eq!(query::stats(&world).obstacles_spawned, 5);
        assert!(world.has_item());
    }

    #[test]
    fn player_starts_centered_facing_north() {
        let world = World::new();
        let player = query::player(&world);

        assert_eq!(player.cell, CellCoord::new(5, 5));
        assert_eq!(player.facing, Direction::North);
        assert_eq!(query::occupant_at(&world, player.cell), None);
    }

    #[test]
    fn grid_without_interior_is_rejected() {
        let error = World::with_config(WorldConfig::default().with_grid_size(2))
            .expect_err("two by two grid has no interior");
        assert_eq!(error, WorldError::GridTooSmall { size: 2 });
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocating() {
        let config = WorldConfig::default()
            .with_grid_size(200_000)
            .with_initial_obstacles(0);
        let error = World::with_config(config).expect_err("grid exceeds the maximum");
        assert_eq!(error, WorldError::GridTooLarge { size: 200_000 });

        let error = World::with_config(WorldConfig::default().with_grid_size(u32::MAX))
            .expect_err("grid exceeds the maximum");
        assert_eq!(error, WorldError::GridTooLarge { size: u32::MAX });

        let largest = WorldConfig::default()
            .with_grid_size(MAX_GRID_SIZE)
            .with_initial_obstacles(0);
        assert!(World::with_config(largest).is_ok());
    }

    #[test]
    fn initial_layout_is_deterministic_for_seed() {
        let first = small_world(12, 20);
        let second = small_world(12, 20);

        assert_eq!(
            query::occupancy(&first).iter().collect::<Vec<_>>(),
            query::occupancy(&second).iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn initial_layout_never_traps_open_cells() {
        for seed in 0..16 {
            let world = World::with_config(
                WorldConfig::default()
                    .with_grid_size(7)
                    .with_initial_obstacles(40)
                    .with_seed(seed),
            )
            .expect("valid configuration");
            let blocking = query::obstacle_blocking_set(&world);
            assert!(
                query::is_fully_accessible(&world, &blocking, None),
                "seed {seed} produced a disconnected layout"
            );
        }
    }

    #[test]
    fn obstacle_spawn_skips_player_occupied_and_sealing_cells() {
        let mut world = small_world(8, 0);
        clear_interior(&mut world);
        world.player.cell = CellCoord::new(1, 1);
        for column in 1..=5 {
            world
                .occupancy
                .place(
                    CellCoord::new(column, 3),
                    Occupant::Obstacle(ObstacleKind::Rock),
                )
                .expect("open cell");
        }

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnObstacle {
                candidates: vec![
                    CellCoord::new(1, 1),
                    CellCoord::new(0, 4),
                    CellCoord::new(2, 3),
                    CellCoord::new(6, 3),
                    CellCoord::new(4, 5),
                ],
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::ObstacleSpawned {
                cell: CellCoord::new(4, 5),
                kind: ObstacleKind::Rock,
            }]
        );
    }

    #[test]
    fn exhausted_candidates_report_no_valid_spawn() {
        let mut world = small_world(8, 0);
        let player_cell = world.player.cell;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SpawnObstacle {
                candidates: vec![CellCoord::new(0, 0), player_cell],
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::ObstacleSpawnRejected {
                reason: SpawnRejection::NoValidSpawn,
            }]
        );
    }

    #[test]
    fn item_spawn_skips_occupied_candidates() {
        let mut world = small_world(6, 0);
        clear_interior(&mut world);
        let rock = CellCoord::new(1, 1);
        let stick = CellCoord::new(2, 1);
        world
            .occupancy
            .place(rock, Occupant::Obstacle(ObstacleKind::Rock))
            .expect("open cell");
        world
            .occupancy
            .place(stick, Occupant::Item(ItemKind::Stick))
            .expect("open cell");

        let candidates = [rock, stick, CellCoord::new(0, 3), CellCoord::new(3, 1)];
        let placed = world.place_item_from(candidates);

        assert_eq!(placed, Ok(CellCoord::new(3, 1)));
        assert_eq!(
            query::occupant_at(&world, rock),
            Some(Occupant::Obstacle(ObstacleKind::Rock)),
            "occupied candidates keep their occupant"
        );
        assert_eq!(
            world.place_item_from([rock, stick]),
            Err(NoValidSpawnError { candidates: 2 })
        );
    }

    #[test]
    fn items_do_not_count_as_blocking_for_accessibility() {
        let mut world = small_world(4, 0);
        clear_interior(&mut world);
        world.player.cell = CellCoord::new(1, 1);
        world
            .occupancy
            .place(CellCoord::new(2, 1), Occupant::Item(ItemKind::Stick))
            .expect("open cell");

        let placed = world.place_obstacle_from([CellCoord::new(1, 2)]);
        assert_eq!(placed, Ok(CellCoord::new(1, 2)));
    }

    #[test]
    fn player_moves_turns_and_respects_blockers() {
        let mut world = small_world(6, 0);
        clear_interior(&mut world);
        world.player.cell = CellCoord::new(1, 1);
        world
            .occupancy
            .place(CellCoord::new(2, 1), Occupant::Item(ItemKind::Stick))
            .expect("open cell");

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::North,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::East,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::South,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::PlayerMoveRejected {
                    direction: Direction::North,
                    reason: MoveRejection::OutOfBounds,
                },
                Event::PlayerMoveRejected {
                    direction: Direction::East,
                    reason: MoveRejection::Blocked,
                },
                Event::PlayerMoved {
                    from: CellCoord::new(1, 1),
                    to: CellCoord::new(1, 2),
                },
            ]
        );
        assert_eq!(query::player(&world).facing, Direction::South);
        assert_eq!(query::stats(&world).moves, 1);
    }

    #[test]
    fn collecting_an_item_requests_a_replacement() {
        let mut world = small_world(6, 0);
        clear_interior(&mut world);
        world.player = PlayerSnapshot {
            cell: CellCoord::new(2, 2),
            facing: Direction::East,
        };
        world
            .occupancy
            .place(CellCoord::new(3, 2), Occupant::Item(ItemKind::Stick))
            .expect("open cell");

        let mut events = Vec::new();
        apply(&mut world, Command::CollectItem, &mut events);
        apply(&mut world, Command::CollectItem, &mut events);

        assert_eq!(
            events,
            vec![
                Event::ItemCollected {
                    cell: CellCoord::new(3, 2),
                    kind: ItemKind::Stick,
                },
                Event::ItemNeeded,
                Event::CollectRejected {
                    reason: CollectRejection::NothingToCollect,
                },
            ]
        );
        let stats = query::stats(&world);
        assert_eq!(stats.items_collected, 1);
        assert_eq!(stats.inventory, 1);
    }

    #[test]
    fn tick_requests_item_while_board_is_empty() {
        let mut world = small_world(6, 0);
        clear_interior(&mut world);
        let mut events = Vec::new();
        let dt = Duration::from_millis(16);

        apply(&mut world, Command::Tick { dt }, &mut events);
        assert_eq!(events, vec![Event::TimeAdvanced { dt }, Event::ItemNeeded]);

        events.clear();
        let player_cell = world.player.cell;
        apply(
            &mut world,
            Command::SpawnItem {
                candidates: vec![player_cell, CellCoord::new(1, 1)],
            },
            &mut events,
        );
        apply(&mut world, Command::Tick { dt }, &mut events);
        assert_eq!(
            events,
            vec![
                Event::ItemSpawned {
                    cell: CellCoord::new(1, 1),
                    kind: ItemKind::Stick,
                },
                Event::TimeAdvanced { dt },
            ]
        );
    }

    #[test]
    fn clearing_spends_an_item_and_reopens_the_cell() {
        let mut world = small_world(6, 0);
        clear_interior(&mut world);
        world.player = PlayerSnapshot {
            cell: CellCoord::new(1, 2),
            facing: Direction::North,
        };
        let rock = CellCoord::new(1, 1);
        world
            .occupancy
            .place(rock, Occupant::Obstacle(ObstacleKind::Rock))
            .expect("open cell");

        let mut events = Vec::new();
        apply(&mut world, Command::ClearObstacle, &mut events);
        world.stats.inventory = 1;
        apply(&mut world, Command::ClearObstacle, &mut events);
        apply(&mut world, Command::ClearObstacle, &mut events);

        assert_eq!(
            events,
            vec![
                Event::ObstacleClearRejected {
                    cell: rock,
                    reason: ClearRejection::InsufficientItems,
                },
                Event::ObstacleCleared { cell: rock },
                Event::ObstacleClearRejected {
                    cell: rock,
                    reason: ClearRejection::NoObstacle,
                },
            ]
        );
        assert_eq!(query::stats(&world).inventory, 0);
        assert_eq!(query::stats(&world).obstacles_cleared, 1);
    }

    #[test]
    fn border_cannot_be_cleared() {
        let mut world = small_world(6, 0);
        clear_interior(&mut world);
        world.player = PlayerSnapshot {
            cell: CellCoord::new(1, 1),
            facing: Direction::West,
        };
        world.stats.inventory = 3;

        let mut events = Vec::new();
        apply(&mut world, Command::ClearObstacle, &mut events);

        assert_eq!(
            events,
            vec![Event::ObstacleClearRejected {
                cell: CellCoord::new(0, 1),
                reason: ClearRejection::Border,
            }]
        );
        assert_eq!(query::stats(&world).inventory, 3);
    }

    #[test]
    fn repeated_spawn_checks_hit_the_cache() {
        let mut world = small_world(8, 0);
        clear_interior(&mut world);
        let blocking = query::obstacle_blocking_set(&world);
        let candidate = Some(CellCoord::new(3, 3));

        assert!(world.is_fully_accessible(&blocking, candidate));
        assert!(world.is_fully_accessible(&blocking, candidate));

        assert_eq!(query::cache_counters(&world).hits, 1);
        assert_eq!(query::cache_len(&world), 1);
    }
}
