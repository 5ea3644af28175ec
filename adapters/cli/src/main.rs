#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Pick Up Sticks session.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use pick_up_sticks_core::{CellCoord, Command, Direction, Event, ItemKind, ObstacleKind, Occupant};
use pick_up_sticks_system_spawning::{Config as SpawningConfig, Spawning};
use pick_up_sticks_world::{self as world, query, World, WorldConfig, DEFAULT_CACHE_CAPACITY};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WALKER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Command-line arguments accepted by the Pick Up Sticks driver.
#[derive(Debug, Parser)]
#[command(name = "pick-up-sticks", version, about = "Headless Pick Up Sticks session")]
struct CliArgs {
    /// Edge length of the square grid, border included.
    #[arg(long, default_value_t = 10)]
    grid_size: u32,
    /// Rocks scattered before the first frame.
    #[arg(long, default_value_t = 5)]
    obstacles: usize,
    /// Accessibility verdicts kept in the cache.
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,
    /// Seed shared by the layout, the spawning system and the walker.
    #[arg(long, default_value_t = 0x42f0_e1eb_d4a5_3c21)]
    seed: u64,
    /// Number of simulated frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Simulated duration of a single frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Milliseconds between rock spawn attempts.
    #[arg(long, default_value_t = 2_000)]
    spawn_interval_ms: u64,
}

/// Entry point for the Pick Up Sticks command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = CliArgs::parse();
    let config = WorldConfig::default()
        .with_grid_size(args.grid_size)
        .with_initial_obstacles(args.obstacles)
        .with_cache_capacity(args.cache_capacity)
        .with_seed(args.seed);
    let mut world = World::with_config(config).context("failed to build the world")?;
    println!("{}", query::welcome_banner(&world));

    let mut spawning = Spawning::new(SpawningConfig::new(
        Duration::from_millis(args.spawn_interval_ms),
        args.seed,
    ));
    let mut walker = Walker::new(args.seed ^ WALKER_SEED_SALT);
    let dt = Duration::from_millis(args.frame_ms);

    for _ in 0..args.frames {
        let mut events = Vec::new();
        world::apply(&mut world, Command::Tick { dt }, &mut events);
        for command in walker.next_commands(&world) {
            world::apply(&mut world, command, &mut events);
        }

        let open = query::open_interior_cells(&world);
        let mut commands = Vec::new();
        spawning.handle(&events, &open, &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        log_notable(&events);
    }

    println!("{}", render(&world));
    let stats = query::stats(&world);
    println!(
        "moves: {}  sticks collected: {}  held: {}  rocks spawned: {}  rocks cleared: {}",
        stats.moves,
        stats.items_collected,
        stats.inventory,
        stats.obstacles_spawned,
        stats.obstacles_cleared,
    );
    let counters = query::cache_counters(&world);
    println!(
        "accessibility cache: {} entries, {} hits, {} misses",
        query::cache_len(&world),
        counters.hits,
        counters.misses,
    );

    let blocking = query::obstacle_blocking_set(&world);
    ensure!(
        query::is_fully_accessible(&world, &blocking, None),
        "open interior is no longer a single connected region"
    );
    Ok(())
}

/// Random player stand-in that walks, picks up sticks and clears rocks.
#[derive(Debug)]
struct Walker {
    rng: ChaCha8Rng,
}

impl Walker {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn next_commands(&mut self, world: &World) -> Vec<Command> {
        let player = query::player(world);
        match player
            .facing_cell()
            .and_then(|cell| query::occupant_at(world, cell))
        {
            Some(Occupant::Item(_)) => return vec![Command::CollectItem],
            Some(Occupant::Obstacle(ObstacleKind::Rock)) if query::stats(world).inventory > 0 => {
                return vec![Command::ClearObstacle];
            }
            _ => {}
        }

        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        vec![Command::MovePlayer { direction }]
    }
}

fn log_notable(events: &[Event]) {
    for event in events {
        match event {
            Event::ObstacleSpawned { cell, .. } => {
                info!("rock appeared at ({}, {})", cell.column(), cell.row());
            }
            Event::ItemCollected { cell, .. } => {
                info!("stick collected at ({}, {})", cell.column(), cell.row());
            }
            Event::ObstacleCleared { cell } => {
                info!("rock cleared at ({}, {})", cell.column(), cell.row());
            }
            _ => {}
        }
    }
}

fn render(world: &World) -> String {
    let size = query::grid_size(world);
    let player = query::player(world).cell;
    let mut out = String::new();
    for row in 0..size {
        for column in 0..size {
            let cell = CellCoord::new(column, row);
            let glyph = if cell == player {
                '@'
            } else {
                match query::occupant_at(world, cell) {
                    Some(Occupant::Obstacle(ObstacleKind::Border)) => '#',
                    Some(Occupant::Obstacle(ObstacleKind::Rock)) => 'o',
                    Some(Occupant::Item(ItemKind::Stick)) => '/',
                    None => '.',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
