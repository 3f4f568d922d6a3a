use clap::{Parser, Subcommand};
use pcb_common::db::core::Board;
use pcb_common::db::indices::TrackId;
use pcb_common::util::config::Config;
use pcb_common::util::{generator, logger};
use pcb_router::grid::cell::{CELL_IS_EDGE, CELL_IS_FRIEND, HOLE, VIA_IMPOSSIBLE};
use pcb_router::grid::{CellState, DenseGrid, RoutingGrid, Side};
use pcb_router::placement;
use pcb_router::track::{self, TrackError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    /// Overrides the generator seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the occupancy grid of a generated board and report its usage.
    Raster {
        /// Position in the board sequence of an item painted last as friend copper.
        #[arg(long)]
        isolate: Option<usize>,
    },
    /// Mark the chain through one item and report its ends and lengths.
    Mark {
        /// Position of the seed item in the board sequence.
        #[arg(long, default_value_t = 0)]
        item: usize,
        /// Leave the board sequence untouched.
        #[arg(long)]
        no_reorder: bool,
    },
    /// Trace every chain of the board.
    Survey {
        #[arg(long)]
        sequential: bool,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str::<Config>(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let mut board = generator::generate_board(&config.generator);

    let command = args.command.unwrap_or(Commands::Survey { sequential: false });
    match command {
        Commands::Raster { isolate } => {
            let isolate = isolate.map(|pos| seed_at(&board, pos)).transpose()?;
            run_raster(&board, &config, isolate)?;
        }
        Commands::Mark { item, no_reorder } => {
            let seed = seed_at(&board, item)?;
            let reorder = config.track.reorder && !no_reorder;
            run_mark(&mut board, seed, reorder)?;
        }
        Commands::Survey { sequential } => {
            let parallel = config.track.parallel_survey && !sequential;
            run_survey(&board, parallel);
        }
    }

    Ok(())
}

fn seed_at(board: &Board, pos: usize) -> anyhow::Result<TrackId> {
    board.order().get(pos).copied().ok_or_else(|| {
        anyhow::anyhow!(
            "Item {} out of range: the board has {} track items",
            pos,
            board.num_tracks()
        )
    })
}

fn run_raster(board: &Board, config: &Config, isolate: Option<TrackId>) -> anyhow::Result<()> {
    let mut grid = placement::grid_for_board(board, &config.grid)
        .map_err(|e| anyhow::anyhow!("Cannot build routing grid: {}", e))?;
    log::info!(
        "Routing grid: {}x{} cells at pitch {}",
        grid.rows(),
        grid.cols(),
        config.grid.pitch
    );

    if let Some(edge) = board.bounding_box() {
        placement::paint_board_edge(&mut grid, edge);
    }
    let writes = placement::populate(&mut grid, board, config.grid.clearance, isolate);
    log::info!("{} cell writes", writes);

    let total = grid.rows() as usize * grid.cols() as usize;
    for side in Side::ALL {
        report_side(&grid, side, total);
    }
    Ok(())
}

fn report_side(grid: &DenseGrid, side: Side, total: usize) {
    let flags: [(&str, CellState); 4] = [
        ("hole", HOLE),
        ("via impossible", VIA_IMPOSSIBLE),
        ("edge", CELL_IS_EDGE),
        ("friend", CELL_IS_FRIEND),
    ];
    let occupied = grid.occupied(side);
    log::info!(
        "{:?}: {} of {} cells occupied ({:.1}%)",
        side,
        occupied,
        total,
        100.0 * occupied as f64 / total.max(1) as f64
    );
    for (name, flag) in flags {
        log::info!("  {:<15} {}", name, grid.count_flagged(side, flag));
    }
}

fn run_mark(board: &mut Board, seed: TrackId, reorder: bool) -> anyhow::Result<()> {
    let chain = track::mark_track(board, seed, reorder).map_err(|e| anyhow::anyhow!(e))?;
    let net = board.track(seed).map_or(0, |t| t.net);
    log::info!(
        "Chain through {:?} (net {}): {} items, length {}, die length {}",
        seed,
        net,
        chain.len(),
        chain.length,
        chain.die_length
    );

    let ends = if reorder {
        track::track_ends(board, chain.head(), chain.len())
    } else {
        track::orient_chain(board, &chain.items)
    };
    match ends {
        Ok(ends) => {
            let start = board.track(ends.start).map(|t| t.start);
            let end = board.track(ends.end).map(|t| t.end);
            log::info!(
                "Track runs from {:?} ({:?}) to {:?} ({:?})",
                start,
                ends.start,
                end,
                ends.end
            );
        }
        Err(TrackError::ClosedLoop) => {
            log::warn!("Chain through {:?} is a closed loop: no ends", seed);
        }
        Err(e) => return Err(anyhow::anyhow!(e)),
    }
    Ok(())
}

fn run_survey(board: &Board, parallel: bool) {
    let chains = track::survey_chains(board, parallel);
    let total_length: i64 = chains.iter().map(|c| c.length).sum();
    let longest = chains.iter().max_by_key(|c| c.length);

    log::info!(
        "{} chains, total copper length {}",
        chains.len(),
        total_length
    );
    if let Some(chain) = longest {
        log::info!(
            "Longest chain starts at {:?}: {} items, length {}, die length {}",
            chain.head(),
            chain.len(),
            chain.length,
            chain.die_length
        );
    }
}
