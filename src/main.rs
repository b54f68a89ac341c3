//! Tournament runner: plays the search engine against a field of baseline
//! opponents and prints the per-opponent statistics.
//!
//! Run with:
//! `cargo run --release -- --games 20 --method alphabeta`
//! `RUST_LOG=plum_isolation=debug cargo run --release -- --games 2 --verbose`

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_isolation::engines::engine_greedy::GreedyEngine;
use plum_isolation::engines::engine_random::RandomEngine;
use plum_isolation::engines::engine_search::SearchEngine;
use plum_isolation::engines::engine_trait::{Engine, TurnParams};
use plum_isolation::search::board_scoring::{NullScorer, OpenMoveScorer, WeightedMobilityScorer};
use plum_isolation::search::iterative_deepening::{SearchConfig, SearchMethod};
use plum_isolation::utils::engine_match_harness::{
    run_tournament, MatchConfig, MatchSeriesConfig, Opponent,
};

#[derive(Debug, Parser)]
#[command(name = "plum_isolation", about = "Isolation search engine tournament")]
struct Cli {
    /// Games per opponent; first move alternates between the engines.
    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    /// Per-turn time limit in milliseconds.
    #[arg(long, default_value_t = 150)]
    time_limit_ms: u64,

    #[arg(long, default_value_t = 7)]
    width: u8,

    #[arg(long, default_value_t = 7)]
    height: u8,

    /// JSON search config; command-line search flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// minimax | alphabeta
    #[arg(long)]
    method: Option<SearchMethod>,

    /// Single fixed-depth pass instead of iterative deepening.
    #[arg(long)]
    depth: Option<u32>,

    #[arg(long)]
    max_depth: Option<u32>,

    #[arg(long)]
    timeout_threshold_ms: Option<f64>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn search_config(&self) -> Result<SearchConfig, String> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
                SearchConfig::load_from_json(&text).map_err(|e| e.to_string())?
            }
            None => SearchConfig::default(),
        };
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(depth) = self.depth {
            config.search_depth = depth;
            config.iterative = false;
        }
        if self.max_depth.is_some() {
            config.max_depth = self.max_depth;
        }
        if let Some(threshold) = self.timeout_threshold_ms {
            config.timeout_threshold_ms = threshold;
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn baseline_opponents(seed: u64) -> Vec<Opponent> {
    vec![
        Opponent::new("Random", move || Box::new(RandomEngine::seeded(seed))),
        Opponent::new("Greedy", || Box::new(GreedyEngine::new())),
        Opponent::new("MM_Null", || {
            Box::new(SearchEngine::with_scorer(
                NullScorer,
                SearchConfig::fixed(SearchMethod::Minimax, 3),
            ))
        }),
        Opponent::new("MM_Open", || {
            Box::new(SearchEngine::with_scorer(
                OpenMoveScorer,
                SearchConfig::fixed(SearchMethod::Minimax, 3),
            ))
        }),
        Opponent::new("AB_Aggressive", || {
            Box::new(SearchEngine::with_scorer(
                WeightedMobilityScorer::aggressive(),
                SearchConfig::fixed(SearchMethod::AlphaBeta, 4),
            ))
        }),
    ]
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let search_config = cli.search_config()?;
    tracing::info!(?search_config, "starting tournament");

    let contestant = move || Box::new(SearchEngine::new(search_config)) as Box<dyn Engine>;
    let series = MatchSeriesConfig {
        games: cli.games,
        base_seed: cli.seed,
        per_game: MatchConfig {
            board_width: cli.width,
            board_height: cli.height,
            random_opening: true,
            turn: TurnParams {
                time_limit_ms: cli.time_limit_ms,
            },
        },
        verbose: cli.verbose,
    };

    let report = run_tournament(contestant, &baseline_opponents(cli.seed), &series)?;
    println!("{}", report.report());
    Ok(())
}
