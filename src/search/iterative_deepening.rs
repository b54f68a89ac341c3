//! Iterative deepening driver over minimax or alpha-beta.
//!
//! Runs the selected search at increasing depth until the deadline fires (or
//! once, at a fixed depth) and reports the result of the deepest pass that
//! ran to completion. An interrupted pass never contributes to the answer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game_state::game_tree::GameTree;
use crate::game_state::isolation_types::Move;
use crate::search::alpha_beta::alpha_beta;
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::Deadline;
use crate::search::minimax::minimax;
use crate::search::score::Score;
use crate::search::search_types::{ScoredMove, SearchContext, SearchError, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMethod {
    #[default]
    #[serde(rename = "minimax")]
    Minimax,
    #[serde(rename = "alphabeta", alias = "alpha_beta", alias = "alpha-beta")]
    AlphaBeta,
}

impl SearchMethod {
    /// Root call of the selected algorithm; both share this signature.
    pub fn run<G, S, D>(
        self,
        ctx: &mut SearchContext<'_, G, S, D>,
        game: &G,
        depth: u32,
    ) -> SearchOutcome<ScoredMove>
    where
        G: GameTree,
        S: BoardScorer<G> + ?Sized,
        D: Deadline + ?Sized,
    {
        match self {
            SearchMethod::Minimax => minimax(ctx, game, depth, true),
            SearchMethod::AlphaBeta => alpha_beta(ctx, game, depth, Score::Loss, Score::Win, true),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMethod::Minimax => write!(f, "minimax"),
            SearchMethod::AlphaBeta => write!(f, "alphabeta"),
        }
    }
}

impl FromStr for SearchMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(SearchMethod::Minimax),
            "alphabeta" | "alpha_beta" | "alpha-beta" => Ok(SearchMethod::AlphaBeta),
            _ => Err(ConfigError::UnknownMethod(s.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown search method '{0}' (expected 'minimax' or 'alphabeta')")]
    UnknownMethod(String),
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("timeout threshold must be a positive number of milliseconds, got {0}")]
    InvalidThreshold(f64),
    #[error("invalid search config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth of the single pass in fixed-depth mode.
    pub search_depth: u32,
    pub iterative: bool,
    pub method: SearchMethod,
    /// Remaining-time margin at which a running search is abandoned.
    pub timeout_threshold_ms: f64,
    /// Optional ceiling for iterative mode; `None` deepens until cancelled.
    pub max_depth: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            iterative: true,
            method: SearchMethod::Minimax,
            timeout_threshold_ms: 10.0,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    pub fn fixed(method: SearchMethod, search_depth: u32) -> Self {
        Self {
            search_depth,
            iterative: false,
            method,
            ..Self::default()
        }
    }

    pub fn iterative(method: SearchMethod) -> Self {
        Self {
            iterative: true,
            method,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !(self.timeout_threshold_ms.is_finite() && self.timeout_threshold_ms > 0.0) {
            return Err(ConfigError::InvalidThreshold(self.timeout_threshold_ms));
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    /// Parses a (possibly partial) JSON object over the defaults and validates it.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub best_move: Move,
    pub best_score: Score,
    /// Deepest pass that completed; 0 when none did.
    pub reached_depth: u32,
    pub nodes: u64,
    pub cutoffs: u64,
    pub timed_out: bool,
}

impl SearchReport {
    fn empty() -> Self {
        Self {
            best_move: Move::Null,
            best_score: Score::Loss,
            reached_depth: 0,
            nodes: 0,
            cutoffs: 0,
            timed_out: false,
        }
    }
}

/// Searches `game` for the side to move and reports the last completed pass.
///
/// Empty `legal_moves` returns `Move::Null` without touching the scorer, the
/// deadline, or either search. Only `SearchError::Timeout` is absorbed here;
/// an invalid `config` and invalid-state errors from the game reach the caller.
pub fn iterative_deepening_search<G, S, D>(
    game: &G,
    legal_moves: &[Move],
    scorer: &S,
    deadline: &D,
    config: SearchConfig,
) -> SearchOutcome<SearchReport>
where
    G: GameTree,
    S: BoardScorer<G> + ?Sized,
    D: Deadline + ?Sized,
{
    config
        .validate()
        .map_err(|e| SearchError::InvalidConfig(e.to_string()))?;

    let mut report = SearchReport::empty();
    if legal_moves.is_empty() {
        return Ok(report);
    }

    let mut ctx = SearchContext::new(
        game.active_player(),
        scorer,
        deadline,
        config.timeout_threshold_ms,
    );
    let mut best = ScoredMove::sentinel();

    if config.iterative {
        let mut depth = 1u32;
        loop {
            match config.method.run(&mut ctx, game, depth) {
                Ok(result) => {
                    best = result;
                    report.reached_depth = depth;
                }
                Err(SearchError::Timeout) => {
                    report.timed_out = true;
                    break;
                }
                Err(err) => return Err(err),
            }
            if config.max_depth.is_some_and(|max| depth >= max) {
                break;
            }
            depth = depth.saturating_add(1);
        }
    } else {
        match config.method.run(&mut ctx, game, config.search_depth) {
            Ok(result) => {
                best = result;
                report.reached_depth = config.search_depth;
            }
            Err(SearchError::Timeout) => report.timed_out = true,
            Err(err) => return Err(err),
        }
    }

    report.best_move = best.best_move;
    report.best_score = best.score;
    report.nodes = ctx.stats.nodes;
    report.cutoffs = ctx.stats.cutoffs;
    Ok(report)
}

/// Move of the last completed pass, or `Move::Null` when no pass completed.
pub fn choose_move<G, S, D>(
    game: &G,
    legal_moves: &[Move],
    scorer: &S,
    deadline: &D,
    config: SearchConfig,
) -> SearchOutcome<Move>
where
    G: GameTree,
    S: BoardScorer<G> + ?Sized,
    D: Deadline + ?Sized,
{
    Ok(iterative_deepening_search(game, legal_moves, scorer, deadline, config)?.best_move)
}
