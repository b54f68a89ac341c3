//! Shared search result, error, and per-search context types.

use thiserror::Error;

use crate::game_state::game_tree::{GameStateError, GameTree};
use crate::game_state::isolation_types::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::Deadline;
use crate::search::score::Score;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Remaining time fell below the configured threshold at a node entry.
    #[error("search deadline exceeded")]
    Timeout,
    #[error("invalid game state: {0}")]
    InvalidState(#[from] GameStateError),
    /// The driver was handed a `SearchConfig` that fails `validate()`.
    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}

pub type SearchOutcome<T> = Result<T, SearchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub score: Score,
    pub best_move: Move,
}

impl ScoredMove {
    pub const fn new(score: Score, best_move: Move) -> Self {
        Self { score, best_move }
    }

    /// Running best before anything has been searched.
    pub const fn sentinel() -> Self {
        Self::new(Score::Loss, Move::Null)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Node entries that passed the deadline check.
    pub nodes: u64,
    /// Alpha-beta cutoffs that skipped at least one sibling.
    pub cutoffs: u64,
}

/// Outcome of the shared per-node termination checks.
pub(crate) enum NodeStep {
    Resolved(ScoredMove),
    Expand(Vec<Move>),
}

/// Everything a recursive search call needs besides the position itself.
///
/// Scores are always taken from `player`'s point of view, the side that owns
/// the search, regardless of which side acts at a given node.
pub struct SearchContext<'a, G, S, D>
where
    G: GameTree,
    S: BoardScorer<G> + ?Sized,
    D: Deadline + ?Sized,
{
    pub player: G::Player,
    scorer: &'a S,
    deadline: &'a D,
    timeout_threshold_ms: f64,
    pub stats: SearchStats,
}

impl<'a, G, S, D> SearchContext<'a, G, S, D>
where
    G: GameTree,
    S: BoardScorer<G> + ?Sized,
    D: Deadline + ?Sized,
{
    pub fn new(
        player: G::Player,
        scorer: &'a S,
        deadline: &'a D,
        timeout_threshold_ms: f64,
    ) -> Self {
        Self {
            player,
            scorer,
            deadline,
            timeout_threshold_ms,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn check_deadline(&self) -> SearchOutcome<()> {
        if self.deadline.time_left_ms() < self.timeout_threshold_ms {
            return Err(SearchError::Timeout);
        }
        Ok(())
    }

    #[inline]
    pub fn evaluate(&self, game: &G) -> Score {
        self.scorer.score(game, self.player)
    }

    /// Heuristic score paired with the owner's current square.
    #[inline]
    pub fn leaf(&self, game: &G) -> ScoredMove {
        ScoredMove::new(self.evaluate(game), game.player_location(self.player))
    }

    /// Node entry: poll the deadline, count the node, then apply the
    /// termination rules in order (owner lost, no moves, depth exhausted).
    pub(crate) fn enter_node(&mut self, game: &G, depth: u32) -> SearchOutcome<NodeStep> {
        self.check_deadline()?;
        self.stats.nodes += 1;

        if game.is_loser(self.player) {
            return Ok(NodeStep::Resolved(ScoredMove::new(Score::Loss, Move::Null)));
        }
        let moves = game.legal_moves();
        if moves.is_empty() || depth == 0 {
            return Ok(NodeStep::Resolved(self.leaf(game)));
        }
        Ok(NodeStep::Expand(moves))
    }
}
