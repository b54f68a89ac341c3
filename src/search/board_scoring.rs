//! Pluggable position evaluation interfaces and baseline heuristics.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Every scorer reports terminal positions as `Score::Loss` / `Score::Win`
//! before looking at any heuristic.

use crate::game_state::game_tree::GameTree;
use crate::search::score::Score;

pub trait BoardScorer<G: GameTree> {
    /// Score of `game` from the point of view of `player`.
    fn score(&self, game: &G, player: G::Player) -> Score;
}

impl<G: GameTree, S: BoardScorer<G> + ?Sized> BoardScorer<G> for &S {
    fn score(&self, game: &G, player: G::Player) -> Score {
        (**self).score(game, player)
    }
}

#[inline]
fn terminal_score<G: GameTree>(game: &G, player: G::Player) -> Option<Score> {
    if game.is_loser(player) {
        Some(Score::Loss)
    } else if game.is_winner(player) {
        Some(Score::Win)
    } else {
        None
    }
}

#[inline]
fn mobility<G: GameTree>(game: &G, player: G::Player) -> (f64, f64) {
    let own = game.legal_moves_for(player).len() as f64;
    let opp = game.legal_moves_for(game.opponent(player)).len() as f64;
    (own, opp)
}

/// Own mobility minus opponent mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedScorer;

impl<G: GameTree> BoardScorer<G> for ImprovedScorer {
    fn score(&self, game: &G, player: G::Player) -> Score {
        if let Some(terminal) = terminal_score(game, player) {
            return terminal;
        }
        let (own, opp) = mobility(game, player);
        Score::value(own - opp)
    }
}

/// Own mobility only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoveScorer;

impl<G: GameTree> BoardScorer<G> for OpenMoveScorer {
    fn score(&self, game: &G, player: G::Player) -> Score {
        if let Some(terminal) = terminal_score(game, player) {
            return terminal;
        }
        Score::value(game.legal_moves_for(player).len() as f64)
    }
}

/// Flat zero for every non-terminal position; useful as a search-only baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScorer;

impl<G: GameTree> BoardScorer<G> for NullScorer {
    fn score(&self, game: &G, player: G::Player) -> Score {
        terminal_score(game, player).unwrap_or(Score::Value(0.0))
    }
}

/// Own mobility minus a weighted opponent mobility.
///
/// Weights above one chase the opponent; weights below one play defensively.
#[derive(Debug, Clone, Copy)]
pub struct WeightedMobilityScorer {
    pub opponent_weight: f64,
}

impl WeightedMobilityScorer {
    pub const fn new(opponent_weight: f64) -> Self {
        Self { opponent_weight }
    }

    pub const fn aggressive() -> Self {
        Self::new(2.0)
    }
}

impl Default for WeightedMobilityScorer {
    fn default() -> Self {
        Self::aggressive()
    }
}

impl<G: GameTree> BoardScorer<G> for WeightedMobilityScorer {
    fn score(&self, game: &G, player: G::Player) -> Score {
        if let Some(terminal) = terminal_score(game, player) {
            return terminal;
        }
        let (own, opp) = mobility(game, player);
        Score::value(own - self.opponent_weight * opp)
    }
}
