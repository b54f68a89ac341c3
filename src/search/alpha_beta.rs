//! Depth-limited minimax with alpha-beta pruning.
//!
//! Same node structure and termination rules as [`minimax`](super::minimax),
//! with `alpha` (what the maximizer is already guaranteed) and `beta` (what
//! the minimizer is already guaranteed) threaded through the recursion.

use crate::game_state::game_tree::GameTree;
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::Deadline;
use crate::search::score::Score;
use crate::search::search_types::{NodeStep, ScoredMove, SearchContext, SearchOutcome};

/// Pruned search. From the root call with `(Score::Loss, Score::Win)` the
/// returned score equals the unpruned minimax score at the same depth.
pub fn alpha_beta<G, S, D>(
    ctx: &mut SearchContext<'_, G, S, D>,
    game: &G,
    depth: u32,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> SearchOutcome<ScoredMove>
where
    G: GameTree,
    S: BoardScorer<G> + ?Sized,
    D: Deadline + ?Sized,
{
    let moves = match ctx.enter_node(game, depth)? {
        NodeStep::Resolved(result) => return Ok(result),
        NodeStep::Expand(moves) => moves,
    };

    let remaining = moves.len();
    let mut best: Option<ScoredMove> = None;
    for (i, mv) in moves.into_iter().enumerate() {
        let child = game.forecast_move(mv)?;
        let score = alpha_beta(ctx, &child, depth - 1, alpha, beta, !maximizing)?.score;

        let best_score = match best {
            Some(current)
                if (maximizing && score <= current.score)
                    || (!maximizing && score >= current.score) =>
            {
                current.score
            }
            _ => {
                best = Some(ScoredMove::new(score, mv));
                score
            }
        };

        if maximizing {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
        if beta <= alpha {
            if i + 1 < remaining {
                ctx.stats.cutoffs += 1;
            }
            break;
        }
    }

    Ok(best.unwrap_or_else(ScoredMove::sentinel))
}
