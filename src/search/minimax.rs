//! Depth-limited minimax without pruning.
//!
//! Layers alternate between the search owner (maximizing) and its opponent
//! (minimizing). Every node polls the deadline on entry; a timeout unwinds the
//! whole call stack through `?`.

use crate::game_state::game_tree::GameTree;
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::Deadline;
use crate::search::search_types::{NodeStep, ScoredMove, SearchContext, SearchOutcome};

/// Returns the best score reachable within `depth` plies and the move made at
/// this node that reaches it. Ties keep the earliest-enumerated move.
pub fn minimax<G, S, D>(
    ctx: &mut SearchContext<'_, G, S, D>,
    game: &G,
    depth: u32,
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

    let mut best: Option<ScoredMove> = None;
    for mv in moves {
        let child = game.forecast_move(mv)?;
        // Only the child's score matters; its move belongs to the next ply.
        let score = minimax(ctx, &child, depth - 1, !maximizing)?.score;

        let improves = match best {
            None => true,
            Some(current) if maximizing => score > current.score,
            Some(current) => score < current.score,
        };
        if improves {
            best = Some(ScoredMove::new(score, mv));
        }
    }

    Ok(best.unwrap_or_else(ScoredMove::sentinel))
}

#[cfg(test)]
mod tests {
    use super::minimax;
    use crate::game_state::game_tree::GameTree;
    use crate::game_state::isolation_board::IsolationBoard;
    use crate::game_state::isolation_types::{Move, Player};
    use crate::search::board_scoring::{BoardScorer, ImprovedScorer};
    use crate::search::deadline::Unlimited;
    use crate::search::score::Score;
    use crate::search::search_types::{ScoredMove, SearchContext, SearchError};
    use crate::search::test_support::{CountingScorer, PollBudget, TreeGame, TreeScorer};

    fn run(game: &TreeGame, depth: u32) -> ScoredMove {
        let scorer = TreeScorer;
        let mut ctx = SearchContext::new(game.active_player(), &scorer, &Unlimited, 10.0);
        minimax(&mut ctx, game, depth, true).expect("unlimited search never times out")
    }

    #[test]
    fn depth_one_picks_the_better_of_two_leaves() {
        let game = TreeGame::two_leaves(3.0, 5.0);
        let result = run(&game, 1);
        assert_eq!(result, ScoredMove::new(Score::Value(5.0), TreeGame::MOVE_B));
    }

    #[test]
    fn depth_zero_returns_evaluation_and_current_square() {
        let game = TreeGame::uniform(2, 3, |id| id as f64);
        let result = run(&game, 0);
        assert_eq!(result.score, TreeScorer.score(&game, game.active_player()));
        assert_eq!(result.best_move, game.player_location(game.active_player()));
    }

    #[test]
    fn no_legal_moves_evaluates_at_every_depth() {
        let game = TreeGame::single_leaf(4.0);
        for depth in 0..4 {
            let result = run(&game, depth);
            assert_eq!(result.score, Score::Value(4.0));
            assert_eq!(result.best_move, game.player_location(game.active_player()));
        }
    }

    #[test]
    fn owner_already_lost_returns_loss_sentinel() {
        let game = TreeGame::lost_root();
        for depth in 0..3 {
            assert_eq!(run(&game, depth), ScoredMove::new(Score::Loss, Move::Null));
        }
    }

    #[test]
    fn minimizing_layer_assumes_best_reply() {
        // Root: A -> leaves {9, 1}, B -> leaves {4, 6}. Opponent picks the minimum.
        let game = TreeGame::from_leaf_groups(&[&[9.0, 1.0], &[4.0, 6.0]]);
        let result = run(&game, 2);
        assert_eq!(result, ScoredMove::new(Score::Value(4.0), TreeGame::MOVE_B));
    }

    #[test]
    fn ties_keep_the_first_enumerated_move() {
        let game = TreeGame::from_leaf_groups(&[&[2.0], &[2.0], &[2.0]]);
        let result = run(&game, 2);
        assert_eq!(result.best_move, TreeGame::MOVE_A);
    }

    #[test]
    fn visits_every_node_of_the_tree() {
        let game = TreeGame::uniform(3, 2, |_| 0.0);
        let scorer = TreeScorer;
        let mut ctx = SearchContext::new(game.active_player(), &scorer, &Unlimited, 10.0);
        minimax(&mut ctx, &game, 2, true).expect("search");
        assert_eq!(ctx.stats.nodes, 1 + 3 + 9);
        assert_eq!(ctx.stats.cutoffs, 0);
    }

    #[test]
    fn evaluator_is_called_only_at_leaves() {
        let game = TreeGame::uniform(2, 3, |_| 1.0);
        let scorer = CountingScorer::new(TreeScorer);
        let mut ctx = SearchContext::new(game.active_player(), &scorer, &Unlimited, 10.0);
        minimax(&mut ctx, &game, 3, true).expect("search");
        assert_eq!(scorer.calls(), 8);
    }

    #[test]
    fn timeout_propagates_instead_of_a_partial_result() {
        let game = TreeGame::uniform(2, 3, |id| id as f64);
        let deadline = PollBudget::new(4);
        let scorer = TreeScorer;
        let mut ctx = SearchContext::new(game.active_player(), &scorer, &deadline, 10.0);
        assert_eq!(minimax(&mut ctx, &game, 3, true), Err(SearchError::Timeout));
        assert_eq!(ctx.stats.nodes, 4);
    }

    #[test]
    fn isolation_depth_zero_matches_scorer() {
        let board =
            IsolationBoard::from_moves(7, 7, &[Move::at(0, 0), Move::at(3, 3)]).expect("setup");
        let mut ctx = SearchContext::new(Player::One, &ImprovedScorer, &Unlimited, 10.0);
        let result = minimax(&mut ctx, &board, 0, true).expect("search");
        assert_eq!(result.score, ImprovedScorer.score(&board, Player::One));
        assert_eq!(result.best_move, Move::at(0, 0));
    }

    #[test]
    fn isolation_depth_one_is_a_one_ply_argmax() {
        let board = IsolationBoard::from_moves(7, 7, &[Move::at(2, 3), Move::at(4, 3)])
            .expect("setup");

        let mut expected = ScoredMove::new(Score::Loss, Move::Null);
        for (i, mv) in board.legal_moves().into_iter().enumerate() {
            let child = board.forecast_move(mv).expect("legal");
            let score = ImprovedScorer.score(&child, Player::One);
            if i == 0 || score > expected.score {
                expected = ScoredMove::new(score, mv);
            }
        }

        let mut ctx = SearchContext::new(Player::One, &ImprovedScorer, &Unlimited, 10.0);
        let result = minimax(&mut ctx, &board, 1, true).expect("search");
        assert_eq!(result, expected);
    }
}
