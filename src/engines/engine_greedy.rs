//! One-ply greedy engine.
//!
//! Forecasts every legal move and keeps the one whose resulting position
//! scores best for the mover. Ties go to the earliest move in the list.

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_tree::GameTree;
use crate::game_state::isolation_board::IsolationBoard;
use crate::game_state::isolation_types::Move;
use crate::search::board_scoring::{BoardScorer, ImprovedScorer};
use crate::search::deadline::Deadline;
use crate::search::score::Score;

pub struct GreedyEngine<S = ImprovedScorer> {
    scorer: S,
}

impl GreedyEngine<ImprovedScorer> {
    pub fn new() -> Self {
        Self::with_scorer(ImprovedScorer)
    }
}

impl Default for GreedyEngine<ImprovedScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> GreedyEngine<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<S> Engine for GreedyEngine<S>
where
    S: BoardScorer<IsolationBoard> + Send,
{
    fn name(&self) -> &str {
        "PlumIsolation Greedy"
    }

    fn choose_move(
        &mut self,
        board: &IsolationBoard,
        legal_moves: &[Move],
        _deadline: &dyn Deadline,
    ) -> Result<EngineOutput, String> {
        let mover = board.active_player();
        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            legal_moves.len()
        ));

        let mut best: Option<(Score, Move)> = None;
        for &mv in legal_moves {
            let next = board.forecast_move(mv).map_err(|e| e.to_string())?;
            let score = self.scorer.score(&next, mover);
            let improves = match best {
                None => true,
                Some((best_score, _)) => score > best_score,
            };
            if improves {
                best = Some((score, mv));
            }
        }

        if let Some((score, mv)) = best {
            out.best_move = mv;
            out.info_lines
                .push(format!("info string greedy_engine score {score}"));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::GreedyEngine;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::game_tree::GameTree;
    use crate::game_state::isolation_board::IsolationBoard;
    use crate::game_state::isolation_types::{Move, Player};
    use crate::search::board_scoring::{BoardScorer, ImprovedScorer, NullScorer};
    use crate::search::deadline::Unlimited;

    #[test]
    fn picks_the_best_one_ply_reply() {
        let board = IsolationBoard::from_moves(7, 7, &[Move::at(3, 3), Move::at(6, 6)])
            .expect("setup");
        let legal = board.legal_moves();
        let mut engine = GreedyEngine::new();
        let out = engine.choose_move(&board, &legal, &Unlimited).expect("move");

        let chosen = board.forecast_move(out.best_move).expect("legal");
        let chosen_score = ImprovedScorer.score(&chosen, Player::One);
        for &mv in &legal {
            let next = board.forecast_move(mv).expect("legal");
            assert!(ImprovedScorer.score(&next, Player::One) <= chosen_score);
        }
    }

    #[test]
    fn ties_go_to_the_first_move() {
        let board = IsolationBoard::from_moves(7, 7, &[Move::at(3, 3), Move::at(6, 6)])
            .expect("setup");
        let legal = board.legal_moves();
        let mut engine = GreedyEngine::with_scorer(NullScorer);
        let out = engine.choose_move(&board, &legal, &Unlimited).expect("move");
        assert_eq!(out.best_move, legal[0]);
    }

    #[test]
    fn no_moves_returns_null() {
        let board = IsolationBoard::default();
        let mut engine = GreedyEngine::new();
        let out = engine.choose_move(&board, &[], &Unlimited).expect("ok");
        assert_eq!(out.best_move, Move::Null);
    }
}
