//! Random-move engine.
//!
//! Selects uniformly from the legal moves. Used as the baseline opponent in
//! match series and for harness diagnostics.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::isolation_board::IsolationBoard;
use crate::game_state::isolation_types::Move;
use crate::search::deadline::Deadline;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move stream for tests and seeded match series.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumIsolation Random"
    }

    fn choose_move(
        &mut self,
        _board: &IsolationBoard,
        legal_moves: &[Move],
        _deadline: &dyn Deadline,
    ) -> Result<EngineOutput, String> {
        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if let Some(&picked) = legal_moves.choose(&mut self.rng) {
            out.best_move = picked;
        }
        Ok(out)
    }
}
