//! Crate root module declarations for the Plum Isolation game-playing project.
//!
//! Exposes the game model, the adversarial search kernel (minimax, alpha-beta
//! and the iterative deepening driver), the engines built on it, and the
//! match harness so the binary, benches and tests share stable module paths.

pub mod game_state {
    pub mod game_tree;
    pub mod isolation_board;
    pub mod isolation_types;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod deadline;
    pub mod iterative_deepening;
    pub mod minimax;
    pub mod score;
    pub mod search_types;
    #[cfg(test)]
    pub(crate) mod test_support;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_search;
    pub mod engine_trait;
}

pub mod utils {
    pub mod engine_match_harness;
}
