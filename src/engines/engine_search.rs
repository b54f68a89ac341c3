//! Game-tree search engine.
//!
//! Wraps the iterative deepening driver with a configurable scorer and turns
//! engine options into a `SearchConfig`.

use tracing::debug;

use crate::engines::engine_trait::{parse_bool_option, Engine, EngineOutput};
use crate::game_state::isolation_board::IsolationBoard;
use crate::game_state::isolation_types::Move;
use crate::search::board_scoring::{BoardScorer, ImprovedScorer};
use crate::search::deadline::Deadline;
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig, SearchMethod};

pub struct SearchEngine<S = ImprovedScorer> {
    name: String,
    scorer: S,
    config: SearchConfig,
}

impl SearchEngine<ImprovedScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(ImprovedScorer, config)
    }
}

impl Default for SearchEngine<ImprovedScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S> SearchEngine<S>
where
    S: BoardScorer<IsolationBoard> + Send,
{
    pub fn with_scorer(scorer: S, config: SearchConfig) -> Self {
        Self {
            name: format!("PlumIsolation Search ({})", config.method),
            scorer,
            config,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<S> Engine for SearchEngine<S>
where
    S: BoardScorer<IsolationBoard> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let mut next = self.config;
        if name.eq_ignore_ascii_case("Depth") {
            next.search_depth = value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
        } else if name.eq_ignore_ascii_case("Iterative") {
            next.iterative = parse_bool_option(name, value)?;
        } else if name.eq_ignore_ascii_case("Method") {
            next.method = value.parse::<SearchMethod>().map_err(|e| e.to_string())?;
        } else if name.eq_ignore_ascii_case("TimeoutMs") {
            next.timeout_threshold_ms = value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid TimeoutMs value '{value}'"))?;
        } else if name.eq_ignore_ascii_case("MaxDepth") {
            let v = value.trim();
            next.max_depth = if v.is_empty() || v.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    v.parse::<u32>()
                        .map_err(|_| format!("invalid MaxDepth value '{value}'"))?,
                )
            };
        } else {
            return Err(format!("unknown option '{name}'"));
        }
        next.validate().map_err(|e| e.to_string())?;
        self.config = next;
        Ok(())
    }

    fn choose_move(
        &mut self,
        board: &IsolationBoard,
        legal_moves: &[Move],
        deadline: &dyn Deadline,
    ) -> Result<EngineOutput, String> {
        let report =
            iterative_deepening_search(board, legal_moves, &self.scorer, deadline, self.config)
                .map_err(|e| e.to_string())?;

        debug!(
            engine = %self.name,
            best_move = %report.best_move,
            score = %report.best_score,
            depth = report.reached_depth,
            nodes = report.nodes,
            timed_out = report.timed_out,
            "search finished"
        );

        let mut out = EngineOutput {
            best_move: report.best_move,
            ..EngineOutput::default()
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} cutoffs {}",
            report.reached_depth, report.best_score, report.nodes, report.cutoffs
        ));
        out.info_lines.push(format!(
            "info string search_engine method {} iterative {} timed_out {}",
            self.config.method, self.config.iterative, report.timed_out
        ));
        Ok(out)
    }
}
