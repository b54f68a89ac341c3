//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on a fresh board,
//! with an optional seeded random opening that places both players. Each
//! turn gets its own wall clock; returning after it expires or answering
//! with a move outside the legal list forfeits the game.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::engines::engine_trait::{Engine, TurnParams};
use crate::game_state::game_tree::GameTree;
use crate::game_state::isolation_board::IsolationBoard;
use crate::game_state::isolation_types::{Move, Player};
use crate::search::deadline::{Deadline, TurnClock};

/// Why the loser lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    NoLegalMoves,
    Timeout,
    IllegalMove,
}

impl MatchOutcome {
    pub fn is_forfeit(self) -> bool {
        !matches!(self, MatchOutcome::NoLegalMoves)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOutcome {
    pub winner: PlayerId,
    pub reason: MatchOutcome,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub random_opening: bool,
    pub turn: TurnParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_width: 7,
            board_height: 7,
            random_opening: true,
            turn: TurnParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub winner: Player,
    pub outcome: MatchOutcome,
    pub final_board: IsolationBoard,
    pub opening_moves: Vec<Move>,
    pub played_moves: Vec<Move>,
    pub first_move_count: u32,
    pub second_move_count: u32,
    pub first_total_time_ns: u128,
    pub second_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub player1_forfeits: u16,
    pub player2_forfeits: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn player1_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.player1_wins) / f64::from(self.games)
        }
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} p1_forfeits={} p2_forfeits={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.player1_forfeits,
            self.player2_forfeits,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match.
///
/// `first` moves first as `Player::One`; `seed` drives the random opening.
pub fn play_match(
    mut first: Box<dyn Engine>,
    mut second: Box<dyn Engine>,
    config: &MatchConfig,
    seed: u64,
) -> Result<MatchResult, String> {
    first.new_game();
    second.new_game();

    let mut board = IsolationBoard::new(config.board_width, config.board_height);
    let opening_moves = if config.random_opening {
        apply_seeded_random_opening(&mut board, seed)?
    } else {
        Vec::new()
    };

    let mut tally = Tally::default();
    loop {
        let mover = board.active_player();
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            return Ok(tally.finish(board, opening_moves, mover, MatchOutcome::NoLegalMoves));
        }

        let engine: &mut dyn Engine = match mover {
            Player::One => first.as_mut(),
            Player::Two => second.as_mut(),
        };
        let clock = TurnClock::start_ms(config.turn.time_limit_ms);
        let started = Instant::now();
        let out = engine.choose_move(&board, &legal_moves, &clock)?;
        tally.record(mover, started.elapsed().as_nanos());

        let forfeit = if clock.time_left_ms() <= 0.0 {
            Some(MatchOutcome::Timeout)
        } else if !legal_moves.contains(&out.best_move) {
            Some(MatchOutcome::IllegalMove)
        } else {
            None
        };
        if let Some(outcome) = forfeit {
            debug!(
                engine = engine.name(),
                player = %mover,
                returned = %out.best_move,
                ?outcome,
                "forfeit"
            );
            return Ok(tally.finish(board, opening_moves, mover, outcome));
        }

        debug!(engine = engine.name(), player = %mover, mv = %out.best_move, "move");
        board.apply_move(out.best_move).map_err(|e| e.to_string())?;
        tally.played_moves.push(out.best_move);
    }
}

/// Per-game bookkeeping, indexed by `Player::index`.
#[derive(Default)]
struct Tally {
    played_moves: Vec<Move>,
    move_counts: [u32; 2],
    total_time_ns: [u128; 2],
}

impl Tally {
    fn record(&mut self, mover: Player, elapsed_ns: u128) {
        let idx = mover.index();
        self.move_counts[idx] = self.move_counts[idx].saturating_add(1);
        self.total_time_ns[idx] = self.total_time_ns[idx].saturating_add(elapsed_ns);
    }

    fn finish(
        self,
        final_board: IsolationBoard,
        opening_moves: Vec<Move>,
        loser: Player,
        outcome: MatchOutcome,
    ) -> MatchResult {
        MatchResult {
            winner: loser.opponent(),
            outcome,
            final_board,
            opening_moves,
            played_moves: self.played_moves,
            first_move_count: self.move_counts[0],
            second_move_count: self.move_counts[1],
            first_total_time_ns: self.total_time_ns[0],
            second_total_time_ns: self.total_time_ns[1],
        }
    }
}

/// Play a series of matches and aggregate win/forfeit statistics.
///
/// The engines alternate moving first, starting with player 1. Game `i`
/// uses opening seed `base_seed + i`.
pub fn play_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_first = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i));

        let result = if player1_first {
            play_match(player1_factory(), player2_factory(), &config.per_game, seed)?
        } else {
            play_match(player2_factory(), player1_factory(), &config.per_game, seed)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_first {
            (
                result.first_move_count,
                result.second_move_count,
                result.first_total_time_ns,
                result.second_total_time_ns,
            )
        } else {
            (
                result.second_move_count,
                result.first_move_count,
                result.second_total_time_ns,
                result.first_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let first_won = result.winner == Player::One;
        let winner = if first_won == player1_first {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        };
        match winner {
            PlayerId::Player1 => {
                stats.player1_wins += 1;
                if result.outcome.is_forfeit() {
                    stats.player2_forfeits += 1;
                }
            }
            PlayerId::Player2 => {
                stats.player2_wins += 1;
                if result.outcome.is_forfeit() {
                    stats.player1_forfeits += 1;
                }
            }
        }
        stats.outcomes.push(SeriesOutcome {
            winner,
            reason: result.outcome,
        });

        if config.verbose {
            info!(
                game = i + 1,
                games = config.games,
                seed,
                ?winner,
                reason = ?result.outcome,
                p1_wins = stats.player1_wins,
                p2_wins = stats.player2_wins,
                "game finished"
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

pub type EngineFactory = Box<dyn Fn() -> Box<dyn Engine>>;

pub struct Opponent {
    pub name: String,
    pub factory: EngineFactory,
}

impl Opponent {
    pub fn new(name: impl Into<String>, factory: impl Fn() -> Box<dyn Engine> + 'static) -> Self {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TournamentReport {
    pub started_at: DateTime<Utc>,
    pub contestant: String,
    pub rows: Vec<(String, MatchSeriesStats)>,
}

impl TournamentReport {
    /// Contestant wins over all games played.
    pub fn win_rate(&self) -> f64 {
        let (wins, games) = self.rows.iter().fold((0u32, 0u32), |(w, g), (_, s)| {
            (w + u32::from(s.player1_wins), g + u32::from(s.games))
        });
        if games == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(games)
        }
    }

    pub fn report(&self) -> String {
        let mut lines = vec![format!(
            "tournament started={} contestant={}",
            self.started_at.to_rfc3339(),
            self.contestant
        )];
        for (name, stats) in &self.rows {
            lines.push(format!("vs {name}: {}", stats.report()));
        }
        lines.push(format!("win_rate={:.1}%", self.win_rate() * 100.0));
        lines.join("\n")
    }
}

/// Play the contestant against every opponent in turn.
pub fn run_tournament<F>(
    contestant: F,
    opponents: &[Opponent],
    config: &MatchSeriesConfig,
) -> Result<TournamentReport, String>
where
    F: Fn() -> Box<dyn Engine>,
{
    let started_at = Utc::now();
    let contestant_name = contestant().name().to_owned();
    let mut rows = Vec::with_capacity(opponents.len());

    for opponent in opponents {
        let stats = play_match_series(&contestant, &opponent.factory, config)?;
        info!(
            contestant = %contestant_name,
            opponent = %opponent.name,
            wins = stats.player1_wins,
            losses = stats.player2_wins,
            win_rate = stats.player1_win_rate(),
            "series finished"
        );
        rows.push((opponent.name.clone(), stats));
    }

    Ok(TournamentReport {
        started_at,
        contestant: contestant_name,
        rows,
    })
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / f64::from(moves) / 1_000_000.0
    }
}

/// Places each player on a random blank square.
fn apply_seeded_random_opening(board: &mut IsolationBoard, seed: u64) -> Result<Vec<Move>, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::with_capacity(2);
    for _ in 0..2 {
        let legal_moves = board.legal_moves();
        let Some(&mv) = legal_moves.choose(&mut rng) else {
            break;
        };
        board.apply_move(mv).map_err(|e| e.to_string())?;
        opening_moves.push(mv);
    }
    Ok(opening_moves)
}

#[cfg(test)]
mod tests {
    use super::{
        play_match, play_match_series, run_tournament, MatchConfig, MatchOutcome,
        MatchSeriesConfig, Opponent, PlayerId,
    };
    use crate::engines::engine_greedy::GreedyEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_search::SearchEngine;
    use crate::engines::engine_trait::{Engine, EngineOutput, TurnParams};
    use crate::game_state::game_tree::GameTree;
    use crate::game_state::isolation_board::IsolationBoard;
    use crate::game_state::isolation_types::{Move, Player};
    use crate::search::deadline::Deadline;
    use crate::search::iterative_deepening::{SearchConfig, SearchMethod};

    /// Always answers with a fixed move.
    struct StubbornEngine(Move);

    impl Engine for StubbornEngine {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose_move(
            &mut self,
            _board: &IsolationBoard,
            _legal_moves: &[Move],
            _deadline: &dyn Deadline,
        ) -> Result<EngineOutput, String> {
            Ok(EngineOutput {
                best_move: self.0,
                info_lines: Vec::new(),
            })
        }
    }

    /// Plays the first legal move, but only after the clock has run out.
    struct SleepyEngine;

    impl Engine for SleepyEngine {
        fn name(&self) -> &str {
            "sleepy"
        }

        fn choose_move(
            &mut self,
            _board: &IsolationBoard,
            legal_moves: &[Move],
            deadline: &dyn Deadline,
        ) -> Result<EngineOutput, String> {
            while deadline.time_left_ms() > 0.0 {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            Ok(EngineOutput {
                best_move: legal_moves.first().copied().unwrap_or_default(),
                info_lines: Vec::new(),
            })
        }
    }

    fn quick_config() -> MatchConfig {
        MatchConfig {
            turn: TurnParams {
                time_limit_ms: 1_000,
            },
            ..MatchConfig::default()
        }
    }

    fn fixed_search(depth: u32) -> Box<dyn Engine> {
        Box::new(SearchEngine::new(SearchConfig::fixed(
            SearchMethod::AlphaBeta,
            depth,
        )))
    }

    #[test]
    fn random_game_ends_when_a_player_is_stuck() {
        let result = play_match(
            Box::new(RandomEngine::seeded(1)),
            Box::new(RandomEngine::seeded(2)),
            &quick_config(),
            42,
        )
        .expect("match should run");

        assert_eq!(result.outcome, MatchOutcome::NoLegalMoves);
        assert_eq!(result.opening_moves.len(), 2);
        let loser = result.winner.opponent();
        assert_eq!(result.final_board.active_player(), loser);
        assert!(result.final_board.legal_moves().is_empty());
        assert_eq!(
            result.final_board.move_count() as usize,
            result.opening_moves.len() + result.played_moves.len()
        );
        assert_eq!(
            (result.first_move_count + result.second_move_count) as usize,
            result.played_moves.len()
        );
    }

    #[test]
    fn null_move_forfeits() {
        let result = play_match(
            Box::new(StubbornEngine(Move::Null)),
            Box::new(RandomEngine::seeded(3)),
            &quick_config(),
            5,
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::IllegalMove);
        assert_eq!(result.winner, Player::Two);
        assert!(result.played_moves.is_empty());
    }

    #[test]
    fn move_outside_the_legal_list_forfeits() {
        let config = MatchConfig {
            random_opening: false,
            ..quick_config()
        };
        // Both open on the same square: legal for the first, not for the second.
        let result = play_match(
            Box::new(StubbornEngine(Move::at(3, 3))),
            Box::new(StubbornEngine(Move::at(3, 3))),
            &config,
            0,
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::IllegalMove);
        assert_eq!(result.winner, Player::One);
        assert_eq!(result.played_moves, vec![Move::at(3, 3)]);
    }

    #[test]
    fn answering_after_the_clock_forfeits() {
        let config = MatchConfig {
            turn: TurnParams { time_limit_ms: 5 },
            ..MatchConfig::default()
        };
        let result = play_match(
            Box::new(SleepyEngine),
            Box::new(RandomEngine::seeded(4)),
            &config,
            9,
        )
        .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::Timeout);
        assert_eq!(result.winner, Player::Two);
    }

    #[test]
    fn search_beats_random_over_a_seeded_series() {
        let stats = play_match_series(
            || fixed_search(3),
            || Box::new(RandomEngine::seeded(17)),
            &MatchSeriesConfig {
                games: 8,
                base_seed: 2024,
                per_game: quick_config(),
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 8);
        assert_eq!(stats.outcomes.len(), 8);
        assert_eq!(stats.player1_forfeits, 0);
        assert!(stats.player1_wins > stats.player2_wins, "{}", stats.report());
        assert!(stats.player1_win_rate() > 0.5);
        assert!(stats.overall_avg_move_time_ms >= 0.0);
    }

    #[test]
    fn series_alternates_the_first_mover() {
        // The stubborn engine forfeits on its first turn every game.
        let stats = play_match_series(
            || Box::new(StubbornEngine(Move::Null)),
            || Box::new(GreedyEngine::new()),
            &MatchSeriesConfig {
                games: 4,
                per_game: MatchConfig {
                    random_opening: false,
                    ..quick_config()
                },
                ..MatchSeriesConfig::default()
            },
        )
        .expect("series should run");
        assert_eq!(stats.player2_wins, 4);
        assert_eq!(stats.player1_win_rate(), 0.0);
        assert_eq!(stats.player1_forfeits, 4);
        assert!(stats.outcomes.iter().all(|o| o.winner == PlayerId::Player2));
        // Player 2 only gets to move in the games where it moved first.
        assert_eq!(stats.player2_moves, 2);
        assert_eq!(stats.player1_moves, 4);
    }

    #[test]
    fn tournament_report_covers_every_opponent() {
        let opponents = vec![
            Opponent::new("Random", || Box::new(RandomEngine::seeded(5))),
            Opponent::new("Greedy", || Box::new(GreedyEngine::new())),
        ];
        let report = run_tournament(
            || fixed_search(1),
            &opponents,
            &MatchSeriesConfig {
                games: 2,
                base_seed: 1,
                per_game: quick_config(),
                verbose: true,
            },
        )
        .expect("tournament should run");

        assert_eq!(report.rows.len(), 2);
        assert!(report.contestant.starts_with("PlumIsolation Search"));
        let rate = report.win_rate();
        assert!((0.0..=1.0).contains(&rate));
        let text = report.report();
        assert!(text.contains("vs Random"));
        assert!(text.contains("vs Greedy"));
        assert!(text.contains("win_rate="));
    }
}
