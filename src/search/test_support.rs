//! Scripted game trees and instrumented collaborators for search tests.

use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::game_tree::{GameStateError, GameTree};
use crate::game_state::isolation_types::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::Deadline;
use crate::search::score::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TreePlayer {
    Max,
    Min,
}

impl TreePlayer {
    fn other(self) -> Self {
        match self {
            TreePlayer::Max => TreePlayer::Min,
            TreePlayer::Min => TreePlayer::Max,
        }
    }
}

/// Tree description: heuristic value (from `Max`'s side) and children.
pub(crate) enum Shape {
    Node(f64, Vec<Shape>),
    /// The side to move at this node has already lost.
    Lost,
}

struct TreeNode {
    value: f64,
    to_move: TreePlayer,
    loser: Option<TreePlayer>,
    children: Vec<(Move, usize)>,
}

/// An explicit game tree. Child `k` of every node is reached by `Move::at(0, k)`.
#[derive(Clone)]
pub(crate) struct TreeGame {
    nodes: Rc<Vec<TreeNode>>,
    current: usize,
}

impl TreeGame {
    pub(crate) const MOVE_A: Move = Move::at(0, 0);
    pub(crate) const MOVE_B: Move = Move::at(0, 1);

    pub(crate) fn from_shape(shape: Shape) -> Self {
        let mut nodes = Vec::new();
        Self::push_shape(&mut nodes, shape, TreePlayer::Max);
        Self {
            nodes: Rc::new(nodes),
            current: 0,
        }
    }

    fn push_shape(nodes: &mut Vec<TreeNode>, shape: Shape, to_move: TreePlayer) -> usize {
        let id = nodes.len();
        match shape {
            Shape::Lost => {
                nodes.push(TreeNode {
                    value: 0.0,
                    to_move,
                    loser: Some(to_move),
                    children: Vec::new(),
                });
            }
            Shape::Node(value, children) => {
                nodes.push(TreeNode {
                    value,
                    to_move,
                    loser: None,
                    children: Vec::new(),
                });
                let mut links = Vec::with_capacity(children.len());
                for (k, child) in children.into_iter().enumerate() {
                    let child_id = Self::push_shape(nodes, child, to_move.other());
                    links.push((Move::at(0, k as u8), child_id));
                }
                nodes[id].children = links;
            }
        }
        id
    }

    pub(crate) fn leaf(value: f64) -> Shape {
        Shape::Node(value, Vec::new())
    }

    pub(crate) fn single_leaf(value: f64) -> Self {
        Self::from_shape(Self::leaf(value))
    }

    pub(crate) fn lost_root() -> Self {
        Self::from_shape(Shape::Lost)
    }

    pub(crate) fn two_leaves(a: f64, b: f64) -> Self {
        Self::from_shape(Shape::Node(0.0, vec![Self::leaf(a), Self::leaf(b)]))
    }

    /// Root with one child per group; each child has the group's values as leaves.
    pub(crate) fn from_leaf_groups(groups: &[&[f64]]) -> Self {
        let children = groups
            .iter()
            .map(|group| Shape::Node(0.0, group.iter().map(|&v| Self::leaf(v)).collect()))
            .collect();
        Self::from_shape(Shape::Node(0.0, children))
    }

    /// Full tree of the given branching factor and height. Node ids are
    /// assigned in depth-first preorder and fed to `value`.
    pub(crate) fn uniform(branching: usize, height: u32, value: impl Fn(usize) -> f64) -> Self {
        fn build(
            branching: usize,
            height: u32,
            next_id: &mut usize,
            value: &dyn Fn(usize) -> f64,
        ) -> Shape {
            let id = *next_id;
            *next_id += 1;
            let children = if height == 0 {
                Vec::new()
            } else {
                (0..branching)
                    .map(|_| build(branching, height - 1, next_id, value))
                    .collect()
            };
            Shape::Node(value(id), children)
        }
        let mut next_id = 0;
        Self::from_shape(build(branching, height, &mut next_id, &value))
    }

    /// Random tree with uneven branching, scattered lost nodes, and integer values.
    pub(crate) fn random(seed: u64, max_branching: usize, height: u32) -> Self {
        fn build(rng: &mut StdRng, max_branching: usize, height: u32) -> Shape {
            if height > 0 && rng.random_bool(0.08) {
                return Shape::Lost;
            }
            let value = f64::from(rng.random_range(-20..=20));
            let branching = if height == 0 {
                0
            } else {
                rng.random_range(0..=max_branching)
            };
            let children = (0..branching)
                .map(|_| build(rng, max_branching, height - 1))
                .collect();
            Shape::Node(value, children)
        }
        let mut rng = StdRng::seed_from_u64(seed);
        // Keep the root expandable so every seed exercises the search loop.
        let root_children = (0..max_branching.max(2))
            .map(|_| build(&mut rng, max_branching, height.saturating_sub(1)))
            .collect();
        Self::from_shape(Shape::Node(0.0, root_children))
    }

    fn node(&self) -> &TreeNode {
        &self.nodes[self.current]
    }
}

impl GameTree for TreeGame {
    type Player = TreePlayer;

    fn active_player(&self) -> TreePlayer {
        self.node().to_move
    }

    fn opponent(&self, player: TreePlayer) -> TreePlayer {
        player.other()
    }

    fn legal_moves_for(&self, player: TreePlayer) -> Vec<Move> {
        if player != self.active_player() {
            return Vec::new();
        }
        self.node().children.iter().map(|&(mv, _)| mv).collect()
    }

    fn forecast_move(&self, mv: Move) -> Result<Self, GameStateError> {
        let (_, child) = self
            .node()
            .children
            .iter()
            .find(|&&(child_mv, _)| child_mv == mv)
            .ok_or(GameStateError::IllegalMove { mv })?;
        Ok(Self {
            nodes: Rc::clone(&self.nodes),
            current: *child,
        })
    }

    fn is_winner(&self, player: TreePlayer) -> bool {
        self.node().loser == Some(player.other())
    }

    fn is_loser(&self, player: TreePlayer) -> bool {
        self.node().loser == Some(player)
    }

    fn player_location(&self, player: TreePlayer) -> Move {
        let row = match player {
            TreePlayer::Max => 100,
            TreePlayer::Min => 101,
        };
        Move::at(row, (self.current % 256) as u8)
    }
}

/// Reads the scripted node value; sentinels for lost/won nodes.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TreeScorer;

impl BoardScorer<TreeGame> for TreeScorer {
    fn score(&self, game: &TreeGame, player: TreePlayer) -> Score {
        if game.is_loser(player) {
            return Score::Loss;
        }
        if game.is_winner(player) {
            return Score::Win;
        }
        let value = game.node().value;
        match player {
            TreePlayer::Max => Score::value(value),
            TreePlayer::Min => Score::value(-value),
        }
    }
}

/// Delegates to an inner scorer and counts the calls.
#[derive(Debug)]
pub(crate) struct CountingScorer<S> {
    inner: S,
    calls: Cell<usize>,
}

impl<S> CountingScorer<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<G: GameTree, S: BoardScorer<G>> BoardScorer<G> for CountingScorer<S> {
    fn score(&self, game: &G, player: G::Player) -> Score {
        self.calls.set(self.calls.get() + 1);
        self.inner.score(game, player)
    }
}

/// Deadline with plenty of time for the first `budget` polls and none after.
#[derive(Debug)]
pub(crate) struct PollBudget {
    budget: u64,
    polls: Cell<u64>,
}

impl PollBudget {
    pub(crate) fn new(budget: u64) -> Self {
        Self {
            budget,
            polls: Cell::new(0),
        }
    }

    pub(crate) fn polls(&self) -> u64 {
        self.polls.get()
    }
}

impl Deadline for PollBudget {
    fn time_left_ms(&self) -> f64 {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        if polls <= self.budget {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

/// Node count of a complete tree searched to `depth`.
pub(crate) fn full_tree_nodes(branching: u64, depth: u32) -> u64 {
    (0..=depth).map(|d| branching.pow(d)).sum()
}
