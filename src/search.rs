//! An agent to pick moves by depth-limited minimax search

use log::{debug, trace, warn};
use rayon::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::{
    board::{Cell, Token},
    state::{Decision, GameState, Move},
    CONNECT, DEFAULT_DEPTH,
};

pub type Score = i32;

/// The score of a position won by the searching player
pub const WIN_SCORE: Score = i32::MAX;
/// The score of a position won by anybody else
pub const LOSS_SCORE: Score = -i32::MAX;

// indexed by the number of a single player's tokens in an otherwise empty window
const WINDOW_SCORES: [Score; CONNECT + 1] = [0, 10, 20, 50, 100];

/// Tuning for a [`Searcher`]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SearchConfig {
    /// How many plies to look ahead, at least 1
    pub depth: usize,
    /// Skip branches that cannot change the result (alpha-beta pruning)
    pub pruning: bool,
    /// Score the root moves on the rayon thread pool
    pub parallel: bool,
    /// Give up after visiting this many nodes
    pub node_budget: Option<usize>,
    /// Give up after this much wall-clock time
    pub time_budget: Option<Duration>,
}

impl SearchConfig {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            ..Self::default()
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_node_budget(mut self, nodes: usize) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    pub fn with_time_budget(mut self, time: Duration) -> Self {
        self.time_budget = Some(time);
        self
    }

    fn is_budgeted(&self) -> bool {
        self.node_budget.is_some() || self.time_budget.is_some()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: true,
            parallel: false,
            node_budget: None,
            time_budget: None,
        }
    }
}

/// The outcome of a search
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SearchResult {
    pub decision: Decision,
    /// The score of the chosen move, from the searching player's point of view
    pub score: Score,
    /// The number of positions visited (for diagnostics only)
    pub nodes: usize,
    /// The deepest look-ahead that finished
    pub depth: usize,
}

/// Scores a single window for the player owning `token`
///
/// Windows holding only the player's tokens and empty cells score
/// positively, windows holding only a single opponent's tokens and empty
/// cells score negatively, anything mixed scores 0.
pub fn window_score(cells: &[Cell; CONNECT], token: Token) -> Score {
    let own = cells.iter().filter(|cell| **cell == Cell::Owned(token)).count();
    let empty = cells.iter().filter(|cell| cell.is_empty()).count();
    let others = CONNECT - own - empty;

    if others == 0 {
        return WINDOW_SCORES[own];
    }
    if own > 0 {
        return 0;
    }

    let mut tokens = cells.iter().filter_map(|cell| cell.token());
    let first = tokens.next();
    if tokens.all(|next| Some(next) == first) {
        -WINDOW_SCORES[others]
    } else {
        0
    }
}

/// Heuristic value of a position for the player owning `token`
///
/// Each window is scored once from this player's side with
/// [`window_score`], and the opposing side is taken to score the same window
/// with the sign flipped. The value is this player's score minus the
/// opposing side's, so every opponent's tokens weigh as much as the
/// player's own.
pub fn evaluate(state: &GameState, token: Token) -> Score {
    state
        .board()
        .windows()
        .map(|window| {
            let own = window_score(&window.cells, token);
            let opposing = -own;
            own - opposing
        })
        .sum()
}

/// Raised when a budget runs out, aborting the current iteration
struct Exhausted;

struct Budget {
    nodes: AtomicUsize,
    max_nodes: Option<usize>,
    deadline: Option<Instant>,
}

impl Budget {
    fn new(config: &SearchConfig) -> Self {
        Self {
            nodes: AtomicUsize::new(0),
            max_nodes: config.node_budget,
            deadline: config.time_budget.map(|time| Instant::now() + time),
        }
    }

    fn visit(&self) -> Result<(), Exhausted> {
        let visited = self.nodes.fetch_add(1, Ordering::Relaxed) + 1;
        if self.max_nodes.map_or(false, |max| visited > max)
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
        {
            return Err(Exhausted);
        }
        Ok(())
    }

    fn visited(&self) -> usize {
        self.nodes.load(Ordering::Relaxed)
    }
}

/// An agent choosing moves with minimax search and alpha-beta pruning
///
/// # Position Scoring
/// Positions are always scored for the player to act at the root. A
/// position it has won scores [`WIN_SCORE`], a position anyone else has won
/// scores [`LOSS_SCORE`]. Positions at the depth limit and drawn positions
/// are scored with [`evaluate`].
///
/// The root player maximises, every other player minimises. Moves are
/// explored in ascending column order, and among equally scored moves the
/// first one found is kept.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Finds the best move for the player to act in `state`
    ///
    /// Without budgets this searches straight to the configured depth. With
    /// a budget it deepens one ply at a time, and returns the result of the
    /// last complete iteration once the budget runs out.
    pub fn search(&self, state: &GameState) -> SearchResult {
        let root = state.current_player().token();
        let budget = Budget::new(&self.config);

        if state.is_terminal() {
            return SearchResult {
                decision: Decision::NoLegalMove,
                score: leaf_score(state, root),
                nodes: 1,
                depth: 0,
            };
        }

        let max_depth = self.config.depth.max(1);
        let first_depth = if self.config.is_budgeted() { 1 } else { max_depth };

        let mut best = None;
        for depth in first_depth..=max_depth {
            match self.top_level_search(state, root, depth, &budget) {
                Ok((best_move, score)) => {
                    debug!(
                        "depth {}: best column {}, score {}, {} nodes",
                        depth,
                        best_move.column(),
                        score,
                        budget.visited()
                    );
                    best = Some((best_move, score, depth));
                }
                Err(Exhausted) => {
                    warn!(
                        "search budget exhausted after {} nodes during depth {}",
                        budget.visited(),
                        depth
                    );
                    break;
                }
            }
        }

        match best {
            Some((best_move, score, depth)) => SearchResult {
                decision: Decision::Play(best_move),
                score,
                nodes: budget.visited(),
                depth,
            },
            // not even one ply finished, fall back to the first legal column
            None => SearchResult {
                decision: state
                    .legal_moves()
                    .next()
                    .map_or(Decision::NoLegalMove, |column| {
                        Decision::Play(Move::new(state.current_player(), column))
                    }),
                score: 0,
                nodes: budget.visited(),
                depth: 0,
            },
        }
    }

    /// Scores every root move and keeps the best one
    ///
    /// The root is never terminal here, so there is at least one legal move.
    fn top_level_search(
        &self,
        state: &GameState,
        root: Token,
        depth: usize,
        budget: &Budget,
    ) -> Result<(Move, Score), Exhausted> {
        budget.visit()?;

        let children: Vec<(Move, GameState)> = children(state).collect();

        let mut best: Option<(Move, Score)> = None;
        if self.config.parallel {
            // each child gets the full window, so scores match the sequential search
            let scores = children
                .par_iter()
                .map(|(_, child)| {
                    self.minimax(child, root, depth - 1, LOSS_SCORE, WIN_SCORE, budget)
                })
                .collect::<Result<Vec<Score>, Exhausted>>()?;

            for ((child_move, _), score) in children.iter().zip(scores) {
                trace!("column {}: {}", child_move.column(), score);
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((*child_move, score));
                }
            }
        } else {
            let mut alpha = LOSS_SCORE;
            let beta = WIN_SCORE;
            for (child_move, child) in children.iter() {
                let score = self.minimax(child, root, depth - 1, alpha, beta, budget)?;
                trace!("column {}: {}", child_move.column(), score);
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((*child_move, score));
                }
                if self.config.pruning {
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break;
                    }
                }
            }
        }

        match best {
            Some(best) => Ok(best),
            None => unreachable!("non-terminal position without legal moves"),
        }
    }

    /// Performs game tree search below the root
    ///
    /// Returns the score of the position (see [Position Scoring]). With
    /// pruning enabled the score is only exact when it lies strictly
    /// between `alpha` and `beta`.
    ///
    /// [Position Scoring]: #position-scoring
    fn minimax(
        &self,
        state: &GameState,
        root: Token,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        budget: &Budget,
    ) -> Result<Score, Exhausted> {
        budget.visit()?;

        if depth == 0 || state.is_terminal() {
            return Ok(leaf_score(state, root));
        }

        let maximizing = state.current_player().token() == root;
        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };

        for (_, child) in children(state) {
            let score = self.minimax(&child, root, depth - 1, alpha, beta, budget)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            // a perfect opponent would never let the game reach this branch
            if self.config.pruning && beta <= alpha {
                break;
            }
        }

        Ok(best)
    }
}

/// Scores a terminal or depth-limited position for `root`
fn leaf_score(state: &GameState, root: Token) -> Score {
    match state.winner() {
        Some(winner) if winner.token() == root => WIN_SCORE,
        Some(_) => LOSS_SCORE,
        None => evaluate(state, root),
    }
}

/// Plays each legal column for the player to act, in ascending order
fn children(state: &GameState) -> impl Iterator<Item = (Move, GameState)> + '_ {
    state.legal_moves().map(move |column| {
        let child_move = Move::new(state.current_player(), column);
        let mut child = state.clone();
        if let Err(err) = child.apply_move(&child_move) {
            unreachable!("legal column {} was rejected: {}", column, err);
        }
        (child_move, child)
    })
}
