//! Best-first move search.
//!
//! The engine explores every board reachable by the acting side from the
//! current snapshot, one step at a time, popping the frontier entry with the
//! lowest `path length + score` first. Each distinct board is expanded at
//! most once per call.
//!
//! There is no goal test. Every child produced during the exploration is
//! scored, and the highest score seen anywhere is credited to the *root
//! move* of its path, i.e. the first step the caller would actually play.
//! The search stops only when the frontier is exhausted.
//!
//! When nothing was scored (the side cannot move at all) a uniformly random
//! legal move is tried instead, which in turn may find nothing.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use log::{debug, info, trace};

use crate::board::{Board, Move};
use crate::constants::Marker;
use crate::error::BoardError;
use crate::fallback::random_legal_move;
use crate::heuristic::{Perspective, Weights, evaluate};
use crate::movegen::destinations;

/// What the engine is asked to decide: the acting side's marker, the empty
/// marker and the goal row.
pub type SearchParams = Perspective;

/// Search life cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Frontier seeded with the start board
    Initialized,
    /// Popping and expanding frontier entries
    Expanding,
    /// Frontier exhausted with a scored root move
    Done,
    /// Frontier exhausted without any scored move
    Fallback,
}

/// How the returned move was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Root move of the highest-scoring expansion
    Best { mv: Move, score: i32 },
    /// Random legal move
    Fallback(Move),
    /// The acting side cannot move
    Blocked,
}

impl Outcome {
    pub fn chosen(&self) -> Option<Move> {
        match *self {
            Outcome::Best { mv, .. } | Outcome::Fallback(mv) => Some(mv),
            Outcome::Blocked => None,
        }
    }
}

/// Result of one engine call, with exploration counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: Outcome,
    /// Phase the search finished in
    pub phase: Phase,
    /// Distinct boards expanded (size of the visited set at exit)
    pub expanded: usize,
    /// Children pushed onto the frontier
    pub generated: usize,
    /// Popped entries discarded because their board was already expanded
    pub revisits: usize,
}

impl SearchResult {
    pub fn best_move(&self) -> Option<Move> {
        self.outcome.chosen()
    }
}

/// A snapshot plus how it was reached.
///
/// Field order matters: the derived ordering breaks frontier ties by board,
/// then path, then root move.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SearchState {
    board: Board,
    path: Vec<Move>,
    /// First move of `path`; `None` only for the start board
    root: Option<Move>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    priority: i32,
    state: SearchState,
}

/// Exploration state for one decision. Built and dropped inside a single
/// [`Engine::search`] call.
struct Search<'a> {
    who: SearchParams,
    weights: &'a Weights,
    phase: Phase,
    frontier: BinaryHeap<Reverse<Entry>>,
    visited: HashSet<Board>,
    best: Option<(i32, Move)>,
    generated: usize,
    revisits: usize,
}

impl<'a> Search<'a> {
    fn new(board: &Board, who: SearchParams, weights: &'a Weights) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(Entry {
            priority: 0,
            state: SearchState {
                board: board.clone(),
                path: Vec::new(),
                root: None,
            },
        }));
        Self {
            who,
            weights,
            phase: Phase::Initialized,
            frontier,
            visited: HashSet::new(),
            best: None,
            generated: 0,
            revisits: 0,
        }
    }

    fn run(&mut self) {
        self.phase = Phase::Expanding;

        while let Some(Reverse(entry)) = self.frontier.pop() {
            let state = entry.state;
            if !self.visited.insert(state.board.clone()) {
                self.revisits += 1;
                continue;
            }
            trace!(
                "expand priority={} depth={} root={:?}",
                entry.priority,
                state.path.len(),
                state.root
            );
            self.expand(&state);
        }

        self.phase = if self.best.is_some() {
            Phase::Done
        } else {
            Phase::Fallback
        };
    }

    fn expand(&mut self, state: &SearchState) {
        let who = self.who;

        for from in state.board.pieces(who.piece) {
            for to in destinations(&state.board, from, who.empty) {
                let mv = Move::new(from, to);
                let board = state.board.with_move(mv, who.piece, who.empty);
                let score = evaluate(&board, mv, &who, self.weights);
                let root = state.root.unwrap_or(mv);

                let mut path = Vec::with_capacity(state.path.len() + 1);
                path.extend_from_slice(&state.path);
                path.push(mv);

                let priority = path.len() as i32 + score;
                self.frontier.push(Reverse(Entry {
                    priority,
                    state: SearchState {
                        board,
                        path,
                        root: Some(root),
                    },
                }));
                self.generated += 1;

                // Best score seen anywhere in the exploration, credited to
                // the root move of its path. Ties keep the earlier one.
                if self.best.is_none_or(|(best, _)| score > best) {
                    self.best = Some((score, root));
                }
            }
        }
    }
}

/// The move-selection engine.
///
/// Holds only configuration and the fallback RNG; nothing from one search
/// survives into the next.
pub struct Engine {
    weights: Weights,
    rng: fastrand::Rng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with default weights and a randomly seeded fallback.
    pub fn new() -> Self {
        Self {
            weights: Weights::default(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Engine whose fallback choices are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            weights: Weights::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Replace the heuristic weights.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Explore every board reachable from `board` and pick a move.
    pub fn search(&mut self, board: &Board, params: &SearchParams) -> SearchResult {
        let mut search = Search::new(board, *params, &self.weights);
        search.run();

        let outcome = match search.best {
            Some((score, mv)) => Outcome::Best { mv, score },
            None => {
                info!("no scored move for side {}, picking at random", params.piece);
                match random_legal_move(&mut self.rng, board, params.piece, params.empty) {
                    Some(mv) => Outcome::Fallback(mv),
                    None => Outcome::Blocked,
                }
            }
        };

        debug!(
            "search done: phase={:?} expanded={} generated={} revisits={} outcome={:?}",
            search.phase,
            search.visited.len(),
            search.generated,
            search.revisits,
            outcome
        );

        SearchResult {
            outcome,
            phase: search.phase,
            expanded: search.visited.len(),
            generated: search.generated,
            revisits: search.revisits,
        }
    }

    /// The move to play, or `None` if the side is blocked.
    pub fn best_move(&mut self, board: &Board, params: &SearchParams) -> Option<Move> {
        self.search(board, params).best_move()
    }

    /// Decide a move for a raw row-major grid.
    ///
    /// `grid` must have exactly `rows` rows of `cols` markers each.
    pub fn execute<R: AsRef<[Marker]>>(
        &mut self,
        grid: &[R],
        rows: usize,
        cols: usize,
        empty: Marker,
        piece: Marker,
        goal_row: usize,
    ) -> Result<Option<Move>, BoardError> {
        let board = Board::from_rows(grid)?;
        if board.rows() != rows || board.cols() != cols {
            return Err(BoardError::Size {
                rows,
                cols,
                cells: board.cells().len(),
            });
        }
        let params = SearchParams {
            empty,
            piece,
            goal_row,
        };
        Ok(self.best_move(&board, &params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EMPTY, SIDE_A, SIDE_B};

    #[test]
    fn test_best_score_credited_to_root_move() {
        // Greedy would step up (score 30 vs 5). Expanding the cheaper
        // right-hand branch first finds the 35 return move, so right wins.
        let board: Board = ". #\nB .".parse().unwrap();
        let mut engine = Engine::with_seed(1);
        let result = engine.search(&board, &SearchParams::new(SIDE_B, 0));

        assert_eq!(
            result.outcome,
            Outcome::Best {
                mv: Move::new((1, 0), (1, 1)),
                score: 35
            }
        );
        assert_eq!(result.phase, Phase::Done);
        assert_eq!(result.expanded, 3);
        assert_eq!(result.generated, 4);
        assert_eq!(result.revisits, 2);
    }

    #[test]
    fn test_equal_priorities_pop_in_board_order() {
        // Equal-priority entries leave the frontier smallest board first
        // (row-major), then by path and root; that order decides the move.
        let board: Board = "B . B\n. B .".parse().unwrap();
        let mut engine = Engine::with_seed(1);
        for _ in 0..3 {
            assert_eq!(
                engine.best_move(&board, &SearchParams::new(SIDE_B, 0)),
                Some(Move::new((1, 1), (1, 2)))
            );
        }
    }

    #[test]
    fn test_frontier_entry_order() {
        // Row-major cells: [1, 3, 1, 1] < [3, 1, 1, 1]
        let small: Board = ". B\n. .".parse().unwrap();
        let large: Board = "B .\n. .".parse().unwrap();
        let entry = |board: &Board, priority, path: Vec<Move>| Entry {
            priority,
            state: SearchState {
                board: board.clone(),
                root: path.first().copied(),
                path,
            },
        };
        let up = Move::new((1, 0), (0, 0));
        let right = Move::new((1, 0), (1, 1));

        // Priority first, then board, then path
        assert!(entry(&large, 1, vec![]) < entry(&small, 2, vec![]));
        assert!(entry(&small, 5, vec![right]) < entry(&large, 5, vec![up]));
        assert!(entry(&small, 5, vec![up]) < entry(&small, 5, vec![right]));

        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(entry(&large, 5, vec![up])));
        frontier.push(Reverse(entry(&small, 5, vec![right])));
        frontier.push(Reverse(entry(&small, 5, vec![up])));
        let popped: Vec<(Board, Vec<Move>)> = std::iter::from_fn(|| frontier.pop())
            .map(|Reverse(e)| (e.state.board, e.state.path))
            .collect();
        assert_eq!(
            popped,
            vec![
                (small.clone(), vec![up]),
                (small.clone(), vec![right]),
                (large.clone(), vec![up]),
            ]
        );
    }

    #[test]
    fn test_flat_weights_keep_first_generated_move() {
        let board: Board = ". #\nB .".parse().unwrap();
        let flat = Weights {
            goal_distance: 0,
            mobility: 0,
            progress: 0,
            self_block: 0,
        };
        let mut engine = Engine::with_seed(1).with_weights(flat);
        assert_eq!(engine.weights(), &flat);
        assert_eq!(
            engine.search(&board, &SearchParams::new(SIDE_B, 0)).outcome,
            Outcome::Best {
                mv: Move::new((1, 0), (0, 0)),
                score: 0
            }
        );
    }

    #[test]
    fn test_exhaustive_exploration_counts() {
        // A lone piece can reach all nine cells
        let board: Board = ". . .\n. . .\n. . B".parse().unwrap();
        let result = Engine::with_seed(1).search(&board, &SearchParams::new(SIDE_B, 0));

        assert_eq!(result.expanded, 9);
        assert_eq!(result.generated, 24);
        assert_eq!(result.revisits, 1 + 24 - 9);
    }

    #[test]
    fn test_blocked_side() {
        let board: Board = "A A A\n# # #\nB B B".parse().unwrap();
        let result = Engine::with_seed(1).search(&board, &SearchParams::new(SIDE_B, 0));

        assert_eq!(result.outcome, Outcome::Blocked);
        assert_eq!(result.phase, Phase::Fallback);
        assert_eq!(result.expanded, 1);
        assert_eq!(result.generated, 0);
        assert_eq!(result.best_move(), None);
    }

    #[test]
    fn test_no_pieces() {
        let board = Board::filled(3, 3, EMPTY);
        let mut engine = Engine::with_seed(1);
        assert_eq!(engine.best_move(&board, &SearchParams::new(SIDE_B, 0)), None);
    }

    #[test]
    fn test_single_legal_move() {
        let board: Board = "# . #\n# B #".parse().unwrap();
        let mut engine = Engine::with_seed(1);
        assert_eq!(
            engine.best_move(&board, &SearchParams::new(SIDE_B, 0)),
            Some(Move::new((1, 1), (0, 1)))
        );
    }

    #[test]
    fn test_opponent_pieces_stay_put() {
        let board = Board::standard();
        let mut engine = Engine::with_seed(1);

        let mv = engine.best_move(&board, &SearchParams::new(SIDE_A, 6)).unwrap();
        assert_eq!(board.get(mv.from), Some(SIDE_A));

        let mv = engine.best_move(&board, &SearchParams::new(SIDE_B, 0)).unwrap();
        assert_eq!(mv, Move::new((6, 1), (5, 1)));
    }

    #[test]
    fn test_repeatable() {
        let board: Board = "A A A\n# . #\n. . #\n# . #\n# . .\n. . .\nB B B".parse().unwrap();
        let params = SearchParams::new(SIDE_B, 0);
        let first = Engine::with_seed(1).search(&board, &params);
        for seed in 2..5 {
            assert_eq!(Engine::with_seed(seed).search(&board, &params), first);
        }
    }

    #[test]
    fn test_execute_raw_grid() {
        let grid = [[0u8, 1, 0], [0, 3, 0]];
        let mut engine = Engine::with_seed(1);
        assert_eq!(
            engine.execute(&grid, 2, 3, 1, 3, 0),
            Ok(Some(Move::new((1, 1), (0, 1))))
        );
        assert_eq!(
            engine.execute(&grid, 3, 3, 1, 3, 0),
            Err(BoardError::Size {
                rows: 3,
                cols: 3,
                cells: 6
            })
        );
    }

    #[test]
    fn test_custom_markers() {
        // Any byte values work as long as the caller is consistent
        let grid = [[9u8, 7], [7, 7]];
        let mut engine = Engine::with_seed(1);
        let mv = engine.execute(&grid, 2, 2, 7, 9, 1).unwrap().unwrap();
        assert_eq!(mv.from, (0, 0));
    }
}
