use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::game::{line_check, BoardView, MiniStatus, Move, Player, MINI};

use super::agent::Agent;

/// Weight of each relative position when picking randomly: the center is
/// preferred over corners, corners over edges.
const POSITION_WEIGHTS: [[f64; MINI]; MINI] = [
    [2.0, 1.0, 2.0],
    [1.0, 4.0, 1.0],
    [2.0, 1.0, 2.0],
];

/// A heuristic agent that tries to complete lines and otherwise plays
/// weighted-randomly.
///
/// Inside the target miniboard: complete an own line if possible, else
/// block an opponent line, else pick a weighted-random empty cell. On a
/// free move the same complete/block/random logic runs one level up, over
/// the grid of decided miniboards, to choose which open miniboard to play
/// in; candidates that point at stale or opponent miniboards are
/// discarded.
pub struct LineCompleterAgent {
    rng: StdRng,
}

impl LineCompleterAgent {
    pub fn new() -> Self {
        LineCompleterAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        LineCompleterAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, cells: &[(usize, usize)]) -> (usize, usize) {
        let idx = self.rng.random_range(0..cells.len());
        cells[idx]
    }

    fn pick_weighted(&mut self, cells: &[(usize, usize)]) -> (usize, usize) {
        *cells
            .choose_weighted(&mut self.rng, |&(r, c)| POSITION_WEIGHTS[r][c])
            .expect("candidate list is non-empty with positive weights")
    }

    /// Select a cell within the (open) miniboard at `target`.
    fn choose_cell(&mut self, view: &BoardView, target: (usize, usize)) -> Move {
        let grid = mini_grid(view, target);
        let wins = completing_cells(&grid);
        let rel = if !wins.is_empty() {
            self.pick(&wins)
        } else {
            let blocks = completing_cells(&negated(&grid));
            if !blocks.is_empty() {
                self.pick(&blocks)
            } else {
                let open: Vec<(usize, usize)> = (0..MINI)
                    .flat_map(|r| (0..MINI).map(move |c| (r, c)))
                    .filter(|&(r, c)| grid[r][c] == 0)
                    .collect();
                self.pick_weighted(&open)
            }
        };
        Move::new(target.0 * MINI + rel.0, target.1 * MINI + rel.1)
    }

    /// On a free move, choose which open miniboard to play in.
    fn choose_target(&mut self, view: &BoardView) -> (usize, usize) {
        let mover = Player::from_move_count(view.move_count);
        let mut own = [[0i8; MINI]; MINI];
        let mut opp = [[0i8; MINI]; MINI];
        for r in 0..MINI {
            for c in 0..MINI {
                match view.minis[r][c] {
                    MiniStatus::Won(p) if p == mover => own[r][c] = 1,
                    MiniStatus::Won(_) => opp[r][c] = 1,
                    _ => {}
                }
            }
        }
        let is_open = |&(r, c): &(usize, usize)| view.minis[r][c].is_open();

        // complete a macro line if an open miniboard would finish one
        let mut targets: Vec<(usize, usize)> =
            completing_cells(&own).into_iter().filter(is_open).collect();
        // otherwise deny the opponent theirs
        if targets.is_empty() {
            targets = completing_cells(&opp).into_iter().filter(is_open).collect();
        }
        // otherwise any open miniboard
        if targets.is_empty() {
            targets = (0..MINI)
                .flat_map(|r| (0..MINI).map(move |c| (r, c)))
                .filter(|cell| is_open(cell))
                .collect();
        }
        self.pick_weighted(&targets)
    }
}

impl Default for LineCompleterAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for LineCompleterAgent {
    fn select_move(&mut self, view: &BoardView) -> Move {
        let target = match view.active_mini {
            Some(target) => target,
            None => self.choose_target(view),
        };
        self.choose_cell(view, target)
    }

    fn name(&self) -> &str {
        "LineCompleter"
    }
}

/// Extract one miniboard from the perspective matrix as a 3x3 grid.
fn mini_grid(view: &BoardView, (mini_row, mini_col): (usize, usize)) -> [[i8; MINI]; MINI] {
    let mut grid = [[0i8; MINI]; MINI];
    for (r, rank) in grid.iter_mut().enumerate() {
        for (c, value) in rank.iter_mut().enumerate() {
            *value = view.perspective[mini_row * MINI + r][mini_col * MINI + c];
        }
    }
    grid
}

fn negated(grid: &[[i8; MINI]; MINI]) -> [[i8; MINI]; MINI] {
    let mut flipped = *grid;
    for rank in flipped.iter_mut() {
        for value in rank.iter_mut() {
            *value = -*value;
        }
    }
    flipped
}

/// Free cells (value 0) that, if taken by the mover (positive side),
/// would complete one of the 8 line patterns in `grid`.
fn completing_cells(grid: &[[i8; MINI]; MINI]) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for r in 0..MINI {
        for c in 0..MINI {
            if grid[r][c] != 0 {
                continue;
            }
            if line_check(|lr, lc| (lr, lc) == (r, c) || grid[lr][lc] > 0) {
                cells.push((r, c));
            }
        }
    }
    cells
}
