use crate::error::EmptyHistoryError;

use super::board::{Board, Cell, MiniStatus, Move, MINI, SIZE};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Stale,
}

/// The full state of one game: cell ownership, miniboard decision statuses,
/// and the applied move sequence. The sequence is the sole source of truth
/// for the move count and the last move; the side to move is derived from
/// its length. Exclusively owned by the caller driving the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    history: Vec<Move>,
}

impl GameState {
    /// Create initial game state: empty board, empty history
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            history: Vec::new(),
        }
    }

    /// Rebuild a state from an externally supplied snapshot without
    /// replaying moves. Trusts its input: no validation is performed, and a
    /// snapshot whose parts disagree with each other yields a state whose
    /// behavior is unspecified.
    pub fn from_parts(
        cells: [[Cell; SIZE]; SIZE],
        minis: [[MiniStatus; MINI]; MINI],
        history: Vec<Move>,
    ) -> Self {
        GameState {
            board: Board::from_parts(cells, minis),
            history,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The applied move sequence, in play order
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves played so far
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// The side to move, derived from move-count parity
    pub fn player_to_move(&self) -> Player {
        Player::from_move_count(self.move_count())
    }

    /// The most recently applied move, if any
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// The miniboard the next move is forced into, or `None` for a free
    /// move. The target is the relative position of the last move within
    /// its own miniboard; the constraint is lifted when that miniboard is
    /// no longer open. Also `None` before the first move.
    pub fn active_mini(&self) -> Option<(usize, usize)> {
        let (mini_row, mini_col) = self.last_move()?.rel();
        if self.board.mini_status(mini_row, mini_col).is_open() {
            Some((mini_row, mini_col))
        } else {
            None
        }
    }

    /// Cells playable on the next move. First move: all 81 cells. Forced
    /// move: every unowned cell of the target miniboard. Free move: every
    /// unowned cell of every open miniboard. Empty only when no miniboard
    /// is open.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        match self.active_mini() {
            Some((mini_row, mini_col)) => {
                self.push_empty_cells(mini_row, mini_col, &mut moves);
            }
            None => {
                // first move, or the forced target is already decided
                for mini_row in 0..MINI {
                    for mini_col in 0..MINI {
                        if self.board.mini_status(mini_row, mini_col).is_open() {
                            self.push_empty_cells(mini_row, mini_col, &mut moves);
                        }
                    }
                }
            }
        }
        moves
    }

    fn push_empty_cells(&self, mini_row: usize, mini_col: usize, moves: &mut Vec<Move>) {
        for r in 0..MINI {
            for c in 0..MINI {
                let (row, col) = (mini_row * MINI + r, mini_col * MINI + c);
                if self.board.get(row, col) == Cell::Empty {
                    moves.push(Move::new(row, col));
                }
            }
        }
    }

    /// Membership test against [`GameState::legal_moves`]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Apply a move the caller has already confirmed legal. No legality
    /// check is performed here; applying an unchecked illegal move corrupts
    /// the state. The acting player is derived from parity before the move
    /// is recorded. At most one miniboard transitions out of `Open` per
    /// call: to `Won` if the move completes a line for the acting player,
    /// else to `Stale` if it fills the miniboard.
    pub fn apply_move(&mut self, mv: Move) {
        let player = self.player_to_move();
        self.history.push(mv);
        self.board.set(mv.row, mv.col, player.to_cell());

        let (mini_row, mini_col) = mv.mini();
        if self.board.mini_has_line(mini_row, mini_col, player) {
            self.board
                .set_mini_status(mini_row, mini_col, MiniStatus::Won(player));
        } else if self.board.mini_is_full(mini_row, mini_col) {
            self.board
                .set_mini_status(mini_row, mini_col, MiniStatus::Stale);
        }
    }

    /// Undo the most recently applied move, returning it. Undo is strictly
    /// LIFO; repeated calls unwind history in reverse order. The owning
    /// miniboard is reopened unconditionally, which is sound because only
    /// the move being undone could have decided it. On an empty history the
    /// state is untouched and [`EmptyHistoryError`] is reported.
    pub fn undo_move(&mut self) -> Result<Move, EmptyHistoryError> {
        let mv = self.history.pop().ok_or(EmptyHistoryError)?;
        self.board.set(mv.row, mv.col, Cell::Empty);
        let (mini_row, mini_col) = mv.mini();
        self.board
            .set_mini_status(mini_row, mini_col, MiniStatus::Open);
        Ok(mv)
    }

    /// Did the most recent move end the game? True when the player who made
    /// it has a macro-line of miniboards decided for them, or when all nine
    /// miniboards are decided. Answers only "did the last move finish it",
    /// not general position status.
    pub fn just_finished(&self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let last_player = Player::from_move_count(self.move_count() - 1);
        self.board.macro_has_line(last_player) || self.board.all_minis_decided()
    }

    /// General, non-incremental terminal query, usable on any position.
    /// `None` means the game is ongoing. Intended for occasional use such
    /// as end-of-game reporting; drivers should poll
    /// [`GameState::just_finished`] on the hot path.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.board.macro_has_line(Player::X) {
            return Some(GameOutcome::Winner(Player::X));
        }
        if self.board.macro_has_line(Player::O) {
            return Some(GameOutcome::Winner(Player::O));
        }
        if self.board.all_minis_decided() {
            return Some(GameOutcome::Stale);
        }
        None
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
