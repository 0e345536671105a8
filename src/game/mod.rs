//! Core Ultimate Tic-Tac-Toe logic: board representation, player types,
//! the rules engine (legality, move application, undo, termination), the
//! board-view projection for external consumers, and the compact game-log
//! codec.

mod board;
mod log;
mod player;
mod state;
mod view;

pub use board::{line_check, Board, Cell, MiniStatus, Move, LINES, MINI, SIZE};
pub use log::{decode_log, encode_log};
pub use player::Player;
pub use state::{GameOutcome, GameState};
pub use view::BoardView;
