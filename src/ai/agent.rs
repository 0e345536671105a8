use crate::game::{BoardView, Move};

/// Universal interface for move-selecting agents.
///
/// An agent sees the game only through the [`BoardView`] it is handed and
/// must return one move drawn from the view's legal-move list. Returning
/// anything else is a contract violation; drivers detect it with
/// [`GameState::is_legal`](crate::game::GameState::is_legal) and report it
/// as [`MatchError::IllegalMove`](crate::error::MatchError::IllegalMove)
/// rather than applying the move.
pub trait Agent {
    /// Select a move given the current board view.
    fn select_move(&mut self, view: &BoardView) -> Move;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
