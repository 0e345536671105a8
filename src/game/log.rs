//! Compact textual encoding of a whole game: one printable character per
//! ply, mapping each move to `' '` + row*9 + col. The format carries no
//! board-size or starting-state metadata; logs are decodable only against a
//! fresh initial board.

use crate::error::DecodeError;

use super::board::{Move, SIZE};
use super::state::GameState;

/// First character of the 81-symbol alphabet (space).
const OFFSET: u8 = 32;
/// One symbol per cell position.
const ALPHABET: usize = SIZE * SIZE;

/// Serialize the move sequence of `state` as one character per ply, in
/// play order. Lossless for any state reached from the initial position.
pub fn encode_log(state: &GameState) -> String {
    state
        .history()
        .iter()
        .map(|mv| char::from(OFFSET + mv.index() as u8))
        .collect()
}

/// Replay an encoded log against a fresh board, checking legality before
/// each apply. On failure the error carries the successfully-decoded
/// prefix and the offending symbol.
pub fn decode_log(text: &str) -> Result<GameState, DecodeError> {
    let mut state = GameState::initial();
    for (pos, symbol) in text.char_indices() {
        let code = (symbol as u32).wrapping_sub(u32::from(OFFSET));
        if code >= ALPHABET as u32 {
            return Err(DecodeError::UnknownSymbol {
                index: state.move_count(),
                symbol,
                prefix: text[..pos].to_string(),
            });
        }
        let mv = Move::from_index(code as usize);
        if !state.is_legal(mv) {
            return Err(DecodeError::IllegalMove {
                index: state.move_count(),
                symbol,
                mv,
                prefix: text[..pos].to_string(),
            });
        }
        state.apply_move(mv);
    }
    Ok(state)
}
