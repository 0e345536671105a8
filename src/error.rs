use std::path::PathBuf;

use crate::game::Move;

/// Errors that can occur while decoding a compact game log.
///
/// Decoding is the one place the engine actively detects and reports
/// legality violations; both variants carry the successfully-decoded
/// prefix so a caller can resume diagnosis from a known-good state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("symbol {symbol:?} at ply {index} is outside the move alphabet (decoded prefix: {prefix:?})")]
    UnknownSymbol {
        index: usize,
        symbol: char,
        prefix: String,
    },

    #[error("move {mv} from symbol {symbol:?} at ply {index} is illegal (decoded prefix: {prefix:?})")]
    IllegalMove {
        index: usize,
        symbol: char,
        mv: Move,
        prefix: String,
    },
}

/// Undo was requested on a board with no moves played. Non-fatal: the
/// state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot undo: no moves have been played")]
pub struct EmptyHistoryError;

/// Errors raised by a match driver enforcing the agent contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("agent '{agent}' selected illegal move {mv} (legal: {legal:?})")]
    IllegalMove {
        agent: String,
        mv: Move,
        legal: Vec<Move>,
    },

    #[error("unknown agent kind '{0}' (expected 'random' or 'line-completer')")]
    UnknownAgent(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_error_display() {
        assert_eq!(
            EmptyHistoryError.to_string(),
            "cannot undo: no moves have been played"
        );
    }

    #[test]
    fn test_match_error_display() {
        let err = MatchError::IllegalMove {
            agent: "random".to_string(),
            mv: Move::new(4, 4),
            legal: vec![Move::new(0, 0)],
        };
        assert_eq!(
            err.to_string(),
            "agent 'random' selected illegal move (4, 4) (legal: [Move { row: 0, col: 0 }])"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("selfplay.games must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: selfplay.games must be > 0"
        );
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnknownSymbol {
            index: 3,
            symbol: '~',
            prefix: " *H".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "symbol '~' at ply 3 is outside the move alphabet (decoded prefix: \" *H\")"
        );
    }
}
