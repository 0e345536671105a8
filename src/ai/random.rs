use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{BoardView, Move};

use super::agent::Agent;

/// An agent that selects uniformly at random from the legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, view: &BoardView) -> Move {
        let moves = &view.legal_moves;
        assert!(!moves.is_empty(), "No legal moves available");
        let idx = self.rng.random_range(0..moves.len());
        moves[idx]
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::seeded(3);
        let state = GameState::initial();
        let view = state.view();

        for _ in 0..100 {
            let mv = agent.select_move(&view);
            assert!(view.legal_moves.contains(&mv), "move {} is not legal", mv);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent_x = RandomAgent::seeded(1);
        let mut agent_o = RandomAgent::seeded(2);
        let mut state = GameState::initial();

        loop {
            let view = state.view();
            let mv = if state.move_count() % 2 == 0 {
                agent_x.select_move(&view)
            } else {
                agent_o.select_move(&view)
            };
            assert!(state.is_legal(mv));
            state.apply_move(mv);
            if state.just_finished() {
                break;
            }
        }

        assert!(state.outcome().is_some());
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
