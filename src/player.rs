//! Players and the two ways they can pick a move

use anyhow::Result;

use std::fmt;

use crate::{
    board::Token,
    search::{SearchConfig, Searcher},
    state::{Decision, GameState, Move},
};

/// A source of columns for manually controlled players
///
/// The driver implements this for whatever input it has (a terminal, a
/// scripted test...). Implementations should only return a column, the
/// move itself is validated when it is applied.
pub trait MoveInput {
    fn request_column(&mut self, state: &GameState, player: &Player) -> Result<usize>;
}

/// How a player chooses its moves
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Control {
    /// columns are requested from a [`MoveInput`]
    Manual,
    /// columns are chosen by minimax search
    Minimax(SearchConfig),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Player {
    name: String,
    token: Token,
    control: Control,
}

impl Player {
    pub fn new<S: Into<String>>(name: S, token: Token, control: Control) -> Self {
        Self {
            name: name.into(),
            token,
            control,
        }
    }

    pub fn manual<S: Into<String>>(name: S, token: Token) -> Self {
        Self::new(name, token, Control::Manual)
    }

    pub fn minimax<S: Into<String>>(name: S, token: Token, config: SearchConfig) -> Self {
        Self::new(name, token, Control::Minimax(config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn is_automated(&self) -> bool {
        matches!(self.control, Control::Minimax(_))
    }

    /// Asks this player for its next move in `state`
    ///
    /// Returns [`Decision::NoLegalMove`] once the game is over or no
    /// column can take a token. `input` is only consulted by manual players.
    pub fn next_move(&self, state: &GameState, input: &mut dyn MoveInput) -> Result<Decision> {
        if state.is_terminal() || state.legal_moves().next().is_none() {
            return Ok(Decision::NoLegalMove);
        }

        match &self.control {
            Control::Manual => {
                let column = input.request_column(state, self)?;
                Ok(Decision::Play(Move::new(self, column)))
            }
            Control::Minimax(config) => {
                let result = Searcher::new(config.clone()).search(state);
                // tag the move with this player so a mistimed request is refused on apply
                Ok(match result.decision {
                    Decision::Play(best) => Decision::Play(Move::new(self, best.column())),
                    Decision::NoLegalMove => Decision::NoLegalMove,
                })
            }
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.token)
    }
}
