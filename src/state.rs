//! The state of a game in progress: board, players and turn order

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::{
    board::{Board, Token},
    error::GameError,
    player::Player,
};

/// A request to drop the acting player's token into a 1-based column
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    token: Token,
    column: usize,
}

impl Move {
    pub fn new(player: &Player, column: usize) -> Self {
        Self {
            token: player.token(),
            column,
        }
    }

    /// The token of the player making this move
    pub fn token(&self) -> Token {
        self.token
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// The answer a player gives when asked for a move
///
/// `NoLegalMove` is not a failure: it means the board offers nothing to
/// play, and the game should be treated as over.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Decision {
    Play(Move),
    NoLegalMove,
}

impl Decision {
    pub fn as_move(&self) -> Option<Move> {
        match self {
            Decision::Play(next_move) => Some(*next_move),
            Decision::NoLegalMove => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome<'a> {
    Winner(&'a Player),
    Draw,
}

/// A game of connect four for two or more players
///
/// The state only changes through [`GameState::apply_move`]. Cloning
/// copies the board, while the player list is shared.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    players: Arc<[Player]>,
    current: usize,
}

impl GameState {
    pub fn new(width: usize, height: usize, players: Vec<Player>) -> Result<Self, GameError> {
        let board = Board::new(width, height)?;

        if players.len() < 2 {
            return Err(GameError::InvalidPlayers(format!(
                "at least 2 players are needed, got {}",
                players.len()
            )));
        }
        let mut seen = HashSet::new();
        for player in players.iter() {
            if !seen.insert(player.token()) {
                return Err(GameError::InvalidPlayers(format!(
                    "token '{}' is used by more than one player",
                    player.token()
                )));
            }
        }

        Ok(Self {
            board,
            players: players.into(),
            current: 0,
        })
    }

    /// Creates a game and plays a string of 1-based column digits in turn order
    pub fn from_moves<S: AsRef<str>>(
        width: usize,
        height: usize,
        players: Vec<Player>,
        moves: S,
    ) -> Result<Self, GameError> {
        let mut state = Self::new(width, height, players)?;
        let columns = moves
            .as_ref()
            .chars()
            .map(|column_char| {
                column_char
                    .to_digit(10)
                    .map(|column| column as usize)
                    .ok_or(GameError::InvalidMoveCharacter(column_char))
            })
            .collect::<Result<Vec<_>, _>>()?;
        state.play_columns(columns)?;
        Ok(state)
    }

    /// Plays each column for whichever player is to act, stopping at the first failure
    pub fn play_columns<I>(&mut self, columns: I) -> Result<(), GameError>
    where
        I: IntoIterator<Item = usize>,
    {
        for column in columns {
            let next_move = Move::new(self.current_player(), column);
            self.apply_move(&next_move)?;
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// The player who acts after the current one
    ///
    /// In a two player game this is the opponent.
    pub fn next_player(&self) -> &Player {
        &self.players[(self.current + 1) % self.players.len()]
    }

    pub fn player_with_token(&self, token: Token) -> Option<&Player> {
        self.players.iter().find(|player| player.token() == token)
    }

    pub fn can_drop(&self, column: usize) -> Result<bool, GameError> {
        Ok(self.board.lowest_empty_row(column)?.is_some())
    }

    /// Drops the acting player's token and passes the turn on
    pub fn apply_move(&mut self, next_move: &Move) -> Result<(), GameError> {
        self.board.check_column(next_move.column())?;
        if next_move.token() != self.current_player().token() {
            return Err(GameError::NotYourTurn(next_move.token()));
        }
        self.board.drop_token(next_move.column(), next_move.token())?;
        self.current = (self.current + 1) % self.players.len();
        Ok(())
    }

    /// Returns the owner of the first uniform window in scan order
    pub fn winner(&self) -> Option<&Player> {
        self.board
            .windows()
            .find_map(|window| window.uniform_token())
            .and_then(|token| self.player_with_token(token))
    }

    pub fn is_draw(&self) -> bool {
        self.board.is_full() && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn outcome(&self) -> Option<Outcome<'_>> {
        match self.winner() {
            Some(player) => Some(Outcome::Winner(player)),
            None if self.board.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Every column that can still take a token, in ascending order
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.width()).filter(move |&column| self.can_drop(column).unwrap_or(false))
    }

    pub fn num_moves(&self) -> usize {
        (1..=self.width())
            .map(|column| self.board.column_height(column).unwrap_or(0))
            .sum()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
