use serde::{Deserialize, Serialize};

use crate::board::{Marble, Move};

/// Marbles each player starts with on the board.
pub const MARBLES_PER_PLAYER: u8 = 8;

/// The two playable colors. Red marbles are neutral and never assigned to a
/// player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The marble value this color's pieces carry on the grid.
    pub fn marble(self) -> Marble {
        match self {
            Color::White => Marble::White,
            Color::Black => Marble::Black,
        }
    }
}

/// One side of the game: a name, a color and the counters the rules act on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: Color,
    captured: u8,
    marbles: u8,
    last_move: Option<Move>,
}

impl Player {
    pub fn new(name: &str, color: Color) -> Self {
        Player {
            name: name.to_string(),
            color,
            captured: 0,
            marbles: MARBLES_PER_PLAYER,
            last_move: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Red marbles this player has captured so far.
    pub fn captured(&self) -> u8 {
        self.captured
    }

    /// Marbles of this player's own color still on the board.
    pub fn marbles(&self) -> u8 {
        self.marbles
    }

    /// The most recent move this player executed. Rejected moves are never
    /// recorded here.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Credit one captured red marble.
    pub fn record_capture(&mut self) {
        self.captured += 1;
    }

    /// Note that one of this player's marbles was pushed off the board.
    pub fn record_marble_lost(&mut self) {
        self.marbles -= 1;
    }

    pub fn record_last_move(&mut self, mv: Move) {
        self.last_move = Some(mv);
    }
}
