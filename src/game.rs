use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{BOARD_SIZE, Board, Direction, Grid, Marble, Move, Position};
use crate::player::{Color, Player};

/// Captured red marbles needed to win.
pub const CAPTURES_TO_WIN: u8 = 7;

/// Caller errors. Illegal moves are not errors; they come back as
/// `Ok(false)` from [`KubaGame::make_move`].
#[derive(Debug, Error)]
pub enum KubaError {
    #[error("Player {0:?} is not part of this game")]
    UnknownPlayer(String),
}

/// A complete two-player Kuba game.
///
/// Players are addressed by name. Either player may make the opening move;
/// after that the engine enforces alternation itself. A game is over once
/// [`KubaGame::winner`] is set, and from then on every move is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubaGame {
    board: Board,
    players: [Player; 2],
    current_turn: Option<usize>,
    winner: Option<usize>,
}

impl KubaGame {
    /// Start a fresh game between two named players. Names and colors are
    /// expected to be distinct.
    pub fn new(player_one: (&str, Color), player_two: (&str, Color)) -> Self {
        KubaGame {
            board: Board::new(),
            players: [
                Player::new(player_one.0, player_one.1),
                Player::new(player_two.0, player_two.1),
            ],
            current_turn: None,
            winner: None,
        }
    }

    /// Name of the player whose turn it is, or `None` before the opening
    /// move.
    pub fn current_turn(&self) -> Option<&str> {
        self.current_turn.map(|seat| self.players[seat].name())
    }

    /// Name of the winner once the game is decided.
    pub fn winner(&self) -> Option<&str> {
        self.winner.map(|seat| self.players[seat].name())
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Red marbles captured by the named player.
    pub fn captured(&self, name: &str) -> Result<u8, KubaError> {
        Ok(self.players[self.seat(name)?].captured())
    }

    /// Marbles still on the board, as `(white, black, red)`.
    pub fn marble_count(&self) -> (u8, u8, u8) {
        self.board.marble_count()
    }

    /// The marble at `pos`, or `None` for an empty cell or an off-board
    /// position.
    pub fn get_marble(&self, pos: Position) -> Option<Marble> {
        self.board.marble_at(pos)
    }

    /// A copy of the full grid, e.g. for rendering.
    pub fn grid(&self) -> Grid {
        self.board.grid()
    }

    /// Every move `make_move` would execute for the named player on the
    /// current board. The turn marker is not consulted; callers usually ask
    /// for the player whose turn it is. Empty once the game is decided.
    pub fn legal_moves(&self, name: &str) -> Result<Vec<Move>, KubaError> {
        let seat = self.seat(name)?;
        if self.winner.is_some() {
            return Ok(Vec::new());
        }

        let grid = self.board.grid();
        let own = self.players[seat].color().marble();
        let opponent_last = self.players[1 - seat].last_move();

        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if grid[row][col] != Some(own) {
                    continue;
                }
                let origin = Position::new(row, col);
                for direction in Direction::ALL {
                    if !open_behind(&grid, origin, direction) {
                        continue;
                    }
                    if reverses_opponent_move(&grid, origin, direction, opponent_last) {
                        continue;
                    }
                    // A push that would shove the mover's own marble off the
                    // board is illegal.
                    let (ejected, _) = push_line(&grid, origin, direction);
                    if ejected == Some(own) {
                        continue;
                    }
                    moves.push(Move::new(origin, direction));
                }
            }
        }
        Ok(moves)
    }

    /// Try to push the marble at `origin` one step in `direction` on behalf
    /// of the named player.
    ///
    /// `Ok(true)` means the move was executed. `Ok(false)` means the move is
    /// illegal; rejections for an off-board origin, a blocked marble, a
    /// wrong-color marble, a reversal of the opponent's last move, or a
    /// self-elimination still hand the turn to the opponent. Moves on a
    /// decided game and out-of-turn moves are rejected without moving the
    /// turn marker. An unknown `name` is a caller error and comes back as
    /// [`KubaError::UnknownPlayer`] instead.
    pub fn make_move(
        &mut self,
        name: &str,
        origin: Position,
        direction: Direction,
    ) -> Result<bool, KubaError> {
        let seat = self.seat(name)?;

        if self.winner.is_some() {
            return Ok(false);
        }

        // Out of turn. A fresh game has no turn marker yet and lets either
        // player open.
        if self.current_turn.is_some_and(|turn| turn != seat) {
            return Ok(false);
        }

        // Every rejection from here on passes the turn to the opponent.
        if !origin.in_bounds() {
            self.pass_turn(seat);
            return Ok(false);
        }

        let grid = self.board.grid();

        if !open_behind(&grid, origin, direction) {
            self.pass_turn(seat);
            return Ok(false);
        }

        let own = self.players[seat].color().marble();
        if grid[origin.row][origin.col] != Some(own) {
            self.pass_turn(seat);
            return Ok(false);
        }

        let opponent = 1 - seat;
        if reverses_opponent_move(&grid, origin, direction, self.players[opponent].last_move()) {
            self.pass_turn(seat);
            return Ok(false);
        }

        let (ejected, pushed) = push_line(&grid, origin, direction);
        match ejected {
            // Shoving your own marble off the board is forbidden; the pushed
            // grid is discarded.
            Some(marble) if marble == own => {
                self.pass_turn(seat);
                Ok(false)
            }
            Some(Marble::Red) => {
                self.board.set_grid(pushed);
                self.board.record_removal(Marble::Red);
                self.players[seat].record_capture();
                self.players[seat].record_last_move(Move::new(origin, direction));
                self.pass_turn(seat);
                if self.players[seat].captured() == CAPTURES_TO_WIN {
                    self.winner = Some(seat);
                }
                Ok(true)
            }
            // An opponent marble went over the edge.
            Some(marble) => {
                self.board.set_grid(pushed);
                self.board.record_removal(marble);
                self.players[opponent].record_marble_lost();
                self.players[seat].record_last_move(Move::new(origin, direction));
                self.pass_turn(seat);
                if self.players[opponent].marbles() == 0 {
                    self.winner = Some(seat);
                }
                Ok(true)
            }
            // The run ended on an empty cell; nothing left the board.
            None => {
                self.board.set_grid(pushed);
                self.players[seat].record_last_move(Move::new(origin, direction));
                self.pass_turn(seat);
                Ok(true)
            }
        }
    }

    fn seat(&self, name: &str) -> Result<usize, KubaError> {
        self.players
            .iter()
            .position(|player| player.name() == name)
            .ok_or_else(|| KubaError::UnknownPlayer(name.to_string()))
    }

    fn pass_turn(&mut self, seat: usize) {
        self.current_turn = Some(1 - seat);
    }
}

/// Whether the cell one step behind `origin` (opposite the push) is open.
/// A marble flush against the edge counts as open: the push can start there.
fn open_behind(grid: &Grid, origin: Position, direction: Direction) -> bool {
    match origin.step(direction.opposite()) {
        Some(behind) => grid[behind.row][behind.col].is_none(),
        None => true,
    }
}

/// Whether pushing from `origin` in `direction` would exactly undo the
/// opponent's previous move: an opposite-direction push along the same line,
/// with an unbroken run of marbles from `origin` up to the cell the opponent
/// vacated.
fn reverses_opponent_move(
    grid: &Grid,
    origin: Position,
    direction: Direction,
    opponent_last: Option<Move>,
) -> bool {
    let Some(last) = opponent_last else {
        return false;
    };
    if last.direction != direction.opposite() {
        return false;
    }
    let same_line = match direction {
        Direction::Right | Direction::Left => origin.row == last.origin.row,
        Direction::Forward | Direction::Backward => origin.col == last.origin.col,
    };
    if !same_line {
        return false;
    }

    let mut cursor = origin;
    loop {
        if cursor == last.origin {
            return true;
        }
        // An empty cell before the opponent's origin means the line changed
        // since their move; the push no longer undoes it.
        if grid[cursor.row][cursor.col].is_none() {
            return false;
        }
        match cursor.step(direction) {
            Some(next) => cursor = next,
            None => return false,
        }
    }
}

/// Shift the run of marbles starting at `origin` one step in `direction`.
///
/// The run extends from the origin to the first empty cell or the board
/// edge, whichever comes first. The whole run moves one step and the origin
/// is left empty. Returns the ejected value, `Some` marble that fell off the
/// edge or `None` when the run ended on an empty cell, together with the
/// pushed grid. The input grid is not modified.
fn push_line(grid: &Grid, origin: Position, direction: Direction) -> (Option<Marble>, Grid) {
    let mut pushed = *grid;

    let mut run = vec![origin];
    let mut cursor = origin;
    let ejected = loop {
        if pushed[cursor.row][cursor.col].is_none() {
            break None;
        }
        match cursor.step(direction) {
            Some(next) => {
                run.push(next);
                cursor = next;
            }
            // The run is flush against the edge; its far marble falls off.
            None => break pushed[cursor.row][cursor.col],
        }
    };

    for i in (1..run.len()).rev() {
        pushed[run[i].row][run[i].col] = pushed[run[i - 1].row][run[i - 1].col];
    }
    pushed[origin.row][origin.col] = None;

    (ejected, pushed)
}
