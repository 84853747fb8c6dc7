use serde::{Deserialize, Serialize};
use std::fmt;

/// Board size constant: Kuba is always played on a 7x7 grid.
pub const BOARD_SIZE: usize = 7;

/// A marble on the board. White and Black belong to the players, Red is
/// neutral and only ever leaves the board by capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marble {
    White,
    Black,
    Red,
}

impl fmt::Display for Marble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Marble::White => 'W',
            Marble::Black => 'B',
            Marble::Red => 'R',
        };
        write!(f, "{}", c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Whether the position lies on the 7x7 grid.
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The neighboring position one step in `direction`, or `None` past the
    /// board edge.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;

        if row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32 {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four push directions. `Forward` runs toward row 0, `Backward` toward
/// row 6, `Right` toward column 6 and `Left` toward column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Forward,
    Backward,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Forward,
        Direction::Backward,
    ];

    /// Row and column offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Forward => (-1, 0),
            Direction::Backward => (1, 0),
        }
    }

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        };
        write!(f, "{}", name)
    }
}

/// A push: the marble at `origin` shoved one step in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub origin: Position,
    pub direction: Direction,
}

impl Move {
    pub fn new(origin: Position, direction: Direction) -> Self {
        Move { origin, direction }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.direction)
    }
}

/// The raw 7x7 cell matrix. `None` is an empty cell.
pub type Grid = [[Option<Marble>; BOARD_SIZE]; BOARD_SIZE];

/// The game board: the cell grid plus running per-color marble counts.
///
/// The counts are adjusted one removal at a time as marbles leave the board;
/// they are never recomputed by rescanning the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    white: u8,
    black: u8,
    red: u8,
}

impl Board {
    /// Set up the standard Kuba starting position.
    pub fn new() -> Self {
        let mut grid: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];

        // White owns the top-left and bottom-right corner blocks.
        let whites = [
            (0, 0),
            (0, 1),
            (1, 0),
            (1, 1),
            (5, 5),
            (5, 6),
            (6, 5),
            (6, 6),
        ];
        // Black owns the top-right and bottom-left corner blocks.
        let blacks = [
            (0, 5),
            (0, 6),
            (1, 5),
            (1, 6),
            (5, 0),
            (5, 1),
            (6, 0),
            (6, 1),
        ];
        // Red fills a diamond around the center.
        let reds = [
            (1, 3),
            (2, 2),
            (2, 3),
            (2, 4),
            (3, 1),
            (3, 2),
            (3, 3),
            (3, 4),
            (3, 5),
            (4, 2),
            (4, 3),
            (4, 4),
            (5, 3),
        ];

        for &(row, col) in &whites {
            grid[row][col] = Some(Marble::White);
        }
        for &(row, col) in &blacks {
            grid[row][col] = Some(Marble::Black);
        }
        for &(row, col) in &reds {
            grid[row][col] = Some(Marble::Red);
        }

        Board {
            grid,
            white: whites.len() as u8,
            black: blacks.len() as u8,
            red: reds.len() as u8,
        }
    }

    /// A copy of the current grid. Mutating the copy never touches the board.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Replace the grid wholesale. The counts are left alone; a caller that
    /// pushed a marble off the board pairs this with [`Board::record_removal`].
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// The marble at `pos`, or `None` for an empty cell or an off-board
    /// position.
    pub fn marble_at(&self, pos: Position) -> Option<Marble> {
        if pos.in_bounds() {
            self.grid[pos.row][pos.col]
        } else {
            None
        }
    }

    /// Marbles still on the board, as `(white, black, red)`.
    pub fn marble_count(&self) -> (u8, u8, u8) {
        (self.white, self.black, self.red)
    }

    /// Note that one marble of the given color left the board.
    pub fn record_removal(&mut self, marble: Marble) {
        match marble {
            Marble::White => self.white -= 1,
            Marble::Black => self.black -= 1,
            Marble::Red => self.red -= 1,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:2} ", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{:2} ", row)?;
            for col in 0..BOARD_SIZE {
                match self.grid[row][col] {
                    Some(marble) => write!(f, " {} ", marble)?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::new();

        // 2x2 corner blocks for the players.
        assert_eq!(board.marble_at(Position::new(0, 0)), Some(Marble::White));
        assert_eq!(board.marble_at(Position::new(1, 1)), Some(Marble::White));
        assert_eq!(board.marble_at(Position::new(6, 6)), Some(Marble::White));
        assert_eq!(board.marble_at(Position::new(0, 6)), Some(Marble::Black));
        assert_eq!(board.marble_at(Position::new(5, 1)), Some(Marble::Black));
        assert_eq!(board.marble_at(Position::new(6, 0)), Some(Marble::Black));

        // Red diamond around the center.
        assert_eq!(board.marble_at(Position::new(1, 3)), Some(Marble::Red));
        assert_eq!(board.marble_at(Position::new(3, 1)), Some(Marble::Red));
        assert_eq!(board.marble_at(Position::new(3, 3)), Some(Marble::Red));
        assert_eq!(board.marble_at(Position::new(5, 3)), Some(Marble::Red));

        // The rest starts empty.
        assert_eq!(board.marble_at(Position::new(0, 2)), None);
        assert_eq!(board.marble_at(Position::new(3, 0)), None);
        assert_eq!(board.marble_at(Position::new(6, 3)), None);
    }

    #[test]
    fn test_initial_counts_match_grid() {
        let board = Board::new();
        assert_eq!(board.marble_count(), (8, 8, 13));

        let mut white = 0;
        let mut black = 0;
        let mut red = 0;
        for row in board.grid() {
            for cell in row {
                match cell {
                    Some(Marble::White) => white += 1,
                    Some(Marble::Black) => black += 1,
                    Some(Marble::Red) => red += 1,
                    None => {}
                }
            }
        }
        assert_eq!((white, black, red), (8, 8, 13));
    }

    #[test]
    fn test_record_removal_decrements_one_color() {
        let mut board = Board::new();

        board.record_removal(Marble::Red);
        board.record_removal(Marble::Red);
        board.record_removal(Marble::Black);

        assert_eq!(board.marble_count(), (8, 7, 11));
    }

    #[test]
    fn test_set_grid_replaces_cells() {
        let mut board = Board::new();

        let mut grid = board.grid();
        grid[3][3] = None;
        grid[0][2] = Some(Marble::White);
        board.set_grid(grid);

        assert_eq!(board.marble_at(Position::new(3, 3)), None);
        assert_eq!(board.marble_at(Position::new(0, 2)), Some(Marble::White));
    }

    #[test]
    fn test_grid_copy_does_not_alias_the_board() {
        let board = Board::new();

        let mut grid = board.grid();
        grid[0][0] = None;

        assert_eq!(grid[0][0], None);
        assert_eq!(board.marble_at(Position::new(0, 0)), Some(Marble::White));
    }

    #[test]
    fn test_marble_at_off_board_is_none() {
        let board = Board::new();
        assert_eq!(board.marble_at(Position::new(7, 0)), None);
        assert_eq!(board.marble_at(Position::new(0, 7)), None);
        assert_eq!(board.marble_at(Position::new(20, 20)), None);
    }

    #[test]
    fn test_step_stops_at_every_edge() {
        assert_eq!(Position::new(0, 0).step(Direction::Forward), None);
        assert_eq!(Position::new(0, 0).step(Direction::Left), None);
        assert_eq!(Position::new(6, 6).step(Direction::Backward), None);
        assert_eq!(Position::new(6, 6).step(Direction::Right), None);

        assert_eq!(
            Position::new(3, 3).step(Direction::Right),
            Some(Position::new(3, 4))
        );
        assert_eq!(
            Position::new(3, 3).step(Direction::Left),
            Some(Position::new(3, 2))
        );
        assert_eq!(
            Position::new(3, 3).step(Direction::Forward),
            Some(Position::new(2, 3))
        );
        assert_eq!(
            Position::new(3, 3).step(Direction::Backward),
            Some(Position::new(4, 3))
        );
    }

    #[test]
    fn test_opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Forward.opposite(), Direction::Backward);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(Position::new(2, 5).to_string(), "(2, 5)");
        assert_eq!(
            Move::new(Position::new(2, 5), Direction::Forward).to_string(),
            "(2, 5) forward"
        );
        assert_eq!(Marble::Red.to_string(), "R");
    }
}
