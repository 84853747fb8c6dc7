pub mod board;
pub mod game;
pub mod player;

pub use board::*;
pub use game::*;
pub use player::*;
