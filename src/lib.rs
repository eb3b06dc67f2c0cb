pub mod config;
pub mod coords;
pub mod game;
pub mod grid;
pub mod input;
pub mod scheduler;
pub mod snake;
pub mod term;

pub use coords::Coords;
