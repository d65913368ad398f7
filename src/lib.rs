//! Terminal snake.
//!
//! A driver thread advances the snake once per frame while an input thread
//! feeds it at most one direction change per frame. Rendering goes through
//! the [`render::Renderer`] trait so the engine runs headless in tests.

pub mod board;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod point;
pub mod render;
pub mod snake;
pub mod term;

pub use board::Board;
pub use driver::{Driver, Frame};
pub use error::{Error, Result};
pub use game::SnakeGame;
pub use input::{Key, KeySource, SharedInput};
pub use point::{Direction, Point};
pub use snake::{MoveResult, Snake};
