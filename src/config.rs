use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::board::Board;
use crate::error::Result;

pub const DEFAULT_WIDTH: u16 = 20;
pub const DEFAULT_HEIGHT: u16 = 20;
pub const DEFAULT_TICK_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(name = "snake")]
#[command(about = "Snake in the terminal. Arrows or WASD to steer, Esc to quit.", long_about = None)]
pub struct Args {
    /// Board width in cells (give both WIDTH and HEIGHT, or neither)
    #[arg(requires = "height", value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub width: Option<u16>,

    /// Board height in cells
    #[arg(requires = "width", value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub height: Option<u16>,

    /// Milliseconds per frame
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(10..=2000))]
    pub tick_ms: u64,

    /// Write logs to this file (filtered by RUST_LOG, default `snake=info`)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated settings the game runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board: Board,
    pub frame_interval: Duration,
}

impl GameConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let width = args.width.unwrap_or(DEFAULT_WIDTH);
        let height = args.height.unwrap_or(DEFAULT_HEIGHT);

        Ok(GameConfig {
            board: Board::new(width as i32, height as i32)?,
            frame_interval: Duration::from_millis(args.tick_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("snake").chain(argv.iter().copied()))
    }

    #[test]
    fn no_args_gives_default_board() {
        let cfg = GameConfig::from_args(&parse(&[]).unwrap()).unwrap();
        assert_eq!(cfg.board, Board::new(20, 20).unwrap());
        assert_eq!(cfg.frame_interval, Duration::from_millis(100));
    }

    #[test]
    fn two_args_set_width_and_height() {
        let cfg = GameConfig::from_args(&parse(&["30", "12"]).unwrap()).unwrap();
        assert_eq!(cfg.board.width(), 30);
        assert_eq!(cfg.board.height(), 12);
    }

    #[test]
    fn one_arg_is_a_usage_error() {
        assert!(parse(&["30"]).is_err());
    }

    #[test]
    fn three_args_is_a_usage_error() {
        assert!(parse(&["30", "12", "4"]).is_err());
    }

    #[test]
    fn non_integers_are_usage_errors() {
        assert!(parse(&["wide", "12"]).is_err());
        assert!(parse(&["10", "1.5"]).is_err());
        assert!(parse(&["0", "10"]).is_err());
        assert!(parse(&["-3", "10"]).is_err());
    }

    #[test]
    fn tick_is_tunable() {
        let args = parse(&["--tick-ms", "130"]).unwrap();
        assert_eq!(GameConfig::from_args(&args).unwrap().frame_interval, Duration::from_millis(130));
        assert!(parse(&["--tick-ms", "0"]).is_err());
    }
}
