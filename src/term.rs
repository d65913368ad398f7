use std::io::{stdout, Stdout, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute, queue, terminal};

use crate::board::Board;
use crate::error::Result;
use crate::input::{map_key, Key, KeySource};
use crate::point::Point;
use crate::render::{screen_cell, Paint, Renderer, BUFFER_OFFSET};

const WINDOW_TITLE: &str = "Snake";
const CELL: &str = "  ";

fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Wall => Color::White,
        Paint::Snake => Color::Red,
        Paint::Food => Color::Green,
        Paint::Empty => Color::Reset,
    }
}

/// Owns the real terminal: screen mode, cursor, and the drawing calls.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(
            self.stdout,
            ResetColor,
            terminal::Clear(ClearType::All),
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Whether `board`, its border and the score line fit on screen.
    pub fn fits(board: Board) -> Result<bool> {
        let (cols, rows) = terminal::size()?;
        let needed_cols = (board.width() + BUFFER_OFFSET.x * 2) * 2 + "Score: 0000".len() as i32;
        let needed_rows = board.height() + BUFFER_OFFSET.y * 2;
        Ok(needed_cols <= cols as i32 && needed_rows <= rows as i32)
    }

    fn move_to(&mut self, pos: Point) -> Result<()> {
        // Anything left of or above the screen is simply not drawn.
        let (x, y) = (pos.x.clamp(0, u16::MAX as i32), pos.y.clamp(0, u16::MAX as i32));
        queue!(self.stdout, cursor::MoveTo(x as u16, y as u16))?;
        Ok(())
    }
}

impl Renderer for TermManager {
    fn draw_cell(&mut self, pos: Point, paint: Paint, buffered: bool) -> Result<()> {
        self.move_to(screen_cell(pos, buffered))?;
        queue!(self.stdout, SetBackgroundColor(paint_color(paint)), Print(CELL), ResetColor)?;
        Ok(())
    }

    fn draw_text(&mut self, pos: Point, text: &str) -> Result<()> {
        self.move_to(pos)?;
        queue!(self.stdout, ResetColor, Print(text))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, ResetColor, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Resizing the window can bring the cursor back.
        queue!(self.stdout, cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Blocking key reader over crossterm's event queue.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(ev) = event::read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(map_key(ev));
                }
            }
        }
    }
}
