use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::board::Board;
use crate::error::Result;
use crate::point::{Direction, Point};
use crate::render::{Paint, Renderer, BUFFER_OFFSET};
use crate::snake::{MoveResult, Snake};

/// Random samples tried before falling back to scanning the free cells.
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

pub const DEATH_MESSAGE: &str = "You Have Died!!";

/// Game state plus the renderer it paints into. Only the driver thread
/// touches it.
pub struct SnakeGame<D, R> {
    board: Board,
    snake: Snake,
    direction: Direction,
    food: Option<Point>,
    score: u32,
    renderer: D,
    rng: R,
}

impl<D: Renderer, R: Rng> SnakeGame<D, R> {
    /// Builds a game for `board`. Call [`setup`](Self::setup) before the
    /// first step.
    pub fn new(board: Board, renderer: D, rng: R) -> Self {
        SnakeGame {
            board,
            snake: Snake::new(board.center()),
            direction: Direction::default(),
            food: None,
            score: 0,
            renderer,
            rng,
        }
    }

    /// Starts a fresh round: clean screen, borders, one-segment snake in the
    /// center heading right, new food and a zero score.
    pub fn setup(&mut self) -> Result<()> {
        self.score = 0;
        self.direction = Direction::default();
        self.renderer.clear()?;
        self.draw_borders()?;

        self.snake = Snake::new(self.board.center());
        self.renderer.draw_cell(self.snake.head(), Paint::Snake, true)?;
        self.place_food()?;
        self.renderer.flush()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances the snake one cell and paints the difference.
    ///
    /// A crash leaves the state and the screen untouched; the caller decides
    /// what happens next.
    pub fn step(&mut self) -> Result<MoveResult> {
        let new_head = self.snake.head().add(self.direction.vector());

        if self.is_death(new_head) {
            return Ok(MoveResult::Crashed);
        }

        self.snake.push_head(new_head);

        let ate = self.food == Some(new_head);
        let old_tail = if ate {
            self.score += 1;
            self.place_food()?;
            None
        } else {
            let tail = self.snake.pop_tail();
            if let Some(pos) = tail {
                self.renderer.draw_cell(pos, Paint::Empty, true)?;
            }
            tail
        };

        self.renderer.draw_cell(new_head, Paint::Snake, true)?;
        Ok(MoveResult::Moved { new_head, old_tail, ate })
    }

    /// Out of bounds, or on top of any current segment (the tail included).
    pub fn is_death(&self, pos: Point) -> bool {
        !self.board.contains(pos) || self.snake.occupies(pos)
    }

    /// Picks a uniformly random free cell for the food and paints it.
    ///
    /// Leaves the board without food when the snake fills every cell.
    pub fn place_food(&mut self) -> Result<()> {
        self.food = self.pick_free_cell();

        match self.food {
            Some(pos) => {
                debug!(x = pos.x, y = pos.y, "food placed");
                self.renderer.draw_cell(pos, Paint::Food, true)?;
            }
            None => warn!(length = self.snake.len(), "no free cell left for food"),
        }
        Ok(())
    }

    /// Puts the food on a specific cell, replacing the current one.
    pub fn set_food(&mut self, pos: Point) -> Result<()> {
        if let Some(old) = self.food.take() {
            self.renderer.draw_cell(old, Paint::Empty, true)?;
        }
        self.food = Some(pos);
        self.renderer.draw_cell(pos, Paint::Food, true)
    }

    /// Replaces the snake, for starting from an arbitrary position.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn draw_score(&mut self) -> Result<()> {
        let pos = Point::new((self.board.width() + BUFFER_OFFSET.x + 1) * 2, 0);
        let text = format!("Score: {}", self.score);
        self.renderer.draw_text(pos, &text)
    }

    /// Writes the death message centered over the play field.
    pub fn show_death(&mut self) -> Result<()> {
        let screen_cols = (self.board.width() + 2) * 2;
        let col = ((screen_cols - DEATH_MESSAGE.len() as i32) / 2).max(0);
        let row = self.board.height() / 2 + BUFFER_OFFSET.y;

        self.renderer.draw_text(Point::new(col, row), DEATH_MESSAGE)?;
        self.renderer.flush()
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut D {
        &mut self.renderer
    }

    ///////////////////////////////////////////////////////////////////////////

    fn pick_free_cell(&mut self) -> Option<Point> {
        let (w, h) = (self.board.width(), self.board.height());

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let pos = Point::new(self.rng.gen_range(0..w), self.rng.gen_range(0..h));
            if !self.snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Crowded board: choose among what's left instead of sampling forever.
        let free: Vec<Point> = self.board.cells().filter(|p| !self.snake.occupies(*p)).collect();
        free.choose(&mut self.rng).copied()
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (w, h) = (self.board.width(), self.board.height());

        for y in 0..h + 2 {
            self.renderer.draw_cell(Point::new(0, y), Paint::Wall, false)?;
            self.renderer.draw_cell(Point::new(w + 1, y), Paint::Wall, false)?;
        }

        for x in 1..w + 1 {
            self.renderer.draw_cell(Point::new(x, 0), Paint::Wall, false)?;
            self.renderer.draw_cell(Point::new(x, h + 1), Paint::Wall, false)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCall, RecordingRenderer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(w: i32, h: i32) -> SnakeGame<RecordingRenderer, StdRng> {
        let board = Board::new(w, h).unwrap();
        let mut g = SnakeGame::new(board, RecordingRenderer::new(), StdRng::seed_from_u64(7));
        g.setup().unwrap();
        g
    }

    #[test]
    fn setup_resets_state() {
        let g = game(20, 20);
        assert_eq!(g.snake().len(), 1);
        assert_eq!(g.snake().head(), Point::new(10, 10));
        assert_eq!(g.direction(), Direction::Right);
        assert_eq!(g.score(), 0);
        assert!(g.food().is_some());
        assert_ne!(g.food(), Some(g.snake().head()));
    }

    #[test]
    fn setup_starts_with_a_clear_screen() {
        let g = game(4, 4);
        assert_eq!(g.renderer().calls.first(), Some(&DrawCall::Clear));
    }

    #[test]
    fn border_surrounds_the_field() {
        let g = game(3, 2);
        let walls: Vec<Point> = g
            .renderer()
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Cell { pos, paint: Paint::Wall, buffered: false } => Some(*pos),
                _ => None,
            })
            .collect();

        // (3 + 2) * (2 + 2) minus the 3x2 interior.
        assert_eq!(walls.len(), 14);
        for x in 0..5 {
            assert!(walls.contains(&Point::new(x, 0)));
            assert!(walls.contains(&Point::new(x, 3)));
        }
        for y in 0..4 {
            assert!(walls.contains(&Point::new(0, y)));
            assert!(walls.contains(&Point::new(4, y)));
        }
    }

    #[test]
    fn plain_move_erases_the_tail() {
        let mut g = game(10, 10);
        g.set_food(Point::new(0, 0)).unwrap();
        g.renderer_mut().take();

        let res = g.step().unwrap();
        assert_eq!(
            res,
            MoveResult::Moved { new_head: Point::new(6, 5), old_tail: Some(Point::new(5, 5)), ate: false }
        );
        assert_eq!(g.renderer().cells(Paint::Empty), vec![Point::new(5, 5)]);
        assert_eq!(g.renderer().cells(Paint::Snake), vec![Point::new(6, 5)]);
    }

    #[test]
    fn crash_changes_nothing() {
        let mut g = game(1, 1);
        g.renderer_mut().take();

        assert_eq!(g.step().unwrap(), MoveResult::Crashed);
        assert_eq!(g.snake().head(), Point::new(0, 0));
        assert!(g.renderer().calls.is_empty());
    }

    #[test]
    fn full_board_leaves_no_food() {
        let mut g = game(1, 1);
        assert_eq!(g.food(), None);
        g.place_food().unwrap();
        assert_eq!(g.food(), None);
    }

    #[test]
    fn food_lands_on_the_only_free_cell() {
        let mut g = game(2, 1);
        assert_eq!(g.snake().head(), Point::new(1, 0));

        for _ in 0..20 {
            g.place_food().unwrap();
            assert_eq!(g.food(), Some(Point::new(0, 0)));
        }
    }

    #[test]
    fn score_is_drawn_right_of_the_border() {
        let mut g = game(20, 20);
        g.renderer_mut().take();
        g.draw_score().unwrap();
        assert_eq!(
            g.renderer().calls,
            vec![DrawCall::Text { pos: Point::new(44, 0), text: "Score: 0".into() }]
        );
    }
}
