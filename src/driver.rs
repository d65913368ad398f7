use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::game::SnakeGame;
use crate::input::SharedInput;
use crate::render::Renderer;
use crate::snake::MoveResult;

/// What a single frame ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Moved,
    Ate,
    /// The snake died and a fresh round has been set up.
    Restarted,
}

/// The authoritative game loop. Owns the engine; shares only the input slot.
pub struct Driver<D, R> {
    game: SnakeGame<D, R>,
    shared: Arc<SharedInput>,
    frame_interval: Duration,
}

impl<D: Renderer, R: Rng> Driver<D, R> {
    pub fn new(game: SnakeGame<D, R>, shared: Arc<SharedInput>, frame_interval: Duration) -> Self {
        Driver { game, shared, frame_interval }
    }

    /// Sets up the first round, then runs frames until the input channel
    /// stops the game. Shutdown waits for the current frame to finish.
    pub fn run(&mut self) -> Result<()> {
        self.restart()?;

        while self.shared.is_running() {
            self.tick()?;
            sleep(self.frame_interval);
        }

        info!(score = self.game.score(), "game stopped");
        Ok(())
    }

    /// One frame: move, handle death or food, paint, open the input window.
    pub fn tick(&mut self) -> Result<Frame> {
        self.game.set_direction(self.shared.take_direction());

        let frame = match self.game.step()? {
            MoveResult::Crashed => {
                info!(score = self.game.score(), length = self.game.snake().len(), "snake died");
                self.shared.begin_ack();
                self.game.show_death()?;
                self.shared.wait_for_ack();
                self.restart()?;
                return Ok(Frame::Restarted);
            }
            MoveResult::Moved { ate: true, .. } => Frame::Ate,
            MoveResult::Moved { .. } => Frame::Moved,
        };

        self.shared.mark_frame_ready();
        self.game.draw_score()?;
        self.game.renderer_mut().flush()?;
        Ok(frame)
    }

    pub fn game(&self) -> &SnakeGame<D, R> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut SnakeGame<D, R> {
        &mut self.game
    }

    fn restart(&mut self) -> Result<()> {
        self.game.setup()?;
        self.shared.reset(self.game.direction());
        self.game.draw_score()?;
        self.game.renderer_mut().flush()
    }
}
