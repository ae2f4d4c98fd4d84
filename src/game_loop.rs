//! Frame-driven game loop.
//!
//! The host calls [`GameLoop::frame`] once per display refresh. Game logic
//! only advances every `frames_per_tick` refreshes, so the drawing rate and
//! the snake's speed are independent of each other.

use tracing::{debug, trace};

use crate::collision::{check_collisions, Outcome};
use crate::config::GameConfig;
use crate::render::{Renderer, ScoreSink, Surface};
use crate::snake::Direction;
use crate::state::GameState;

pub struct GameLoop {
    state: GameState,
    renderer: Renderer,
    frames_per_tick: u32,
    frame_count: u32,
    pending: Option<Direction>,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(config.grid);
        let frames_per_tick = config.frames_per_tick;

        GameLoop {
            state: GameState::new(config),
            renderer,
            frames_per_tick,
            frame_count: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Records a turn for the next tick. Turns are checked against the way
    /// the snake is heading right now, so a reversal or a repeat of the
    /// current direction is dropped and leaves any earlier request in place.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let heading = self.state.snake.direction();
        if !heading.can_turn_to(direction) {
            debug!(?heading, requested = ?direction, "turn ignored");
            return false;
        }

        self.pending = Some(direction);
        true
    }

    /// One display refresh. Returns the tick outcome when this frame ran the
    /// game logic.
    pub fn frame<S: Surface + ScoreSink + ?Sized>(&mut self, surface: &mut S) -> Option<Outcome> {
        self.frame_count += 1;
        if self.frame_count < self.frames_per_tick {
            return None;
        }

        self.frame_count = 0;
        Some(self.tick(surface))
    }

    /// Clear, move, collide, redraw.
    pub fn tick<S: Surface + ScoreSink + ?Sized>(&mut self, surface: &mut S) -> Outcome {
        surface.clear();

        if let Some(direction) = self.pending.take() {
            self.state.snake.set_direction(direction);
        }
        let head = self.state.snake.move_step();
        trace!(?head, "tick");

        let outcome = check_collisions(&mut self.state);
        if outcome.changes_score() {
            surface.show_score(self.state.score);
        }

        self.renderer.paint(surface, &self.state);
        outcome
    }

    /// Full reset outside of a collision, e.g. on player request
    pub fn restart<S: Surface + ScoreSink + ?Sized>(&mut self, surface: &mut S) {
        self.state.reset();
        self.pending = None;
        self.frame_count = 0;
        surface.show_score(self.state.score);
        self.redraw(surface);
    }

    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.renderer.draw(surface, &self.state);
    }
}
