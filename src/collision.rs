//! Collision detection, run once per tick after the snake has moved.

use tracing::info;

use crate::snake::Cell;
use crate::state::GameState;

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// Result of checking one tick. A round can end and the fresh snake can
/// still land on the food in the same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub collision: Option<Collision>,
    pub ate_food: bool,
}

impl Outcome {
    pub const CLEAR: Outcome = Outcome { collision: None, ate_food: false };

    pub fn reset(collision: Collision) -> Self {
        Outcome { collision: Some(collision), ate_food: false }
    }

    pub fn ate() -> Self {
        Outcome { collision: None, ate_food: true }
    }

    /// Whether the score shown to the player needs refreshing
    pub fn changes_score(&self) -> bool {
        self.collision.is_some() || self.ate_food
    }
}

pub fn hits_wall(head: Cell, board_size: i32) -> bool {
    let (x, y) = head;
    x < 0 || x >= board_size || y < 0 || y >= board_size
}

/// Runs the wall, self and food checks in that order. Each one looks at the
/// state as the previous check left it, so after a reset the food check sees
/// the snake back at its start cell.
pub fn check_collisions(state: &mut GameState) -> Outcome {
    let mut outcome = Outcome::CLEAR;

    let head = state.snake.head();
    if hits_wall(head, state.config().board_size) {
        end_round(state, Collision::Wall);
        outcome.collision = Some(Collision::Wall);
    }

    if state.snake.bites_itself() {
        end_round(state, Collision::SelfBite);
        outcome.collision.get_or_insert(Collision::SelfBite);
    }

    if state.food.is_at(state.snake.head()) {
        state.snake.grow();
        state.score += 1;
        state.relocate_food();
        info!(score = state.score, length = state.snake.max_length(), "food eaten");
        outcome.ate_food = true;
    }

    outcome
}

fn end_round(state: &mut GameState, collision: Collision) {
    info!(?collision, head = ?state.snake.head(), score = state.score, "round over");
    state.reset();
}
