use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::config::GameConfig;
use crate::food::Food;
use crate::snake::{Direction, Snake};

/// Everything a tick reads and writes. Owned by the game loop and handed by
/// reference to movement, collision and rendering.
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let food = Food::random(&mut rng, config.grid, config.board_size);

        GameState { snake: initial_snake(&config), food, score: 0, config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Puts snake and score back to their starting values and moves the food.
    /// Calling it twice in a row leaves the snake and score unchanged.
    pub fn reset(&mut self) {
        self.snake = initial_snake(&self.config);
        self.score = 0;
        self.relocate_food();
    }

    pub fn relocate_food(&mut self) {
        self.food.relocate(&mut self.rng, self.config.grid, self.config.board_size);
        debug!(food = ?self.food.position, "food placed");
    }
}

fn initial_snake(config: &GameConfig) -> Snake {
    Snake::new(
        (config.start_x, config.start_y),
        Direction::Right,
        config.grid,
        config.initial_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> GameConfig {
        GameConfig { seed: Some(9), ..Default::default() }
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(seeded());
        assert_eq!(state.snake.head(), (160, 160));
        assert_eq!(state.snake.velocity(), (16, 0));
        assert_eq!(state.snake.max_length(), 4);
        assert!(state.snake.body().is_empty());
        assert_eq!(state.score, 0);

        let (fx, fy) = state.food.position;
        assert_eq!((fx % 16, fy % 16), (0, 0));
        assert!(fx < 400 && fy < 400);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(seeded());
        state.reset();
        state.reset();

        assert_eq!(state.snake.head(), (160, 160));
        assert_eq!(state.snake.velocity(), (16, 0));
        assert_eq!(state.snake.max_length(), 4);
        assert!(state.snake.body().is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut state = GameState::new(seeded());
        state.snake.set_direction(Direction::Down);
        state.snake.move_step();
        state.snake.grow();
        state.score = 12;

        state.reset();

        assert_eq!(state.snake.head(), (160, 160));
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.max_length(), 4);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameState::new(seeded());
        let b = GameState::new(seeded());
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_food_may_land_on_snake() {
        use crate::food::random_cell;

        // 4x4 board with the snake on three of its sixteen cells
        let config = GameConfig {
            board_size: 64,
            start_x: 0,
            start_y: 0,
            seed: Some(21),
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.snake = Snake::new((0, 16), Direction::Right, 16, 4);
        for _ in 0..3 {
            state.snake.move_step();
        }
        assert_eq!(state.snake.body().len(), 3);

        // Same seed, drawn by hand: each relocation is exactly one draw
        let mut expected = StdRng::seed_from_u64(21);
        random_cell(&mut expected, 16, 64);

        let mut on_body = 0;
        for _ in 0..200 {
            state.relocate_food();
            assert_eq!(state.food.position, random_cell(&mut expected, 16, 64));
            if state.snake.body().contains(&state.food.position) {
                on_body += 1;
            }
        }
        assert!(on_body > 0);
    }
}
