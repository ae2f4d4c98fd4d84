//! Drawing the board onto whatever surface the host provides.

use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
}

pub const FOOD_COLOR: Color = Color::Red;
pub const SNAKE_COLOR: Color = Color::Green;

/// A square drawing area in board pixels
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
}

/// Where the current score is shown
pub trait ScoreSink {
    fn show_score(&mut self, score: u32);
}

pub struct Renderer {
    grid: i32,
}

impl Renderer {
    pub fn new(grid: i32) -> Self {
        Renderer { grid }
    }

    /// Clears the surface and paints the current state
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, state: &GameState) {
        surface.clear();
        self.paint(surface, state);
    }

    /// Paints food, then every snake segment, without clearing first
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, state: &GameState) {
        // One pixel short of a full cell leaves a gap between neighbours
        let side = self.grid - 1;

        let (fx, fy) = state.food.position;
        surface.fill_rect(fx, fy, side, side, FOOD_COLOR);

        for &(x, y) in state.snake.body() {
            surface.fill_rect(x, y, side, side, SNAKE_COLOR);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::food::Food;

    /// Records every primitive call in order
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub calls: Vec<Call>,
        pub scores: Vec<u32>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        Clear,
        Fill(i32, i32, i32, i32, Color),
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
            self.calls.push(Call::Fill(x, y, w, h, color));
        }
    }

    impl ScoreSink for RecordingSurface {
        fn show_score(&mut self, score: u32) {
            self.scores.push(score);
        }
    }

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new(GameConfig { seed: Some(1), ..Default::default() });
        state.food = Food::at((320, 320));
        state.snake.move_step();
        state.snake.move_step();

        let mut surface = RecordingSurface::default();
        Renderer::new(16).draw(&mut surface, &state);

        assert_eq!(
            surface.calls,
            vec![
                Call::Clear,
                Call::Fill(320, 320, 15, 15, Color::Red),
                Call::Fill(192, 160, 15, 15, Color::Green),
                Call::Fill(176, 160, 15, 15, Color::Green),
            ]
        );
    }

    #[test]
    fn test_empty_body_draws_only_food() {
        let state = GameState::new(GameConfig { seed: Some(1), ..Default::default() });
        let mut surface = RecordingSurface::default();
        Renderer::new(16).paint(&mut surface, &state);
        assert_eq!(surface.calls.len(), 1);
    }
}
