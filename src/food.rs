//! Food placement.
//!
//! Food lands on any cell of the board with equal probability, including
//! cells the snake currently occupies.

use rand::Rng;

use crate::snake::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    /// Food on a uniformly random cell of a `board_size` board
    pub fn random<R: Rng + ?Sized>(rng: &mut R, grid: i32, board_size: i32) -> Self {
        Food::at(random_cell(rng, grid, board_size))
    }

    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: i32, board_size: i32) {
        self.position = random_cell(rng, grid, board_size);
    }

    pub fn is_at(&self, cell: Cell) -> bool {
        self.position == cell
    }
}

/// Picks x and y independently from {0, G, 2G, .., board_size - G}
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: i32, board_size: i32) -> Cell {
    let cells = board_size / grid;
    (rng.gen_range(0..cells) * grid, rng.gen_range(0..cells) * grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_cell_is_on_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (x, y) = random_cell(&mut rng, 16, 400);
            assert!((0..400).contains(&x) && (0..400).contains(&y));
            assert_eq!(x % 16, 0);
            assert_eq!(y % 16, 0);
        }
    }

    #[test]
    fn test_random_cell_reaches_edges() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen_first = false;
        let mut seen_last = false;
        for _ in 0..5000 {
            let (x, _) = random_cell(&mut rng, 16, 400);
            seen_first |= x == 0;
            seen_last |= x == 384;
        }
        assert!(seen_first && seen_last);
    }

    #[test]
    fn test_relocate() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::at((320, 320));
        assert!(food.is_at((320, 320)));

        food.relocate(&mut rng, 16, 400);
        let (x, y) = food.position;
        assert_eq!((x % 16, y % 16), (0, 0));
    }
}
