use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::Coords;
use crate::error::GameError;
use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Random draws tried before falling back to scanning every interior cell.
const MAX_SAMPLE_ATTEMPTS: usize = 256;

/// Puts food and extra walls on free interior cells, drawing from the
/// session's random source.
pub struct Placer<R> {
    rng: R,
}

impl<R: Rng> Placer<R> {
    pub fn new(rng: R) -> Self {
        Placer { rng }
    }

    pub fn place_food(&mut self, grid: &mut Grid, snake: &Snake) -> Result<Coords, GameError> {
        let pos = self.free_cell(grid, snake)?;
        grid.set_cell(pos, Cell::Food);
        debug!("Food placed at {:?}", pos);
        Ok(pos)
    }

    pub fn place_wall(&mut self, grid: &mut Grid, snake: &Snake) -> Result<Coords, GameError> {
        let pos = self.free_cell(grid, snake)?;
        grid.set_cell(pos, Cell::Wall);
        debug!("Wall placed at {:?}", pos);
        Ok(pos)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn free_cell(&mut self, grid: &Grid, snake: &Snake) -> Result<Coords, GameError> {
        let is_candidate = |pos: Coords| grid.is_free(pos) && !snake.occupies(pos);
        let (max_x, max_y) = (grid.width() as i32 - 1, grid.height() as i32 - 1);

        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let pos = (self.rng.gen_range(1..max_x), self.rng.gen_range(1..max_y));
            if is_candidate(pos) {
                return Ok(pos);
            }
        }

        // Crowded board: pick uniformly among whatever is left.
        let choices: Vec<Coords> = grid.interior().filter(|pos| is_candidate(*pos)).collect();
        match choices.choose(&mut self.rng) {
            Some(pos) => Ok(*pos),
            None => {
                warn!("No free interior cell left on a {}x{} grid", grid.width(), grid.height());
                Err(GameError::NoSpaceAvailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn placer(seed: u64) -> Placer<StdRng> {
        Placer::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn food_never_lands_on_snake_or_wall() {
        let mut grid = Grid::new(8, 6).unwrap();
        let snake = Snake::new((4, 3), 4, Direction::Right);
        grid.set_cell((5, 2), Cell::Wall);
        grid.set_cell((6, 4), Cell::Wall);
        let mut placer = placer(7);

        for _ in 0..500 {
            let pos = placer.place_food(&mut grid, &snake).unwrap();
            assert!(!grid.is_border(pos));
            assert!(!snake.occupies(pos));
            assert_ne!(pos, (5, 2));
            assert_ne!(pos, (6, 4));
            assert_eq!(grid.cell_at(pos), Some(Cell::Food));
            grid.set_cell(pos, Cell::Empty);
        }
    }

    #[test]
    fn walls_stay_inside_the_border() {
        let mut grid = Grid::new(6, 6).unwrap();
        let snake = Snake::new((2, 2), 1, Direction::Right);
        let mut placer = placer(3);

        for _ in 0..10 {
            let pos = placer.place_wall(&mut grid, &snake).unwrap();
            assert!(!grid.is_border(pos));
            assert_ne!(pos, (2, 2));
            assert_eq!(grid.cell_at(pos), Some(Cell::Wall));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        // 5x3 grid: interior is (1,1), (2,1), (3,1)
        let mut grid = Grid::new(5, 3).unwrap();
        let snake = Snake::new((2, 1), 2, Direction::Right);

        let pos = placer(11).place_food(&mut grid, &snake).unwrap();
        assert_eq!(pos, (3, 1));
    }

    #[test]
    fn full_grid_reports_no_space() {
        let mut grid = Grid::new(5, 3).unwrap();
        let snake = Snake::new((3, 1), 3, Direction::Right);

        assert!(matches!(placer(1).place_food(&mut grid, &snake), Err(GameError::NoSpaceAvailable)));
        assert!(matches!(placer(1).place_wall(&mut grid, &snake), Err(GameError::NoSpaceAvailable)));
    }
}
