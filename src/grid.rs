use crate::Coords;
use crate::error::GameError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Food,
}

/// Rectangular playfield. The outer ring is always `Wall`.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width < 3 || height < 3 {
            return Err(GameError::InvalidDimension { width, height });
        }

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    Cell::Wall
                } else {
                    Cell::Empty
                }
            })
            .collect();

        Ok(Grid { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `None` when `pos` lies outside the grid.
    pub fn cell_at(&self, pos: Coords) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrites a cell, returning what was there before. Border cells
    /// keep their wall and positions outside the grid are ignored.
    pub fn set_cell(&mut self, pos: Coords, cell: Cell) -> Option<Cell> {
        if self.is_border(pos) {
            return None;
        }

        let i = self.index(pos)?;
        Some(std::mem::replace(&mut self.cells[i], cell))
    }

    pub fn is_free(&self, pos: Coords) -> bool {
        self.cell_at(pos) == Some(Cell::Empty)
    }

    pub fn is_border(&self, (x, y): Coords) -> bool {
        let (max_x, max_y) = (self.width as i32 - 1, self.height as i32 - 1);
        (x == 0 || y == 0 || x == max_x || y == max_y) && (0..=max_x).contains(&x) && (0..=max_y).contains(&y)
    }

    /// All positions inside the border ring, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Coords> {
        let (w, h) = (self.width as i32, self.height as i32);
        (1..h - 1).flat_map(move |y| (1..w - 1).map(move |x| (x, y)))
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, (x, y): Coords) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }

        Some(y as usize * self.width + x as usize)
    }
}
