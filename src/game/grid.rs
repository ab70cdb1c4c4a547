//! Grid geometry and the free-cell index used for food placement.

use super::state::Cell;

/// Grid dimensions and cell/index conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && (cell.x as usize) < self.width
            && cell.y >= 0
            && (cell.y as usize) < self.height
    }

    fn index_of(&self, cell: Cell) -> usize {
        cell.y as usize * self.width + cell.x as usize
    }

    fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }
}

const NOT_FREE: usize = usize::MAX;

/// Set of unoccupied cells with O(1) occupy, release and random pick.
///
/// `free` is a dense list of cell indices; `slot[i]` is the position of cell
/// `i` inside `free`, or `NOT_FREE`.
#[derive(Debug, Clone)]
pub struct FreeCells {
    grid: Grid,
    free: Vec<usize>,
    slot: Vec<usize>,
}

impl FreeCells {
    /// All cells free
    pub fn new(grid: Grid) -> Self {
        let count = grid.cell_count();
        Self {
            grid,
            free: (0..count).collect(),
            slot: (0..count).collect(),
        }
    }

    /// Rebuild from scratch with the given cells occupied
    pub fn with_occupied(grid: Grid, occupied: impl IntoIterator<Item = Cell>) -> Self {
        let mut cells = Self::new(grid);
        for cell in occupied {
            cells.occupy(cell);
        }
        cells
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.grid.contains(cell) && self.slot[self.grid.index_of(cell)] != NOT_FREE
    }

    /// Mark a cell occupied. Out-of-grid and already occupied cells are ignored.
    pub fn occupy(&mut self, cell: Cell) {
        if !self.grid.contains(cell) {
            return;
        }
        let index = self.grid.index_of(cell);
        let pos = self.slot[index];
        if pos == NOT_FREE {
            return;
        }

        self.free.swap_remove(pos);
        self.slot[index] = NOT_FREE;
        if let Some(&moved) = self.free.get(pos) {
            self.slot[moved] = pos;
        }
    }

    /// Mark a cell free again. Out-of-grid and already free cells are ignored.
    pub fn release(&mut self, cell: Cell) {
        if !self.grid.contains(cell) {
            return;
        }
        let index = self.grid.index_of(cell);
        if self.slot[index] != NOT_FREE {
            return;
        }

        self.slot[index] = self.free.len();
        self.free.push(index);
    }

    /// The `n`-th free cell, in no particular order
    pub fn nth(&self, n: usize) -> Option<Cell> {
        self.free.get(n).map(|&index| self.grid.cell_at(index))
    }
}
