use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Body,
    Food,
}

/// Cached occupancy view of the board. The game keeps it in sync with the
/// snake and the food after every tick; nothing reads it as the source of
/// truth for movement.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Grid { width, height, cells: vec![Cell::Empty; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Coords) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Panics if `pos` is off the board; callers check `in_bounds` first.
    pub fn get(&self, pos: Coords) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Coords, cell: Cell) {
        let i = self.index(pos);
        self.cells[i] = cell;
    }

    pub fn clear(&mut self, pos: Coords) {
        self.set(pos, Cell::Empty);
    }

    /// Every position not covered by the snake, food included.
    pub fn free_cells(&self) -> Vec<Coords> {
        self.positions().filter(|pos| self.get(*pos) != Cell::Body).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    ///////////////////////////////////////////////////////////////////////////

    fn positions(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coords::new(x as i32, y as i32)))
    }

    fn index(&self, pos: Coords) -> usize {
        assert!(self.in_bounds(pos), "grid access out of bounds: {:?}", pos);
        pos.y as usize * self.width + pos.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let grid = Grid::new(10, 5);

        assert!(grid.in_bounds(Coords::new(0, 0)));
        assert!(grid.in_bounds(Coords::new(9, 4)));
        assert!(!grid.in_bounds(Coords::new(10, 0)));
        assert!(!grid.in_bounds(Coords::new(0, 5)));
        assert!(!grid.in_bounds(Coords::new(-1, 2)));
        assert!(!grid.in_bounds(Coords::new(3, -1)));
    }

    #[test]
    fn set_get_clear() {
        let mut grid = Grid::new(3, 3);
        let pos = Coords::new(2, 1);

        assert_eq!(grid.get(pos), Cell::Empty);
        grid.set(pos, Cell::Food);
        assert_eq!(grid.get(pos), Cell::Food);
        grid.clear(pos);
        assert_eq!(grid.get(pos), Cell::Empty);
    }

    #[test]
    fn free_cells_skip_body_only() {
        let mut grid = Grid::new(2, 2);
        grid.set(Coords::new(0, 0), Cell::Body);
        grid.set(Coords::new(1, 0), Cell::Body);
        grid.set(Coords::new(0, 1), Cell::Food);

        assert_eq!(grid.free_cells(), vec![Coords::new(0, 1), Coords::new(1, 1)]);
    }

    #[test]
    fn rows_are_width_long() {
        let grid = Grid::new(4, 3);
        let rows: Vec<_> = grid.rows().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 4));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_panics() {
        Grid::new(2, 2).get(Coords::new(2, 0));
    }
}
