//! Row-major tile storage with bounds-checked access.

use crate::shared::*;

use super::tiles::create_tile;

impl Grid {
    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![create_tile(kind); width * height],
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        is_valid_position(self.width, self.height, x, y)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).and_then(|i| self.tiles.get(i))
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).and_then(move |i| self.tiles.get_mut(i))
    }

    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = tile;
        }
    }

    /// A grid read back from storage must still be `width * height` cells
    /// of the expected size.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), String> {
        if (self.width, self.height) != (width, height) {
            return Err(format!(
                "Grid is {}x{}, expected {}x{}",
                self.width, self.height, width, height
            ));
        }
        if self.tiles.len() != width * height {
            return Err(format!(
                "Grid has {} tiles, expected {}",
                self.tiles.len(),
                width * height
            ));
        }
        Ok(())
    }

    /// Iterate every cell with its coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Tile)> {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            (Position::new((i % width) as i32, (i / width) as i32), tile)
        })
    }
}

/// Half-open bounds check: `0 <= x < width`, `0 <= y < height`.
pub fn is_valid_position(width: usize, height: usize, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height
}

pub fn get_tile(grid: &Grid, x: i32, y: i32) -> Option<&Tile> {
    grid.get(x, y)
}

pub fn set_tile(grid: &mut Grid, x: i32, y: i32, tile: Tile) {
    grid.set(x, y, tile);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_are_none() {
        let grid = Grid::filled(4, 3, TileKind::Grass);
        assert!(get_tile(&grid, 0, 0).is_some());
        assert!(get_tile(&grid, 3, 2).is_some());
        assert!(get_tile(&grid, 4, 0).is_none());
        assert!(get_tile(&grid, 0, 3).is_none());
        assert!(get_tile(&grid, -1, 1).is_none());
    }

    #[test]
    fn test_set_tile_ignores_out_of_bounds() {
        let mut grid = Grid::filled(4, 3, TileKind::Grass);
        let before = grid.clone();
        set_tile(&mut grid, 9, 9, create_tile(TileKind::Water));
        set_tile(&mut grid, -1, 0, create_tile(TileKind::Water));
        assert_eq!(grid, before);

        set_tile(&mut grid, 2, 1, create_tile(TileKind::Water));
        assert_eq!(grid.tiles[4 + 2].kind, TileKind::Water, "row 1 starts at index 4");
    }

    #[test]
    fn test_short_tile_vector_reads_as_none() {
        let mut grid = Grid::filled(4, 3, TileKind::Grass);
        grid.tiles.truncate(5);
        assert!(grid.get(0, 1).is_some());
        assert!(grid.get(3, 2).is_none());
        assert!(grid.get_mut(2, 2).is_none());
        set_tile(&mut grid, 3, 2, create_tile(TileKind::Water));
        assert_eq!(grid.tiles.len(), 5);
    }

    #[test]
    fn test_validate_checks_size_and_tile_count() {
        let mut grid = Grid::filled(4, 3, TileKind::Grass);
        assert!(grid.validate(4, 3).is_ok());
        assert!(grid.validate(3, 4).is_err());
        grid.tiles.pop();
        assert!(grid.validate(4, 3).is_err());
    }

    #[test]
    fn test_valid_position_is_half_open() {
        assert!(is_valid_position(10, 5, 0, 0));
        assert!(is_valid_position(10, 5, 9, 4));
        assert!(!is_valid_position(10, 5, 10, 4));
        assert!(!is_valid_position(10, 5, 9, 5));
        assert!(!is_valid_position(10, 5, -1, 0));
    }

    #[test]
    fn test_cells_report_coordinates() {
        let grid = Grid::filled(3, 2, TileKind::Dirt);
        let last = grid.cells().last().map(|(pos, _)| pos);
        assert_eq!(last, Some(Position::new(2, 1)));
        assert_eq!(grid.cells().count(), 6);
    }
}
