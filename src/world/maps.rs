//! Map data for the three outdoor areas.
//!
//! Each map is a fixed-size grid built once per game. Layout is positional
//! (borders, buildings, paths); the farm's leftover ground is decorated with
//! stones and trees drawn from a seeded RNG so every generation matches.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::shared::*;

use super::tiles::create_tile;

/// A rectangle on `from_map` that sends the player to `to_map` at `to_pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapTransition {
    pub from_map: MapId,
    /// (x, y, w, h) in tiles.
    pub from_rect: (i32, i32, i32, i32),
    pub to_map: MapId,
    pub to_pos: Position,
}

impl MapTransition {
    fn contains(&self, x: i32, y: i32) -> bool {
        let (rx, ry, rw, rh) = self.from_rect;
        x >= rx && x < rx + rw && y >= ry && y < ry + rh
    }
}

/// Exit bands and the entry point each one leads to. Entry points sit one
/// tile inside the destination's matching exit band.
pub const MAP_TRANSITIONS: [MapTransition; 4] = [
    // Farm east edge -> Town west edge
    MapTransition {
        from_map: MapId::Farm,
        from_rect: (FARM_WIDTH as i32 - 1, 11, 1, 3),
        to_map: MapId::Town,
        to_pos: Position::new(1, 12),
    },
    // Town west edge -> Farm east edge
    MapTransition {
        from_map: MapId::Town,
        from_rect: (0, 11, 1, 3),
        to_map: MapId::Farm,
        to_pos: Position::new(FARM_WIDTH as i32 - 2, 12),
    },
    // Town south edge -> Beach north edge
    MapTransition {
        from_map: MapId::Town,
        from_rect: (11, TOWN_HEIGHT as i32 - 1, 3, 1),
        to_map: MapId::Beach,
        to_pos: Position::new(12, 1),
    },
    // Beach north edge -> Town south edge
    MapTransition {
        from_map: MapId::Beach,
        from_rect: (11, 0, 3, 1),
        to_map: MapId::Town,
        to_pos: Position::new(12, TOWN_HEIGHT as i32 - 2),
    },
];

/// Where the player lands when no transition pairs the two maps.
pub const FALLBACK_ENTRY: Position = Position::new(1, 1);

pub fn map_dimensions(map: MapId) -> (usize, usize) {
    match map {
        MapId::Farm => (FARM_WIDTH, FARM_HEIGHT),
        MapId::Town => (TOWN_WIDTH, TOWN_HEIGHT),
        MapId::Beach => (BEACH_WIDTH, BEACH_HEIGHT),
    }
}

pub fn map_name(map: MapId) -> &'static str {
    match map {
        MapId::Farm => "Farm",
        MapId::Town => "Town",
        MapId::Beach => "Beach",
    }
}

/// Which map (if any) standing on `(x, y)` of `map` leads to.
pub fn check_map_transition(map: MapId, x: i32, y: i32) -> Option<MapId> {
    MAP_TRANSITIONS
        .iter()
        .find(|t| t.from_map == map && t.contains(x, y))
        .map(|t| t.to_map)
}

pub fn entry_position(to_map: MapId, from_map: MapId) -> Position {
    MAP_TRANSITIONS
        .iter()
        .find(|t| t.from_map == from_map && t.to_map == to_map)
        .map(|t| t.to_pos)
        .unwrap_or(FALLBACK_ENTRY)
}

pub fn generate_map(map: MapId) -> Grid {
    match map {
        MapId::Farm => create_farm_grid(),
        MapId::Town => create_town_grid(),
        MapId::Beach => create_beach_grid(),
    }
}

// ---------------------------------------------------------------------------
// Farm map: 32x24
// Layout: tree border with an east exit to town, house top-left, a cleared
// field beside it, seeded stones/trees everywhere else
// ---------------------------------------------------------------------------
pub fn create_farm_grid() -> Grid {
    let (w, h) = (FARM_WIDTH, FARM_HEIGHT);
    let mut rng = StdRng::seed_from_u64(FARM_LAYOUT_SEED);
    let mut tiles = Vec::with_capacity(w * h);

    for y in 0..h {
        for x in 0..w {
            let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let kind = if border {
                if x == w - 1 && (11..=13).contains(&y) {
                    TileKind::Grass
                } else {
                    TileKind::Tree
                }
            } else if (2..=5).contains(&x) && (2..=4).contains(&y) {
                TileKind::Building
            } else if (7..=20).contains(&x) && (3..=16).contains(&y) {
                TileKind::Grass
            } else {
                let r: f64 = rng.gen();
                if r < 0.1 {
                    TileKind::Stone
                } else if r < 0.2 {
                    TileKind::Tree
                } else {
                    TileKind::Grass
                }
            };
            tiles.push(create_tile(kind));
        }
    }

    Grid { width: w, height: h, tiles }
}

// ---------------------------------------------------------------------------
// Town map: 24x24
// Layout: tree border with a west exit to the farm and a south exit to the
// beach, shop top-center, Emily's house top-right, stone paths crossing at
// the plaza
// ---------------------------------------------------------------------------
pub fn create_town_grid() -> Grid {
    let (w, h) = (TOWN_WIDTH, TOWN_HEIGHT);
    let mut grid = Grid::filled(w, h, TileKind::Grass);

    let fill_rect = |grid: &mut Grid, x0: i32, y0: i32, rw: i32, rh: i32, kind: TileKind| {
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                grid.set(x, y, create_tile(kind));
            }
        }
    };

    // Plaza paths
    fill_rect(&mut grid, 0, 12, w as i32, 1, TileKind::Stone);
    fill_rect(&mut grid, 12, 0, 1, h as i32, TileKind::Stone);
    // Shop
    fill_rect(&mut grid, 10, 4, 5, 3, TileKind::Building);
    // Emily's house
    fill_rect(&mut grid, 17, 3, 4, 3, TileKind::Building);
    // Tree border
    fill_rect(&mut grid, 0, 0, w as i32, 1, TileKind::Tree);
    fill_rect(&mut grid, 0, h as i32 - 1, w as i32, 1, TileKind::Tree);
    fill_rect(&mut grid, 0, 0, 1, h as i32, TileKind::Tree);
    fill_rect(&mut grid, w as i32 - 1, 0, 1, h as i32, TileKind::Tree);
    // Exits
    fill_rect(&mut grid, 0, 11, 1, 3, TileKind::Dirt);
    fill_rect(&mut grid, 11, h as i32 - 1, 3, 1, TileKind::Dirt);

    grid
}

// ---------------------------------------------------------------------------
// Beach map: 24x16
// Layout: tree line on top with a gap north to town, sand (dirt) in the
// middle, open water on the bottom rows
// ---------------------------------------------------------------------------
pub fn create_beach_grid() -> Grid {
    let (w, h) = (BEACH_WIDTH, BEACH_HEIGHT);
    let mut grid = Grid::filled(w, h, TileKind::Dirt);

    for x in 0..w as i32 {
        if !(11..=13).contains(&x) {
            grid.set(x, 0, create_tile(TileKind::Tree));
        }
        for y in 13..h as i32 {
            grid.set(x, y, create_tile(TileKind::Water));
        }
    }

    grid
}
