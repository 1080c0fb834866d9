//! Tile construction, predicates, and mutations.
//!
//! The `can_*` predicates are the only place tillability, waterability and
//! plantability are decided; the mutators and the tool engine both call them.

use crate::shared::*;

pub fn create_tile(kind: TileKind) -> Tile {
    Tile {
        kind,
        watered: false,
        crop: None,
    }
}

pub fn can_till(tile: &Tile) -> bool {
    matches!(tile.kind, TileKind::Grass | TileKind::Dirt)
}

pub fn can_water(tile: &Tile) -> bool {
    tile.kind == TileKind::Tilled
}

pub fn can_plant(tile: &Tile) -> bool {
    tile.kind == TileKind::Tilled && tile.crop.is_none()
}

/// Grass or dirt becomes tilled soil. Anything else is left alone.
pub fn till_tile(tile: &mut Tile) -> bool {
    if !can_till(tile) {
        return false;
    }
    tile.kind = TileKind::Tilled;
    true
}

pub fn water_tile(tile: &mut Tile) -> bool {
    if !can_water(tile) {
        return false;
    }
    tile.watered = true;
    true
}

pub fn is_walkable(tile: Option<&Tile>) -> bool {
    matches!(
        tile.map(|t| t.kind),
        Some(TileKind::Grass | TileKind::Dirt | TileKind::Tilled | TileKind::Stone)
    )
}

pub fn clear_watered(grid: &mut Grid) {
    for tile in grid.tiles.iter_mut() {
        tile.watered = false;
    }
}
