//! Tool engine: decides whether a tool works on a tile, charges energy,
//! and applies the effect.

use crate::farming::crops::{harvest_crop, is_ready_to_harvest, water_crop};
use crate::shared::*;
use crate::world::tiles::{can_till, can_water, create_tile, till_tile, water_tile};

pub const MSG_INVALID_POSITION: &str = "Invalid position";
pub const MSG_CANNOT_USE: &str = "Cannot use tool here";
pub const MSG_NO_ENERGY: &str = "Not enough energy";

/// Outcome of one swing. `energy_cost` is what was charged (0 on failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub success: bool,
    pub message: &'static str,
    pub energy_cost: u32,
    /// The crop picked by a scythe swing, for the caller to stow.
    pub harvested: Option<Item>,
}

impl ToolResult {
    fn failed(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            energy_cost: 0,
            harvested: None,
        }
    }

    fn done(message: &'static str, energy_cost: u32) -> Self {
        Self {
            success: true,
            message,
            energy_cost,
            harvested: None,
        }
    }
}

pub fn tool_energy_cost(tool: ToolKind) -> u32 {
    match tool {
        ToolKind::Hoe => 2,
        ToolKind::WateringCan => 1,
        ToolKind::Scythe => 2,
        ToolKind::Axe => 4,
        ToolKind::Pickaxe => 4,
    }
}

pub fn tool_name(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Hoe => "Hoe",
        ToolKind::WateringCan => "Watering Can",
        ToolKind::Scythe => "Scythe",
        ToolKind::Axe => "Axe",
        ToolKind::Pickaxe => "Pickaxe",
    }
}

pub fn can_use_tool(tool: ToolKind, tile: &Tile) -> bool {
    match tool {
        ToolKind::Hoe => can_till(tile),
        ToolKind::WateringCan => can_water(tile),
        ToolKind::Scythe => tile.crop.as_ref().is_some_and(is_ready_to_harvest),
        ToolKind::Axe => tile.kind == TileKind::Tree,
        ToolKind::Pickaxe => tile.kind == TileKind::Stone,
    }
}

/// Apply `tool` to `(x, y)`. Every failure leaves the player and grid
/// untouched and carries one of the three fixed messages.
pub fn use_tool(tool: ToolKind, player: &mut Player, grid: &mut Grid, x: i32, y: i32) -> ToolResult {
    let Some(tile) = grid.get_mut(x, y) else {
        return ToolResult::failed(MSG_INVALID_POSITION);
    };
    if !can_use_tool(tool, tile) {
        return ToolResult::failed(MSG_CANNOT_USE);
    }
    let cost = tool_energy_cost(tool);
    if player.energy < cost {
        return ToolResult::failed(MSG_NO_ENERGY);
    }

    player.energy -= cost;

    match tool {
        ToolKind::Hoe => {
            till_tile(tile);
            ToolResult::done("Tilled the soil", cost)
        }
        ToolKind::WateringCan => {
            water_tile(tile);
            if let Some(crop) = tile.crop.as_mut() {
                water_crop(crop);
            }
            ToolResult::done("Watered", cost)
        }
        ToolKind::Scythe => ToolResult {
            harvested: harvest_crop(tile),
            ..ToolResult::done("Harvested crop", cost)
        },
        ToolKind::Axe => {
            *tile = create_tile(TileKind::Grass);
            ToolResult::done("Chopped tree", cost)
        }
        ToolKind::Pickaxe => {
            *tile = create_tile(TileKind::Grass);
            ToolResult::done("Broke rock", cost)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farming::crops::plant_crop;
    use crate::player::create_player;

    fn grid_with(kind: TileKind) -> Grid {
        Grid::filled(5, 5, kind)
    }

    #[test]
    fn test_hoe_tills_and_charges() {
        let mut grid = grid_with(TileKind::Grass);
        let mut player = create_player();
        let result = use_tool(ToolKind::Hoe, &mut player, &mut grid, 2, 2);
        assert!(result.success);
        assert_eq!(result.message, "Tilled the soil");
        assert_eq!(result.energy_cost, 2);
        assert_eq!(player.energy, MAX_ENERGY - 2);
        assert_eq!(grid.get(2, 2).map(|t| t.kind), Some(TileKind::Tilled));
    }

    #[test]
    fn test_failure_messages_leave_state_alone() {
        let mut player = create_player();

        let mut grid = grid_with(TileKind::Water);
        let r = use_tool(ToolKind::Hoe, &mut player, &mut grid, 9, 9);
        assert_eq!((r.success, r.message, r.energy_cost), (false, MSG_INVALID_POSITION, 0));

        let r = use_tool(ToolKind::Hoe, &mut player, &mut grid, 1, 1);
        assert_eq!(r.message, MSG_CANNOT_USE);

        let mut trees = grid_with(TileKind::Tree);
        player.energy = 3;
        let r = use_tool(ToolKind::Axe, &mut player, &mut trees, 1, 1);
        assert_eq!(r.message, MSG_NO_ENERGY);
        assert_eq!(player.energy, 3);
        assert_eq!(trees.get(1, 1).map(|t| t.kind), Some(TileKind::Tree));
    }

    #[test]
    fn test_watering_marks_crop() {
        let mut grid = grid_with(TileKind::Tilled);
        if let Some(tile) = grid.get_mut(1, 1) {
            plant_crop(tile, CropKind::Parsnip);
        }
        let mut player = create_player();
        let r = use_tool(ToolKind::WateringCan, &mut player, &mut grid, 1, 1);
        assert!(r.success);
        let tile = grid.get(1, 1).cloned();
        assert!(tile.as_ref().is_some_and(|t| t.watered));
        assert!(tile.and_then(|t| t.crop).is_some_and(|c| c.watered_today));
    }

    #[test]
    fn test_scythe_only_harvests_ready_crops() {
        let mut grid = grid_with(TileKind::Tilled);
        let mut player = create_player();
        if let Some(tile) = grid.get_mut(0, 0) {
            plant_crop(tile, CropKind::Potato);
        }

        let r = use_tool(ToolKind::Scythe, &mut player, &mut grid, 0, 0);
        assert_eq!(r.message, MSG_CANNOT_USE, "unripe crop");
        let mut grass = grid_with(TileKind::Grass);
        let r = use_tool(ToolKind::Scythe, &mut player, &mut grass, 0, 0);
        assert_eq!(r.message, MSG_CANNOT_USE, "grass is not cut");

        if let Some(crop) = grid.get_mut(0, 0).and_then(|t| t.crop.as_mut()) {
            crop.days_grown = 6;
            crop.stage = CropStage::Harvest;
        }
        let r = use_tool(ToolKind::Scythe, &mut player, &mut grid, 0, 0);
        assert!(r.success);
        assert_eq!(r.harvested, Some(Item::crop(CropKind::Potato, 1)));
        let tile = grid.get(0, 0);
        assert!(tile.is_some_and(|t| t.crop.is_none() && t.kind == TileKind::Tilled));
    }

    #[test]
    fn test_axe_and_pickaxe_clear_to_grass() {
        let mut player = create_player();
        let mut trees = grid_with(TileKind::Tree);
        assert!(use_tool(ToolKind::Axe, &mut player, &mut trees, 3, 3).success);
        assert_eq!(trees.get(3, 3).map(|t| t.kind), Some(TileKind::Grass));

        let mut rocks = grid_with(TileKind::Stone);
        let r = use_tool(ToolKind::Pickaxe, &mut player, &mut rocks, 3, 3);
        assert_eq!(r.message, "Broke rock");
        assert_eq!(rocks.get(3, 3).map(|t| t.kind), Some(TileKind::Grass));
        assert_eq!(player.energy, MAX_ENERGY - 8);
    }

    #[test]
    fn test_energy_table() {
        let costs: Vec<u32> = [
            ToolKind::Hoe,
            ToolKind::WateringCan,
            ToolKind::Scythe,
            ToolKind::Axe,
            ToolKind::Pickaxe,
        ]
        .into_iter()
        .map(tool_energy_cost)
        .collect();
        assert_eq!(costs, vec![2, 1, 2, 4, 4]);
        assert_eq!(tool_name(ToolKind::WateringCan), "Watering Can");
    }
}
