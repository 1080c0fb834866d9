mod movement;
pub mod energy;
pub mod tools;

use bevy::prelude::*;
use crate::shared::*;

pub use energy::{
    energy_percent, handle_passout, has_energy, is_exhausted, restore_energy, use_energy,
};
pub use movement::move_player;
pub use tools::{can_use_tool, tool_energy_cost, tool_name, use_tool, ToolResult};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ToolUseEvent>()
            .add_systems(Update, log_tool_use);
    }
}

fn log_tool_use(mut events: EventReader<ToolUseEvent>) {
    for ev in events.read() {
        debug!(
            "[Player] {} at ({},{}) success={} cost={}",
            tool_name(ev.tool),
            ev.target.x,
            ev.target.y,
            ev.success,
            ev.energy_cost
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Player construction and tool selection
// ═══════════════════════════════════════════════════════════════════════════

/// The hotbar order for tools, matching starting inventory slots 0-4.
pub const TOOL_ORDER: [ToolKind; TOOL_COUNT] = [
    ToolKind::Hoe,
    ToolKind::WateringCan,
    ToolKind::Scythe,
    ToolKind::Axe,
    ToolKind::Pickaxe,
];

/// Five tools in hotbar order, then the starting parsnip seeds.
pub fn initialize_starting_inventory() -> Inventory {
    let mut inventory = Inventory::default();
    for (slot, tool) in TOOL_ORDER.iter().enumerate() {
        inventory.slots[slot] = Some(Item::tool(*tool));
    }
    inventory.slots[TOOL_COUNT] = Some(Item::seeds(CropKind::Parsnip, STARTING_PARSNIP_SEEDS));
    inventory
}

pub fn create_player() -> Player {
    Player {
        pos: PLAYER_START_POS,
        energy: MAX_ENERGY,
        max_energy: MAX_ENERGY,
        gold: STARTING_GOLD,
        inventory: initialize_starting_inventory(),
        selected_tool: 0,
        facing: Facing::Down,
    }
}

/// Out-of-range indices are ignored.
pub fn select_tool(player: &mut Player, index: usize) {
    if index < TOOL_COUNT {
        player.selected_tool = index;
    }
}

pub fn selected_tool(player: &Player) -> ToolKind {
    TOOL_ORDER
        .get(player.selected_tool)
        .copied()
        .unwrap_or(ToolKind::Hoe)
}

/// Grid delta for a facing direction (y grows downward).
pub fn facing_offset(facing: Facing) -> (i32, i32) {
    match facing {
        Facing::Up => (0, -1),
        Facing::Down => (0, 1),
        Facing::Left => (-1, 0),
        Facing::Right => (1, 0),
    }
}

pub fn facing_position(player: &Player) -> Position {
    let (dx, dy) = facing_offset(player.facing);
    player.pos.offset(dx, dy)
}

/// Morning refill. Passing out lowers this afterwards.
pub fn reset_player_for_new_day(player: &mut Player) {
    player.energy = player.max_energy;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = create_player();
        assert_eq!(player.pos, PLAYER_START_POS);
        assert_eq!(player.energy, MAX_ENERGY);
        assert_eq!(player.gold, STARTING_GOLD);
        assert_eq!(player.facing, Facing::Down);
        assert_eq!(selected_tool(&player), ToolKind::Hoe);
    }

    #[test]
    fn test_starting_inventory_layout() {
        let inv = initialize_starting_inventory();
        for (i, tool) in TOOL_ORDER.iter().enumerate() {
            assert_eq!(inv.slots[i], Some(Item::tool(*tool)));
        }
        assert_eq!(inv.slots[5], Some(Item::seeds(CropKind::Parsnip, STARTING_PARSNIP_SEEDS)));
        assert!(inv.slots[6..].iter().all(|s| s.is_none()));
    }

    #[test]
    fn test_select_tool_ignores_out_of_range() {
        let mut player = create_player();
        select_tool(&mut player, 3);
        assert_eq!(selected_tool(&player), ToolKind::Axe);
        select_tool(&mut player, 5);
        assert_eq!(player.selected_tool, 3);
    }

    #[test]
    fn test_selected_tool_defaults_to_hoe() {
        let mut player = create_player();
        player.selected_tool = 99;
        assert_eq!(selected_tool(&player), ToolKind::Hoe);
    }

    #[test]
    fn test_facing_position_is_y_down() {
        let mut player = create_player();
        player.facing = Facing::Up;
        assert_eq!(facing_position(&player), Position::new(10, 11));
        player.facing = Facing::Right;
        assert_eq!(facing_position(&player), Position::new(11, 12));
    }

    #[test]
    fn test_new_day_refills_energy() {
        let mut player = create_player();
        player.energy = 3;
        reset_player_for_new_day(&mut player);
        assert_eq!(player.energy, player.max_energy);
    }
}
