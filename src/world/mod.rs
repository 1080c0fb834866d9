//! World domain for Homestead.
//!
//! Responsible for:
//! - Tile construction and the till/water/plant predicates
//! - The three fixed maps (Farm, Town, Beach) and their walkability
//! - Exit bands and entry points between maps

use bevy::prelude::*;

use crate::shared::*;

pub mod grid;
pub mod maps;
pub mod tiles;

pub use grid::{get_tile, is_valid_position, set_tile};
pub use maps::{
    check_map_transition, create_beach_grid, create_farm_grid, create_town_grid, entry_position,
    generate_map, map_dimensions, map_name,
};
pub use tiles::{
    can_plant, can_till, can_water, clear_watered, create_tile, is_walkable, till_tile, water_tile,
};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MapTransitionEvent>()
            .add_systems(Update, log_map_transitions);
    }
}

fn log_map_transitions(mut events: EventReader<MapTransitionEvent>) {
    for ev in events.read() {
        info!(
            "[World] {} -> {} (entry {},{})",
            map_name(ev.from),
            map_name(ev.to),
            ev.entry.x,
            ev.entry.y
        );
    }
}
