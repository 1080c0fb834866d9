//! Farming domain: crop growth on the farm grid.
//!
//! Planting, watering and harvesting are pure functions over `Tile`/`Crop`;
//! the nightly growth pass is driven by the game orchestrator. The plugin
//! only reports what the night produced.

use bevy::prelude::*;

use crate::data::crops::crop_data;
use crate::shared::*;

pub mod crops;

pub use crops::{
    advance_crop_day, advance_crop_growth, compute_stage, count_harvestable, create_crop,
    crop_stage, days_until_harvest, harvest_crop, is_ready_to_harvest, plant_crop, water_crop,
};

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, report_harvestable_crops);
    }
}

/// Fewest watered days any unripe crop on `grid` still needs.
pub fn next_harvest_in(grid: &Grid) -> Option<u32> {
    grid.tiles
        .iter()
        .filter_map(|t| t.crop.as_ref())
        .filter(|c| !is_ready_to_harvest(c))
        .map(|c| days_until_harvest(c, crop_data(c.kind)))
        .min()
}

/// After each night, log how many farm crops are ready to pick.
fn report_harvestable_crops(mut day_end: EventReader<DayEndEvent>, state: Res<GameState>) {
    for _ev in day_end.read() {
        let ready = count_harvestable(&state.farm_grid);
        let planted = state.farm_grid.tiles.iter().filter(|t| t.crop.is_some()).count();
        if planted == 0 {
            continue;
        }
        match next_harvest_in(&state.farm_grid) {
            Some(days) => info!(
                "[Farming] {} crops planted, {} ready to harvest, next in {} day(s)",
                planted, ready, days
            ),
            None => info!("[Farming] {} crops planted, {} ready to harvest", planted, ready),
        }
    }
}
