//! Crop planting and growth-stage management.

use crate::data::crops::{days_to_mature, CropData};
use crate::shared::*;
use crate::world::tiles::can_plant;

pub fn create_crop(kind: CropKind) -> Crop {
    Crop {
        kind,
        stage: CropStage::Seed,
        days_grown: 0,
        watered_today: false,
    }
}

/// Stage for a crop that has grown `days_grown` watered days.
pub fn compute_stage(days_grown: u32, kind: CropKind) -> CropStage {
    stage_for_progress(days_grown, days_to_mature(kind))
}

fn stage_for_progress(days_grown: u32, growth_days: u32) -> CropStage {
    // Compare days_grown / growth_days against quarters without floats.
    let quarters = days_grown.saturating_mul(4);
    if days_grown >= growth_days {
        CropStage::Harvest
    } else if quarters >= growth_days * 3 {
        CropStage::Mature
    } else if quarters >= growth_days * 2 {
        CropStage::Growing
    } else if quarters >= growth_days {
        CropStage::Sprout
    } else {
        CropStage::Seed
    }
}

pub fn crop_stage(crop: &Crop) -> CropStage {
    compute_stage(crop.days_grown, crop.kind)
}

pub fn plant_crop(tile: &mut Tile, kind: CropKind) -> bool {
    if !can_plant(tile) {
        return false;
    }
    tile.crop = Some(create_crop(kind));
    true
}

pub fn water_crop(crop: &mut Crop) {
    crop.watered_today = true;
}

/// One night of growth. Only a watered crop grows; the flag is cleared
/// either way and a dry day costs nothing else.
pub fn advance_crop_day(crop: &mut Crop) {
    if crop.watered_today {
        crop.days_grown += 1;
        crop.stage = crop_stage(crop);
    }
    crop.watered_today = false;
}

pub fn is_ready_to_harvest(crop: &Crop) -> bool {
    crop.stage == CropStage::Harvest
}

/// Pick a ready crop. The soil stays tilled so it can be replanted.
pub fn harvest_crop(tile: &mut Tile) -> Option<Item> {
    let kind = tile.crop.as_ref().filter(|c| is_ready_to_harvest(c))?.kind;
    tile.crop = None;
    Some(Item::crop(kind, 1))
}

/// Advance every crop on a grid by one night. Returns how many grew.
pub fn advance_crop_growth(grid: &mut Grid) -> usize {
    let mut grown = 0;
    for crop in grid.tiles.iter_mut().filter_map(|t| t.crop.as_mut()) {
        let before = crop.days_grown;
        advance_crop_day(crop);
        if crop.days_grown > before {
            grown += 1;
        }
    }
    grown
}

/// How many crops on a grid can be picked right now.
pub fn count_harvestable(grid: &Grid) -> usize {
    grid.tiles
        .iter()
        .filter_map(|t| t.crop.as_ref())
        .filter(|c| is_ready_to_harvest(c))
        .count()
}

/// Days of watering still needed before `crop` can be picked.
pub fn days_until_harvest(crop: &Crop, data: &CropData) -> u32 {
    data.growth_days.saturating_sub(crop.days_grown)
}
