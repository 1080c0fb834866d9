//! Data layer: hard-coded game-design tables.
//!
//! Crop numbers and NPC definitions live here so the farming, economy and
//! npcs domains read one copy of them.

pub mod crops;
pub mod npcs;

pub use crops::{
    crop_data, crop_name, crop_profit, crop_seed_cost, crop_sell_price, days_to_mature, CropData,
};
pub use npcs::{create_all_npcs, create_emily};
