//! Economy domain: seed purchases and the overnight shipping bin.
//!
//! All functions here are pure over `Player` and the bin; the orchestrator
//! decides when they run (shop screen, day rollover).

pub mod shipping;
pub mod shop;

pub use crate::data::crops::crop_profit;
pub use shipping::{
    add_to_shipping_bin, process_shipping_bin, ship_item, shipping_value, ShippingResult,
};
pub use shop::{buy_seeds, can_afford};
