use bevy::prelude::*;

use crate::data::crops::crop_sell_price;
use crate::shared::*;

/// What one overnight sell-through paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShippingResult {
    pub gold: u32,
    pub items_shipped: u32,
}

/// Sale value of a bin. Seeds and tools are worth nothing here.
pub fn shipping_value(items: &[Item]) -> u32 {
    items
        .iter()
        .filter_map(|item| {
            item.kind
                .harvested_crop()
                .map(|crop| crop_sell_price(crop).saturating_mul(item.quantity))
        })
        .fold(0, u32::saturating_add)
}

/// Sell everything in the bin, pay the player, and empty the bin.
pub fn process_shipping_bin(player: &mut Player, bin: &mut Vec<Item>) -> ShippingResult {
    let result = ShippingResult {
        gold: shipping_value(bin),
        items_shipped: bin.iter().map(|item| item.quantity).fold(0, u32::saturating_add),
    };
    player.gold = player.gold.saturating_add(result.gold);
    bin.clear();

    if result.items_shipped > 0 {
        info!(
            "[Economy] Shipping bin sold {} items for {}g. Player gold: {}",
            result.items_shipped, result.gold, player.gold
        );
    }
    result
}

/// Merge a crop into the bin. Anything that isn't a crop is dropped.
pub fn add_to_shipping_bin(bin: &mut Vec<Item>, item: Item) {
    if item.kind.harvested_crop().is_none() {
        return;
    }
    match bin.iter_mut().find(|entry| entry.kind == item.kind) {
        Some(entry) => entry.quantity = entry.quantity.saturating_add(item.quantity),
        None => bin.push(item),
    }
}

/// Move `quantity` from an inventory slot into the bin. Non-crops are put
/// back and the call fails.
pub fn ship_item(player: &mut Player, bin: &mut Vec<Item>, slot_index: usize, quantity: u32) -> bool {
    let Some(removed) = player.inventory.remove_item(slot_index, quantity) else {
        return false;
    };
    if removed.kind.harvested_crop().is_none() {
        put_back(&mut player.inventory, slot_index, removed);
        return false;
    }
    add_to_shipping_bin(bin, removed);
    true
}

/// Return a removed stack to the slot it came from.
pub(crate) fn put_back(inventory: &mut Inventory, slot_index: usize, item: Item) {
    match inventory.slots.get_mut(slot_index) {
        Some(Some(held)) if held.kind == item.kind => held.quantity += item.quantity,
        Some(slot @ None) => *slot = Some(item),
        _ => {
            inventory.add_item(item);
        }
    }
}
