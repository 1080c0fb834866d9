//! Seed shop: affordability and purchases.

use bevy::prelude::*;

use crate::data::crops::{crop_name, crop_seed_cost};
use crate::shared::*;

pub fn can_afford(player: &Player, amount: u32) -> bool {
    player.gold >= amount
}

/// Buy `quantity` seeds. Gold is only taken once the seeds are stowed; a
/// full inventory or an empty wallet leaves everything as it was.
pub fn buy_seeds(player: &mut Player, crop: CropKind, quantity: u32) -> bool {
    if quantity == 0 {
        return false;
    }
    let Some(total) = crop_seed_cost(crop).checked_mul(quantity) else {
        return false;
    };
    if !can_afford(player, total) {
        debug!("[Economy] Cannot afford {} {} seeds ({}g)", quantity, crop_name(crop), total);
        return false;
    }
    if !player.inventory.add_item(Item::seeds(crop, quantity)) {
        debug!("[Economy] No room for {} {} seeds", quantity, crop_name(crop));
        return false;
    }

    player.gold -= total;
    info!("[Economy] Bought {} {} seeds for {}g", quantity, crop_name(crop), total);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::create_player;

    #[test]
    fn test_buy_parsnip_seeds() {
        let mut player = create_player();
        assert!(buy_seeds(&mut player, CropKind::Parsnip, 5));
        assert_eq!(player.gold, 400);
        assert_eq!(
            player.inventory.count_item(ItemKind::Seed(CropKind::Parsnip)),
            STARTING_PARSNIP_SEEDS + 5
        );
    }

    #[test]
    fn test_buy_into_empty_inventory_places_stack() {
        let mut player = create_player();
        player.inventory = Inventory::default();
        assert!(buy_seeds(&mut player, CropKind::Potato, 2));
        assert_eq!(player.inventory.slots[0], Some(Item::seeds(CropKind::Potato, 2)));
        assert_eq!(player.gold, STARTING_GOLD - 100);
    }

    #[test]
    fn test_insufficient_gold_changes_nothing() {
        let mut player = create_player();
        player.gold = 79;
        let before = player.clone();
        assert!(!buy_seeds(&mut player, CropKind::Cauliflower, 1));
        assert_eq!(player, before);
    }

    #[test]
    fn test_full_inventory_keeps_gold() {
        let mut player = create_player();
        for slot in player.inventory.slots.iter_mut() {
            *slot = Some(Item::tool(ToolKind::Axe));
        }
        assert!(!buy_seeds(&mut player, CropKind::Parsnip, 1));
        assert_eq!(player.gold, STARTING_GOLD);
    }

    #[test]
    fn test_can_afford_boundary() {
        let mut player = create_player();
        player.gold = 20;
        assert!(can_afford(&player, 20));
        assert!(!can_afford(&player, 21));
    }
}
