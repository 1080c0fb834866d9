//! Player-driven flows: interacting, tools, seeds, the shop, shipping and
//! gifts. Each one checks the screen it belongs to and leaves the state
//! untouched when it does not apply.

use bevy::prelude::*;

use crate::calendar::is_shop_open;
use crate::data::crops::{crop_name, crop_seed_cost};
use crate::economy::shipping::put_back;
use crate::economy::{buy_seeds, can_afford};
use crate::farming::crops::{harvest_crop, is_ready_to_harvest, plant_crop};
use crate::npcs::{give_gift, npc_position, talk_to_npc, GiftResult};
use crate::player::{facing_position, selected_tool, use_tool, ToolResult};
use crate::shared::*;

use super::state::{
    add_message, add_to_shipping, close_dialog, open_dialog, open_shop, player_and_grid,
    trigger_sleep,
};

pub const FARMHOUSE_ID: &str = "farmhouse";
pub const BED_PROMPT: &str = "Go to bed and end the day?";

/// What pressing the interact key ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractOutcome {
    Talked { npc_id: String },
    Harvested(Item),
    InventoryFull,
    BedPrompt,
    ShopOpened,
    Nothing,
    /// Not on the PLAYING screen.
    Ignored,
}

/// Would `item` fit without disturbing the real inventory?
fn has_room_for(inventory: &Inventory, item: Item) -> bool {
    let mut probe = inventory.clone();
    probe.add_item(item)
}

fn ready_crop_item(tile: Option<&Tile>) -> Option<Item> {
    tile.and_then(|t| t.crop.as_ref())
        .filter(|crop| is_ready_to_harvest(crop))
        .map(|crop| Item::crop(crop.kind, 1))
}

fn grid_mut(state: &mut GameState) -> &mut Grid {
    player_and_grid(state).1
}

pub fn interact(state: &mut GameState) -> InteractOutcome {
    if state.screen != Screen::Playing {
        return InteractOutcome::Ignored;
    }
    let target = facing_position(&state.player);
    let hour = state.time.hour;
    let map = state.current_map;

    let npc_index = state.npcs.iter().position(|npc| {
        npc_position(npc, hour).is_some_and(|(on, pos)| on == map && pos.manhattan(target) <= 1)
    });
    if let Some(index) = npc_index {
        let npc = &mut state.npcs[index];
        let line = talk_to_npc(npc);
        let npc_id = npc.id.clone();
        open_dialog(state, &npc_id, &line);
        return InteractOutcome::Talked { npc_id };
    }

    if let Some(item) = ready_crop_item(grid_mut(state).get(target.x, target.y)) {
        if !has_room_for(&state.player.inventory, item) {
            add_message(state, "Inventory full!");
            return InteractOutcome::InventoryFull;
        }
        let picked = grid_mut(state)
            .get_mut(target.x, target.y)
            .and_then(harvest_crop);
        if let Some(picked) = picked {
            state.player.inventory.add_item(picked);
            add_message(state, "Harvested crop by hand!");
            return InteractOutcome::Harvested(picked);
        }
    }

    let facing_kind = grid_mut(state).get(target.x, target.y).map(|t| t.kind);
    if map == MapId::Farm && facing_kind == Some(TileKind::Building) {
        open_dialog(state, FARMHOUSE_ID, BED_PROMPT);
        state.pending_sleep = true;
        return InteractOutcome::BedPrompt;
    }

    if map == MapId::Town
        && is_shop_open(&state.time)
        && state.player.pos.manhattan(SHOP_COUNTER_POS) <= SHOP_REACH
    {
        open_shop(state);
        return InteractOutcome::ShopOpened;
    }

    add_message(state, "Nothing to interact with here.");
    InteractOutcome::Nothing
}

/// Answer the open dialog. Accepting the bed prompt sleeps through to the
/// next morning. Returns whether the player went to bed.
pub fn confirm_dialog(state: &mut GameState, accept: bool) -> bool {
    if state.screen != Screen::Dialog {
        return false;
    }
    let sleep = accept && state.pending_sleep;
    close_dialog(state);
    if sleep {
        trigger_sleep(state);
        add_message(state, "You went to bed early.");
    }
    sleep
}

pub fn use_tool_on_facing(state: &mut GameState) -> Option<ToolResult> {
    let target = facing_position(&state.player);
    use_tool_at(state, target.x, target.y)
}

/// Swing the selected tool at an orthogonal neighbour, turning to face it.
/// `None` when the swing never happened (wrong screen, out of reach, or a
/// scythe harvest with nowhere to put the crop).
pub fn use_tool_at(state: &mut GameState, x: i32, y: i32) -> Option<ToolResult> {
    if state.screen != Screen::Playing {
        return None;
    }
    let target = Position::new(x, y);
    let pos = state.player.pos;
    if pos.manhattan(target) != 1 {
        return None;
    }
    state.player.facing = match (x - pos.x, y - pos.y) {
        (0, -1) => Facing::Up,
        (0, 1) => Facing::Down,
        (-1, 0) => Facing::Left,
        _ => Facing::Right,
    };

    let tool = selected_tool(&state.player);
    if tool == ToolKind::Scythe {
        if let Some(item) = ready_crop_item(grid_mut(state).get(x, y)) {
            if !has_room_for(&state.player.inventory, item) {
                add_message(state, "Inventory full!");
                return None;
            }
        }
    }

    let (player, grid) = player_and_grid(state);
    let result = use_tool(tool, player, grid, x, y);
    if let Some(item) = result.harvested {
        state.player.inventory.add_item(item);
    }
    add_message(state, result.message);
    Some(result)
}

/// Plant one seed from `slot` on the facing farm tile.
pub fn plant_selected_seed(state: &mut GameState, slot: usize) -> bool {
    if state.screen != Screen::Playing || state.current_map != MapId::Farm {
        return false;
    }
    let Some(ItemKind::Seed(crop)) = state.player.inventory.item_in_slot(slot).map(|i| i.kind) else {
        return false;
    };
    let target = facing_position(&state.player);
    let plantable = grid_mut(state)
        .get(target.x, target.y)
        .is_some_and(crate::world::tiles::can_plant);
    if !plantable {
        return false;
    }

    state.player.inventory.remove_item(slot, 1);
    if let Some(tile) = grid_mut(state).get_mut(target.x, target.y) {
        plant_crop(tile, crop);
    }
    add_message(state, &format!("Planted {} seeds", crop_name(crop)));
    true
}

pub fn buy_seeds_action(state: &mut GameState, crop: CropKind, quantity: u32) -> bool {
    if state.screen != Screen::Shop {
        return false;
    }
    if buy_seeds(&mut state.player, crop, quantity) {
        add_message(state, &format!("Bought {} {} seeds", quantity, crop_name(crop)));
        return true;
    }
    let total = crop_seed_cost(crop).saturating_mul(quantity);
    if can_afford(&state.player, total) && quantity > 0 {
        add_message(state, "Inventory full!");
    } else {
        add_message(state, "Not enough gold!");
    }
    false
}

/// Move one item from `slot` into the shipping bin. Only crops sell.
pub fn ship_from_slot(state: &mut GameState, slot: usize) -> bool {
    if !matches!(state.screen, Screen::Playing | Screen::Inventory) {
        return false;
    }
    let Some(item) = state.player.inventory.remove_item(slot, 1) else {
        return false;
    };
    if item.kind.harvested_crop().is_none() {
        put_back(&mut state.player.inventory, slot, item);
        return false;
    }
    add_to_shipping(state, item);
    true
}

/// Hand one item from `slot` to whoever the open dialog is with.
pub fn gift_from_slot(state: &mut GameState, slot: usize) -> Option<(String, ItemKind, GiftResult)> {
    if state.screen != Screen::Dialog {
        return None;
    }
    let npc_id = state.dialog_npc.clone()?;
    let index = state.npcs.iter().position(|npc| npc.id == npc_id)?;
    let item = state.player.inventory.remove_item(slot, 1)?;
    if item.kind.harvested_crop().is_none() {
        put_back(&mut state.player.inventory, slot, item);
        return None;
    }

    let npc = &mut state.npcs[index];
    let result = give_gift(npc, &item);
    let name = npc.name.clone();
    state.dialog_text = Some(result.reaction.to_string());
    let message = if result.change > 0 {
        format!("{} liked your gift! (+{} friendship)", name, result.change)
    } else {
        format!("{} didn't like that... ({} friendship)", name, result.change)
    };
    add_message(state, &message);
    debug!("[Game] Gift to {}: {:?} -> {}", npc_id, item.kind, result.change);
    Some((npc_id, item.kind, result))
}
