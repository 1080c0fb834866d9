//! NPC domain: schedules, talking, gifts and friendship.
//!
//! NPC definitions come from `crate::data::npcs`. Positions follow the
//! hourly schedule; the sync system keeps `Npc::pos` current while the
//! clock runs.

use bevy::prelude::*;
use crate::shared::*;

pub mod dialogue;
pub mod gifts;
pub mod schedules;

pub use dialogue::{reset_npc_daily, talk_to_npc};
pub use gifts::{friendship_hearts, friendship_progress, give_gift, GiftResult};
pub use schedules::{
    is_adjacent_to_npc, is_npc_on_map, npc_position, npcs_on_map, update_npc_position,
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GiftGivenEvent>().add_systems(
            Update,
            (sync_npc_positions, log_gifts),
        );
    }
}

/// Move every NPC to where its schedule says it is this hour.
pub fn sync_npc_positions(mut state: ResMut<GameState>) {
    let hour = state.time.hour;
    let stale = state
        .npcs
        .iter()
        .any(|npc| npc_position(npc, hour).is_some_and(|(_, pos)| pos != npc.pos));
    if !stale {
        return;
    }
    for npc in state.npcs.iter_mut() {
        update_npc_position(npc, hour);
    }
}

fn log_gifts(mut events: EventReader<GiftGivenEvent>, state: Res<GameState>) {
    for ev in events.read() {
        let hearts = state
            .npcs
            .iter()
            .find(|npc| npc.id == ev.npc_id)
            .map(friendship_hearts)
            .unwrap_or(0);
        info!(
            "[Npc] {} received {:?} ({:+} friendship, {} hearts)",
            ev.npc_id, ev.item, ev.change, hearts
        );
    }
}
