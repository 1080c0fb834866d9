//! Talking: once a day counts toward friendship, later chats are filler.

use rand::seq::SliceRandom;

use crate::data::npcs::dialogue_pools;
use crate::shared::*;

fn pick_line(pool: &[&str]) -> String {
    pool.choose(&mut rand::thread_rng())
        .map(|line| line.to_string())
        .unwrap_or_default()
}

/// Returns the line the NPC says.
pub fn talk_to_npc(npc: &mut Npc) -> String {
    let (fresh, repeat) = dialogue_pools(&npc.id);
    if npc.talked_today {
        return pick_line(repeat);
    }

    npc.talked_today = true;
    npc.friendship = (npc.friendship + TALK_FRIENDSHIP).min(MAX_FRIENDSHIP);
    pick_line(fresh)
}

pub fn reset_npc_daily(npc: &mut Npc) {
    npc.talked_today = false;
}
