//! Hourly schedule lookups. The tables are authored in 24-hour terms and
//! looked up with the raw clock hour, so nobody is out after 22:00.

use crate::shared::*;

/// Where `npc` should be at `hour`, or `None` when not visible.
pub fn npc_position(npc: &Npc, hour: u32) -> Option<(MapId, Position)> {
    npc.schedule
        .iter()
        .find(|entry| entry.start_hour <= hour && hour < entry.end_hour)
        .map(|entry| (entry.map, entry.pos))
}

/// Snap `npc.pos` to its scheduled spot. Off-schedule hours keep the last position.
pub fn update_npc_position(npc: &mut Npc, hour: u32) {
    if let Some((_, pos)) = npc_position(npc, hour) {
        npc.pos = pos;
    }
}

pub fn is_npc_on_map(npc: &Npc, map: MapId, hour: u32) -> bool {
    npc_position(npc, hour).is_some_and(|(on, _)| on == map)
}

pub fn npcs_on_map(npcs: &[Npc], map: MapId, hour: u32) -> Vec<&Npc> {
    npcs.iter().filter(|npc| is_npc_on_map(npc, map, hour)).collect()
}

/// Orthogonal neighbours only.
pub fn is_adjacent_to_npc(npc: &Npc, player_pos: Position) -> bool {
    npc.pos.manhattan(player_pos) == 1
}
