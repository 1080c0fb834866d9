use crate::shared::*;
use crate::world::tiles::is_walkable;

fn facing_for_delta(dx: i32, dy: i32) -> Option<Facing> {
    match (dx.signum(), dy.signum()) {
        (_, -1) => Some(Facing::Up),
        (_, 1) => Some(Facing::Down),
        (-1, _) => Some(Facing::Left),
        (1, _) => Some(Facing::Right),
        _ => None,
    }
}

/// Step the player one tile. Facing always turns toward the step, even
/// when the destination is blocked or off the map.
pub fn move_player(player: &mut Player, dx: i32, dy: i32, grid: &Grid) -> bool {
    if let Some(facing) = facing_for_delta(dx, dy) {
        player.facing = facing;
    }

    let target = player.pos.offset(dx, dy);
    if !grid.in_bounds(target.x, target.y) || !is_walkable(grid.get(target.x, target.y)) {
        return false;
    }

    player.pos = target;
    true
}
