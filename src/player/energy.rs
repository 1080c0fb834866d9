//! Energy spending, refills, and the standalone passout penalty.

use bevy::prelude::*;
use crate::shared::*;

/// All-or-nothing: spending exactly what is left is allowed.
pub fn use_energy(player: &mut Player, amount: u32) -> bool {
    if !has_energy(player, amount) {
        return false;
    }
    player.energy -= amount;
    true
}

pub fn has_energy(player: &Player, amount: u32) -> bool {
    player.energy >= amount
}

pub fn restore_energy(player: &mut Player, amount: u32) {
    player.energy = player.energy.saturating_add(amount).min(player.max_energy);
}

pub fn is_exhausted(player: &Player) -> bool {
    player.energy == 0
}

pub fn energy_percent(player: &Player) -> f32 {
    if player.max_energy == 0 {
        return 0.0;
    }
    player.energy as f32 / player.max_energy as f32 * 100.0
}

/// Collapse from exhaustion: lose up to `PASSOUT_ENERGY` gold and wake at
/// half energy. Returns the gold actually lost.
///
/// The orchestrator has its own, harsher passout (flat 100g, then 75
/// energy); this helper keeps its own numbers.
pub fn handle_passout(player: &mut Player) -> u32 {
    let gold_lost = player.gold.min(PASSOUT_ENERGY);
    player.gold -= gold_lost;
    player.energy = player.max_energy / 2;
    info!("[Player] Passed out, lost {}g", gold_lost);
    gold_lost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::create_player;

    #[test]
    fn test_use_energy_exact_amount() {
        let mut player = create_player();
        player.energy = 4;
        assert!(use_energy(&mut player, 4));
        assert_eq!(player.energy, 0);
        assert!(is_exhausted(&player));
    }

    #[test]
    fn test_use_energy_insufficient_is_noop() {
        let mut player = create_player();
        player.energy = 1;
        assert!(!use_energy(&mut player, 2));
        assert_eq!(player.energy, 1);
        assert!(!has_energy(&player, 2));
    }

    #[test]
    fn test_restore_energy_clamps_at_max() {
        let mut player = create_player();
        player.energy = 90;
        restore_energy(&mut player, 50);
        assert_eq!(player.energy, player.max_energy);
        assert_eq!(energy_percent(&player), 100.0);
    }

    #[test]
    fn test_passout_penalty() {
        let mut player = create_player();
        player.energy = 0;
        assert_eq!(handle_passout(&mut player), PASSOUT_ENERGY);
        assert_eq!(player.gold, STARTING_GOLD - PASSOUT_ENERGY);
        assert_eq!(player.energy, 50);
    }

    #[test]
    fn test_passout_with_little_gold() {
        let mut player = create_player();
        player.gold = 30;
        assert_eq!(handle_passout(&mut player), 30);
        assert_eq!(player.gold, 0);
    }
}
