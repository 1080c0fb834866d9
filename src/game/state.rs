//! The session state machine: screens, the per-frame tick, day rollover,
//! map changes and scoring. Everything here mutates one `GameState`.

use bevy::prelude::*;

use crate::calendar::{advance_time_by_seconds, is_day_over, start_new_day};
use crate::data::npcs::create_all_npcs;
use crate::economy::process_shipping_bin;
use crate::farming::advance_crop_growth;
use crate::npcs::reset_npc_daily;
use crate::player::{create_player, reset_player_for_new_day};
use crate::shared::*;
use crate::world::maps::{
    check_map_transition, create_beach_grid, create_farm_grid, create_town_grid, entry_position,
    map_dimensions, map_name,
};
use crate::world::tiles::clear_watered;

/// What one `update_game` call did beyond moving the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub slept: bool,
    pub passed_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub gold: u32,
    pub crops_grown: u32,
    pub friendship: u32,
    pub total: u32,
}

pub fn create_game() -> GameState {
    GameState {
        screen: Screen::Title,
        player: create_player(),
        time: crate::calendar::create_time(),
        farm_grid: create_farm_grid(),
        town_grid: create_town_grid(),
        beach_grid: create_beach_grid(),
        current_map: MapId::Farm,
        npcs: create_all_npcs(),
        shipping_bin: Vec::new(),
        dialog_text: None,
        dialog_npc: None,
        messages: Vec::new(),
        pending_sleep: false,
    }
}

impl Default for GameState {
    fn default() -> Self {
        create_game()
    }
}

pub fn start_game(state: &mut GameState) {
    if state.screen != Screen::Title {
        return;
    }
    state.screen = Screen::Playing;
    add_message(state, "Welcome to Homestead Farm!");
    info!("[Game] New game started on {}", map_name(state.current_map));
}

// ─── Map access ───────────────────────────────────────────────────────────────

pub fn grid_for(state: &GameState, map: MapId) -> &Grid {
    match map {
        MapId::Farm => &state.farm_grid,
        MapId::Town => &state.town_grid,
        MapId::Beach => &state.beach_grid,
    }
}

pub fn grid_for_mut(state: &mut GameState, map: MapId) -> &mut Grid {
    match map {
        MapId::Farm => &mut state.farm_grid,
        MapId::Town => &mut state.town_grid,
        MapId::Beach => &mut state.beach_grid,
    }
}

pub fn current_grid(state: &GameState) -> &Grid {
    grid_for(state, state.current_map)
}

pub fn current_map_dimensions(state: &GameState) -> (usize, usize) {
    map_dimensions(state.current_map)
}

/// Borrow the player and the active grid at the same time.
pub fn player_and_grid(state: &mut GameState) -> (&mut Player, &mut Grid) {
    let grid = match state.current_map {
        MapId::Farm => &mut state.farm_grid,
        MapId::Town => &mut state.town_grid,
        MapId::Beach => &mut state.beach_grid,
    };
    (&mut state.player, grid)
}

// ─── Tick & day rollover ──────────────────────────────────────────────────────

/// Advance the session by `dt` real seconds. Does nothing off the
/// PLAYING screen.
pub fn update_game(state: &mut GameState, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.screen != Screen::Playing {
        return outcome;
    }

    advance_time_by_seconds(&mut state.time, dt);

    if is_day_over(&state.time) {
        trigger_sleep(state);
        outcome.slept = true;
    }

    if state.player.energy == 0 && state.screen == Screen::Playing {
        handle_passout(state);
        outcome.passed_out = true;
    }

    outcome
}

pub fn process_new_day(state: &mut GameState) {
    let grown = advance_crop_growth(&mut state.farm_grid);
    clear_watered(&mut state.farm_grid);

    if !state.shipping_bin.is_empty() {
        let result = process_shipping_bin(&mut state.player, &mut state.shipping_bin);
        if result.gold > 0 {
            add_message(state, &format!("Shipped crops! Earned {}g", result.gold));
        }
        state.shipping_bin.clear();
    }

    reset_player_for_new_day(&mut state.player);
    for npc in state.npcs.iter_mut() {
        reset_npc_daily(npc);
    }

    start_new_day(&mut state.time);
    info!(
        "[Game] Morning of {} {} ({} crops grew overnight)",
        state.time.season.name(),
        state.time.day,
        grown
    );

    if check_end_condition(&state.time) {
        state.screen = Screen::End;
        add_message(state, "Spring has ended. Time to see your progress!");
        info!("[Game] Season over, final score {}", calculate_score(state).total);
    }
}

/// The run covers one 28-day spring. Day 29, or any later season, ends it.
pub fn check_end_condition(time: &TimeState) -> bool {
    time.day > DAYS_PER_SEASON || time.season != Season::Spring
}

/// Sleep through to the next morning at the farmhouse door. The END
/// screen, if the night reached it, is kept.
pub fn trigger_sleep(state: &mut GameState) {
    state.screen = Screen::Sleeping;
    state.pending_sleep = false;
    state.dialog_npc = None;
    state.dialog_text = None;

    process_new_day(state);

    state.player.pos = PLAYER_START_POS;
    state.current_map = MapId::Farm;
    if state.screen == Screen::Sleeping {
        state.screen = Screen::Playing;
    }
}

/// Collapse from exhaustion: lose up to 100g, sleep, and wake on 75 energy
/// instead of a full bar. Returns the gold lost.
pub fn handle_passout(state: &mut GameState) -> u32 {
    let penalty = state.player.gold.min(PASSOUT_GOLD_PENALTY);
    state.player.gold -= penalty;
    add_message(state, &format!("You passed out! Lost {}g", penalty));
    info!("[Game] Player passed out, lost {}g", penalty);

    trigger_sleep(state);
    state.player.energy = PASSOUT_ENERGY.min(state.player.max_energy);
    penalty
}

// ─── Movement & maps ──────────────────────────────────────────────────────────

/// Step on the active map; stepping into an exit band changes maps.
pub fn handle_player_move(state: &mut GameState, dx: i32, dy: i32) -> bool {
    let (player, grid) = player_and_grid(state);
    let moved = crate::player::move_player(player, dx, dy, grid);

    if moved {
        let pos = state.player.pos;
        if let Some(to) = check_map_transition(state.current_map, pos.x, pos.y) {
            handle_map_transition(state, to);
        }
    }
    moved
}

pub fn handle_map_transition(state: &mut GameState, to: MapId) {
    state.player.pos = entry_position(to, state.current_map);
    state.current_map = to;
    add_message(state, &format!("Entered {}", map_name(to)));
}

// ─── Screens ──────────────────────────────────────────────────────────────────

pub fn toggle_pause(state: &mut GameState) {
    state.screen = match state.screen {
        Screen::Playing => Screen::Paused,
        Screen::Paused => Screen::Playing,
        other => other,
    };
}

pub fn toggle_inventory(state: &mut GameState) {
    state.screen = match state.screen {
        Screen::Playing => Screen::Inventory,
        Screen::Inventory => Screen::Playing,
        other => other,
    };
}

pub fn open_shop(state: &mut GameState) -> bool {
    if state.screen != Screen::Playing {
        return false;
    }
    state.screen = Screen::Shop;
    true
}

pub fn close_shop(state: &mut GameState) {
    if state.screen == Screen::Shop {
        state.screen = Screen::Playing;
    }
}

pub fn open_dialog(state: &mut GameState, npc_id: &str, text: &str) -> bool {
    if state.screen != Screen::Playing {
        return false;
    }
    state.screen = Screen::Dialog;
    state.dialog_npc = Some(npc_id.to_string());
    state.dialog_text = Some(text.to_string());
    true
}

pub fn close_dialog(state: &mut GameState) {
    if state.screen != Screen::Dialog {
        return;
    }
    state.screen = Screen::Playing;
    state.dialog_npc = None;
    state.dialog_text = None;
    state.pending_sleep = false;
}

// ─── Log, score, shipping ─────────────────────────────────────────────────────

/// Append to the rolling message log, keeping the newest five.
pub fn add_message(state: &mut GameState, message: &str) {
    state.messages.push(message.to_string());
    if state.messages.len() > MAX_MESSAGES {
        let excess = state.messages.len() - MAX_MESSAGES;
        state.messages.drain(..excess);
    }
}

pub fn calculate_score(state: &GameState) -> Score {
    let gold = state.player.gold;
    let crops_grown = state.farm_grid.tiles.iter().filter(|t| t.crop.is_some()).count() as u32;
    let friendship = state.npcs.iter().map(|npc| npc.friendship).sum();
    Score {
        gold,
        crops_grown,
        friendship,
        total: gold + crops_grown * SCORE_PER_CROP + friendship,
    }
}

/// Drop an item straight into the bin as its own entry (no merging).
pub fn add_to_shipping(state: &mut GameState, item: Item) {
    state.shipping_bin.push(item);
    add_message(state, &format!("Added {} item(s) to shipping bin", item.quantity));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farming::crops::{plant_crop, water_crop};

    fn playing() -> GameState {
        let mut state = create_game();
        start_game(&mut state);
        state
    }

    #[test]
    fn test_create_and_start() {
        let mut state = create_game();
        assert_eq!(state.screen, Screen::Title);
        assert_eq!(state.current_map, MapId::Farm);
        assert_eq!(state.npcs.len(), 1);

        start_game(&mut state);
        assert_eq!(state.screen, Screen::Playing);
        assert_eq!(state.messages, vec!["Welcome to Homestead Farm!".to_string()]);
    }

    #[test]
    fn test_update_is_noop_off_playing_screen() {
        let mut state = create_game();
        update_game(&mut state, 10.0);
        assert_eq!(state.time.hour, DAY_START_HOUR);

        let mut state = playing();
        toggle_pause(&mut state);
        update_game(&mut state, 10.0);
        assert_eq!(state.time.hour, DAY_START_HOUR);
    }

    #[test]
    fn test_update_advances_clock() {
        let mut state = playing();
        update_game(&mut state, 6.0);
        assert_eq!((state.time.hour, state.time.minute), (7, 0));
    }

    #[test]
    fn test_day_over_sends_player_to_bed() {
        let mut state = playing();
        state.current_map = MapId::Beach;
        state.player.pos = Position::new(5, 5);
        state.time.hour = 25;
        state.time.minute = 59;

        let outcome = update_game(&mut state, 0.1);
        assert!(outcome.slept);
        assert_eq!(state.time.day, 2);
        assert_eq!(state.time.hour, DAY_START_HOUR);
        assert_eq!(state.current_map, MapId::Farm);
        assert_eq!(state.player.pos, PLAYER_START_POS);
        assert_eq!(state.screen, Screen::Playing);
    }

    #[test]
    fn test_process_new_day_invariants() {
        let mut state = playing();
        if let Some(tile) = state.farm_grid.get_mut(10, 10) {
            tile.kind = TileKind::Tilled;
            plant_crop(tile, CropKind::Parsnip);
            tile.watered = true;
            if let Some(crop) = tile.crop.as_mut() {
                water_crop(crop);
            }
        }
        state.player.energy = 12;
        state.npcs[0].talked_today = true;
        state.shipping_bin.push(Item::crop(CropKind::Parsnip, 5));

        process_new_day(&mut state);

        assert!(state.farm_grid.tiles.iter().all(|t| !t.watered));
        assert!(state.shipping_bin.is_empty());
        assert_eq!(state.player.gold, STARTING_GOLD + 175);
        assert_eq!(state.player.energy, state.player.max_energy);
        assert!(state.npcs.iter().all(|n| !n.talked_today));
        assert_eq!(state.time.day, 2);
        let crop = state.farm_grid.get(10, 10).and_then(|t| t.crop.clone());
        assert_eq!(crop.map(|c| c.days_grown), Some(1));
        assert!(state.messages.iter().any(|m| m == "Shipped crops! Earned 175g"));
    }

    #[test]
    fn test_end_condition_boundary() {
        let mut time = crate::calendar::create_time();
        time.day = 28;
        assert!(!check_end_condition(&time));
        time.day = 29;
        assert!(check_end_condition(&time));
    }

    #[test]
    fn test_last_night_of_spring_ends_the_run() {
        let mut state = playing();
        state.time.day = 28;
        trigger_sleep(&mut state);
        assert_eq!(state.time.season, Season::Summer);
        assert_eq!(state.screen, Screen::End);
        assert_eq!(
            state.messages.last().map(String::as_str),
            Some("Spring has ended. Time to see your progress!")
        );
    }

    #[test]
    fn test_passout_penalty_and_partial_energy() {
        let mut state = playing();
        state.player.energy = 0;
        let outcome = update_game(&mut state, 0.0);
        assert!(outcome.passed_out);
        assert_eq!(state.player.gold, STARTING_GOLD - PASSOUT_GOLD_PENALTY);
        assert_eq!(state.player.energy, PASSOUT_ENERGY);
        assert_eq!(state.time.day, 2);
        assert!(state.messages.iter().any(|m| m == "You passed out! Lost 100g"));
    }

    #[test]
    fn test_passout_with_little_gold() {
        let mut state = playing();
        state.player.gold = 40;
        assert_eq!(handle_passout(&mut state), 40);
        assert_eq!(state.player.gold, 0);
    }

    #[test]
    fn test_map_transition_symmetry() {
        let mut state = playing();
        state.player.pos = Position::new(30, 12);
        assert!(handle_player_move(&mut state, 1, 0));
        assert_eq!(state.current_map, MapId::Town);
        assert_eq!(state.player.pos, Position::new(1, 12));
        assert_eq!(state.messages.last().map(String::as_str), Some("Entered Town"));

        assert!(handle_player_move(&mut state, -1, 0));
        assert_eq!(state.current_map, MapId::Farm);
        assert_eq!(state.player.pos, Position::new(30, 12));

        state.current_map = MapId::Town;
        state.player.pos = Position::new(12, 22);
        assert!(handle_player_move(&mut state, 0, 1));
        assert_eq!(state.current_map, MapId::Beach);
        assert_eq!(state.player.pos, Position::new(12, 1));

        assert!(handle_player_move(&mut state, 0, -1));
        assert_eq!(state.current_map, MapId::Town);
        assert_eq!(state.player.pos, Position::new(12, 22));
    }

    #[test]
    fn test_blocked_move_stays_on_map() {
        let mut state = playing();
        state.player.pos = Position::new(6, 3);
        assert!(!handle_player_move(&mut state, -1, 0), "house wall");
        assert_eq!(state.player.pos, Position::new(6, 3));
        assert_eq!(state.player.facing, Facing::Left);
    }

    #[test]
    fn test_screen_toggles() {
        let mut state = playing();
        toggle_inventory(&mut state);
        assert_eq!(state.screen, Screen::Inventory);
        toggle_pause(&mut state);
        assert_eq!(state.screen, Screen::Inventory, "pause ignored in inventory");
        toggle_inventory(&mut state);
        assert_eq!(state.screen, Screen::Playing);

        assert!(open_shop(&mut state));
        assert!(!open_dialog(&mut state, "emily", "hi"));
        close_shop(&mut state);
        assert!(open_dialog(&mut state, "emily", "hi"));
        assert_eq!(state.dialog_npc.as_deref(), Some("emily"));
        close_dialog(&mut state);
        assert_eq!(state.screen, Screen::Playing);
        assert!(state.dialog_text.is_none());
    }

    #[test]
    fn test_message_log_keeps_newest_five() {
        let mut state = create_game();
        for i in 0..8 {
            add_message(&mut state, &format!("m{}", i));
        }
        assert_eq!(state.messages, vec!["m3", "m4", "m5", "m6", "m7"]);
    }

    #[test]
    fn test_score_counts_any_planted_crop() {
        let mut state = playing();
        for x in 8..11 {
            if let Some(tile) = state.farm_grid.get_mut(x, 5) {
                tile.kind = TileKind::Tilled;
                plant_crop(tile, CropKind::Potato);
            }
        }
        state.npcs[0].friendship = 120;
        let score = calculate_score(&state);
        assert_eq!(score.crops_grown, 3);
        assert_eq!(score.total, STARTING_GOLD + 150 + 120);
    }

    #[test]
    fn test_add_to_shipping_does_not_merge() {
        let mut state = playing();
        add_to_shipping(&mut state, Item::crop(CropKind::Parsnip, 1));
        add_to_shipping(&mut state, Item::crop(CropKind::Parsnip, 1));
        assert_eq!(state.shipping_bin.len(), 2);
        assert_eq!(
            state.messages.last().map(String::as_str),
            Some("Added 1 item(s) to shipping bin")
        );
    }
}
