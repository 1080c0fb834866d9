//! Game domain: the orchestrator that owns `GameState`.
//!
//! Responsible for:
//! - Creating the session and the screen machine (title, playing, menus, end)
//! - Driving the clock each frame and rolling days over
//! - Translating `PlayerActionEvent`s into state changes
//! - Announcing day ends, season changes and the final score as events

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::player::select_tool;
use crate::shared::*;

pub mod actions;
pub mod state;

pub use actions::{
    buy_seeds_action, confirm_dialog, gift_from_slot, interact, plant_selected_seed,
    ship_from_slot, use_tool_at, use_tool_on_facing, InteractOutcome,
};
pub use state::{
    add_message, add_to_shipping, calculate_score, check_end_condition, close_dialog, close_shop,
    create_game, current_grid, current_map_dimensions, grid_for, grid_for_mut,
    handle_map_transition, handle_passout, handle_player_move, open_dialog, open_shop,
    process_new_day, start_game, toggle_inventory, toggle_pause, trigger_sleep, update_game,
    Score, TickOutcome,
};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameState>()
            .add_event::<PlayerActionEvent>()
            .add_event::<GameOverEvent>()
            .add_systems(
                Update,
                (
                    handle_player_actions,
                    tick_game.run_if(game_is_playing),
                )
                    .chain(),
            );
    }
}

/// Run condition: the clock only runs on the PLAYING screen.
pub fn game_is_playing(state: Res<GameState>) -> bool {
    state.screen == Screen::Playing
}

/// Writers for everything a night can produce.
#[derive(SystemParam)]
pub struct DayEvents<'w> {
    pub day_end: EventWriter<'w, DayEndEvent>,
    pub season_change: EventWriter<'w, SeasonChangeEvent>,
    pub game_over: EventWriter<'w, GameOverEvent>,
}

impl DayEvents<'_> {
    /// Compare the clock before and after a sleep and send what changed.
    pub fn announce(&mut self, before: &TimeState, state: &GameState, passed_out: bool) {
        if state.time.day == before.day && state.time.season == before.season {
            return;
        }
        self.day_end.send(DayEndEvent {
            day: before.day,
            season: before.season,
            passed_out,
        });
        if state.time.season != before.season {
            self.season_change.send(SeasonChangeEvent {
                new_season: state.time.season,
            });
        }
        if state.screen == Screen::End && before.season == Season::Spring {
            let score = calculate_score(state);
            self.game_over.send(GameOverEvent {
                gold: score.gold,
                crops_grown: score.crops_grown,
                friendship: score.friendship,
                total: score.total,
            });
        }
    }
}

/// Writers for per-action feedback.
#[derive(SystemParam)]
pub struct ActionEvents<'w> {
    pub tool_use: EventWriter<'w, ToolUseEvent>,
    pub gift_given: EventWriter<'w, GiftGivenEvent>,
    pub map_transition: EventWriter<'w, MapTransitionEvent>,
}

pub fn tick_game(time: Res<Time>, mut state: ResMut<GameState>, mut days: DayEvents) {
    let before = state.time.clone();
    let outcome = update_game(&mut state, time.delta_secs());
    if outcome.slept || outcome.passed_out {
        days.announce(&before, &state, outcome.passed_out);
    }
}

pub fn handle_player_actions(
    mut actions: EventReader<PlayerActionEvent>,
    mut state: ResMut<GameState>,
    mut days: DayEvents,
    mut feedback: ActionEvents,
) {
    for PlayerActionEvent(action) in actions.read() {
        if state.screen == Screen::End {
            continue;
        }
        let before = state.time.clone();

        match *action {
            PlayerAction::StartGame => start_game(&mut state),
            PlayerAction::Move { dx, dy } => {
                if state.screen != Screen::Playing {
                    continue;
                }
                let from = state.current_map;
                handle_player_move(&mut state, dx, dy);
                if state.current_map != from {
                    feedback.map_transition.send(MapTransitionEvent {
                        from,
                        to: state.current_map,
                        entry: state.player.pos,
                    });
                }
            }
            PlayerAction::SelectTool(index) => select_tool(&mut state.player, index),
            PlayerAction::Interact => {
                interact(&mut state);
            }
            PlayerAction::UseToolOnFacing => {
                let target = crate::player::facing_position(&state.player);
                send_tool_use(&mut state, &mut feedback, target.x, target.y);
            }
            PlayerAction::UseToolAt { x, y } => send_tool_use(&mut state, &mut feedback, x, y),
            PlayerAction::PlantSeed { slot } => {
                plant_selected_seed(&mut state, slot);
            }
            PlayerAction::ToggleInventory => toggle_inventory(&mut state),
            PlayerAction::TogglePause => toggle_pause(&mut state),
            PlayerAction::OpenShop => {
                open_shop(&mut state);
            }
            PlayerAction::CloseShop => close_shop(&mut state),
            PlayerAction::BuySeeds { crop, quantity } => {
                buy_seeds_action(&mut state, crop, quantity);
            }
            PlayerAction::ShipFromSlot { slot } => {
                ship_from_slot(&mut state, slot);
            }
            PlayerAction::CloseDialog => close_dialog(&mut state),
            PlayerAction::ConfirmDialog { accept } => {
                if confirm_dialog(&mut state, accept) {
                    days.announce(&before, &state, false);
                }
            }
            PlayerAction::GiftFromSlot { slot } => {
                if let Some((npc_id, item, result)) = gift_from_slot(&mut state, slot) {
                    feedback.gift_given.send(GiftGivenEvent {
                        npc_id,
                        item,
                        change: result.change,
                    });
                }
            }
            PlayerAction::SwapSlots { a, b } => {
                state.player.inventory.swap_slots(a, b);
            }
            // Persistence is handled by the save plugin.
            PlayerAction::Save | PlayerAction::Load => {}
        }
    }
}

fn send_tool_use(state: &mut GameState, feedback: &mut ActionEvents, x: i32, y: i32) {
    let tool = crate::player::selected_tool(&state.player);
    if let Some(result) = use_tool_at(state, x, y) {
        feedback.tool_use.send(ToolUseEvent {
            tool,
            target: Position::new(x, y),
            success: result.success,
            energy_cost: result.energy_cost,
        });
    }
}
