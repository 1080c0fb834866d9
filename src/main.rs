use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use homestead::game::{calculate_score, start_game};
use homestead::save::{load_game, SaveLocation};
use homestead::shared::*;
use homestead::{calendar, farming, game, npcs, player, save, world};

fn main() -> AppExit {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        // Domain plugins
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(npcs::NpcPlugin)
        .add_plugins(game::GamePlugin)
        .add_plugins(save::SavePlugin)
        .add_systems(Startup, resume_or_start)
        .add_systems(Last, exit_on_game_end)
        .run()
}

/// Pick up the stored session if there is one, otherwise leave the title
/// screen for a fresh farm.
fn resume_or_start(location: Res<SaveLocation>, mut state: ResMut<GameState>) {
    match load_game(&location) {
        Some(mut loaded) => {
            loaded.screen = Screen::Playing;
            *state = loaded;
            info!(
                "[Game] Resumed {} {}",
                state.time.season.name(),
                state.time.day
            );
        }
        None => start_game(&mut state),
    }
}

fn exit_on_game_end(state: Res<GameState>, mut exit: EventWriter<AppExit>) {
    if state.screen != Screen::End {
        return;
    }
    let score = calculate_score(&state);
    info!(
        "[Game] Final score {} (gold {}, crops {}, friendship {})",
        score.total, score.gold, score.crops_grown, score.friendship
    );
    exit.send(AppExit::Success);
}
