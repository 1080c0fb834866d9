use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use crate::game::{add_message, grid_for};
use crate::shared::*;
use crate::world::maps::map_dimensions;

pub mod leaderboard;

pub use leaderboard::{leaderboard_score, Leaderboard, LeaderboardEntry};

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

/// What goes to disk: the whole session plus when and by which format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: String,
    /// Milliseconds since the Unix epoch. Zero when unknown.
    #[serde(default)]
    pub timestamp: u64,
    pub state: GameState,
}

/// Where the single save slot lives: a JSON file natively, a
/// localStorage key in the browser.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SaveLocation {
    #[cfg(not(target_arch = "wasm32"))]
    pub path: PathBuf,
    #[cfg(target_arch = "wasm32")]
    pub key: String,
}

impl Default for SaveLocation {
    #[cfg(not(target_arch = "wasm32"))]
    fn default() -> Self {
        Self {
            path: saves_directory().join(format!("{}.json", SAVE_KEY)),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn default() -> Self {
        Self {
            key: SAVE_KEY.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent;

#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveLocation>()
            .init_resource::<Leaderboard>()
            .add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            .add_systems(
                Update,
                (
                    forward_save_actions,
                    handle_save_request,
                    handle_load_request,
                    leaderboard::record_game_over,
                )
                    .chain(),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RECORD ENCODING
// ═══════════════════════════════════════════════════════════════════════

pub fn encode_save(state: &GameState, timestamp: u64) -> Result<String, String> {
    let record = SaveRecord {
        version: SAVE_VERSION.to_string(),
        timestamp,
        state: state.clone(),
    };
    serde_json::to_string_pretty(&record).map_err(|e| format!("Serialization failed: {}", e))
}

/// Parse a stored record. A record without a version or a state is
/// rejected before the state itself is looked at.
pub fn decode_save(json: &str) -> Result<SaveRecord, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Malformed save: {}", e))?;

    let has_version = value
        .get("version")
        .and_then(|v| v.as_str())
        .is_some_and(|v| !v.is_empty());
    if !has_version {
        return Err("Save record has no version".to_string());
    }
    if !value.get("state").is_some_and(|s| !s.is_null()) {
        return Err("Save record has no state".to_string());
    }

    let record: SaveRecord =
        serde_json::from_value(value).map_err(|e| format!("Deserialization failed: {}", e))?;
    validate_grids(&record.state)?;
    if record.version != SAVE_VERSION {
        warn!(
            "[Save] Record has version {} but current version is {}. Loading anyway.",
            record.version, SAVE_VERSION
        );
    }
    Ok(record)
}

fn validate_grids(state: &GameState) -> Result<(), String> {
    for map in [MapId::Farm, MapId::Town, MapId::Beach] {
        let (width, height) = map_dimensions(map);
        grid_for(state, map)
            .validate(width, height)
            .map_err(|e| format!("Save record has inconsistent grid ({:?}): {}", map, e))?;
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE BACKENDS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn current_timestamp() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(location: &SaveLocation, json: &str) -> Result<(), String> {
    let path = &location.path;
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Could not create saves directory: {}", e))?;
        }
    }
    // Write to a temp file first, then rename over the old save.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw(location: &SaveLocation) -> Result<Option<String>, String> {
    let path = &location.path;
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw(location: &SaveLocation) -> Result<(), String> {
    let path = &location.path;
    if !path.exists() {
        return Ok(());
    }
    fs::remove_file(path).map_err(|e| format!("Delete failed for {}: {}", path.display(), e))
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No browser window".to_string())?
        .local_storage()
        .map_err(|e| format!("localStorage unavailable: {:?}", e))?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn write_raw(location: &SaveLocation, json: &str) -> Result<(), String> {
    get_storage()?
        .set_item(&location.key, json)
        .map_err(|e| format!("localStorage write failed: {:?}", e))
}

#[cfg(target_arch = "wasm32")]
fn read_raw(location: &SaveLocation) -> Result<Option<String>, String> {
    get_storage()?
        .get_item(&location.key)
        .map_err(|e| format!("localStorage read failed: {:?}", e))
}

#[cfg(target_arch = "wasm32")]
fn remove_raw(location: &SaveLocation) -> Result<(), String> {
    get_storage()?
        .remove_item(&location.key)
        .map_err(|e| format!("localStorage delete failed: {:?}", e))
}

fn read_record(location: &SaveLocation) -> Result<Option<SaveRecord>, String> {
    match read_raw(location)? {
        Some(json) => decode_save(&json).map(Some),
        None => Ok(None),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE / LOAD
// ═══════════════════════════════════════════════════════════════════════

pub fn save_game(location: &SaveLocation, state: &GameState) -> bool {
    let result = encode_save(state, current_timestamp()).and_then(|json| write_raw(location, &json));
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("[Save] Save FAILED: {}", e);
            false
        }
    }
}

/// The stored session, or `None` when there is none or it cannot be read.
pub fn load_game(location: &SaveLocation) -> Option<GameState> {
    match read_record(location) {
        Ok(record) => record.map(|r| r.state),
        Err(e) => {
            warn!("[Save] Load FAILED: {}", e);
            None
        }
    }
}

pub fn has_save_game(location: &SaveLocation) -> bool {
    matches!(read_record(location), Ok(Some(_)))
}

pub fn delete_save_game(location: &SaveLocation) -> bool {
    match remove_raw(location) {
        Ok(()) => true,
        Err(e) => {
            warn!("[Save] {}", e);
            false
        }
    }
}

pub fn save_timestamp(location: &SaveLocation) -> Option<u64> {
    read_record(location)
        .ok()
        .flatten()
        .map(|r| r.timestamp)
        .filter(|&t| t > 0)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn forward_save_actions(
    mut actions: EventReader<PlayerActionEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut load_writer: EventWriter<LoadRequestEvent>,
) {
    for PlayerActionEvent(action) in actions.read() {
        match action {
            PlayerAction::Save => {
                save_writer.send(SaveRequestEvent);
            }
            PlayerAction::Load => {
                load_writer.send(LoadRequestEvent);
            }
            _ => {}
        }
    }
}

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    location: Res<SaveLocation>,
    mut state: ResMut<GameState>,
) {
    for _ in save_events.read() {
        match encode_save(&state, current_timestamp()).and_then(|json| write_raw(&location, &json)) {
            Ok(()) => {
                info!("[Save] Saved {} {}", state.time.season.name(), state.time.day);
                add_message(&mut state, "Game saved!");
                complete_events.send(SaveCompleteEvent {
                    success: true,
                    error_message: None,
                });
            }
            Err(e) => {
                warn!("[Save] Save FAILED: {}", e);
                add_message(&mut state, "Failed to save game.");
                complete_events.send(SaveCompleteEvent {
                    success: false,
                    error_message: Some(e),
                });
            }
        }
    }
}

fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
    location: Res<SaveLocation>,
    mut state: ResMut<GameState>,
) {
    for _ in load_events.read() {
        match load_game(&location) {
            Some(mut loaded) => {
                loaded.screen = Screen::Playing;
                loaded.dialog_npc = None;
                loaded.dialog_text = None;
                loaded.pending_sleep = false;
                *state = loaded;
                info!("[Save] Loaded {} {}", state.time.season.name(), state.time.day);
                add_message(&mut state, "Game loaded!");
                complete_events.send(LoadCompleteEvent { success: true });
            }
            None => {
                add_message(&mut state, "No saved game found.");
                complete_events.send(LoadCompleteEvent { success: false });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{create_game, start_game};
    use tempfile::TempDir;

    fn temp_location() -> (TempDir, SaveLocation) {
        let dir = TempDir::new().unwrap();
        let location = SaveLocation {
            path: dir.path().join("saves").join("homestead_save.json"),
        };
        (dir, location)
    }

    fn played_state() -> GameState {
        let mut state = create_game();
        start_game(&mut state);
        state.player.gold = 1234;
        state.time.day = 7;
        state.npcs[0].friendship = 60;
        state.shipping_bin.push(Item::crop(CropKind::Potato, 3));
        state
    }

    #[test]
    fn test_encode_decode_preserves_state() {
        let state = played_state();
        let json = encode_save(&state, 1_700_000_000_000).unwrap();
        let record = decode_save(&json).unwrap();
        assert_eq!(record.version, SAVE_VERSION);
        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert_eq!(record.state, state);
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        assert!(decode_save("not json").is_err());
        assert!(decode_save(r#"{"timestamp": 5}"#).is_err());

        let state_json = serde_json::to_string(&create_game()).unwrap();
        let no_version = format!(r#"{{"timestamp": 5, "state": {}}}"#, state_json);
        assert!(decode_save(&no_version).is_err());

        let no_state = r#"{"version": "1.0.0", "timestamp": 5}"#;
        assert!(decode_save(no_state).is_err());

        let null_state = r#"{"version": "1.0.0", "state": null}"#;
        assert!(decode_save(null_state).is_err());
    }

    #[test]
    fn test_decode_rejects_inconsistent_grids() {
        let mut short = create_game();
        short.farm_grid.tiles.truncate(10);
        let json = encode_save(&short, 5).unwrap();
        assert!(decode_save(&json).is_err());

        let mut resized = create_game();
        resized.beach_grid = Grid::filled(TOWN_WIDTH, TOWN_HEIGHT, TileKind::Dirt);
        let json = encode_save(&resized, 5).unwrap();
        assert!(decode_save(&json).is_err());
    }

    #[test]
    fn test_inconsistent_grid_file_loads_as_none() {
        let (_dir, location) = temp_location();
        let mut state = create_game();
        state.town_grid.tiles.clear();
        assert!(save_game(&location, &state));
        assert!(load_game(&location).is_none());
        assert!(!has_save_game(&location));
    }

    #[test]
    fn test_decode_accepts_record_without_timestamp() {
        let state_json = serde_json::to_string(&create_game()).unwrap();
        let json = format!(r#"{{"version": "1.0.0", "state": {}}}"#, state_json);
        let record = decode_save(&json).unwrap();
        assert_eq!(record.timestamp, 0);
    }

    #[test]
    fn test_file_round_trip_and_delete() {
        let (_dir, location) = temp_location();
        assert!(!has_save_game(&location));
        assert!(load_game(&location).is_none());
        assert!(save_timestamp(&location).is_none());

        let state = played_state();
        assert!(save_game(&location, &state));
        assert!(has_save_game(&location));
        assert_eq!(load_game(&location), Some(state));
        assert!(save_timestamp(&location).is_some_and(|t| t > 0));
        assert!(!location.path.with_extension("json.tmp").exists());

        assert!(delete_save_game(&location));
        assert!(!has_save_game(&location));
        assert!(delete_save_game(&location), "deleting nothing still succeeds");
    }

    #[test]
    fn test_corrupt_file_loads_as_none() {
        let (_dir, location) = temp_location();
        assert!(save_game(&location, &create_game()));
        fs::write(&location.path, "{ broken").unwrap();
        assert!(!has_save_game(&location));
        assert!(load_game(&location).is_none());
    }
}
