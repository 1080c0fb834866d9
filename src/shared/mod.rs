//! Shared types, events, and constants for Homestead.
//!
//! This is the type contract. Every domain module imports from here, and the
//! whole `GameState` graph is what the save module serializes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// SCREENS: top-level mode machine
// ═══════════════════════════════════════════════════════════════════════

/// Which screen the player is looking at. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Screen {
    #[default]
    Title,
    Playing,
    Paused,
    Shop,
    Dialog,
    Inventory,
    Sleeping,
    End,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// In-game clock. `hour` keeps counting past 24 until the day is reset,
/// so 2 AM is hour 26.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeState {
    pub day: u32,    // 1-28
    pub hour: u32,   // 6-26
    pub minute: u32, // 0-59
    pub season: Season,
    /// Fractional game-minutes not yet applied to `minute`.
    #[serde(default)]
    pub pending_minutes: f32,
}

impl Default for TimeState {
    fn default() -> Self {
        Self {
            day: 1,
            hour: DAY_START_HOUR,
            minute: 0,
            season: Season::Spring,
            pending_minutes: 0.0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD & MAPS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapId {
    #[default]
    Farm,
    Town,
    Beach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Tilled,
    Water,
    Stone,
    Tree,
    Building,
}

/// Grid position in tiles. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// One grid cell. A crop may only sit on a `Tilled` tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub watered: bool,
    pub crop: Option<Crop>,
}

/// Fixed-size map, row-major: `tiles[y * width + x]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Parsnip,
    Potato,
    Cauliflower,
}

impl CropKind {
    pub const ALL: [CropKind; 3] = [CropKind::Parsnip, CropKind::Potato, CropKind::Cauliflower];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CropStage {
    Seed,
    Sprout,
    Growing,
    Mature,
    Harvest,
}

/// A planted crop. `stage` is cached from `days_grown` and the crop's growth length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub kind: CropKind,
    pub stage: CropStage,
    pub days_grown: u32,
    pub watered_today: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Scythe,
    Axe,
    Pickaxe,
}

/// What an item is. Two items stack only when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Tool(ToolKind),
    Seed(CropKind),
    Crop(CropKind),
}

impl ItemKind {
    /// Tools never stack, not even with themselves.
    pub fn is_stackable(self) -> bool {
        !matches!(self, ItemKind::Tool(_))
    }

    pub fn harvested_crop(self) -> Option<CropKind> {
        match self {
            ItemKind::Crop(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub quantity: u32,
}

impl Item {
    pub fn new(kind: ItemKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }

    pub fn tool(tool: ToolKind) -> Self {
        Self::new(ItemKind::Tool(tool), 1)
    }

    pub fn seeds(crop: CropKind, quantity: u32) -> Self {
        Self::new(ItemKind::Seed(crop), quantity)
    }

    pub fn crop(crop: CropKind, quantity: u32) -> Self {
        Self::new(ItemKind::Crop(crop), quantity)
    }
}

/// A slot holds at most one item stack; the index is its only identity.
pub type InventorySlot = Option<Item>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Inventory {
    pub slots: [InventorySlot; INVENTORY_SIZE],
}

impl Inventory {
    /// Add an item, merging into the first matching stack and spilling any
    /// overflow into the first empty slot. Returns false and leaves the
    /// inventory untouched when it cannot all fit.
    pub fn add_item(&mut self, item: Item) -> bool {
        if item.quantity == 0 {
            return false;
        }

        if item.kind.is_stackable() {
            if let Some(idx) = self.find_item(item.kind) {
                let existing = self.slots[idx].map(|s| s.quantity).unwrap_or(0);
                let Some(total) = existing.checked_add(item.quantity) else {
                    return false;
                };
                if total <= MAX_STACK {
                    if let Some(slot) = self.slots[idx].as_mut() {
                        slot.quantity = total;
                    }
                    return true;
                }

                // Overflow needs its own slot; check before touching the stack.
                let Some(empty) = self.find_empty_slot() else {
                    return false;
                };
                if let Some(slot) = self.slots[idx].as_mut() {
                    slot.quantity = MAX_STACK;
                }
                self.slots[empty] = Some(Item::new(item.kind, total - MAX_STACK));
                return true;
            }
        }

        match self.find_empty_slot() {
            Some(empty) => {
                self.slots[empty] = Some(item);
                true
            }
            None => false,
        }
    }

    /// Take `quantity` out of one slot. Fails without mutation on a bad
    /// index, an empty slot, or a request larger than the stack.
    pub fn remove_item(&mut self, slot_index: usize, quantity: u32) -> Option<Item> {
        let slot = self.slots.get_mut(slot_index)?;
        let held = slot.as_mut()?;
        if quantity == 0 || quantity > held.quantity {
            return None;
        }

        held.quantity -= quantity;
        let removed = Item::new(held.kind, quantity);
        if held.quantity == 0 {
            *slot = None;
        }
        Some(removed)
    }

    pub fn get_slot(&self, slot_index: usize) -> Option<&InventorySlot> {
        self.slots.get(slot_index)
    }

    pub fn item_in_slot(&self, slot_index: usize) -> Option<Item> {
        self.slots.get(slot_index).copied().flatten()
    }

    pub fn find_item(&self, kind: ItemKind) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.is_some_and(|item| item.kind == kind))
    }

    pub fn count_item(&self, kind: ItemKind) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|item| item.kind == kind)
            .map(|item| item.quantity)
            .fold(0, u32::saturating_add)
    }

    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    pub fn has_space(&self) -> bool {
        self.find_empty_slot().is_some()
    }

    pub fn is_full(&self) -> bool {
        !self.has_space()
    }

    pub fn swap_slots(&mut self, a: usize, b: usize) -> bool {
        if a >= INVENTORY_SIZE || b >= INVENTORY_SIZE {
            return false;
        }
        self.slots.swap(a, b);
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub energy: u32,
    pub max_energy: u32,
    pub gold: u32,
    pub inventory: Inventory,
    pub selected_tool: usize,
    pub facing: Facing,
}

// ═══════════════════════════════════════════════════════════════════════
// NPCs & RELATIONSHIPS
// ═══════════════════════════════════════════════════════════════════════

/// One row of an NPC's day: visible on `map` at `pos` for hours in
/// `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub start_hour: u32,
    pub end_hour: u32,
    pub map: MapId,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    pub pos: Position,
    pub friendship: u32,
    pub schedule: Vec<ScheduleEntry>,
    pub talked_today: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftPreference {
    Loved,
    Liked,
    Disliked,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: aggregate root
// ═══════════════════════════════════════════════════════════════════════

/// Everything a play session owns. Replaced wholesale on load and
/// serialized wholesale on save.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub screen: Screen,
    pub player: Player,
    pub time: TimeState,
    pub farm_grid: Grid,
    pub town_grid: Grid,
    pub beach_grid: Grid,
    pub current_map: MapId,
    pub npcs: Vec<Npc>,
    pub shipping_bin: Vec<Item>,
    pub dialog_text: Option<String>,
    pub dialog_npc: Option<String>,
    pub messages: Vec<String>,
    /// Set while the farmhouse "go to bed?" prompt is open.
    #[serde(default)]
    pub pending_sleep: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER ACTIONS: everything an input adapter may ask of the core
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    StartGame,
    Move { dx: i32, dy: i32 },
    SelectTool(usize),
    Interact,
    UseToolOnFacing,
    UseToolAt { x: i32, y: i32 },
    PlantSeed { slot: usize },
    ToggleInventory,
    TogglePause,
    OpenShop,
    CloseShop,
    BuySeeds { crop: CropKind, quantity: u32 },
    ShipFromSlot { slot: usize },
    CloseDialog,
    ConfirmDialog { accept: bool },
    GiftFromSlot { slot: usize },
    SwapSlots { a: usize, b: usize },
    Save,
    Load,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the input adapter (or tests) to drive the simulation.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerActionEvent(pub PlayerAction);

/// Fired once per day rollover, carrying the day that just ended.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
    pub season: Season,
    pub passed_out: bool,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangeEvent {
    pub new_season: Season,
}

#[derive(Event, Debug, Clone)]
pub struct MapTransitionEvent {
    pub from: MapId,
    pub to: MapId,
    pub entry: Position,
}

#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub target: Position,
    pub success: bool,
    pub energy_cost: u32,
}

#[derive(Event, Debug, Clone)]
pub struct GiftGivenEvent {
    pub npc_id: String,
    pub item: ItemKind,
    pub change: i32,
}

/// Fired once when the run reaches the END screen.
#[derive(Event, Debug, Clone)]
pub struct GameOverEvent {
    pub gold: u32,
    pub crops_grown: u32,
    pub friendship: u32,
    pub total: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const FARM_WIDTH: usize = 32;
pub const FARM_HEIGHT: usize = 24;
pub const TOWN_WIDTH: usize = 24;
pub const TOWN_HEIGHT: usize = 24;
pub const BEACH_WIDTH: usize = 24;
pub const BEACH_HEIGHT: usize = 16;

/// Seed for the farm's stone/tree decoration.
pub const FARM_LAYOUT_SEED: u64 = 42;

pub const DAY_START_HOUR: u32 = 6;
pub const DAY_END_HOUR: u32 = 26; // 2 AM
pub const MINUTES_PER_TICK: f32 = 10.0; // game-minutes per real second
pub const DAYS_PER_SEASON: u32 = 28;
pub const SHOP_OPEN_HOUR: u32 = 9;
pub const SHOP_CLOSE_HOUR: u32 = 17;
pub const NIGHT_START_HOUR: u32 = 20;

pub const MAX_ENERGY: u32 = 100;
pub const PASSOUT_ENERGY: u32 = 75;
pub const PASSOUT_GOLD_PENALTY: u32 = 100;

pub const STARTING_GOLD: u32 = 500;
pub const STARTING_PARSNIP_SEEDS: u32 = 15;
pub const INVENTORY_SIZE: usize = 12;
pub const MAX_STACK: u32 = 99;
pub const TOOL_COUNT: usize = 5;

pub const PLAYER_START_POS: Position = Position::new(10, 12);
pub const SHOP_COUNTER_POS: Position = Position::new(12, 12);
pub const SHOP_REACH: i32 = 2;

pub const TALK_FRIENDSHIP: u32 = 10;
pub const LOVED_GIFT_FRIENDSHIP: i32 = 100;
pub const LIKED_GIFT_FRIENDSHIP: i32 = 50;
pub const DISLIKED_GIFT_FRIENDSHIP: i32 = -20;
pub const POINTS_PER_HEART: u32 = 100;
pub const MAX_HEARTS: u32 = 10;
pub const MAX_FRIENDSHIP: u32 = MAX_HEARTS * POINTS_PER_HEART;

pub const MAX_MESSAGES: usize = 5;
pub const SCORE_PER_CROP: u32 = 50;

pub const SAVE_VERSION: &str = "1.0.0";
pub const SAVE_KEY: &str = "homestead_save";
pub const LEADERBOARD_SIZE: usize = 10;
