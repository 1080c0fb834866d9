use crate::shared::*;

pub const EMILY_ID: &str = "emily";

/// Emily's day: home in the morning, the beach before lunch, the plaza in
/// the afternoon, home again in the evening. Not visible after 22:00.
pub const EMILY_SCHEDULE: [ScheduleEntry; 4] = [
    ScheduleEntry { start_hour: 6, end_hour: 9, map: MapId::Town, pos: Position::new(18, 4) },
    ScheduleEntry { start_hour: 9, end_hour: 12, map: MapId::Beach, pos: Position::new(10, 8) },
    ScheduleEntry { start_hour: 12, end_hour: 17, map: MapId::Town, pos: Position::new(12, 12) },
    ScheduleEntry { start_hour: 17, end_hour: 22, map: MapId::Town, pos: Position::new(18, 4) },
];

pub const EMILY_LOVED: &[CropKind] = &[CropKind::Cauliflower];
pub const EMILY_LIKED: &[CropKind] = &[CropKind::Parsnip, CropKind::Potato];

pub const EMILY_GREETINGS: &[&str] = &[
    "Hi there! Beautiful day, isn't it?",
    "I love walking on the beach in the morning.",
    "Have you tried the crops from the local farm?",
    "The shop has some great seeds if you need any!",
    "I hope you're settling in well.",
];

pub const EMILY_REPEAT_LINES: &[&str] = &[
    "We already talked today. See you tomorrow!",
    "Oh, hi again! I'm a bit busy right now.",
    "I'm glad you stopped by, but I need to get going.",
];

const NO_CROPS: &[CropKind] = &[];
const FALLBACK_GREETINGS: &[&str] = &["Hello."];
const FALLBACK_REPEAT_LINES: &[&str] = &["See you around."];

pub fn create_emily() -> Npc {
    Npc {
        id: EMILY_ID.to_string(),
        name: "Emily".to_string(),
        pos: Position::new(18, 4),
        friendship: 0,
        schedule: EMILY_SCHEDULE.to_vec(),
        talked_today: false,
    }
}

pub fn create_all_npcs() -> Vec<Npc> {
    vec![create_emily()]
}

/// Loved and liked crops for an NPC. Anything else is disliked.
pub fn gift_tastes(npc_id: &str) -> (&'static [CropKind], &'static [CropKind]) {
    match npc_id {
        EMILY_ID => (EMILY_LOVED, EMILY_LIKED),
        _ => (NO_CROPS, NO_CROPS),
    }
}

/// (first-talk lines, already-talked lines)
pub fn dialogue_pools(npc_id: &str) -> (&'static [&'static str], &'static [&'static str]) {
    match npc_id {
        EMILY_ID => (EMILY_GREETINGS, EMILY_REPEAT_LINES),
        _ => (FALLBACK_GREETINGS, FALLBACK_REPEAT_LINES),
    }
}
