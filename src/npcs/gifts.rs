//! Gift system: taste lookup, friendship deltas, reaction lines.

use crate::data::npcs::gift_tastes;
use crate::shared::*;

pub const REJECT_REACTION: &str = "I can't accept that...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftResult {
    /// Nominal friendship change for the gift's tier (0 when rejected).
    pub change: i32,
    pub reaction: &'static str,
    pub accepted: bool,
}

pub fn gift_preference(npc_id: &str, crop: CropKind) -> GiftPreference {
    let (loved, liked) = gift_tastes(npc_id);
    if loved.contains(&crop) {
        GiftPreference::Loved
    } else if liked.contains(&crop) {
        GiftPreference::Liked
    } else {
        GiftPreference::Disliked
    }
}

fn preference_to_points(preference: GiftPreference) -> i32 {
    match preference {
        GiftPreference::Loved => LOVED_GIFT_FRIENDSHIP,
        GiftPreference::Liked => LIKED_GIFT_FRIENDSHIP,
        GiftPreference::Disliked => DISLIKED_GIFT_FRIENDSHIP,
    }
}

fn reaction_for(preference: GiftPreference) -> &'static str {
    match preference {
        GiftPreference::Loved => "Oh my! This is my favorite! Thank you so much!",
        GiftPreference::Liked => "This is wonderful, thank you!",
        GiftPreference::Disliked => "Oh... thanks, I guess.",
    }
}

/// Only crops are accepted. Friendship is clamped to `[0, MAX_FRIENDSHIP]`.
pub fn give_gift(npc: &mut Npc, item: &Item) -> GiftResult {
    let Some(crop) = item.kind.harvested_crop() else {
        return GiftResult {
            change: 0,
            reaction: REJECT_REACTION,
            accepted: false,
        };
    };

    let preference = gift_preference(&npc.id, crop);
    let change = preference_to_points(preference);
    let updated = (npc.friendship as i64 + change as i64).clamp(0, MAX_FRIENDSHIP as i64);
    npc.friendship = updated as u32;

    GiftResult {
        change,
        reaction: reaction_for(preference),
        accepted: true,
    }
}

pub fn friendship_hearts(npc: &Npc) -> u32 {
    npc.friendship / POINTS_PER_HEART
}

/// Points toward the next heart.
pub fn friendship_progress(npc: &Npc) -> u32 {
    npc.friendship % POINTS_PER_HEART
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::npcs::create_emily;

    #[test]
    fn test_emily_tastes() {
        let mut emily = create_emily();
        let loved = give_gift(&mut emily, &Item::crop(CropKind::Cauliflower, 1));
        assert_eq!(loved.change, LOVED_GIFT_FRIENDSHIP);
        assert_eq!(emily.friendship, 100);

        let liked = give_gift(&mut emily, &Item::crop(CropKind::Parsnip, 1));
        assert_eq!(liked.change, LIKED_GIFT_FRIENDSHIP);
        assert_eq!(liked.reaction, "This is wonderful, thank you!");
        assert_eq!(emily.friendship, 150);
    }

    #[test]
    fn test_non_crop_gift_rejected() {
        let mut emily = create_emily();
        emily.friendship = 40;
        let result = give_gift(&mut emily, &Item::seeds(CropKind::Cauliflower, 1));
        assert_eq!(result.change, 0);
        assert_eq!(result.reaction, REJECT_REACTION);
        assert!(!result.accepted);
        assert_eq!(emily.friendship, 40);
    }

    #[test]
    fn test_loved_gifts_never_exceed_cap() {
        let mut emily = create_emily();
        for _ in 0..15 {
            give_gift(&mut emily, &Item::crop(CropKind::Cauliflower, 1));
            assert!(emily.friendship <= MAX_FRIENDSHIP);
        }
        assert_eq!(emily.friendship, MAX_FRIENDSHIP);
        assert_eq!(friendship_hearts(&emily), MAX_HEARTS);
    }

    #[test]
    fn test_disliked_gift_floors_at_zero() {
        // A stranger with no taste table dislikes every crop.
        let mut npc = create_emily();
        npc.id = "stranger".to_string();
        npc.friendship = 10;
        let result = give_gift(&mut npc, &Item::crop(CropKind::Potato, 1));
        assert_eq!(result.change, DISLIKED_GIFT_FRIENDSHIP);
        assert_eq!(result.reaction, "Oh... thanks, I guess.");
        assert_eq!(npc.friendship, 0);
    }

    #[test]
    fn test_hearts_and_progress() {
        let mut emily = create_emily();
        emily.friendship = 345;
        assert_eq!(friendship_hearts(&emily), 3);
        assert_eq!(friendship_progress(&emily), 45);
    }
}
