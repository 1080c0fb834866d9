use crate::shared::*;

/// Static design data for one crop species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropData {
    pub kind: CropKind,
    pub name: &'static str,
    pub seed_cost: u32,
    /// Watered days from seed to harvest.
    pub growth_days: u32,
    pub sell_price: u32,
}

/// Spring crops: parsnip (4d), potato (6d), cauliflower (12d).
pub const CROP_TABLE: [CropData; 3] = [
    CropData {
        kind: CropKind::Parsnip,
        name: "Parsnip",
        seed_cost: 20,
        growth_days: 4,
        sell_price: 35,
    },
    CropData {
        kind: CropKind::Potato,
        name: "Potato",
        seed_cost: 50,
        growth_days: 6,
        sell_price: 80,
    },
    CropData {
        kind: CropKind::Cauliflower,
        name: "Cauliflower",
        seed_cost: 80,
        growth_days: 12,
        sell_price: 175,
    },
];

pub fn crop_data(kind: CropKind) -> &'static CropData {
    match kind {
        CropKind::Parsnip => &CROP_TABLE[0],
        CropKind::Potato => &CROP_TABLE[1],
        CropKind::Cauliflower => &CROP_TABLE[2],
    }
}

pub fn days_to_mature(kind: CropKind) -> u32 {
    crop_data(kind).growth_days
}

pub fn crop_sell_price(kind: CropKind) -> u32 {
    crop_data(kind).sell_price
}

pub fn crop_seed_cost(kind: CropKind) -> u32 {
    crop_data(kind).seed_cost
}

pub fn crop_name(kind: CropKind) -> &'static str {
    crop_data(kind).name
}

/// Sell price minus seed cost; positive for every shipped crop.
pub fn crop_profit(kind: CropKind) -> i32 {
    crop_sell_price(kind) as i32 - crop_seed_cost(kind) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_lookup() {
        for kind in CropKind::ALL {
            assert_eq!(crop_data(kind).kind, kind);
        }
    }

    #[test]
    fn test_crop_numbers() {
        assert_eq!(
            (crop_seed_cost(CropKind::Parsnip), days_to_mature(CropKind::Parsnip), crop_sell_price(CropKind::Parsnip)),
            (20, 4, 35)
        );
        assert_eq!(days_to_mature(CropKind::Potato), 6);
        assert_eq!(crop_sell_price(CropKind::Cauliflower), 175);
        assert_eq!(crop_profit(CropKind::Parsnip), 15);
        assert_eq!(crop_profit(CropKind::Cauliflower), 95);
    }
}
