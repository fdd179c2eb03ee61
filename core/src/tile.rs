use serde::{Deserialize, Serialize};

use crate::Mineral;

/// What occupies a single cell of the mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Dirt,
    /// Already dug, the only kind the player can stand on.
    Empty,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Granite,
    Water,
    Spring,
    Sandstone,
    Volcanic,
    Clover,
    Pump,
    Ring,
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Dirt
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Static metadata of a tile kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    /// Base cost of digging through the tile, before equipment discounts.
    pub dig_cost: u32,
    /// Nominal worth, for display only, the bank pays its own rates.
    pub value: u32,
    pub color: Rgb,
}

impl TileInfo {
    const fn new(dig_cost: u32, value: u32, color: Rgb) -> Self {
        Self {
            dig_cost,
            value,
            color,
        }
    }
}

impl TileKind {
    pub const ALL: [TileKind; 14] = [
        Self::Dirt,
        Self::Empty,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Diamond,
        Self::Granite,
        Self::Water,
        Self::Spring,
        Self::Sandstone,
        Self::Volcanic,
        Self::Clover,
        Self::Pump,
        Self::Ring,
    ];

    pub const fn info(self) -> TileInfo {
        use TileKind::*;
        match self {
            Dirt => TileInfo::new(20, 0, Rgb(139, 69, 19)),
            Empty => TileInfo::new(0, 0, Rgb(0, 0, 0)),
            Silver => TileInfo::new(20, 15, Rgb(192, 192, 192)),
            Gold => TileInfo::new(20, 50, Rgb(255, 215, 0)),
            Platinum => TileInfo::new(20, 250, Rgb(229, 228, 226)),
            Diamond => TileInfo::new(20, 1000, Rgb(0, 255, 255)),
            Granite => TileInfo::new(150, 0, Rgb(128, 128, 128)),
            Water => TileInfo::new(150, 0, Rgb(0, 0, 255)),
            Spring => TileInfo::new(20, 0, Rgb(0, 255, 0)),
            Sandstone => TileInfo::new(10, 0, Rgb(244, 164, 96)),
            Volcanic => TileInfo::new(30, 0, Rgb(255, 0, 0)),
            Clover => TileInfo::new(20, 0, Rgb(0, 128, 0)),
            Pump => TileInfo::new(20, 0, Rgb(128, 0, 128)),
            Ring => TileInfo::new(20, 0, Rgb(255, 255, 0)),
        }
    }

    pub const fn dig_cost(self) -> u32 {
        self.info().dig_cost
    }

    pub const fn value(self) -> u32 {
        self.info().value
    }

    pub const fn color(self) -> Rgb {
        self.info().color
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The mineral counter credited when digging this tile, if any.
    pub const fn mineral(self) -> Option<Mineral> {
        match self {
            Self::Silver => Some(Mineral::Silver),
            Self::Gold => Some(Mineral::Gold),
            Self::Platinum => Some(Mineral::Platinum),
            Self::Diamond => Some(Mineral::Diamonds),
            _ => None,
        }
    }

    /// Single character used by text front-ends.
    pub const fn glyph(self) -> char {
        use TileKind::*;
        match self {
            Dirt => '#',
            Empty => ' ',
            Silver => 's',
            Gold => 'g',
            Platinum => 'p',
            Diamond => 'D',
            Granite => 'G',
            Water => '~',
            Spring => 'o',
            Sandstone => ':',
            Volcanic => 'v',
            Clover => '&',
            Pump => 'P',
            Ring => '@',
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn empty_is_free_and_worthless() {
        assert_eq!(TileKind::Empty.dig_cost(), 0);
        assert_eq!(TileKind::Empty.value(), 0);
        assert!(TileKind::Empty.is_empty());
        assert!(TileKind::ALL.iter().filter(|kind| kind.is_empty()).count() == 1);
    }

    #[test]
    fn hard_tiles_cost_more() {
        assert_eq!(TileKind::Granite.dig_cost(), 150);
        assert_eq!(TileKind::Water.dig_cost(), 150);
        assert_eq!(TileKind::Sandstone.dig_cost(), 10);
        assert_eq!(TileKind::Volcanic.dig_cost(), 30);
        assert_eq!(TileKind::Diamond.value(), 1000);
    }

    #[test]
    fn only_ore_tiles_map_to_minerals() {
        let ores: Vec<_> = TileKind::ALL
            .into_iter()
            .filter(|kind| kind.mineral().is_some())
            .collect();
        assert_eq!(
            ores,
            vec![
                TileKind::Silver,
                TileKind::Gold,
                TileKind::Platinum,
                TileKind::Diamond
            ]
        );
    }
}
