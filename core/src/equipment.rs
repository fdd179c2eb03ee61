use bitflags::bitflags;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, Money};

/// Tools sold at the store, owned for good once bought.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    Shovel,
    Pick,
    Drill,
    Lantern,
    Bucket,
    Torch,
    Dynamite,
}

impl Equipment {
    /// In store shelf order.
    pub const ALL: [Equipment; 7] = [
        Self::Shovel,
        Self::Pick,
        Self::Drill,
        Self::Lantern,
        Self::Bucket,
        Self::Torch,
        Self::Dynamite,
    ];

    pub const fn price(self) -> Money {
        use Equipment::*;
        match self {
            Shovel => 100,
            Pick => 150,
            Drill => 250,
            Lantern => 300,
            Bucket => 200,
            Torch => 100,
            Dynamite => 300,
        }
    }

    pub const fn name(self) -> &'static str {
        use Equipment::*;
        match self {
            Shovel => "shovel",
            Pick => "pick",
            Drill => "drill",
            Lantern => "lantern",
            Bucket => "bucket",
            Torch => "torch",
            Dynamite => "dynamite",
        }
    }

    pub const fn description(self) -> &'static str {
        use Equipment::*;
        match self {
            Shovel => "Digging costs 12 less, down to 8",
            Pick => "Digging costs 5 less, down to 5",
            Drill => "Cuts through granite",
            Lantern => "Shows what lies behind undug tiles",
            Bucket => "Bails out water",
            Torch => "Lights the way",
            Dynamite => "Blasting supplies",
        }
    }

    const fn flag(self) -> EquipmentSet {
        use Equipment::*;
        match self {
            Shovel => EquipmentSet::SHOVEL,
            Pick => EquipmentSet::PICK,
            Drill => EquipmentSet::DRILL,
            Lantern => EquipmentSet::LANTERN,
            Bucket => EquipmentSet::BUCKET,
            Torch => EquipmentSet::TORCH,
            Dynamite => EquipmentSet::DYNAMITE,
        }
    }
}

impl FromStr for Equipment {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|equipment| equipment.name() == name)
            .ok_or(GameError::UnknownEquipment(name))
    }
}

bitflags! {
    /// Owned equipment, membership only.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EquipmentSet: u8 {
        const SHOVEL   = 1;
        const PICK     = 1 << 1;
        const DRILL    = 1 << 2;
        const LANTERN  = 1 << 3;
        const BUCKET   = 1 << 4;
        const TORCH    = 1 << 5;
        const DYNAMITE = 1 << 6;
    }
}

impl EquipmentSet {
    pub fn has(self, equipment: Equipment) -> bool {
        self.contains(equipment.flag())
    }

    pub fn add(&mut self, equipment: Equipment) {
        self.insert(equipment.flag());
    }

    pub fn iter_owned(self) -> impl Iterator<Item = Equipment> {
        Equipment::ALL.into_iter().filter(move |&equipment| self.has(equipment))
    }
}

impl From<Equipment> for EquipmentSet {
    fn from(equipment: Equipment) -> Self {
        equipment.flag()
    }
}

impl FromIterator<Equipment> for EquipmentSet {
    fn from_iter<I: IntoIterator<Item = Equipment>>(iter: I) -> Self {
        let mut set = Self::empty();
        for equipment in iter {
            set.add(equipment);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Drill".parse::<Equipment>(), Ok(Equipment::Drill));
        assert_eq!(" lantern ".parse::<Equipment>(), Ok(Equipment::Lantern));
        assert_eq!(
            "jackhammer".parse::<Equipment>(),
            Err(GameError::UnknownEquipment("jackhammer".into()))
        );
    }

    #[test]
    fn set_membership_is_idempotent() {
        let mut owned = EquipmentSet::empty();
        owned.add(Equipment::Pick);
        owned.add(Equipment::Pick);
        owned.add(Equipment::Torch);

        assert!(owned.has(Equipment::Pick));
        assert!(!owned.has(Equipment::Shovel));
        assert_eq!(
            owned.iter_owned().collect::<Vec<_>>(),
            vec![Equipment::Pick, Equipment::Torch]
        );
    }

    #[test]
    fn every_item_has_a_distinct_flag() {
        let all = Equipment::ALL
            .into_iter()
            .fold(EquipmentSet::empty(), |set, equipment| set | equipment.flag());
        assert_eq!(all, EquipmentSet::all());
    }
}
