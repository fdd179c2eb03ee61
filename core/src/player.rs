use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::*;

/// Sellable ore, counted separately from money until taken to the bank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mineral {
    Silver,
    Gold,
    Platinum,
    Diamonds,
}

impl Mineral {
    pub const ALL: [Mineral; 4] = [Self::Silver, Self::Gold, Self::Platinum, Self::Diamonds];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Diamonds => "diamonds",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mineral| mineral.name() == name)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minerals {
    counts: [u32; 4],
}

impl Minerals {
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mineral, u32)> + '_ {
        Mineral::ALL.into_iter().map(|mineral| (mineral, self[mineral]))
    }
}

impl Index<Mineral> for Minerals {
    type Output = u32;

    fn index(&self, mineral: Mineral) -> &Self::Output {
        &self.counts[mineral as usize]
    }
}

impl IndexMut<Mineral> for Minerals {
    fn index_mut(&mut self, mineral: Mineral) -> &mut Self::Output {
        &mut self.counts[mineral as usize]
    }
}

/// Topmost visible mine row, follows the player keeping a margin above and below.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    top: Coord,
}

impl Camera {
    pub fn top(self) -> Coord {
        self.top
    }

    pub fn follow(&mut self, row: Coord, visible_rows: Coord, margin: Coord) {
        let row = i32::from(row);
        let rows = i32::from(visible_rows);
        let margin = i32::from(margin);
        let mut top = i32::from(self.top);

        if row > top + rows - margin {
            top = row - rows + margin;
        }
        if row < top + margin {
            top = (row - margin).max(0);
        }

        self.top = top.clamp(0, i32::from(Coord::MAX)) as Coord;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    money: Money,
    health: Health,
    max_health: Health,
    equipment: EquipmentSet,
    minerals: Minerals,
    has_ring: bool,
    position: Coord2,
    camera: Camera,
}

impl PlayerState {
    /// A negative `max_health` is treated as zero.
    pub fn new(money: Money, max_health: Health, position: Coord2) -> Self {
        let max_health = max_health.max(0);
        Self {
            money,
            health: max_health,
            max_health,
            equipment: EquipmentSet::empty(),
            minerals: Minerals::default(),
            has_ring: false,
            position,
            camera: Camera::default(),
        }
    }

    pub fn from_rules(rules: &GameRules) -> Self {
        Self::new(rules.starting_money, rules.max_health, rules.start_position())
    }

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn max_health(&self) -> Health {
        self.max_health
    }

    pub fn is_hurt(&self) -> bool {
        self.health < self.max_health
    }

    pub fn equipment(&self) -> EquipmentSet {
        self.equipment
    }

    pub fn minerals(&self) -> &Minerals {
        &self.minerals
    }

    pub fn has_ring(&self) -> bool {
        self.has_ring
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn add_money(&mut self, amount: Money) {
        self.money = self.money.saturating_add(amount);
    }

    /// The only way money leaves the player: all or nothing.
    pub fn spend_money(&mut self, amount: Money) -> bool {
        if self.money >= amount {
            self.money = self.money.saturating_sub(amount);
            true
        } else {
            false
        }
    }

    pub fn take_damage(&mut self, amount: Health) {
        self.health = self
            .health
            .saturating_sub(amount)
            .clamp(0, self.max_health);
    }

    pub fn heal(&mut self, amount: Health) {
        self.health = self
            .health
            .saturating_add(amount)
            .clamp(0, self.max_health);
    }

    pub fn has_equipment(&self, equipment: Equipment) -> bool {
        self.equipment.has(equipment)
    }

    pub fn add_equipment(&mut self, equipment: Equipment) {
        self.equipment.add(equipment);
    }

    /// Credits a mineral by name, names outside the four known ones are ignored.
    pub fn add_mineral(&mut self, name: &str, amount: u32) {
        if let Some(mineral) = Mineral::from_name(name) {
            self.add_mineral_kind(mineral, amount);
        }
    }

    pub fn add_mineral_kind(&mut self, mineral: Mineral, amount: u32) {
        let count = &mut self.minerals[mineral];
        *count = count.saturating_add(amount);
    }

    /// Pieces carried, all kinds together.
    pub fn mineral_count(&self) -> u32 {
        self.minerals.total()
    }

    pub fn has_any_minerals(&self) -> bool {
        !self.minerals.is_empty()
    }

    pub fn clear_minerals(&mut self) {
        self.minerals = Minerals::default();
    }

    pub(crate) fn take_ring(&mut self) {
        self.has_ring = true;
    }

    pub(crate) fn move_to(&mut self, position: Coord2) {
        self.position = position;
    }

    pub(crate) fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
