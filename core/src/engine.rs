use serde::{Deserialize, Serialize};

use crate::types::apply_delta;
use crate::*;

/// Flat fee for drilling granite or bailing water, on top of owning the right tool.
pub const HARD_TILE_COST: Money = 150;

pub const SPRING_DAMAGE: Health = 20;

pub const CAVE_IN_DAMAGE: Health = 30;

/// Why a move did not happen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    OutOfBounds,
    MissingEquipment(Equipment),
    InsufficientFunds { cost: Money },
}

/// What was dug out of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Mineral { mineral: Mineral, amount: u32 },
    Ring,
}

/// Everything that happened while digging one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigReport {
    pub coords: Coord2,
    pub tile: TileKind,
    pub cost: Money,
    pub reward: Option<Reward>,
    pub flooded: bool,
    /// Side of the square that caved in, if the ceiling came down.
    pub cave_in: Option<u8>,
    pub damage: Health,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Blocked(BlockReason),
    MovedToEmpty(Coord2),
    Dug(DigReport),
}

impl MoveOutcome {
    /// Whether the player ended up somewhere else.
    pub const fn has_moved(&self) -> bool {
        match self {
            Self::Blocked(_) => false,
            Self::MovedToEmpty(_) => true,
            Self::Dug(_) => true,
        }
    }
}

/// Resolves player moves against the field, digging whatever is in the way.
///
/// Borrows the field, the player and the random source for the duration of one move; every
/// check happens before anything is charged so a blocked move leaves no trace.
#[derive(Debug)]
pub struct DigEngine<'a, R> {
    field: &'a mut MineField,
    player: &'a mut PlayerState,
    rng: &'a mut R,
    cave_in_chance: f64,
}

impl<'a, R: RandomSource> DigEngine<'a, R> {
    pub const DEFAULT_CAVE_IN_CHANCE: f64 = 0.05;

    pub fn new(field: &'a mut MineField, player: &'a mut PlayerState, rng: &'a mut R) -> Self {
        Self {
            field,
            player,
            rng,
            cave_in_chance: Self::DEFAULT_CAVE_IN_CHANCE,
        }
    }

    pub fn with_cave_in_chance(mut self, chance: f64) -> Self {
        self.cave_in_chance = chance;
        self
    }

    /// What digging `kind` would cost with the equipment currently owned.
    ///
    /// Only meaningful for tiles without a flat fee, granite and water always cost
    /// [`HARD_TILE_COST`].
    pub fn dig_cost(&self, kind: TileKind) -> Money {
        dig_cost(kind, self.player.equipment())
    }

    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        let position = self.player.position();
        let Some(target) = apply_delta(position, direction.delta(), self.field.size()) else {
            log::debug!("Move {:?} from {:?} blocked by the edge", direction, position);
            return MoveOutcome::Blocked(BlockReason::OutOfBounds);
        };

        if self.field.get(target).is_empty() {
            self.player.move_to(target);
            return MoveOutcome::MovedToEmpty(target);
        }

        match self.attempt_dig(target) {
            Ok(report) => MoveOutcome::Dug(report),
            Err(reason) => MoveOutcome::Blocked(reason),
        }
    }

    /// Digs `target` and moves the player onto it.
    ///
    /// Adjacency is the caller's business, [`attempt_move`](Self::attempt_move) only ever
    /// passes a neighbor of the player.
    pub fn attempt_dig(&mut self, target: Coord2) -> core::result::Result<DigReport, BlockReason> {
        use TileKind::*;

        if !self.field.contains(target) {
            return Err(BlockReason::OutOfBounds);
        }

        let tile = self.field.get(target);
        let mut report = DigReport {
            coords: target,
            tile,
            cost: 0,
            reward: None,
            flooded: false,
            cave_in: None,
            damage: 0,
        };

        match tile {
            Empty => {}
            Granite => report.cost = self.pay_with(Equipment::Drill, HARD_TILE_COST)?,
            Water => report.cost = self.pay_with(Equipment::Bucket, HARD_TILE_COST)?,
            Spring => {
                self.field.flood_area(target);
                self.player.take_damage(SPRING_DAMAGE);
                report.flooded = true;
                report.damage += SPRING_DAMAGE;
            }
            _ => report.cost = self.pay(self.dig_cost(tile))?,
        }

        report.reward = self.collect_reward(tile);

        if self.rng.chance(self.cave_in_chance) {
            let side = self.field.cave_in(target, &mut *self.rng);
            self.player.take_damage(CAVE_IN_DAMAGE);
            report.cave_in = Some(side);
            report.damage += CAVE_IN_DAMAGE;
            log::debug!("Cave-in of side {} at {:?}", side, target);
        }

        // must follow the cave-in: the dug cell stays open even when buried around it
        self.field.set(target, Empty);
        self.field.reveal(target);
        self.player.move_to(target);

        log::debug!("Dug {:?} at {:?}: {:?}", tile, target, report);
        Ok(report)
    }

    fn pay_with(
        &mut self,
        equipment: Equipment,
        cost: Money,
    ) -> core::result::Result<Money, BlockReason> {
        if !self.player.has_equipment(equipment) {
            return Err(BlockReason::MissingEquipment(equipment));
        }
        self.pay(cost)
    }

    fn pay(&mut self, cost: Money) -> core::result::Result<Money, BlockReason> {
        if self.player.spend_money(cost) {
            Ok(cost)
        } else {
            Err(BlockReason::InsufficientFunds { cost })
        }
    }

    fn collect_reward(&mut self, tile: TileKind) -> Option<Reward> {
        let reward = match tile {
            TileKind::Ring => {
                self.player.take_ring();
                Reward::Ring
            }
            TileKind::Diamond => Reward::Mineral {
                mineral: Mineral::Diamonds,
                amount: 1,
            },
            _ => {
                let mineral = tile.mineral()?;
                Reward::Mineral {
                    mineral,
                    amount: self.rng.between(1, 6),
                }
            }
        };
        if let Reward::Mineral { mineral, amount } = reward {
            self.player.add_mineral_kind(mineral, amount);
        }
        Some(reward)
    }
}

/// Catalog cost of `kind` after tool discounts: shovel first, then pick.
pub fn dig_cost(kind: TileKind, equipment: EquipmentSet) -> Money {
    let mut cost = Money::from(kind.dig_cost());
    if equipment.has(Equipment::Shovel) {
        cost = (cost - 12).max(8);
    }
    if equipment.has(Equipment::Pick) {
        cost = (cost - 5).max(5);
    }
    cost
}
