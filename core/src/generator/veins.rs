use super::*;
use alloc::vec::Vec;

use crate::types::apply_delta;

/// Which way a vein runs from its origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VeinDirection {
    Horizontal,
    Vertical,
    /// Down and to the right.
    Diagonal,
}

impl VeinDirection {
    pub const ALL: [VeinDirection; 3] = [Self::Horizontal, Self::Vertical, Self::Diagonal];

    const fn step(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
            Self::Diagonal => (1, 1),
        }
    }
}

/// One row of the vein table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VeinConfig {
    pub kind: TileKind,
    pub attempts: u32,
    pub min_len: u32,
    pub max_len: u32,
    /// A trial fires with probability `weight / 10`, so 10 is certain and 0.1 is one in a hundred.
    pub weight: f64,
}

impl VeinConfig {
    const fn new(kind: TileKind, attempts: u32, min_len: u32, max_len: u32, weight: f64) -> Self {
        Self {
            kind,
            attempts,
            min_len,
            max_len,
            weight,
        }
    }

    pub fn trigger_chance(&self) -> f64 {
        self.weight / 10.0
    }
}

/// Placed in order, later rows overwrite earlier ones where veins cross.
pub const VEIN_TABLE: [VeinConfig; 11] = [
    VeinConfig::new(TileKind::Silver, 15, 1, 6, 10.0),
    VeinConfig::new(TileKind::Gold, 12, 1, 5, 8.0),
    VeinConfig::new(TileKind::Platinum, 8, 1, 4, 1.0),
    VeinConfig::new(TileKind::Diamond, 5, 1, 3, 0.1),
    VeinConfig::new(TileKind::Granite, 10, 2, 8, 5.0),
    VeinConfig::new(TileKind::Water, 8, 1, 4, 3.0),
    VeinConfig::new(TileKind::Spring, 6, 1, 3, 2.0),
    VeinConfig::new(TileKind::Sandstone, 12, 1, 5, 10.0),
    VeinConfig::new(TileKind::Volcanic, 8, 1, 4, 5.0),
    VeinConfig::new(TileKind::Clover, 4, 1, 2, 0.5),
    VeinConfig::new(TileKind::Pump, 3, 1, 2, 0.5),
];

/// Fills a field with straight veins of ore and rock, then buries the ring deep down.
///
/// There is no occupancy tracking, every vein cell simply overwrites what was there.
#[derive(Clone, Debug, PartialEq)]
pub struct VeinGenerator {
    veins: Vec<VeinConfig>,
}

impl VeinGenerator {
    pub fn new(veins: Vec<VeinConfig>) -> Self {
        Self { veins }
    }

    pub fn veins(&self) -> &[VeinConfig] {
        &self.veins
    }

    fn place_vein<R: RandomSource>(&self, field: &mut MineField, config: &VeinConfig, rng: &mut R) {
        if !rng.chance(config.trigger_chance()) {
            return;
        }

        let (width, height) = field.size();
        let origin = (
            rng.next_below(width.into()) as Coord,
            rng.next_below(height.into()) as Coord,
        );
        let length = rng.between(config.min_len, config.max_len);
        let direction = rng.pick(&VeinDirection::ALL);
        log::trace!(
            "{:?} vein at {:?}, length {}, {:?}",
            config.kind,
            origin,
            length,
            direction
        );

        let (dx, dy) = direction.step();
        for i in 0..length as isize {
            // cells past the edge are dropped, the rest of the ray is still drawn
            if let Some(coords) = apply_delta(origin, (dx * i, dy * i), (width, height)) {
                field.set(coords, config.kind);
            }
        }
    }

    fn bury_ring<R: RandomSource>(&self, field: &mut MineField, rng: &mut R) -> Coord2 {
        let (width, height) = field.size();
        let min_row = field.ring_min_row();
        let coords = (
            rng.next_below(width.into()) as Coord,
            rng.between(min_row.into(), (height - 1).into()) as Coord,
        );
        field.set(coords, TileKind::Ring);
        coords
    }
}

impl Default for VeinGenerator {
    fn default() -> Self {
        Self::new(VEIN_TABLE.to_vec())
    }
}

impl FieldGenerator for VeinGenerator {
    fn populate<R: RandomSource>(&self, field: &mut MineField, rng: &mut R) {
        field.reset();

        for config in &self.veins {
            for _ in 0..config.attempts {
                self.place_vein(field, config, rng);
            }
        }

        let ring = self.bury_ring(field, rng);
        log::debug!("Ring buried at {:?}", ring);

        let rings = field.count(TileKind::Ring);
        if rings != 1 {
            log::warn!("Generated field holds {} rings, expected exactly one", rings);
        }
    }
}
