use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The vertical mine shaft: what each cell holds and whether the player has uncovered it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    tiles: Array2<TileKind>,
    revealed: Array2<bool>,
    ring_min_row: Coord,
}

impl MineField {
    /// A field of solid dirt, nothing revealed and no ring placed yet.
    ///
    /// Sizes are clamped to at least one cell and the ring row to the last row.
    pub fn new((width, height): Coord2, ring_min_row: Coord) -> Self {
        let size = (width.max(1), height.max(1));
        Self {
            tiles: Array2::default(size.to_nd_index()),
            revealed: Array2::default(size.to_nd_index()),
            ring_min_row: ring_min_row.min(size.1 - 1),
        }
    }

    pub fn from_rules(rules: &GameRules) -> Self {
        Self::new(rules.size, rules.ring_min_row)
    }

    /// Wipes the field and fills it again with veins and a freshly buried ring.
    pub fn generate<R: RandomSource>(&mut self, rng: &mut R) {
        VeinGenerator::default().populate(self, rng);
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        // dimensions come from a `Coord2` so they always fit back
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn ring_min_row(&self) -> Coord {
        self.ring_min_row
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    pub fn get(&self, coords: Coord2) -> TileKind {
        if self.contains(coords) {
            self.tiles[coords.to_nd_index()]
        } else {
            TileKind::Dirt
        }
    }

    pub fn set(&mut self, coords: Coord2, kind: TileKind) {
        if self.contains(coords) {
            self.tiles[coords.to_nd_index()] = kind;
        }
    }

    pub fn reveal(&mut self, coords: Coord2) {
        if self.contains(coords) {
            self.revealed[coords.to_nd_index()] = true;
        }
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.contains(coords) && self.revealed[coords.to_nd_index()]
    }

    /// Turns every dug cell around a spring, the spring cell included, into water.
    pub fn flood_area(&mut self, center: Coord2) {
        for coords in self.iter_square(center, 1) {
            if self.tiles[coords.to_nd_index()].is_empty() {
                log::trace!("Flooded {:?}", coords);
                self.tiles[coords.to_nd_index()] = TileKind::Water;
            }
        }
    }

    /// Buries a 3x3 or 5x5 square around `center` in dirt, returns the side picked.
    pub fn cave_in<R: RandomSource>(&mut self, center: Coord2, rng: &mut R) -> u8 {
        let side = rng.pick(&[3, 5]);
        self.collapse(center, side);
        side
    }

    /// Fills the square of the given (odd) side centered on `center` with dirt.
    ///
    /// Revealed flags are left alone, buried cells stay "known" to the player.
    pub fn collapse(&mut self, center: Coord2, side: u8) {
        for coords in self.iter_square(center, side / 2) {
            self.tiles[coords.to_nd_index()] = TileKind::Dirt;
        }
    }

    /// How a cell should be drawn: undug tiles only show their kind once revealed or when
    /// the player carries a lantern.
    pub fn appearance(&self, coords: Coord2, lantern: bool) -> TileKind {
        match self.get(coords) {
            TileKind::Empty => TileKind::Empty,
            kind if lantern || self.is_revealed(coords) => kind,
            _ => TileKind::Dirt,
        }
    }

    /// Where the ring is still buried, `None` once it was dug out.
    pub fn ring_position(&self) -> Option<Coord2> {
        self.tiles
            .indexed_iter()
            .find(|&(_, &kind)| kind == TileKind::Ring)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    /// Back to solid dirt with nothing revealed.
    pub(crate) fn reset(&mut self) {
        self.tiles.fill(TileKind::Dirt);
        self.revealed.fill(false);
    }

    pub(crate) fn iter_square(&self, center: Coord2, radius: u8) -> SquareIter {
        SquareIter::new(center, radius, self.size())
    }
}
