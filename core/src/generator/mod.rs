use crate::*;
pub use veins::*;

mod veins;

pub trait FieldGenerator {
    /// Overwrites the whole field, tiles and revealed flags alike.
    fn populate<R: RandomSource>(&self, field: &mut MineField, rng: &mut R);
}
