use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Single coordinate axis used for field width, height, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`, `y` grows downwards from the surface.
pub type Coord2 = (Coord, Coord);

/// Player balance, negative when in debt.
pub type Money = i64;

pub type Health = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// The four ways the player can step, there are no diagonal moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a raw `(dx, dy)` step back to a direction, `None` for diagonals and non-unit steps.
    pub const fn from_delta(dx: isize, dy: isize) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Self::Up),
            "down" | "s" => Ok(Self::Down),
            "left" | "a" => Ok(Self::Left),
            "right" | "d" => Ok(Self::Right),
            other => Err(GameError::UnknownDirection(other.into())),
        }
    }
}

/// Iterates the in-bounds cells of the square of side `2 * radius + 1` centered on a cell,
/// the center included, row by row.
#[derive(Debug)]
pub struct SquareIter {
    center: Coord2,
    bounds: Coord2,
    radius: isize,
    dx: isize,
    dy: isize,
}

impl SquareIter {
    pub(crate) fn new(center: Coord2, radius: u8, bounds: Coord2) -> Self {
        let radius = isize::from(radius);
        Self {
            center,
            bounds,
            radius,
            dx: -radius,
            dy: -radius,
        }
    }
}

impl Iterator for SquareIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.dy > self.radius {
                return None;
            }

            let next_item = apply_delta(self.center, (self.dx, self.dy), self.bounds);
            self.dx += 1;
            if self.dx > self.radius {
                self.dx = -self.radius;
                self.dy += 1;
            }

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn apply_delta_rejects_underflow_and_overflow() {
        assert_eq!(apply_delta((0, 0), (-1, 0), (3, 3)), None);
        assert_eq!(apply_delta((0, 0), (0, -1), (3, 3)), None);
        assert_eq!(apply_delta((2, 2), (1, 0), (3, 3)), None);
        assert_eq!(apply_delta((1, 1), (1, 1), (3, 3)), Some((2, 2)));
    }

    #[test]
    fn square_iter_clips_at_corner() {
        let cells: Vec<_> = SquareIter::new((0, 0), 1, (5, 5)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn square_iter_covers_full_square_in_the_middle() {
        assert_eq!(SquareIter::new((5, 5), 2, (20, 20)).count(), 25);
        assert_eq!(SquareIter::new((5, 5), 0, (20, 20)).collect::<Vec<_>>(), vec![(5, 5)]);
    }

    #[test]
    fn direction_round_trips_through_delta() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::Up);
        assert!("north".parse::<Direction>().is_err());
    }
}
