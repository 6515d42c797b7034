use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;
use serde::{Deserialize, Serialize};

pub(crate) type Coord = usize;
/// A non-zero board extent along one axis.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
/// A location `(x, y)` on a board, column first. Smaller `y` is further up.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The inclusive rectangle a board occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Top left corner.
    pub min: Location,
    /// Bottom right corner.
    pub max: Location,
}

impl Bounds {
    /// The smallest bounds containing every location in `locations`, or [`None`] if there are none.
    pub fn enclosing(locations: impl IntoIterator<Item = Location>) -> Option<Self> {
        locations.into_iter().fold(None, |acc, loc| match acc {
            None => Some(Self { min: loc, max: loc }),
            Some(Self { min, max }) => Some(Self {
                min: Location(min.0.min(loc.0), min.1.min(loc.1)),
                max: Location(max.0.max(loc.0), max.1.max(loc.1)),
            }),
        })
    }

    /// Grow these bounds by `amount` cells on every side. The top left corner stops at `Location(0, 0)`.
    pub fn padded(&self, amount: Coord) -> Self {
        Self {
            min: Location(self.min.0.saturating_sub(amount), self.min.1.saturating_sub(amount)),
            max: Location(self.max.0.saturating_add(amount), self.max.1.saturating_add(amount)),
        }
    }

    /// Whether `location` lies inside these bounds.
    pub fn contains(&self, location: Location) -> bool {
        (self.min.0..=self.max.0).contains(&location.0) && (self.min.1..=self.max.1).contains(&location.1)
    }

    /// Number of columns.
    pub fn width(&self) -> Dimension {
        NonZero::new(self.max.0 - self.min.0 + 1).unwrap_or(NonZero::<Coord>::MIN)
    }

    /// Number of rows.
    pub fn height(&self) -> Dimension {
        NonZero::new(self.max.1 - self.min.1 + 1).unwrap_or(NonZero::<Coord>::MIN)
    }

    /// Every location inside these bounds in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (self.min.1..=self.max.1).flat_map(move |y| (self.min.0..=self.max.0).map(move |x| Location(x, y)))
    }

    // (row, column) for ndarray
    pub(crate) fn index_of(&self, location: Location) -> Option<(Ix, Ix)> {
        self.contains(location).then(|| (location.1 - self.min.1, location.0 - self.min.0))
    }

    pub(crate) fn location_at(&self, index: (Ix, Ix)) -> Location {
        Location(index.1 + self.min.0, index.0 + self.min.1)
    }

    pub(crate) fn shape(&self) -> (Ix, Ix) {
        (self.height().get(), self.width().get())
    }
}

#[cfg(test)]
mod tests {
    use super::{Bounds, Location};

    #[test]
    fn enclosing_and_padding() {
        let bounds = Bounds::enclosing([Location(2, 1), Location(1, 3), Location(4, 2)]).unwrap();
        assert_eq!(bounds, Bounds { min: Location(1, 1), max: Location(4, 3) });
        assert_eq!((bounds.width().get(), bounds.height().get()), (4, 3));

        let padded = bounds.padded(2);
        assert_eq!(padded, Bounds { min: Location(0, 0), max: Location(6, 5) });
    }

    #[test]
    fn index_translation() {
        let bounds = Bounds { min: Location(1, 1), max: Location(3, 2) };
        assert_eq!(bounds.index_of(Location(3, 2)), Some((1, 2)));
        assert_eq!(bounds.index_of(Location(0, 2)), None);
        assert_eq!(bounds.location_at((1, 2)), Location(3, 2));
        assert_eq!(bounds.locations().count(), 6);
        assert_eq!(bounds.locations().next(), Some(Location(1, 1)));
    }
}
