use itertools::Itertools;
use serde::{Deserialize, Serialize};
use unordered_pair::UnorderedPair;

use crate::location::Location;
use crate::step::SquareStep;

/// An ordered run of cells from one endpoint to the other.
///
/// A [`Path`] is only a sequence of locations; whether it is simple, connected, or legal on some board is decided by the [`check`](crate::check) module.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<Location>,
}

impl Path {
    /// A path over `cells`, in order.
    pub fn new(cells: Vec<Location>) -> Self {
        Self { cells }
    }

    /// Cells in order, starting at the path's start endpoint.
    pub fn cells(&self) -> &[Location] {
        &self.cells
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The first cell.
    pub fn start(&self) -> Option<Location> {
        self.cells.first().copied()
    }

    /// The last cell.
    pub fn end(&self) -> Option<Location> {
        self.cells.last().copied()
    }

    /// Whether the path runs through `location`.
    pub fn contains(&self, location: Location) -> bool {
        self.cells.contains(&location)
    }

    /// The direction of every step, or [`None`] for a step between cells that are not adjacent.
    pub fn steps(&self) -> Vec<Option<SquareStep>> {
        self.cells.iter()
            .tuple_windows()
            .map(|(a, b)| SquareStep::direction_to(*a, *b))
            .collect_vec()
    }

    /// Undirected pieces of the path, one per step, for drawing.
    pub fn segments(&self) -> impl Iterator<Item = UnorderedPair<Location>> + '_ {
        self.cells.iter()
            .tuple_windows()
            .map(|(a, b)| UnorderedPair::from((*a, *b)))
    }

    /// The sides each cell is entered and left through, see [`legal_transit`](crate::node::legal_transit).
    ///
    /// The first cell has no incoming side and the last no outgoing side.
    pub fn transits(&self) -> Vec<(Location, Option<SquareStep>, Option<SquareStep>)> {
        self.cells.iter()
            .enumerate()
            .map(|(index, here)| {
                let incoming = index.checked_sub(1)
                    .and_then(|prev| SquareStep::direction_to(*here, self.cells[prev]));
                let outgoing = self.cells.get(index + 1)
                    .and_then(|next| SquareStep::direction_to(*here, *next));
                (*here, incoming, outgoing)
            })
            .collect_vec()
    }
}

impl From<Vec<Location>> for Path {
    fn from(cells: Vec<Location>) -> Self {
        Self::new(cells)
    }
}
