use std::fmt::{Display, Formatter};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::cell::{self, FrozenCell, FrozenCellType};
use crate::color::Color;
use crate::location::Location;
use crate::path::Path;

/// The path joining one color group.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SolvedPath {
    pub(crate) color: Color,
    pub(crate) path: Path,
}

impl SolvedPath {
    /// Pair a path with its color.
    pub fn new(color: Color, path: Path) -> Self {
        Self { color, path }
    }

    /// The color this path joins.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The underlying [`Path`].
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Coordinates from the start endpoint to the end endpoint.
    pub fn cells(&self) -> &[Location] {
        self.path.cells()
    }

    /// Undirected segments between consecutive cells, for drawing.
    pub fn segments(&self) -> impl Iterator<Item = UnorderedPair<Location>> + '_ {
        self.path.segments()
    }
}

/// One path per color group, in the order colors were first placed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Solution {
    pub(crate) paths: Vec<SolvedPath>,
}

impl Solution {
    /// A solution made of `paths`.
    pub fn new(paths: Vec<SolvedPath>) -> Self {
        Self { paths }
    }

    /// Every path, in color placement order.
    pub fn paths(&self) -> &[SolvedPath] {
        &self.paths
    }

    /// The path of `color`, if the solution has one.
    pub fn path_for(&self, color: Color) -> Option<&SolvedPath> {
        self.paths.iter().find(|path| path.color == color)
    }

    /// Pair this solution with its board for display.
    pub fn render<'a>(&'a self, board: &'a Board) -> SolvedBoard<'a> {
        SolvedBoard { board, solution: self }
    }
}

/// The outcome of a search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveResult {
    /// The first solution found.
    Solved(Solution),
    /// Every solution, in the order found. Only produced when enumerating and at least one exists.
    All(Vec<Solution>),
    /// The search space was exhausted without finding a solution.
    Unsatisfiable,
    /// The step budget ran out first. `found` holds any complete solutions met before that.
    Unknown {
        /// Solutions met before the budget ran out, in the order found.
        found: Vec<Solution>,
    },
}

impl SolveResult {
    /// The first solution, however the search ended.
    pub fn solution(&self) -> Option<&Solution> {
        self.solutions().first()
    }

    /// Every solution found.
    pub fn solutions(&self) -> &[Solution] {
        match self {
            Self::Solved(solution) => std::slice::from_ref(solution),
            Self::All(solutions) | Self::Unknown { found: solutions } => solutions,
            Self::Unsatisfiable => &[],
        }
    }

    /// Whether the search proved there is no solution.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }
}

/// A [`Solution`] laid over its [`Board`].
pub struct SolvedBoard<'a> {
    board: &'a Board,
    solution: &'a Solution,
}

impl SolvedBoard<'_> {
    /// Convert to an array representation, indexed `(row, column)` from the board's top left corner.
    pub fn to_array(&self) -> Array2<FrozenCell> {
        let bounds = self.board.bounds();
        let mut ret = Array2::from_shape_fn(bounds.shape(), |index| {
            let location = bounds.location_at(index);
            FrozenCell {
                exits: Default::default(),
                cell_type: match (self.board.is_cell(location), self.board.node_at(location)) {
                    (false, _) => FrozenCellType::Hole,
                    (true, Some(node)) => FrozenCellType::Node { color: node.color, shape: node.shape },
                    (true, None) => FrozenCellType::Empty,
                },
            }
        });

        for solved in &self.solution.paths {
            for (location, incoming, outgoing) in solved.path.transits() {
                let Some(frozen) = bounds.index_of(location).and_then(|index| ret.get_mut(index)) else {
                    continue;
                };

                frozen.exits.extend(incoming.into_iter().chain(outgoing));
                if frozen.cell_type == FrozenCellType::Empty {
                    frozen.cell_type = FrozenCellType::Path { color: solved.color };
                }
            }
        }

        ret
    }

    /// Sketch a single color's path over the board, or [`None`] if the solution has no path of that color.
    ///
    /// The start prints as `S`, the end as `E` and the cells between as `-`.
    /// Other nodes print as their [`glyph`](crate::NodeShape::glyph), empty cells as `.` and holes as a space.
    pub fn sketch(&self, color: Color) -> Option<String> {
        let solved = self.solution.path_for(color)?;
        let (start, end) = (solved.path.start()?, solved.path.end()?);

        Some(cell::print(self.board.to_chars(|location| match self.board.node_at(location) {
            _ if location == start => 'S',
            _ if location == end => 'E',
            _ if solved.path.contains(location) => '-',
            Some(node) => node.shape.glyph(),
            None => '.',
        })))
    }
}

impl Display for SolvedBoard<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", cell::print(self.to_array().map(|cell| cell.symbol())))
    }
}
