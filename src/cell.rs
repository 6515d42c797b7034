use std::collections::HashSet;

use ndarray::Array2;

use crate::color::Color;
use crate::node::NodeShape;
use crate::step::SquareStep;

/// What occupies a cell of a solved board.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FrozenCellType {
    /// A node, which a path ends at or passes through.
    Node {
        /// Color of the node.
        color: Color,
        /// Shape of the node.
        shape: NodeShape,
    },
    /// An ordinary cell some path runs through.
    Path {
        /// Color of the path.
        color: Color,
    },
    /// A dropped location.
    Hole,
    /// A cell no path uses.
    #[default]
    Empty,
}

/// Cells, frozen for output or printing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrozenCell {
    /// The sides a path leaves this cell through.
    pub exits: HashSet<SquareStep>,
    /// What sits in the cell.
    pub cell_type: FrozenCellType,
}

impl FrozenCell {
    /// The character this cell prints as: nodes in upper case, paths in lower case.
    pub fn symbol(&self) -> char {
        match self.cell_type {
            FrozenCellType::Node { color, .. } => color.symbol().to_ascii_uppercase(),
            FrozenCellType::Path { color } => color.symbol().to_ascii_lowercase(),
            FrozenCellType::Hole => ' ',
            FrozenCellType::Empty => '.',
        }
    }
}

/// Dump the specified [`ndarray::Array2`] row by row.
pub(crate) fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}
