#![warn(missing_docs)]

//! # `chromalink`
//!
//! A solver for connection puzzles in the style of Numberlink and Flow Free, extended with shaped nodes.
//! Every color must be joined by one simple path running through grid cells, and no two paths may share a cell.
//!
//! Nodes come in four shapes, each constraining how a path may touch it (see [`legal_transit`]):
//! - [`Basic`](NodeShape::Basic) nodes may end a path or be passed through in any way,
//! - [`Triangle`](NodeShape::Triangle) nodes may end a path, but a path passing through must turn,
//! - [`Diamond`](NodeShape::Diamond) nodes must end a path,
//! - [`Line`](NodeShape::Line) nodes must be passed straight through along their axis.
//!
//! Begin by building a [`Board`], either straight from its nodes with [`Board::from_nodes`] or with a [`BoardBuilder`] for holes, walls and padding.
//! Then call [`Board::solve`] or drive a [`Solver`] directly, and print the result with [`Solution::render`].
//!
//! # Internals
//! Colors are routed one at a time by a depth-first search with an explicit stack, most constrained colors first.
//! Every step is checked against the shape of the node being left, the board's connections and the cells already taken.
//! Branches are cut as soon as the current color's remaining targets become unreachable,
//! and whenever finishing a color leaves a later color, or in fill mode an empty cell, cut off.
//!
//! Every solution the search reports satisfies [`check::check_solution`], which can also be used on its own.

pub use board::Board;
pub use builder::BoardBuilder;
pub use cell::{FrozenCell, FrozenCellType};
pub use color::Color;
pub use config::{SearchMode, SolverConfig, WaypointRule};
pub use error::{InvalidPuzzleError, Violation};
pub use group::EndpointGroup;
pub use location::{Bounds, Location};
pub use node::{legal_transit, Node, NodeShape};
pub use path::Path;
pub use report::{Solution, SolveResult, SolvedBoard, SolvedPath};
pub use solver::{solve, SearchStats, Solver};
pub use step::{Orientation, SquareStep};

pub(crate) mod board;
pub(crate) mod location;
pub(crate) mod step;
pub(crate) mod color;
pub(crate) mod node;
pub(crate) mod group;
pub(crate) mod path;
pub mod check;
pub(crate) mod cell;
pub mod builder;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod report;
pub(crate) mod solver;
