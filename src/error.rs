use thiserror::Error;

use crate::color::Color;
use crate::location::Location;

/// Reasons a puzzle cannot be turned into a [`Board`](crate::Board).
///
/// These are raised while building, before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPuzzleError {
    /// No nodes were given, so there is nothing to derive bounds from.
    #[error("puzzle has no nodes")]
    Empty,

    /// Two nodes were placed on the same location.
    #[error("more than one node placed at {0}")]
    DuplicateNode(Location),

    /// A node, hole or wall lies outside explicitly given bounds.
    #[error("{0} lies outside the board")]
    OutOfBounds(Location),

    /// A node sits on a dropped location.
    #[error("node at {0} sits on a dropped location")]
    NodeOnHole(Location),

    /// More diamonds than a single path has endpoints.
    #[error("color {color} has {count} diamond nodes but a path has only two endpoints")]
    TooManyEndpoints {
        /// The offending color.
        color: Color,
        /// How many diamonds it has.
        count: usize,
    },

    /// Exactly one node of this color is able to end a path.
    #[error("color {color} has a single possible endpoint at {location}")]
    UnpairedEndpoint {
        /// The offending color.
        color: Color,
        /// Where its only possible endpoint sits.
        location: Location,
    },
}

/// A rule broken by a path or solution, as reported by the [`check`](crate::check) module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A path with no cells.
    #[error("path for {0} has no cells")]
    EmptyPath(Color),

    /// A path cell off the board or on a hole.
    #[error("{0} is not a cell of this board")]
    UnknownCell(Location),

    /// Consecutive cells that are not joined, by distance or by a wall.
    #[error("{from} and {to} are not connected")]
    NotAdjacent {
        /// The earlier cell.
        from: Location,
        /// The cell after it.
        to: Location,
    },

    /// A path returning to a cell it already used.
    #[error("path visits {0} more than once")]
    Revisited(Location),

    /// A path touching a node of another color.
    #[error("path for {color} runs over a {other} node at {location}")]
    ForeignNode {
        /// Color of the path.
        color: Color,
        /// Color of the node it touches.
        other: Color,
        /// Where the node sits.
        location: Location,
    },

    /// A path whose ends are not one of its group's endpoint pairs.
    #[error("path for {color} does not run between one of its endpoint pairs")]
    BadEndpoint {
        /// Color of the path.
        color: Color,
    },

    /// A path touching a node in a way its shape forbids.
    #[error("path breaks the shape of the node at {0}")]
    IllegalTransit(Location),

    /// A mandatory waypoint the path never visits.
    #[error("path skips the waypoint at {0}")]
    MissedWaypoint(Location),

    /// A color that needs a path but has none.
    #[error("no path for {0}")]
    MissingPath(Color),

    /// A path for a color that needs none, or a second path for the same color.
    #[error("path for {0}, which is not a color needing a path or appears twice")]
    UnexpectedPath(Color),

    /// A cell shared by two paths.
    #[error("more than one path covers {0}")]
    Overlap(Location),

    /// A cell left uncovered when the board must be filled.
    #[error("no path covers {0}")]
    Uncovered(Location),
}
