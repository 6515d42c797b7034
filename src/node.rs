use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::location::Location;
use crate::step::{Orientation, SquareStep};

/// The constraint a node places on any path touching it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NodeShape {
    /// No restriction: may end a path, or be passed straight through or turned at.
    Basic,
    /// The path must turn here when passing through. May also end a path.
    Triangle,
    /// Must end a path; nothing may pass through.
    Diamond,
    /// The path must pass straight through along the given axis. Never an endpoint.
    Line(Orientation),
}

impl NodeShape {
    /// Whether a node of this shape may begin or end a path.
    pub fn can_terminate(&self) -> bool {
        !matches!(self, Self::Line(_))
    }

    /// Whether a path may pass through a node of this shape in any way at all.
    pub fn can_pass_through(&self) -> bool {
        !matches!(self, Self::Diamond)
    }

    /// A single character for the shape, as used in path sketches.
    pub fn glyph(&self) -> char {
        match self {
            Self::Basic => 'o',
            Self::Triangle => '^',
            Self::Diamond => '*',
            Self::Line(_) => '~',
        }
    }
}

/// Decide whether a path may touch a node of `shape` the way described.
///
/// Both directions name sides of the node's cell: `incoming` is the side the path enters through and `outgoing` the side it leaves through.
/// A missing side means the path ends here.
/// Passing straight through therefore means `outgoing == incoming.invert()`.
pub fn legal_transit(shape: &NodeShape, incoming: Option<SquareStep>, outgoing: Option<SquareStep>) -> bool {
    match (incoming, outgoing) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => shape.can_terminate(),
        (Some(incoming), Some(outgoing)) => {
            if incoming == outgoing {
                // a path cannot leave the way it came in
                return false;
            }

            match shape {
                NodeShape::Basic => true,
                NodeShape::Triangle => incoming.orientation() != outgoing.orientation(),
                NodeShape::Diamond => false,
                NodeShape::Line(axis) => incoming.orientation() == *axis && outgoing == incoming.invert(),
            }
        }
    }
}

/// A colored, shape-constrained point on the grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// The color group this node belongs to.
    pub color: Color,
    /// Where the node sits.
    pub location: Location,
    /// The constraint the node imposes.
    pub shape: NodeShape,
}

impl Node {
    /// A node of any shape.
    pub fn new(color: Color, location: Location, shape: NodeShape) -> Self {
        Self { color, location, shape }
    }

    /// Shorthand for a [`NodeShape::Basic`] node.
    pub fn basic(color: Color, location: Location) -> Self {
        Self::new(color, location, NodeShape::Basic)
    }

    /// Shorthand for a [`NodeShape::Triangle`] node.
    pub fn triangle(color: Color, location: Location) -> Self {
        Self::new(color, location, NodeShape::Triangle)
    }

    /// Shorthand for a [`NodeShape::Diamond`] node.
    pub fn diamond(color: Color, location: Location) -> Self {
        Self::new(color, location, NodeShape::Diamond)
    }

    /// Shorthand for a [`NodeShape::Line`] node.
    pub fn line(color: Color, location: Location, orientation: Orientation) -> Self {
        Self::new(color, location, NodeShape::Line(orientation))
    }

    /// [`legal_transit`] for this node's shape.
    pub fn legal_transit(&self, incoming: Option<SquareStep>, outgoing: Option<SquareStep>) -> bool {
        legal_transit(&self.shape, incoming, outgoing)
    }
}
