use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::error::InvalidPuzzleError;
use crate::group::EndpointGroup;
use crate::location::{Bounds, Coord, Location};
use crate::node::Node;
use crate::step::SquareStep;

/// A builder for [`Board`]s.
///
/// Bounds are those of the placed nodes unless given explicitly, and may be padded.
/// Mistakes are recorded as the builder goes; once one is recorded further calls do nothing, and [`build`](Self::build) reports it.
/// Builders can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    nodes: Vec<Node>,
    bounds: Option<Bounds>,
    padding: Coord,
    invalid_reasons: Vec<InvalidPuzzleError>,
    // walls
    edge_blacklist: HashSet<UnorderedPair<Location>>,
    // holes
    location_blacklist: HashSet<Location>,
}

impl BoardBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the bounds rather than deriving them from the nodes. Anything placed outside makes the builder invalid.
    pub fn with_bounds(&mut self, min: Location, max: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let bounds = Bounds { min, max };
        if min.0 > max.0 || min.1 > max.1 {
            self.invalid_reasons.push(InvalidPuzzleError::OutOfBounds(max));
            return self;
        }

        self.bounds = Some(bounds);
        self
    }

    /// Add `amount` empty cells around every side of the bounds. The top left corner stops at `Location(0, 0)`.
    pub fn pad(&mut self, amount: Coord) -> &mut Self {
        self.padding = amount;
        self
    }

    /// Place a node.
    ///
    /// The order nodes are placed in matters: it orders colors of equal difficulty in the search, and within a color the earlier endpoint is the start of its path.
    pub fn add_node(&mut self, node: Node) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.nodes.iter().any(|placed| placed.location == node.location) {
            self.invalid_reasons.push(InvalidPuzzleError::DuplicateNode(node.location));
            return self;
        }

        self.nodes.push(node);
        self
    }

    /// Shorthand for multiple calls to [`Self::add_node`].
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> &mut Self {
        for node in nodes {
            self.add_node(node);
        }

        self
    }

    /// Drop a location from the board, leaving a hole no path may enter.
    pub fn drop_location(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.location_blacklist.insert(location);
        self
    }

    /// Disconnect the two `locations`, i.e. place a wall between them.
    ///
    /// If the two locations are not adjacent, this function does nothing and does not invalidate the builder.
    pub fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if SquareStep::direction_to(locations.0, locations.1).is_none() {
            return self;
        }

        self.edge_blacklist.insert(locations);
        self
    }

    /// Shorthand for multiple calls to [`Self::disconnect`], walling off `location` on each of the given sides.
    pub fn disconnect_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self {
        for direction in directions {
            self.disconnect(UnorderedPair::from((location, direction.attempt_from(location))));
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if no mistake has been recorded so far, `Some` of the recorded mistakes otherwise.
    /// Problems only visible once every node is known, such as a color with a single endpoint, are found by [`Self::build`].
    pub fn is_valid(&self) -> Option<&[InvalidPuzzleError]> {
        match self.invalid_reasons.is_empty() {
            true => None,
            false => Some(&self.invalid_reasons),
        }
    }

    /// Convert the state of this builder into a [`Board`], or report the first reason it cannot be one.
    pub fn build(&self) -> Result<Board, InvalidPuzzleError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        let bounds = match self.bounds {
            Some(bounds) => bounds,
            None => Bounds::enclosing(self.nodes.iter().map(|node| node.location)).ok_or(InvalidPuzzleError::Empty)?,
        }.padded(self.padding);

        if self.nodes.is_empty() {
            return Err(InvalidPuzzleError::Empty);
        }

        for node in &self.nodes {
            if !bounds.contains(node.location) {
                return Err(InvalidPuzzleError::OutOfBounds(node.location));
            }

            if self.location_blacklist.contains(&node.location) {
                return Err(InvalidPuzzleError::NodeOnHole(node.location));
            }
        }

        for location in self.location_blacklist.iter().sorted() {
            if !bounds.contains(*location) {
                return Err(InvalidPuzzleError::OutOfBounds(*location));
            }
        }

        for wall in self.edge_blacklist.iter().sorted_by_key(|wall| (wall.0.min(wall.1), wall.0.max(wall.1))) {
            for location in [wall.0, wall.1] {
                if !bounds.contains(location) {
                    return Err(InvalidPuzzleError::OutOfBounds(location));
                }
            }
        }

        let width = bounds.width().get();
        let height = bounds.height().get();
        let mut graph = UnGraphMap::with_capacity(
            width * height,
            // "horizontal" edges
            (width - 1) * height
                // "vertical" edges
                + (height - 1) * width,
        );

        for location in bounds.locations() {
            if !self.location_blacklist.contains(&location) {
                graph.add_node(location);
            }
        }

        for location in bounds.locations() {
            // add edges down and to the right, if possible
            for direction in [SquareStep::Down, SquareStep::Right] {
                let other = direction.attempt_from(location);
                if bounds.contains(other)
                    && graph.contains_node(location)
                    && graph.contains_node(other)
                    && !self.edge_blacklist.contains(&UnorderedPair::from((location, other))) {
                    graph.add_edge(location, other, direction);
                }
            }
        }

        let groups = EndpointGroup::partition(&self.nodes)?;
        let node_index: HashMap<Location, usize> = self.nodes.iter()
            .enumerate()
            .map(|(index, node)| (node.location, index))
            .collect();

        Ok(Board {
            graph,
            bounds,
            nodes: self.nodes.clone(),
            node_index,
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use unordered_pair::UnorderedPair;

    use super::BoardBuilder;
    use crate::color::Color;
    use crate::error::InvalidPuzzleError;
    use crate::location::{Bounds, Location};
    use crate::node::Node;
    use crate::step::SquareStep;

    #[test]
    fn bounds_follow_nodes() {
        let board = BoardBuilder::new()
            .add_node(Node::basic(Color::Red, Location(1, 1)))
            .add_node(Node::basic(Color::Red, Location(3, 2)))
            .build()
            .unwrap();

        assert_eq!(board.bounds(), Bounds { min: Location(1, 1), max: Location(3, 2) });
        assert_eq!(board.cell_count(), 6);
        assert_eq!(format!("{}", board), "R..
..R
");
    }

    #[test]
    fn padding_and_holes() {
        let board = BoardBuilder::new()
            .add_node(Node::basic(Color::Blue, Location(1, 1)))
            .add_node(Node::basic(Color::Blue, Location(2, 1)))
            .pad(1)
            .drop_location(Location(0, 0))
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), " ...
.BB.
....
");
        assert!(!board.is_cell(Location(0, 0)));
        assert_eq!(board.neighbor(Location(1, 0), SquareStep::Left), None);
        assert_eq!(board.neighbor(Location(1, 0), SquareStep::Down), Some(Location(1, 1)));
    }

    #[test]
    fn walls_remove_edges() {
        let board = BoardBuilder::new()
            .add_node(Node::basic(Color::Red, Location(0, 0)))
            .add_node(Node::basic(Color::Red, Location(1, 1)))
            .disconnect(UnorderedPair::from((Location(0, 0), Location(1, 0))))
            .disconnect(UnorderedPair::from((Location(0, 0), Location(1, 1))))
            .build()
            .unwrap();

        assert_eq!(board.neighbor(Location(0, 0), SquareStep::Right), None);
        assert_eq!(board.neighbor(Location(1, 0), SquareStep::Left), None);
        assert_eq!(board.neighbor(Location(0, 0), SquareStep::Down), Some(Location(0, 1)));
    }

    #[test]
    fn records_mistakes() {
        let mut builder = BoardBuilder::new();
        builder
            .add_node(Node::basic(Color::Red, Location(1, 1)))
            .add_node(Node::diamond(Color::Blue, Location(1, 1)));

        assert_eq!(builder.is_valid(), Some(&[InvalidPuzzleError::DuplicateNode(Location(1, 1))][..]));
        assert_eq!(builder.build().unwrap_err(), InvalidPuzzleError::DuplicateNode(Location(1, 1)));
    }

    #[test]
    fn explicit_bounds() {
        let result = BoardBuilder::new()
            .with_bounds(Location(0, 0), Location(2, 2))
            .add_node(Node::basic(Color::Red, Location(0, 0)))
            .add_node(Node::basic(Color::Red, Location(3, 0)))
            .build();
        assert_eq!(result.unwrap_err(), InvalidPuzzleError::OutOfBounds(Location(3, 0)));

        let result = BoardBuilder::new()
            .add_node(Node::basic(Color::Red, Location(0, 0)))
            .add_node(Node::basic(Color::Red, Location(1, 0)))
            .drop_location(Location(1, 0))
            .build();
        assert_eq!(result.unwrap_err(), InvalidPuzzleError::NodeOnHole(Location(1, 0)));

        assert_eq!(BoardBuilder::new().build().unwrap_err(), InvalidPuzzleError::Empty);
    }
}
