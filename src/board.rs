use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::{Bfs, NodeFiltered, VisitMap};

use crate::builder::BoardBuilder;
use crate::cell;
use crate::color::Color;
use crate::config::SolverConfig;
use crate::error::InvalidPuzzleError;
use crate::group::EndpointGroup;
use crate::location::{Bounds, Location};
use crate::node::Node;
use crate::report::SolveResult;
use crate::solver::Solver;
use crate::step::SquareStep;

/// A puzzle: nodes on a rectangular grid, possibly with dropped cells and walls.
///
/// Traversable cells and the connections between them are kept as an undirected graph whose edges carry the forward [`SquareStep`] from the smaller location.
/// A [`Board`] never changes once built; build one with [`Board::from_nodes`] or a [`BoardBuilder`].
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) graph: UnGraphMap<Location, SquareStep>,
    pub(crate) bounds: Bounds,
    // placement order
    pub(crate) nodes: Vec<Node>,
    pub(crate) node_index: HashMap<Location, usize>,
    pub(crate) groups: Vec<EndpointGroup>,
}

impl Board {
    /// Build a board whose bounds are exactly those of `nodes`.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, InvalidPuzzleError> {
        let mut builder = BoardBuilder::new();
        for node in nodes {
            builder.add_node(node);
        }

        builder.build()
    }

    /// The rectangle the board occupies, holes included.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Nodes in the order they were placed.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node placed at `location`, if any.
    pub fn node_at(&self, location: Location) -> Option<&Node> {
        self.node_index.get(&location).map(|index| &self.nodes[*index])
    }

    /// One group per color, in order of first placement.
    pub fn groups(&self) -> &[EndpointGroup] {
        &self.groups
    }

    /// The group of `color`, if the board has one.
    pub fn group_of(&self, color: Color) -> Option<&EndpointGroup> {
        self.groups.iter().find(|group| group.color == color)
    }

    /// Whether `location` is a traversable cell of this board, i.e. in bounds and not dropped.
    pub fn is_cell(&self, location: Location) -> bool {
        self.graph.contains_node(location)
    }

    /// Every traversable cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Location> + '_ {
        self.bounds.locations().filter(|location| self.is_cell(*location))
    }

    /// Whether `location` holds a node of a color that needs no path, see [`EndpointGroup::is_routable`].
    ///
    /// Such nodes block every other color and are left out of coverage.
    pub fn is_obstacle(&self, location: Location) -> bool {
        self.node_at(location)
            .and_then(|node| self.group_of(node.color))
            .is_some_and(|group| !group.is_routable())
    }

    /// Every cell a full solution has to cover: traversable cells other than obstacles, in row-major order.
    pub fn cells_to_cover(&self) -> impl Iterator<Item = Location> + '_ {
        self.cells().filter(|location| !self.is_obstacle(*location))
    }

    /// Number of traversable cells.
    pub fn cell_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The cell one `step` away from `location`, if the two are connected.
    pub fn neighbor(&self, location: Location, step: SquareStep) -> Option<Location> {
        let there = step.attempt_from(location);
        self.graph.edge_weight(location, there)
            .filter(|direction| **direction == step.ensure_forward())
            .map(|_| there)
    }

    /// Search this board, see [`Solver`].
    pub fn solve(&self, config: &SolverConfig) -> SolveResult {
        Solver::new(self).with_config(*config).run()
    }

    /// Every cell reachable from any of `origins` moving only through cells for which `passable` holds.
    ///
    /// The origins themselves are always included.
    pub(crate) fn reachable_from<F>(&self, origins: &[Location], passable: F) -> HashSet<Location>
    where
        F: Fn(Location) -> bool,
    {
        let Some((first, rest)) = origins.split_first() else {
            return HashSet::new();
        };

        let view = NodeFiltered::from_fn(&self.graph, |location| origins.contains(&location) || passable(location));
        let mut bfs = Bfs::new(&view, *first);
        for origin in rest {
            if bfs.discovered.visit(*origin) {
                bfs.stack.push_back(*origin);
            }
        }

        let mut reached = HashSet::with_capacity(self.graph.node_count());
        while let Some(location) = bfs.next(&view) {
            reached.insert(location);
        }

        reached
    }

    pub(crate) fn to_chars(&self, mut fill: impl FnMut(Location) -> char) -> Array2<char> {
        Array2::from_shape_fn(self.bounds.shape(), |index| {
            let location = self.bounds.location_at(index);
            match self.is_cell(location) {
                true => fill(location),
                false => ' ',
            }
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", cell::print(self.to_chars(|location| match self.node_at(location) {
            Some(node) => node.color.symbol().to_ascii_uppercase(),
            None => '.',
        })))
    }
}
