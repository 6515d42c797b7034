use itertools::Itertools;

use crate::color::Color;
use crate::config::WaypointRule;
use crate::error::InvalidPuzzleError;
use crate::location::Location;
use crate::node::{Node, NodeShape};

/// All nodes of one color, and the ways a single path could join them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointGroup {
    pub(crate) color: Color,
    // placement order
    pub(crate) nodes: Vec<Node>,
    // (start, end), start placed first
    pub(crate) pairs: Vec<(Location, Location)>,
    pub(crate) first_seen: usize,
}

impl EndpointGroup {
    /// Split `nodes` into one group per color, in order of each color's first appearance.
    ///
    /// Diamonds must end the path, lines can never end it, and everything else may.
    /// When that leaves more than two possible endpoints, every admissible pair is kept and the search tries them in order.
    /// A color made only of lines gets no pairs at all, see [`Self::is_routable`].
    pub(crate) fn partition(nodes: &[Node]) -> Result<Vec<Self>, InvalidPuzzleError> {
        nodes.iter()
            .map(|node| node.color)
            .unique()
            .map(|color| {
                let first_seen = nodes.iter().position(|node| node.color == color).unwrap_or_default();
                let members = nodes.iter().filter(|node| node.color == color).copied().collect_vec();
                Self::from_members(color, members, first_seen)
            })
            .collect()
    }

    fn from_members(color: Color, nodes: Vec<Node>, first_seen: usize) -> Result<Self, InvalidPuzzleError> {
        let diamonds = nodes.iter().filter(|node| node.shape == NodeShape::Diamond).map(|node| node.location).collect_vec();
        if diamonds.len() > 2 {
            return Err(InvalidPuzzleError::TooManyEndpoints { color, count: diamonds.len() });
        }

        let candidates = nodes.iter().filter(|node| node.shape.can_terminate()).map(|node| node.location).collect_vec();
        let pairs = match candidates.as_slice() {
            // nothing can end a path, so the color needs none and its nodes only block others
            [] => Vec::new(),
            [location] => return Err(InvalidPuzzleError::UnpairedEndpoint { color, location: *location }),
            // candidates are in placement order, so combinations keep the earlier node first
            _ => candidates.iter()
                .copied()
                .tuple_combinations()
                .filter(|(a, b)| diamonds.iter().all(|diamond| diamond == a || diamond == b))
                .collect_vec(),
        };

        Ok(Self { color, nodes, pairs, first_seen })
    }

    /// Whether this group needs a path.
    ///
    /// A color whose nodes are all lines has nothing to start or end a path at. It is skipped by the search and the checker,
    /// and its nodes stay on the board as obstacles for every other color.
    pub fn is_routable(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// The color of every node in this group.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The nodes of this group in placement order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every `(start, end)` pair the path may run between, in the order the solver tries them.
    pub fn endpoint_pairs(&self) -> &[(Location, Location)] {
        &self.pairs
    }

    /// Nodes the path between `pair` must pass through under `rule`.
    pub fn waypoints(&self, pair: (Location, Location), rule: WaypointRule) -> Vec<Location> {
        self.nodes.iter()
            .filter(|node| node.location != pair.0 && node.location != pair.1)
            .filter(|node| Self::is_mandatory(node, rule))
            .map(|node| node.location)
            .collect_vec()
    }

    /// How many waypoints every path of this group must visit, whichever pair it ends up using.
    pub fn mandatory_waypoint_count(&self, rule: WaypointRule) -> usize {
        match rule {
            WaypointRule::Mandatory => self.nodes.len().saturating_sub(2),
            WaypointRule::Optional => self.nodes.iter().filter(|node| !node.shape.can_terminate()).count(),
        }
    }

    // nodes on every admissible path of this group
    pub(crate) fn must_visit(&self, rule: WaypointRule) -> impl Iterator<Item = Location> + '_ {
        self.nodes.iter()
            .filter(move |node| node.shape == NodeShape::Diamond || Self::is_mandatory(node, rule))
            .map(|node| node.location)
    }

    pub(crate) fn candidates(&self) -> impl Iterator<Item = Location> + '_ {
        self.nodes.iter().filter(|node| node.shape.can_terminate()).map(|node| node.location)
    }

    fn is_mandatory(node: &Node, rule: WaypointRule) -> bool {
        match rule {
            WaypointRule::Mandatory => true,
            WaypointRule::Optional => !node.shape.can_terminate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EndpointGroup;
    use crate::color::Color;
    use crate::config::WaypointRule;
    use crate::error::InvalidPuzzleError;
    use crate::location::Location;
    use crate::node::Node;
    use crate::step::Orientation;

    #[test]
    fn two_basics_make_one_pair() {
        let groups = EndpointGroup::partition(&[
            Node::basic(Color::Red, Location(1, 1)),
            Node::basic(Color::Blue, Location(2, 1)),
            Node::basic(Color::Red, Location(3, 1)),
            Node::line(Color::Red, Location(4, 1), Orientation::Vertical),
            Node::basic(Color::Blue, Location(5, 1)),
        ]).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].color(), Color::Red);
        assert_eq!(groups[0].endpoint_pairs(), &[(Location(1, 1), Location(3, 1))]);
        assert_eq!(groups[0].waypoints((Location(1, 1), Location(3, 1)), WaypointRule::Optional), vec![Location(4, 1)]);
        assert_eq!(groups[1].first_seen, 1);
    }

    #[test]
    fn diamonds_pin_the_endpoints() {
        let groups = EndpointGroup::partition(&[
            Node::basic(Color::Green, Location(1, 1)),
            Node::diamond(Color::Green, Location(2, 1)),
            Node::basic(Color::Green, Location(3, 1)),
        ]).unwrap();

        assert_eq!(groups[0].endpoint_pairs(), &[
            (Location(1, 1), Location(2, 1)),
            (Location(2, 1), Location(3, 1)),
        ]);
        assert_eq!(groups[0].waypoints((Location(1, 1), Location(2, 1)), WaypointRule::Mandatory), vec![Location(3, 1)]);
        assert!(groups[0].waypoints((Location(1, 1), Location(2, 1)), WaypointRule::Optional).is_empty());
        assert_eq!(groups[0].mandatory_waypoint_count(WaypointRule::Mandatory), 1);
    }

    #[test]
    fn ambiguous_basics_try_every_pair() {
        let groups = EndpointGroup::partition(&[
            Node::basic(Color::Red, Location(1, 1)),
            Node::triangle(Color::Red, Location(2, 1)),
            Node::basic(Color::Red, Location(3, 1)),
        ]).unwrap();

        assert_eq!(groups[0].endpoint_pairs().len(), 3);
        assert_eq!(groups[0].endpoint_pairs()[0], (Location(1, 1), Location(2, 1)));
    }

    #[test]
    fn rejects_bad_groups() {
        assert_eq!(
            EndpointGroup::partition(&[
                Node::diamond(Color::Red, Location(1, 1)),
                Node::diamond(Color::Red, Location(2, 1)),
                Node::diamond(Color::Red, Location(3, 1)),
            ]),
            Err(InvalidPuzzleError::TooManyEndpoints { color: Color::Red, count: 3 })
        );
        assert_eq!(
            EndpointGroup::partition(&[
                Node::basic(Color::Red, Location(1, 1)),
                Node::line(Color::Red, Location(2, 1), Orientation::Horizontal),
            ]),
            Err(InvalidPuzzleError::UnpairedEndpoint { color: Color::Red, location: Location(1, 1) })
        );
    }

    #[test]
    fn line_only_colors_need_no_path() {
        let groups = EndpointGroup::partition(&[
            Node::basic(Color::Red, Location(1, 1)),
            Node::line(Color::Cyan, Location(2, 1), Orientation::Horizontal),
            Node::line(Color::Cyan, Location(2, 2), Orientation::Vertical),
            Node::basic(Color::Red, Location(3, 1)),
        ]).unwrap();

        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_routable());
        assert!(!groups[1].is_routable());
        assert!(groups[1].endpoint_pairs().is_empty());
        assert_eq!(groups[1].nodes().len(), 2);
    }
}
