//! Independent verification of paths and solutions.
//!
//! Nothing here depends on how a solution was found, so it can be used on hand-made or deserialized solutions as well as on search output.

use std::collections::HashSet;

use itertools::Itertools;

use crate::board::Board;
use crate::config::{SolverConfig, WaypointRule};
use crate::error::Violation;
use crate::report::{Solution, SolvedPath};
use crate::step::SquareStep;

/// Check a single path against the rules of its color on `board`.
///
/// The path must be simple and run over connected cells, touch no node of another color,
/// run between one of its group's endpoint pairs in either direction, respect the shape of every node it touches,
/// and visit every waypoint `rule` makes mandatory for that pair.
pub fn check_path(board: &Board, solved: &SolvedPath, rule: WaypointRule) -> Result<(), Violation> {
    let color = solved.color;
    let group = board.group_of(color)
        .filter(|group| group.is_routable())
        .ok_or(Violation::UnexpectedPath(color))?;
    let path = &solved.path;
    check_route(board, solved)?;
    let (Some(start), Some(end)) = (path.start(), path.end()) else {
        return Err(Violation::EmptyPath(color));
    };

    let pair = group.endpoint_pairs()
        .iter()
        .find(|(a, b)| (*a, *b) == (start, end) || (*b, *a) == (start, end))
        .ok_or(Violation::BadEndpoint { color })?;

    for (location, incoming, outgoing) in path.transits() {
        if board.node_at(location).is_some_and(|node| !node.legal_transit(incoming, outgoing)) {
            return Err(Violation::IllegalTransit(location));
        }
    }

    match group.waypoints(*pair, rule).into_iter().find(|waypoint| !path.contains(*waypoint)) {
        Some(missed) => Err(Violation::MissedWaypoint(missed)),
        None => Ok(()),
    }
}

// a non-empty simple run over connected cells, clear of other colors' nodes
fn check_route(board: &Board, solved: &SolvedPath) -> Result<(), Violation> {
    let color = solved.color;
    if solved.path.is_empty() {
        return Err(Violation::EmptyPath(color));
    }

    let mut seen = HashSet::with_capacity(solved.path.len());
    for location in solved.cells() {
        if !board.is_cell(*location) {
            return Err(Violation::UnknownCell(*location));
        }

        if !seen.insert(*location) {
            return Err(Violation::Revisited(*location));
        }
    }

    for (from, to) in solved.cells().iter().tuple_windows() {
        let connected = SquareStep::direction_to(*from, *to)
            .and_then(|step| board.neighbor(*from, step))
            .is_some();
        if !connected {
            return Err(Violation::NotAdjacent { from: *from, to: *to });
        }
    }

    for location in solved.cells() {
        if let Some(node) = board.node_at(*location).filter(|node| node.color != color) {
            return Err(Violation::ForeignNode { color, other: node.color, location: *location });
        }
    }

    Ok(())
}

/// Check paths still under construction, as the search holds them between steps.
///
/// Each path must start at a node able to end its color's path and obey every rule of [`check_path`] that does not depend on where it ends:
/// only its last cell, the head, is exempt from shape checks, and waypoints are not required. Paths may not share cells.
pub fn check_partial(board: &Board, paths: &[SolvedPath]) -> Result<(), Violation> {
    let mut covered = HashSet::new();
    for solved in paths {
        let color = solved.color;
        let group = board.group_of(color)
        .filter(|group| group.is_routable())
        .ok_or(Violation::UnexpectedPath(color))?;
        check_route(board, solved)?;

        let starts_well = solved.path.start().is_some_and(|start| group.candidates().any(|candidate| candidate == start));
        if !starts_well {
            return Err(Violation::BadEndpoint { color });
        }

        let transits = solved.path.transits();
        for (location, incoming, outgoing) in &transits[..transits.len() - 1] {
            if board.node_at(*location).is_some_and(|node| !node.legal_transit(*incoming, *outgoing)) {
                return Err(Violation::IllegalTransit(*location));
            }
        }

        for location in solved.cells() {
            if !covered.insert(*location) {
                return Err(Violation::Overlap(*location));
            }
        }
    }

    Ok(())
}

/// Check a whole solution: exactly one valid path per color that needs one, no cell shared between paths,
/// and, if `config` asks for it, every cell of the board covered except obstacles.
pub fn check_solution(board: &Board, solution: &Solution, config: &SolverConfig) -> Result<(), Violation> {
    let counts = solution.paths().iter().counts_by(|solved| solved.color);
    for group in board.groups().iter().filter(|group| group.is_routable()) {
        if !counts.contains_key(&group.color) {
            return Err(Violation::MissingPath(group.color));
        }
    }

    if let Some(solved) = solution.paths().iter().find(|solved| counts[&solved.color] > 1) {
        return Err(Violation::UnexpectedPath(solved.color));
    }

    let mut covered = HashSet::with_capacity(board.cell_count());
    for solved in solution.paths() {
        check_path(board, solved, config.waypoints)?;

        for location in solved.cells() {
            if !covered.insert(*location) {
                return Err(Violation::Overlap(*location));
            }
        }
    }

    if config.fill_board {
        if let Some(location) = board.cells_to_cover().find(|location| !covered.contains(location)) {
            return Err(Violation::Uncovered(location));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{check_partial, check_path, check_solution};
    use crate::board::Board;
    use crate::color::Color;
    use crate::config::{SolverConfig, WaypointRule};
    use crate::error::Violation;
    use crate::location::Location;
    use crate::node::Node;
    use crate::path::Path;
    use crate::report::{Solution, SolvedPath};
    use crate::step::Orientation;

    fn board() -> Board {
        // R - R
        // B . B
        Board::from_nodes([
            Node::diamond(Color::Red, Location(0, 0)),
            Node::line(Color::Red, Location(1, 0), Orientation::Horizontal),
            Node::diamond(Color::Red, Location(2, 0)),
            Node::basic(Color::Blue, Location(0, 1)),
            Node::basic(Color::Blue, Location(2, 1)),
        ]).unwrap()
    }

    fn red(cells: &[(usize, usize)]) -> SolvedPath {
        SolvedPath::new(Color::Red, Path::new(cells.iter().map(|(x, y)| Location(*x, *y)).collect()))
    }

    fn blue_row() -> SolvedPath {
        SolvedPath::new(Color::Blue, Path::new(vec![Location(0, 1), Location(1, 1), Location(2, 1)]))
    }

    #[test]
    fn accepts_valid_paths() {
        let board = board();
        assert_eq!(check_path(&board, &red(&[(0, 0), (1, 0), (2, 0)]), WaypointRule::Mandatory), Ok(()));
        // either direction
        assert_eq!(check_path(&board, &red(&[(2, 0), (1, 0), (0, 0)]), WaypointRule::Mandatory), Ok(()));

        let solution = Solution::new(vec![red(&[(0, 0), (1, 0), (2, 0)]), blue_row()]);
        assert_eq!(check_solution(&board, &solution, &SolverConfig::default().with_fill_board(true)), Ok(()));
    }

    #[rstest]
    #[case(&[], Violation::EmptyPath(Color::Red))]
    #[case(&[(0, 0), (1, 0), (2, 0), (3, 0)], Violation::UnknownCell(Location(3, 0)))]
    #[case(&[(0, 0), (2, 0)], Violation::NotAdjacent { from: Location(0, 0), to: Location(2, 0) })]
    #[case(&[(0, 0), (1, 0), (0, 0)], Violation::Revisited(Location(0, 0)))]
    #[case(&[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0)], Violation::ForeignNode { color: Color::Red, other: Color::Blue, location: Location(0, 1) })]
    #[case(&[(0, 0), (1, 0)], Violation::BadEndpoint { color: Color::Red })]
    #[case(&[(0, 0), (1, 0), (1, 1), (2, 1)], Violation::ForeignNode { color: Color::Red, other: Color::Blue, location: Location(2, 1) })]
    fn rejects_broken_paths(#[case] cells: &[(usize, usize)], #[case] expected: Violation) {
        assert_eq!(check_path(&board(), &red(cells), WaypointRule::Mandatory), Err(expected));
    }

    #[test]
    fn partial_paths() {
        let board = board();
        let head_on_line = red(&[(0, 0), (1, 0)]);
        assert_eq!(check_partial(&board, &[head_on_line.clone()]), Ok(()));
        assert_eq!(check_path(&board, &head_on_line, WaypointRule::Mandatory), Err(Violation::BadEndpoint { color: Color::Red }));

        let from_line = red(&[(1, 0), (2, 0)]);
        assert_eq!(check_partial(&board, &[from_line]), Err(Violation::BadEndpoint { color: Color::Red }));

        let blue_up = SolvedPath::new(Color::Blue, Path::new(vec![Location(2, 1), Location(1, 1), Location(1, 0)]));
        assert_eq!(check_partial(&board, &[head_on_line, blue_up]), Err(Violation::ForeignNode {
            color: Color::Blue,
            other: Color::Red,
            location: Location(1, 0),
        }));

        let blue_short = SolvedPath::new(Color::Blue, Path::new(vec![Location(2, 1), Location(1, 1)]));
        let red_down = red(&[(0, 0), (0, 1)]);
        assert!(matches!(check_partial(&board, &[red_down]), Err(Violation::ForeignNode { .. })));

        let red_across = red(&[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(check_partial(&board, &[red_across, blue_short.clone(), blue_short]), Err(Violation::Overlap(Location(2, 1))));
    }

    #[test]
    fn rejects_bent_line() {
        // R R
        // . R  with a horizontal line in the top right corner
        let board = Board::from_nodes([
            Node::diamond(Color::Red, Location(0, 0)),
            Node::line(Color::Red, Location(1, 0), Orientation::Horizontal),
            Node::diamond(Color::Red, Location(1, 1)),
        ]).unwrap();

        let bent = red(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(check_path(&board, &bent, WaypointRule::Mandatory), Err(Violation::IllegalTransit(Location(1, 0))));
    }

    #[test]
    fn rejects_missed_waypoint() {
        let board = Board::from_nodes([
            Node::diamond(Color::Red, Location(0, 0)),
            Node::basic(Color::Red, Location(1, 1)),
            Node::diamond(Color::Red, Location(1, 0)),
        ]).unwrap();

        let direct = red(&[(0, 0), (1, 0)]);
        assert_eq!(check_path(&board, &direct, WaypointRule::Mandatory), Err(Violation::MissedWaypoint(Location(1, 1))));
        assert_eq!(check_path(&board, &direct, WaypointRule::Optional), Ok(()));
    }

    #[test]
    fn rejects_bad_solutions() {
        let board = board();
        let config = SolverConfig::default();
        let red_row = red(&[(0, 0), (1, 0), (2, 0)]);

        assert_eq!(check_solution(&board, &Solution::new(vec![red_row.clone()]), &config), Err(Violation::MissingPath(Color::Blue)));
        assert_eq!(
            check_solution(&board, &Solution::new(vec![red_row.clone(), blue_row(), blue_row()]), &config),
            Err(Violation::UnexpectedPath(Color::Blue))
        );

        let stray = SolvedPath::new(Color::Green, Path::new(vec![Location(1, 1)]));
        assert_eq!(
            check_solution(&board, &Solution::new(vec![red_row, blue_row(), stray]), &config),
            Err(Violation::UnexpectedPath(Color::Green))
        );
    }

    #[test]
    fn rejects_overlap_and_gaps() {
        // R . R
        // . . .
        // B . B
        let board = Board::from_nodes([
            Node::basic(Color::Red, Location(0, 0)),
            Node::basic(Color::Red, Location(2, 0)),
            Node::basic(Color::Blue, Location(0, 2)),
            Node::basic(Color::Blue, Location(2, 2)),
        ]).unwrap();

        let red_dip = red(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]);
        let blue_bump = SolvedPath::new(Color::Blue, Path::new(vec![Location(0, 2), Location(1, 2), Location(1, 1), Location(2, 1), Location(2, 2)]));
        assert_eq!(
            check_solution(&board, &Solution::new(vec![red_dip, blue_bump]), &SolverConfig::default()),
            Err(Violation::Overlap(Location(1, 1)))
        );

        let red_row = red(&[(0, 0), (1, 0), (2, 0)]);
        let blue_row = SolvedPath::new(Color::Blue, Path::new(vec![Location(0, 2), Location(1, 2), Location(2, 2)]));
        let solution = Solution::new(vec![red_row, blue_row]);
        assert_eq!(check_solution(&board, &solution, &SolverConfig::default()), Ok(()));
        assert_eq!(
            check_solution(&board, &solution, &SolverConfig::default().with_fill_board(true)),
            Err(Violation::Uncovered(Location(0, 1)))
        );
    }
}
