use std::cmp::Reverse;

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;
use tracing::{debug, instrument, trace};

use crate::board::Board;
use crate::check;
use crate::color::Color;
use crate::config::{SearchMode, SolverConfig};
use crate::location::{Bounds, Location};
use crate::path::Path;
use crate::report::{Solution, SolveResult, SolvedPath};
use crate::step::SquareStep;

// index into Board::groups
type GroupIndex = usize;

/// Counters for one search run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Extension attempts, i.e. directions tried from the head of a path.
    pub extensions: u64,
    /// Cells retracted after every direction from them was tried.
    pub backtracks: u64,
    /// Branches cut by reachability or coverage checks.
    pub pruned: u64,
    /// Complete solutions met.
    pub solutions: u64,
}

/// Which group owns each cell at this point of the search.
///
/// Every mark is removed by the frame that made it, so the grid is back to empty once the search unwinds.
struct Occupancy {
    owners: Array2<Option<GroupIndex>>,
    bounds: Bounds,
    free: usize,
}

impl Occupancy {
    fn new(board: &Board) -> Self {
        Self {
            owners: Array2::from_elem(board.bounds().shape(), None),
            bounds: board.bounds(),
            free: board.cells_to_cover().count(),
        }
    }

    fn owner(&self, location: Location) -> Option<GroupIndex> {
        self.bounds.index_of(location)
            .and_then(|index| self.owners.get(index).copied())
            .flatten()
    }

    fn is_free(&self, location: Location) -> bool {
        self.owner(location).is_none()
    }

    fn mark(&mut self, location: Location, group: GroupIndex) {
        if let Some(slot) = self.bounds.index_of(location).and_then(|index| self.owners.get_mut(index)) {
            debug_assert!(slot.is_none(), "{} marked twice", location);
            *slot = Some(group);
            self.free -= 1;
        }
    }

    fn unmark(&mut self, location: Location, group: GroupIndex) {
        if let Some(slot) = self.bounds.index_of(location).and_then(|index| self.owners.get_mut(index)) {
            debug_assert_eq!(*slot, Some(group), "{} unmarked by a different group", location);
            *slot = None;
            self.free += 1;
        }
    }

    // cells to cover that no path holds
    fn free_cells(&self) -> usize {
        self.free
    }
}

/// One cell of the path under construction.
#[derive(Copy, Clone, Debug)]
struct Frame {
    cell: Location,
    // side the path came in through, None at the start
    entered: Option<SquareStep>,
    // next index into SquareStep::VARIANTS
    next: usize,
}

enum Advance {
    Found,
    Exhausted,
    OutOfBudget,
}

/// The depth-first search for a single color, kept as an explicit stack of [`Frame`]s.
///
/// Once a path is found its frames stay on the stack, and their marks on the grid, while later colors are searched.
/// Advancing again retracts the last step and carries on from the next untried branch.
struct Level {
    group: GroupIndex,
    color: Color,
    next_pair: usize,
    terminal: Location,
    waypoints: Vec<Location>,
    visited_waypoints: usize,
    frames: Vec<Frame>,
    complete: bool,
}

impl Level {
    fn new(board: &Board, group: GroupIndex) -> Self {
        let color = board.groups[group].color;
        Self {
            group,
            color,
            next_pair: 0,
            terminal: Location(0, 0),
            waypoints: Vec::new(),
            visited_waypoints: 0,
            frames: Vec::new(),
            complete: false,
        }
    }

    fn path(&self) -> Path {
        Path::new(self.frames.iter().map(|frame| frame.cell).collect_vec())
    }

    fn push(&mut self, cell: Location, entered: Option<SquareStep>, occupancy: &mut Occupancy) {
        occupancy.mark(cell, self.group);
        if self.waypoints.contains(&cell) {
            self.visited_waypoints += 1;
        }

        self.frames.push(Frame { cell, entered, next: 0 });
    }

    fn retreat(&mut self, occupancy: &mut Occupancy) {
        if let Some(frame) = self.frames.pop() {
            occupancy.unmark(frame.cell, self.group);
            if self.waypoints.contains(&frame.cell) {
                self.visited_waypoints -= 1;
            }
        }
    }

    fn begin_next_pair(&mut self, search: &mut Search) -> bool {
        let board = search.board;
        let group = &board.groups[self.group];
        let Some(&(start, end)) = group.pairs.get(self.next_pair) else {
            return false;
        };

        self.next_pair += 1;
        self.terminal = end;
        self.waypoints = group.waypoints((start, end), search.config.waypoints);
        self.visited_waypoints = 0;
        trace!(color = %self.color, %start, %end, "trying endpoint pair");
        self.push(start, None, &mut search.occupancy);
        true
    }

    fn advance(&mut self, search: &mut Search) -> Advance {
        if self.complete {
            self.complete = false;
            self.retreat(&mut search.occupancy);
        }

        let board = search.board;
        loop {
            let Some(frame) = self.frames.last_mut() else {
                if !self.begin_next_pair(search) {
                    return Advance::Exhausted;
                }
                continue;
            };

            let Some(out) = SquareStep::VARIANTS.get(frame.next).copied() else {
                search.stats.backtracks += 1;
                self.retreat(&mut search.occupancy);
                continue;
            };
            frame.next += 1;
            let (here, entered) = (frame.cell, frame.entered);

            if search.config.step_budget.is_some_and(|budget| search.stats.extensions >= budget) {
                return Advance::OutOfBudget;
            }
            search.stats.extensions += 1;

            // leaving through `out` has to suit whatever node sits here
            if board.node_at(here).is_some_and(|node| !node.legal_transit(entered, Some(out))) {
                continue;
            }

            let Some(next) = board.neighbor(here, out) else {
                continue;
            };
            if !search.occupancy.is_free(next) {
                continue;
            }

            let entering = Some(out.invert());
            match board.node_at(next) {
                Some(node) if node.color != self.color => continue,
                Some(node) if next == self.terminal => {
                    if self.visited_waypoints < self.waypoints.len() || !node.legal_transit(entering, None) {
                        continue;
                    }

                    self.push(next, entering, &mut search.occupancy);
                    self.complete = true;
                    return Advance::Found;
                }
                Some(node) if !node.shape.can_pass_through() => continue,
                Some(node) if !SquareStep::VARIANTS.iter().any(|exit| node.legal_transit(entering, Some(*exit))) => continue,
                _ => {
                    trace!(color = %self.color, from = %here, to = %next, "extend");
                    self.push(next, entering, &mut search.occupancy);
                }
            }

            if !self.can_still_finish(search) {
                trace!(color = %self.color, head = %next, "pruned unreachable target");
                search.stats.pruned += 1;
                self.retreat(&mut search.occupancy);
            }
        }
    }

    // the terminal and every waypoint not yet on the path are reachable from the head
    fn can_still_finish(&self, search: &Search) -> bool {
        let Some(head) = self.frames.last().map(|frame| frame.cell) else {
            return false;
        };

        let reached = search.board.reachable_from(&[head], |location| search.passable_for(self.color, location));
        reached.contains(&self.terminal)
            && self.waypoints.iter().all(|waypoint| !search.occupancy.is_free(*waypoint) || reached.contains(waypoint))
    }
}

/// Mutable state shared by every [`Level`] of one run.
struct Search<'b> {
    board: &'b Board,
    config: SolverConfig,
    occupancy: Occupancy,
    stats: SearchStats,
}

impl Search<'_> {
    fn passable_for(&self, color: Color, location: Location) -> bool {
        self.occupancy.is_free(location) && self.board.node_at(location).map_or(true, |node| node.color == color)
    }

    // after committing a path, check every color still to come can be routed, and that no empty cell is out of reach in fill mode
    fn forward_check(&self, remaining: &[GroupIndex]) -> bool {
        let rule = self.config.waypoints;
        for group in remaining.iter().map(|index| &self.board.groups[*index]) {
            let must_visit = group.must_visit(rule).collect_vec();
            let candidates = group.candidates().collect_vec();
            let routable = |seed: Location| {
                let reached = self.board.reachable_from(&[seed], |location| self.passable_for(group.color, location));
                must_visit.iter().all(|location| reached.contains(location))
                    && candidates.iter().filter(|location| reached.contains(location)).count() >= 2
            };

            let ok = match must_visit.first() {
                Some(seed) => routable(*seed),
                None => candidates.iter().any(|seed| routable(*seed)),
            };
            if !ok {
                debug!(color = %group.color, "color cut off");
                return false;
            }
        }

        if self.config.fill_board {
            let remaining_colors = remaining.iter().map(|index| self.board.groups[*index].color).collect_vec();
            let sources = remaining.iter()
                .flat_map(|index| self.board.groups[*index].nodes.iter().map(|node| node.location))
                .collect_vec();
            let reached = self.board.reachable_from(&sources, |location| {
                self.occupancy.is_free(location)
                    && self.board.node_at(location).map_or(true, |node| remaining_colors.contains(&node.color))
            });

            let stranded = self.board.cells()
                .find(|location| self.occupancy.is_free(*location) && self.board.node_at(*location).is_none() && !reached.contains(location));
            if let Some(location) = stranded {
                debug!(%location, "empty cell out of reach");
                return false;
            }
        }

        true
    }
}

/// Backtracking search over a [`Board`].
///
/// Colors are routed one at a time, most mandatory waypoints first and otherwise in placement order.
/// Colors made only of lines need no path and are skipped; their nodes block everyone else.
/// Each color's path is grown one cell at a time from its start endpoint, trying [`SquareStep::VARIANTS`] in order.
/// A step is taken only if it leaves the current cell in a way its node allows, lands on a free cell of the board,
/// and does not enter a node of another color; the end endpoint is accepted only once every waypoint is on the path.
/// After every step the end and the remaining waypoints must still be reachable, and after every finished color
/// every color still to come must still be routable; branches failing either check are cut.
///
/// The search is deterministic: the same board and configuration always yield the same solutions in the same order.
pub struct Solver<'b> {
    board: &'b Board,
    config: SolverConfig,
    stats: SearchStats,
}

impl<'b> Solver<'b> {
    /// A solver for `board` with the default [`SolverConfig`].
    pub fn new(board: &'b Board) -> Self {
        Self {
            board,
            config: SolverConfig::default(),
            stats: SearchStats::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Counters from the most recent [`run`](Self::run).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The order colors are routed in.
    pub fn search_order(&self) -> Vec<Color> {
        self.order().into_iter().map(|index| self.board.groups[index].color).collect_vec()
    }

    fn order(&self) -> Vec<GroupIndex> {
        let groups = &self.board.groups;
        (0..groups.len())
            .filter(|index| groups[*index].is_routable())
            .sorted_by_key(|index| (Reverse(groups[*index].mandatory_waypoint_count(self.config.waypoints)), groups[*index].first_seen))
            .collect_vec()
    }

    fn assemble(&self, levels: &[Level]) -> Solution {
        Solution::new(levels.iter()
            .sorted_by_key(|level| level.group)
            .map(|level| SolvedPath::new(level.color, level.path()))
            .collect_vec())
    }

    /// Search the board as configured.
    #[instrument(level = "debug", skip(self), fields(colors = self.board.groups.len(), cells = self.board.cell_count()))]
    pub fn run(&mut self) -> SolveResult {
        let order = self.order();
        let mut search = Search {
            board: self.board,
            config: self.config,
            occupancy: Occupancy::new(self.board),
            stats: SearchStats::default(),
        };
        let mut levels: Vec<Level> = Vec::with_capacity(order.len());
        let mut found = Vec::new();
        let mut interrupted = false;

        match order.first() {
            Some(first) => levels.push(Level::new(self.board, *first)),
            // no color needs a path, so the empty solution stands unless cells are left to fill
            None if !self.config.fill_board || search.occupancy.free_cells() == 0 => found.push(Solution::default()),
            None => {}
        }

        while let Some(level) = levels.last_mut() {
            match level.advance(&mut search) {
                Advance::Found => {
                    let depth = levels.len();
                    debug!(color = %self.board.groups[order[depth - 1]].color, depth, "path committed");

                    if depth < order.len() {
                        debug_assert_eq!(check::check_partial(self.board, self.assemble(&levels).paths()), Ok(()));
                        if search.forward_check(&order[depth..]) {
                            levels.push(Level::new(self.board, order[depth]));
                        } else {
                            search.stats.pruned += 1;
                        }
                        continue;
                    }

                    if self.config.fill_board && search.occupancy.free_cells() > 0 {
                        search.stats.pruned += 1;
                        continue;
                    }

                    let solution = self.assemble(&levels);
                    debug_assert_eq!(check::check_solution(self.board, &solution, &self.config), Ok(()));
                    debug!(solutions = search.stats.solutions + 1, "solution found");
                    search.stats.solutions += 1;
                    found.push(solution);
                    if self.config.mode == SearchMode::FirstSolution {
                        break;
                    }
                }
                Advance::Exhausted => {
                    levels.pop();
                }
                Advance::OutOfBudget => {
                    debug!(budget = ?self.config.step_budget, "step budget exhausted");
                    interrupted = true;
                    break;
                }
            }
        }

        self.stats = search.stats;
        debug!(stats = ?self.stats, "search finished");

        match (interrupted, self.config.mode) {
            (true, _) => SolveResult::Unknown { found },
            (false, _) if found.is_empty() => SolveResult::Unsatisfiable,
            (false, SearchMode::FirstSolution) => found.into_iter().next().map_or(SolveResult::Unsatisfiable, SolveResult::Solved),
            (false, SearchMode::AllSolutions) => SolveResult::All(found),
        }
    }
}

/// Solve `board` with the default configuration in the given `mode`.
pub fn solve(board: &Board, mode: SearchMode) -> SolveResult {
    Solver::new(board)
        .with_config(SolverConfig::default().with_mode(mode))
        .run()
}
