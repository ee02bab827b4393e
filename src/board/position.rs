//! Board positions, occupancy, and mill bookkeeping.
//!
//! The graph is a fixed array of positions addressed by index. Neighbour
//! links are plain indices, so the cyclic board needs no shared ownership.
//! Every mill operation walks these links instead of consulting a list of
//! lines; that is only correct because each line on the board holds exactly
//! three positions.

use super::team::Player;
use super::topology::{Axis, Direction, ALL_DIRECTIONS, POSITION_COUNT};

/// The lines through a position that currently form a mill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mill {
    None,
    Vertical,
    Horizontal,
    Both,
}

impl Mill {
    fn from_axes(vertical: bool, horizontal: bool) -> Mill {
        match (vertical, horizontal) {
            (true, true) => Mill::Both,
            (true, false) => Mill::Vertical,
            (false, true) => Mill::Horizontal,
            (false, false) => Mill::None,
        }
    }

    /// Returns true if at least one line is a mill.
    pub fn is_mill(self) -> bool {
        self != Mill::None
    }

    /// The axes making up this mill, vertical first.
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        let axes: &'static [Axis] = match self {
            Mill::None => &[],
            Mill::Vertical => &[Axis::Vertical],
            Mill::Horizontal => &[Axis::Horizontal],
            Mill::Both => &[Axis::Vertical, Axis::Horizontal],
        };
        axes.iter().copied()
    }
}

/// A single position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    index: usize,
    occupant: Option<Player>,
    /// Neighbour index per `Direction` slot.
    neighbours: [Option<usize>; 4],
    /// Number of mills this position currently belongs to.
    mill_counter: u8,
}

impl Position {
    fn new(index: usize) -> Self {
        Position {
            index,
            occupant: None,
            neighbours: [None; 4],
            mill_counter: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn occupant(&self) -> Option<Player> {
        self.occupant
    }

    pub fn neighbour(&self, dir: Direction) -> Option<usize> {
        self.neighbours[dir as usize]
    }

    pub fn mill_counter(&self) -> u8 {
        self.mill_counter
    }

    /// True if this position belongs to at least one mill.
    pub fn in_mill(&self) -> bool {
        self.mill_counter > 0
    }

    fn update_mill_counter(&mut self, adding: bool) {
        if adding {
            self.mill_counter += 1;
        } else {
            debug_assert!(self.mill_counter > 0, "mill counter underflow at {}", self.index);
            self.mill_counter = self.mill_counter.saturating_sub(1);
        }
    }
}

/// The 24 positions of a board together with their adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGraph {
    positions: [Position; POSITION_COUNT],
}

impl PositionGraph {
    /// Creates a graph of unlinked, unoccupied positions.
    pub fn empty() -> Self {
        PositionGraph {
            positions: std::array::from_fn(Position::new),
        }
    }

    pub fn position(&self, index: usize) -> &Position {
        &self.positions[index]
    }

    pub fn positions(&self) -> &[Position; POSITION_COUNT] {
        &self.positions
    }

    /// Links `index` to `neighbour` in one direction only.
    ///
    /// Callers building a topology must also set the inverse link.
    pub fn set_neighbour(&mut self, index: usize, dir: Direction, neighbour: usize) {
        self.positions[index].neighbours[dir as usize] = Some(neighbour);
    }

    pub fn neighbour(&self, index: usize, dir: Direction) -> Option<usize> {
        self.positions[index].neighbour(dir)
    }

    /// Iterates over every linked neighbour of `index`.
    pub fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        ALL_DIRECTIONS
            .iter()
            .filter_map(move |&d| self.positions[index].neighbour(d))
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbours(a).any(|n| n == b)
    }

    pub fn occupant(&self, index: usize) -> Option<Player> {
        self.positions[index].occupant
    }

    /// Occupies `index` with `player`. No legality checks.
    pub fn place_token(&mut self, index: usize, player: Player) {
        self.positions[index].occupant = Some(player);
    }

    /// Clears `index`. No legality checks.
    pub fn remove_token(&mut self, index: usize) {
        self.positions[index].occupant = None;
    }

    /// True if no neighbour of `index` is empty.
    pub fn is_stuck(&self, index: usize) -> bool {
        self.neighbours(index)
            .all(|n| self.positions[n].occupant.is_some())
    }

    /// Counts consecutive neighbours in `dir` held by the same player as `index`.
    ///
    /// An empty position always yields 0.
    pub fn check_direction(&self, index: usize, dir: Direction) -> usize {
        let Some(player) = self.positions[index].occupant else {
            return 0;
        };
        let mut count = 0;
        let mut cur = index;
        while let Some(next) = self.positions[cur].neighbour(dir) {
            if self.positions[next].occupant != Some(player) {
                break;
            }
            count += 1;
            cur = next;
        }
        count
    }

    /// True if `index` and one matching neighbour on each side along `axis`
    /// make three in a row.
    pub fn check_orientation(&self, index: usize, axis: Axis) -> bool {
        let [a, b] = axis.directions();
        self.check_direction(index, a) + self.check_direction(index, b) == 2
    }

    pub fn check_mill(&self, index: usize) -> Mill {
        Mill::from_axes(
            self.check_orientation(index, Axis::Vertical),
            self.check_orientation(index, Axis::Horizontal),
        )
    }

    /// Adds or removes the mills in `mill` from the counters of `index` and
    /// every position along the implicated lines.
    ///
    /// The pivot moves once per axis, so a `Both` mill counts twice there.
    /// Calling this with `adding = true` and then `false` for the same mill
    /// restores every counter.
    pub fn update_mill_counter_orientation(&mut self, index: usize, mill: Mill, adding: bool) {
        for axis in mill.axes() {
            self.positions[index].update_mill_counter(adding);
            for dir in axis.directions() {
                self.update_mill_counter_direction(index, dir, adding);
            }
        }
    }

    /// Walks from `index` to the end of the line in `dir`, adjusting each
    /// position passed.
    fn update_mill_counter_direction(&mut self, index: usize, dir: Direction, adding: bool) {
        let mut cur = index;
        while let Some(next) = self.positions[cur].neighbour(dir) {
            self.positions[next].update_mill_counter(adding);
            cur = next;
        }
    }

    /// Rebuilds every counter from the current occupancy.
    ///
    /// Used when a board is restored from a snapshot, which does not carry
    /// counters.
    pub fn recompute_mill_counters(&mut self) {
        for i in 0..POSITION_COUNT {
            let count = [Axis::Vertical, Axis::Horizontal]
                .into_iter()
                .filter(|&axis| self.check_orientation(i, axis))
                .count();
            self.positions[i].mill_counter = count as u8;
        }
    }

    /// Indices held by `player`, in index order.
    pub fn tokens_of(&self, player: Player) -> impl Iterator<Item = usize> + '_ {
        self.positions
            .iter()
            .filter(move |p| p.occupant == Some(player))
            .map(|p| p.index)
    }
}
