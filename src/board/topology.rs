//! Adjacency graph for the standard 24-position morris board.
//!
//! Positions are numbered row by row, left to right:
//!
//! ```text
//!  0 ----------- 1 ----------- 2
//!  |             |             |
//!  |    3 ------ 4 ------ 5    |
//!  |    |        |        |    |
//!  |    |   6 -- 7 -- 8   |    |
//!  |    |   |         |   |    |
//!  9 -- 10 -11        12- 13 - 14
//!  |    |   |         |   |    |
//!  |    |   15 - 16 - 17  |    |
//!  |    |        |        |    |
//!  |    18 ----- 19 ----- 20   |
//!  |             |             |
//!  21 ---------- 22 ---------- 23
//! ```
//!
//! Every straight line holds exactly three positions. The middle row and
//! middle column are split in two (11 and 12 are not linked, nor are 7 and
//! 16), which is what lets mill detection count neighbours instead of
//! consulting a table of lines.

use super::position::PositionGraph;

/// The number of positions on the board.
pub const POSITION_COUNT: usize = 24;

/// One of the four neighbour slots of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// All directions in slot order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Returns the direction pointing the other way.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the axis this direction lies on.
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }
}

/// A straight-line axis through a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Returns the two opposite directions along this axis.
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Vertical => [Direction::Up, Direction::Down],
            Axis::Horizontal => [Direction::Left, Direction::Right],
        }
    }
}

/// A directed link: `to` is the `dir` neighbour of `from`.
///
/// Only the down and right halves are stored; the builder adds the inverse.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub from: usize,
    pub dir: Direction,
    pub to: usize,
}

const fn right(from: usize, to: usize) -> Edge {
    Edge {
        from,
        dir: Direction::Right,
        to,
    }
}

const fn down(from: usize, to: usize) -> Edge {
    Edge {
        from,
        dir: Direction::Down,
        to,
    }
}

/// Number of undirected edges on the standard board.
pub const EDGE_COUNT: usize = 32;

/// The standard board's edges, horizontal rows first, then vertical columns.
pub static EDGES: [Edge; EDGE_COUNT] = [
    // Rows
    right(0, 1),
    right(1, 2),
    right(3, 4),
    right(4, 5),
    right(6, 7),
    right(7, 8),
    right(9, 10),
    right(10, 11),
    right(12, 13),
    right(13, 14),
    right(15, 16),
    right(16, 17),
    right(18, 19),
    right(19, 20),
    right(21, 22),
    right(22, 23),
    // Columns
    down(0, 9),
    down(9, 21),
    down(3, 10),
    down(10, 18),
    down(6, 11),
    down(11, 15),
    down(1, 4),
    down(4, 7),
    down(16, 19),
    down(19, 22),
    down(8, 12),
    down(12, 17),
    down(5, 13),
    down(13, 20),
    down(2, 14),
    down(14, 23),
];

/// Builds an empty graph wired from an edge list, linking both directions.
pub fn build_graph(edges: &[Edge]) -> PositionGraph {
    let mut graph = PositionGraph::empty();
    for edge in edges {
        graph.set_neighbour(edge.from, edge.dir, edge.to);
        graph.set_neighbour(edge.to, edge.dir.opposite(), edge.from);
    }
    graph
}

/// Builds the standard 24-position board with no tokens placed.
pub fn standard_graph() -> PositionGraph {
    build_graph(&EDGES)
}
