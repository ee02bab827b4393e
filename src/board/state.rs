//! Board state and the turn/phase state machine.
//!
//! A `Board` is one complete snapshot of a game: both teams, whose turn it
//! is, the occupancy graph, and the phase within the turn. `action` is the
//! only mutating entry point; every other method is a read-only query.

use std::fmt;

use log::{debug, trace};

use super::position::{Mill, Position, PositionGraph};
use super::team::{Player, Team, ALL_PLAYERS};
use super::topology::{standard_graph, POSITION_COUNT};
use crate::config::GameConfig;

/// The sub-step within a team's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    /// Lift one of your own tokens to begin a move.
    PickUp = 0,
    /// Place a token from hand, or drop the lifted token next to where it was.
    Place = 1,
    /// A mill was just formed; remove one opposing token.
    RemoveOpponent = 2,
}

impl Phase {
    pub fn from_index(i: u8) -> Option<Phase> {
        match i {
            0 => Some(Phase::PickUp),
            1 => Some(Phase::Place),
            2 => Some(Phase::RemoveOpponent),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::PickUp => "pickup",
            Phase::Place => "place",
            Phase::RemoveOpponent => "remove",
        }
    }
}

/// Complete board state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    teams: [Team; 2],
    current_player: usize,
    graph: PositionGraph,
    phase: Phase,
    pick_up_position: Option<usize>,
}

impl Board {
    /// Creates the opening board for a new game on the standard topology.
    pub fn new(config: &GameConfig) -> Self {
        let teams = ALL_PLAYERS.map(|p| Team::new(p, config.tokens_per_team));
        let current_player = config.first_player as usize;
        let phase = Self::turn_start_phase(&teams[current_player]);
        debug!(
            "new board: {} tokens each, {} to move",
            config.tokens_per_team,
            config.first_player.name()
        );
        Board {
            teams,
            current_player,
            graph: standard_graph(),
            phase,
            pick_up_position: None,
        }
    }

    /// Rebuilds a board from trusted stored parts on a pre-built graph.
    ///
    /// Occupancy is taken from `graph` as is; mill counters are recomputed
    /// from it. Nothing else is validated.
    pub fn from_parts(
        teams: [Team; 2],
        current_player: usize,
        mut graph: PositionGraph,
        phase: Phase,
        pick_up_position: Option<usize>,
    ) -> Self {
        graph.recompute_mill_counters();
        Board {
            teams,
            current_player,
            graph,
            phase,
            pick_up_position,
        }
    }

    fn turn_start_phase(team: &Team) -> Phase {
        if team.has_unplaced_tokens() {
            Phase::Place
        } else {
            Phase::PickUp
        }
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn team(&self, index: usize) -> &Team {
        &self.teams[index]
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn playing_team(&self) -> &Team {
        &self.teams[self.current_player]
    }

    pub fn non_playing_team(&self) -> &Team {
        &self.teams[(self.current_player + 1) % 2]
    }

    fn playing_team_mut(&mut self) -> &mut Team {
        &mut self.teams[self.current_player]
    }

    fn non_playing_team_mut(&mut self) -> &mut Team {
        &mut self.teams[(self.current_player + 1) % 2]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pick_up_position(&self) -> Option<usize> {
        self.pick_up_position
    }

    pub fn graph(&self) -> &PositionGraph {
        &self.graph
    }

    pub fn position(&self, index: usize) -> &Position {
        self.graph.position(index)
    }

    /// The player holding `index`, if any. Panics if `index >= 24`.
    pub fn occupant(&self, index: usize) -> Option<Player> {
        self.graph.occupant(index)
    }

    /// Number of `player`'s tokens currently on the board.
    pub fn tokens_on_board(&self, player: Player) -> usize {
        self.graph.tokens_of(player).count()
    }

    /// True if `index` holds one of the current team's tokens that has
    /// somewhere to go.
    pub fn can_pick_up(&self, index: usize) -> bool {
        self.occupant(index) == Some(self.playing_team().player()) && !self.graph.is_stuck(index)
    }

    /// True if the current team may put a token on `index`.
    ///
    /// When completing a move the destination must neighbour the lifted
    /// position, and dropping it back where it came from is ignored.
    pub fn can_place(&self, index: usize) -> bool {
        if self.pick_up_position == Some(index) || self.occupant(index).is_some() {
            return false;
        }
        match self.pick_up_position {
            Some(from) => self.graph.is_adjacent(from, index),
            None => true,
        }
    }

    /// True if the current team may remove the opposing token on `index`.
    ///
    /// A token inside a mill is protected while the opponent still has any
    /// token outside one.
    pub fn can_remove(&self, index: usize) -> bool {
        let opponent = self.playing_team().player().opponent();
        if self.occupant(index) != Some(opponent) {
            return false;
        }
        if !self.graph.position(index).in_mill() {
            return true;
        }
        self.graph
            .tokens_of(opponent)
            .all(|i| self.graph.position(i).in_mill())
    }

    /// Applies the current phase's action at `index`.
    ///
    /// Returns false and leaves the board untouched if the action is not
    /// legal. Panics if `index >= 24`.
    pub fn action(&mut self, index: usize) -> bool {
        assert!(index < POSITION_COUNT, "position index {} out of range", index);
        match self.phase {
            Phase::PickUp => self.pick_up(index),
            Phase::Place => self.place(index),
            Phase::RemoveOpponent => self.remove_opponent(index),
        }
    }

    fn pick_up(&mut self, index: usize) -> bool {
        if !self.can_pick_up(index) {
            trace!("pick up at {} rejected", index);
            return false;
        }
        self.check_mill(index, false);
        self.graph.remove_token(index);
        self.phase = Phase::Place;
        self.pick_up_position = Some(index);
        debug!("{} lifted token at {}", self.playing_team().player().name(), index);
        true
    }

    /// A mill normally enters `RemoveOpponent`. If the opponent has no token
    /// on the board the turn passes instead, since nothing could be removed.
    fn place(&mut self, index: usize) -> bool {
        if !self.can_place(index) {
            trace!("place at {} rejected", index);
            return false;
        }
        let player = self.playing_team().player();
        self.graph.place_token(index, player);
        self.playing_team_mut().place_token();
        debug!("{} placed token at {}", player.name(), index);

        if !self.check_mill(index, true) {
            self.switch_playing_team();
        } else if self.tokens_on_board(player.opponent()) == 0 {
            debug!("{} formed a mill at {} with nothing to remove", player.name(), index);
            self.switch_playing_team();
        } else {
            debug!("{} formed a mill at {}", player.name(), index);
            self.phase = Phase::RemoveOpponent;
        }
        true
    }

    fn remove_opponent(&mut self, index: usize) -> bool {
        if !self.can_remove(index) {
            trace!("removal at {} rejected", index);
            return false;
        }
        self.check_mill(index, false);
        self.graph.remove_token(index);
        self.non_playing_team_mut().remove_token();
        debug!(
            "{} removed {} token at {}",
            self.playing_team().player().name(),
            self.non_playing_team().player().name(),
            index
        );
        self.switch_playing_team();
        true
    }

    /// Hands the turn to the other team and picks its opening phase.
    pub fn switch_playing_team(&mut self) {
        self.current_player = (self.current_player + 1) % 2;
        self.phase = Self::turn_start_phase(self.playing_team());
        self.pick_up_position = None;
    }

    /// Detects the mills through `index` and adds them to (or, when a token
    /// is about to leave, removes them from) the mill counters.
    ///
    /// Must be called with `true` when a token lands and with `false` before
    /// the same token leaves, so counters stay balanced.
    pub fn check_mill(&mut self, index: usize, token_added: bool) -> bool {
        let mill = self.graph.check_mill(index);
        self.graph
            .update_mill_counter_orientation(index, mill, token_added);
        mill != Mill::None
    }

    /// True if every token the current team has on the board is stuck.
    pub fn all_tokens_stuck(&self) -> bool {
        let player = self.playing_team().player();
        self.graph.tokens_of(player).all(|i| self.graph.is_stuck(i))
    }
}

impl fmt::Display for Board {
    /// `board <24 cells> turn <player> phase <phase>`, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: String = self
            .graph
            .positions()
            .iter()
            .map(|p| p.occupant().map_or('.', Player::board_char))
            .collect();
        write!(
            f,
            "board {} turn {} phase {}",
            cells,
            self.playing_team().player().name(),
            self.phase.name()
        )
    }
}
