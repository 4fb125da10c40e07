// Hazard detection for a single turn
//
// Walls and snake bodies are the only hazards considered. Everything is checked
// against the snapshot as received: no tail movement, no predicted heads.

use serde::Serialize;

use crate::types::{Board, Coord, Direction};

/// Safety flag for each direction, indexed by `Direction::index()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SafeMoves {
    flags: [bool; 4],
}

impl SafeMoves {
    /// Every direction marked safe
    pub fn all() -> Self {
        SafeMoves { flags: [true; 4] }
    }

    /// No direction marked safe
    pub fn none() -> Self {
        SafeMoves { flags: [false; 4] }
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        self.flags[dir.index()]
    }

    pub fn mark_unsafe(&mut self, dir: Direction) {
        self.flags[dir.index()] = false;
    }

    pub fn mark_safe(&mut self, dir: Direction) {
        self.flags[dir.index()] = true;
    }

    /// Safe directions in fixed up, down, left, right order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::all()
            .into_iter()
            .filter(move |&dir| self.is_safe(dir))
    }

    pub fn len(&self) -> usize {
        self.flags.iter().filter(|&&safe| safe).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.iter().collect()
    }
}

impl FromIterator<Direction> for SafeMoves {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut safe = SafeMoves::none();
        for dir in iter {
            safe.mark_safe(dir);
        }
        safe
    }
}

impl Serialize for SafeMoves {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Stateless filter producing the safe set for a head position
pub struct HazardFilter;

impl HazardFilter {
    /// Computes which of the four directions are safe to take from `head`.
    ///
    /// A direction is safe when its candidate cell is inside the board and
    /// not covered by any body segment of any snake, our own included.
    /// Linear in the total number of body segments (at most four scans).
    pub fn safe_moves(board: &Board, head: Coord) -> SafeMoves {
        Direction::all()
            .into_iter()
            .filter(|dir| {
                let next = dir.apply(&head);
                !Self::is_out_of_bounds(&next, board.width, board.height)
                    && !Self::is_occupied(&next, board)
            })
            .collect()
    }

    /// Checks if a coordinate is out of bounds
    pub fn is_out_of_bounds(coord: &Coord, board_width: i32, board_height: i32) -> bool {
        coord.x < 0 || coord.x >= board_width || coord.y < 0 || coord.y >= board_height
    }

    /// Checks if a coordinate is covered by any snake body segment
    pub fn is_occupied(coord: &Coord, board: &Board) -> bool {
        board.snakes.iter().any(|snake| snake.body.contains(coord))
    }
}
