// Move selection
//
// One-ply policy: filter hazards, then pick uniformly among what is left.
// This is the place a real strategy (food seeking, flood fill, search) would
// replace `select` without changing the surrounding contract.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::hazard::{HazardFilter, SafeMoves};
use crate::observer::{DecisionObserver, TurnContext};
use crate::types::{Board, Direction};

/// Outcome of one move decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// True when no safe move existed and the fallback direction was used
    pub fallback: bool,
    pub safe: SafeMoves,
}

/// Turns a safe set into exactly one direction
#[derive(Debug, Clone, Copy)]
pub struct MoveSelector {
    fallback: Direction,
}

impl Default for MoveSelector {
    fn default() -> Self {
        MoveSelector::new(Direction::Down)
    }
}

impl MoveSelector {
    /// Creates a selector returning `fallback` whenever nothing is safe
    pub fn new(fallback: Direction) -> Self {
        MoveSelector { fallback }
    }

    pub fn fallback(&self) -> Direction {
        self.fallback
    }

    /// Picks uniformly among `safe`, or the fallback direction if it is empty.
    ///
    /// Candidates are gathered in the fixed order of `SafeMoves::iter`, so a
    /// seeded `rng` always yields the same choice for the same safe set.
    pub fn select<R: Rng + ?Sized>(&self, safe: &SafeMoves, rng: &mut R) -> Decision {
        let candidates = safe.to_vec();

        match candidates.choose(rng) {
            Some(&direction) => Decision {
                direction,
                fallback: false,
                safe: *safe,
            },
            None => Decision {
                direction: self.fallback,
                fallback: true,
                safe: *safe,
            },
        }
    }

    /// Full per-turn decision: hazard filtering, selection, then notification.
    ///
    /// # Arguments
    /// * `ctx` - Game id, turn and head of the controlled snake
    /// * `board` - Snapshot for this turn
    /// * `rng` - Random source used to break ties between safe moves
    /// * `observer` - Receives the decision after it is made
    pub fn choose_move<R, O>(
        &self,
        ctx: &TurnContext<'_>,
        board: &Board,
        rng: &mut R,
        observer: &O,
    ) -> Decision
    where
        R: Rng + ?Sized,
        O: DecisionObserver + ?Sized,
    {
        let safe = HazardFilter::safe_moves(board, ctx.head);
        let decision = self.select(&safe, rng);
        observer.on_decision(ctx, board, &decision);
        decision
    }
}
