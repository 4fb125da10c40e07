// Decision observers
//
// The move kernel reports each decision to an injected observer instead of
// logging directly, so it stays testable without capturing log output.

use log::{info, warn};

use crate::selector::Decision;
use crate::types::{Board, Coord};

/// Per-call context passed along with a decision. Used for logging only.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub game_id: &'a str,
    pub turn: i32,
    pub head: Coord,
}

/// Receives every decision made by the move kernel
pub trait DecisionObserver {
    fn on_decision(&self, ctx: &TurnContext<'_>, board: &Board, decision: &Decision);
}

/// Discards everything
pub struct NullObserver;

impl DecisionObserver for NullObserver {
    fn on_decision(&self, _ctx: &TurnContext<'_>, _board: &Board, _decision: &Decision) {}
}

/// Writes one log line per decision through the `log` facade
pub struct LogObserver;

impl DecisionObserver for LogObserver {
    fn on_decision(&self, ctx: &TurnContext<'_>, _board: &Board, decision: &Decision) {
        if decision.fallback {
            warn!(
                "{} MOVE {}: No safe moves detected! Moving {}",
                ctx.game_id,
                ctx.turn,
                decision.direction.as_str()
            );
        } else {
            info!(
                "{} MOVE {}: {}",
                ctx.game_id,
                ctx.turn,
                decision.direction.as_str()
            );
        }
    }
}

/// Fans a decision out to several observers, in order
impl<T: DecisionObserver + ?Sized> DecisionObserver for [Box<T>] {
    fn on_decision(&self, ctx: &TurnContext<'_>, board: &Board, decision: &Decision) {
        for observer in self {
            observer.on_decision(ctx, board, decision);
        }
    }
}
