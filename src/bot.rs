// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// This file can be a nice home for your Battlesnake logic and helper functions.
//
// The bot avoids walls and every snake body on the board, then picks a random
// safe move. It does not look for food and does not look ahead.
// For more info see docs.battlesnake.com

use log::{error, info};
use rand::Rng;
use serde_json::{json, Value};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::observer::{DecisionObserver, LogObserver, TurnContext};
use crate::selector::{Decision, MoveSelector};
use crate::types::{Battlesnake, Board, Game, GameState};

type BoxedObserver = Box<dyn DecisionObserver + Send + Sync>;

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    selector: MoveSelector,
    observers: Vec<BoxedObserver>,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    /// Decisions are reported through the `log` facade only
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_observers(config, vec![Box::new(LogObserver)])
    }

    /// Creates a Bot that also writes every decision to the JSONL debug log
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Self::with_observers(config, vec![Box::new(LogObserver), Box::new(debug_logger)])
    }

    /// Creates a Bot reporting its decisions to the given observers
    pub fn with_observers(config: Config, observers: Vec<BoxedObserver>) -> Self {
        let selector = MoveSelector::new(config.moves.fallback_direction);
        Bot {
            config,
            selector,
            observers,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} START", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} END", game.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let decision = self.decide(game, turn, board, you, &mut rand::rng());
        json!({ "move": decision.direction.as_str() })
    }

    /// Runs the move kernel with an explicit random source
    ///
    /// # Arguments
    /// * `game` - Current game metadata (logging only)
    /// * `turn` - Current turn number (logging only)
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    /// * `rng` - Tie-break source between safe moves
    pub fn decide<R: Rng + ?Sized>(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
        rng: &mut R,
    ) -> Decision {
        let ctx = TurnContext {
            game_id: &game.id,
            turn: *turn,
            head: you.head,
        };

        self.selector
            .choose_move(&ctx, board, rng, self.observers.as_slice())
    }

    /// Validates the request before computing a move
    /// Invalid input is reported instead of producing a meaningless move
    pub fn try_get_move(&self, state: &GameState) -> Result<Value, String> {
        if let Err(e) = state.validate() {
            error!("{} MOVE {}: rejected request: {}", state.game.id, state.turn, e);
            return Err(e);
        }

        Ok(self.get_move(&state.game, &state.turn, &state.board, &state.you))
    }
}
