// Integration test for trapped and nearly-trapped snakes
//
// When exactly one direction is open the bot must take it, whatever the
// random source. When nothing is open it must answer with the configured
// fallback direction, even if that direction runs into a wall or a body.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use safe_move_snake::bot::Bot;
use safe_move_snake::config::Config;
use safe_move_snake::types::{Battlesnake, Board, Coord, Direction, Game};

fn test_game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: json!({}),
        timeout: 500,
        source: "test".to_string(),
    }
}

fn snake(id: &str, body: Vec<Coord>) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 50,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

/// Runs the bot with many seeds and returns every move it produced
fn moves_over_seeds(bot: &Bot, board: &Board, you: &Battlesnake) -> Vec<Direction> {
    (0..32)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            bot.decide(&test_game(), &0, board, you, &mut rng).direction
        })
        .collect()
}

/// Test: Snake at top wall (y=10), boxed in by its own body and an opponent
/// Nothing is safe, so the fallback "down" is returned even though it is the neck
#[test]
fn test_fully_trapped_at_top_wall_uses_fallback() {
    let bot = Bot::new(Config::default_hardcoded());

    let board = Board {
        height: 11,
        width: 11,
        food: vec![],
        snakes: vec![
            snake(
                "our-snake",
                vec![
                    Coord { x: 5, y: 10 }, // head at top wall
                    Coord { x: 5, y: 9 },  // neck blocks down
                    Coord { x: 4, y: 9 },
                    Coord { x: 4, y: 10 }, // blocks left
                ],
            ),
            snake(
                "opponent",
                vec![
                    Coord { x: 6, y: 10 }, // blocks right
                    Coord { x: 6, y: 9 },
                    Coord { x: 6, y: 8 },
                ],
            ),
        ],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    let response = bot.get_move(&test_game(), &0, &board, &you);
    assert_eq!(response["move"].as_str().unwrap(), "down");

    let mut rng = StdRng::seed_from_u64(99);
    let decision = bot.decide(&test_game(), &0, &board, &you, &mut rng);
    assert!(decision.fallback);
    assert!(decision.safe.is_empty());
}

/// Test: Snake at bottom wall (y=0), only "right" is open
#[test]
fn test_bottom_wall_single_exit_is_always_taken() {
    let bot = Bot::new(Config::default_hardcoded());

    let board = Board {
        height: 11,
        width: 11,
        food: vec![],
        snakes: vec![snake(
            "our-snake",
            vec![
                Coord { x: 5, y: 0 }, // head at bottom wall
                Coord { x: 5, y: 1 }, // neck blocks up
                Coord { x: 4, y: 1 },
                Coord { x: 4, y: 0 }, // blocks left
                Coord { x: 3, y: 0 },
                Coord { x: 2, y: 0 },
                Coord { x: 1, y: 0 },
                Coord { x: 0, y: 0 },
            ],
        )],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    assert!(moves_over_seeds(&bot, &board, &you)
        .iter()
        .all(|&m| m == Direction::Right));
}

/// Test: Snake at left wall (x=0), only "up" is open
#[test]
fn test_left_wall_single_exit_is_always_taken() {
    let bot = Bot::new(Config::default_hardcoded());

    let board = Board {
        height: 11,
        width: 11,
        food: vec![],
        snakes: vec![snake(
            "our-snake",
            vec![
                Coord { x: 0, y: 5 }, // head at left wall
                Coord { x: 1, y: 5 }, // neck blocks right
                Coord { x: 1, y: 4 },
                Coord { x: 0, y: 4 }, // blocks down
                Coord { x: 0, y: 3 },
                Coord { x: 0, y: 2 },
                Coord { x: 0, y: 1 },
            ],
        )],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    assert!(moves_over_seeds(&bot, &board, &you)
        .iter()
        .all(|&m| m == Direction::Up));
}

/// Test: Snake at right wall (x=10), only "down" is open
#[test]
fn test_right_wall_single_exit_is_always_taken() {
    let bot = Bot::new(Config::default_hardcoded());

    let board = Board {
        height: 11,
        width: 11,
        food: vec![],
        snakes: vec![snake(
            "our-snake",
            vec![
                Coord { x: 10, y: 5 }, // head at right wall
                Coord { x: 9, y: 5 },  // neck blocks left
                Coord { x: 9, y: 6 },
                Coord { x: 10, y: 6 }, // blocks up
                Coord { x: 10, y: 7 },
                Coord { x: 10, y: 8 },
            ],
        )],
        hazards: vec![],
    };
    let you = board.snakes[0].clone();

    let response = bot.get_move(&test_game(), &0, &board, &you);
    assert_eq!(response["move"].as_str().unwrap(), "down");
}

/// Test: the fallback direction comes from configuration
#[test]
fn test_configured_fallback_is_used_on_one_by_one_board() {
    let mut config = Config::default_hardcoded();
    config.moves.fallback_direction = Direction::Left;
    let bot = Bot::new(config);

    let you = snake("our-snake", vec![Coord { x: 0, y: 0 }]);
    let board = Board {
        height: 1,
        width: 1,
        food: vec![],
        snakes: vec![you.clone()],
        hazards: vec![],
    };

    assert!(moves_over_seeds(&bot, &board, &you)
        .iter()
        .all(|&m| m == Direction::Left));
}
