// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each decision is written to a JSONL file.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::Mutex;

use crate::observer::{DecisionObserver, TurnContext};
use crate::selector::Decision;
use crate::types::{Board, Coord, Direction};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    game_id: String,
    turn: i32,
    head: Coord,
    chosen_move: String,
    fallback: bool,
    safe_moves: Vec<Direction>,
    board: Board,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flushes the log file
    /// Call before reading the log back (e.g. with the replay audit) in the same process
    pub async fn flush(&self) {
        let mut file_guard = self.file.lock().await;
        if let Some(file) = file_guard.as_mut() {
            if let Err(e) = file.flush().await {
                error!("Failed to flush debug log: {}", e);
            }
        }
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

impl DecisionObserver for DebugLogger {
    /// Spawns a tokio task that writes the entry without blocking the move
    fn on_decision(&self, ctx: &TurnContext<'_>, board: &Board, decision: &Decision) {
        if !self.enabled {
            return;
        }

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Debug log entry dropped, no tokio runtime: {}", e);
                return;
            }
        };

        let entry = DebugLogEntry {
            game_id: ctx.game_id.to_string(),
            turn: ctx.turn,
            head: ctx.head,
            chosen_move: decision.direction.as_str().to_string(),
            fallback: decision.fallback,
            safe_moves: decision.safe.to_vec(),
            board: board.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let file_handle = self.file.clone();
        runtime.spawn(Self::write_entry(file_handle, entry));
    }
}
