// Replay module for auditing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs written by the debug logger
// 2. Re-run hazard filtering on each logged snapshot
// 3. Check that every logged move was safe (or the fallback when nothing was)
// 4. Generate audit reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::hazard::{HazardFilter, SafeMoves};
use crate::types::{Board, Coord, Direction};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    #[serde(default)]
    pub game_id: String,
    pub turn: i32,
    pub head: Coord,
    pub chosen_move: String,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub safe_moves: Vec<Direction>,
    pub board: Board,
    pub timestamp: String,
}

/// Result of auditing a single turn
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub turn: i32,
    pub chosen_move: Direction,
    /// Safe set recomputed from the logged snapshot
    pub safe_moves: SafeMoves,
    pub fallback_taken: bool,
    /// Logged safe set and fallback flag agree with the recomputation
    pub log_consistent: bool,
    pub legal: bool,
}

/// Statistics for a complete audit session
#[derive(Debug, Default)]
pub struct AuditStats {
    pub total_turns: usize,
    pub legal: usize,
    pub illegal: usize,
    pub fallback_turns: usize,
    pub inconsistent_entries: usize,
    pub legal_rate: f64,
}

/// Replay engine for auditing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Audits a single log entry against a fresh hazard computation
    pub fn audit_entry(&self, entry: &LogEntry) -> Result<AuditResult, String> {
        let chosen_move: Direction = entry.chosen_move.parse()?;
        let safe = HazardFilter::safe_moves(&entry.board, entry.head);
        let fallback_taken = safe.is_empty();

        let legal = if fallback_taken {
            chosen_move == self.config.moves.fallback_direction
        } else {
            safe.is_safe(chosen_move)
        };

        let logged_safe: SafeMoves = entry.safe_moves.iter().copied().collect();
        let log_consistent = logged_safe == safe && entry.fallback == fallback_taken;

        let result = AuditResult {
            turn: entry.turn,
            chosen_move,
            safe_moves: safe,
            fallback_taken,
            log_consistent,
            legal,
        };

        if self.verbose {
            if legal {
                info!(
                    "Turn {}: ✓ LEGAL - {} (safe: {:?}{})",
                    entry.turn,
                    chosen_move.as_str(),
                    safe.to_vec(),
                    if fallback_taken { ", fallback" } else { "" }
                );
            } else {
                warn!(
                    "Turn {}: ✗ ILLEGAL - {} (safe: {:?})",
                    entry.turn,
                    chosen_move.as_str(),
                    safe.to_vec()
                );
            }
            if !log_consistent {
                warn!(
                    "Turn {}: logged safe set {:?} (fallback={}) differs from recomputed {:?}",
                    entry.turn,
                    entry.safe_moves,
                    entry.fallback,
                    safe.to_vec()
                );
            }
        }

        Ok(result)
    }

    /// Audits all entries in a log file
    /// An entry that cannot be audited fails the whole run instead of being skipped
    pub fn audit_all(&self, entries: &[LogEntry]) -> Result<Vec<AuditResult>, String> {
        entries
            .iter()
            .map(|entry| {
                self.audit_entry(entry)
                    .map_err(|e| format!("Failed to audit turn {}: {}", entry.turn, e))
            })
            .collect()
    }

    /// Audits specific turns from a log file
    pub fn audit_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<AuditResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.audit_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from audit results
    pub fn generate_stats(&self, results: &[AuditResult]) -> AuditStats {
        let total_turns = results.len();
        let legal = results.iter().filter(|r| r.legal).count();
        let fallback_turns = results.iter().filter(|r| r.fallback_taken).count();
        let inconsistent_entries = results.iter().filter(|r| !r.log_consistent).count();
        let legal_rate = if total_turns > 0 {
            (legal as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        AuditStats {
            total_turns,
            legal,
            illegal: total_turns - legal,
            fallback_turns,
            inconsistent_entries,
            legal_rate,
        }
    }

    /// Prints a detailed report of audit results
    pub fn print_report(&self, results: &[AuditResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    MOVE AUDIT REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Legal:          {} ({:.1}%)", stats.legal, stats.legal_rate);
        println!("Illegal:        {}", stats.illegal);
        println!("Fallback Turns: {}", stats.fallback_turns);
        println!("Inconsistent:   {}", stats.inconsistent_entries);
        println!("═══════════════════════════════════════════════════════════\n");

        let illegal: Vec<_> = results.iter().filter(|r| !r.legal).collect();
        if !illegal.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                    ILLEGAL MOVES");
            println!("═══════════════════════════════════════════════════════════");

            for result in illegal {
                println!(
                    "Turn {}: {} (safe: {:?})",
                    result.turn,
                    result.chosen_move.as_str(),
                    result.safe_moves.to_vec()
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}
