use std::path::PathBuf;

use thiserror::Error;

/// Every failure mode of the prediction pipeline.
///
/// The `Display` string of each variant is the exact message emitted on the
/// wire, so callers that already match on messages keep working.
#[derive(Debug, Error)]
pub enum PredictError {
    // ── Request input ────────────────────────────────────────────────────────
    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("No recent games provided")]
    NoRecentGames,

    #[error("No opponent found in next game")]
    MissingOpponent,

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Data-source lookups ──────────────────────────────────────────────────
    #[error("Player not found")]
    PlayerNotFound,

    #[error("Player has no team ID")]
    MissingTeamId,

    #[error("Could not find team abbreviation")]
    MissingTeamAbbrev,

    #[error("No game logs found for player")]
    NoGameLogs,

    #[error("Team not found")]
    TeamNotFound,

    // ── Schedule resolution ──────────────────────────────────────────────────
    #[error("No upcoming games found")]
    NoUpcomingGame,

    #[error("Unknown opponent abbreviation: {0}")]
    UnknownOpponent(String),

    #[error("Unable to determine next game: {0}")]
    NextGameResolution(#[source] Box<PredictError>),

    #[error("Unrecognized game date: {0}")]
    InvalidDate(String),

    // ── Model artifact ───────────────────────────────────────────────────────
    #[error("Model file not found: {}", .0.display())]
    ModelMissing(PathBuf),

    #[error("Error loading model: {0}")]
    ModelLoad(String),

    #[error("Model inference failed: {0}")]
    Inference(String),

    // ── Data source transport ────────────────────────────────────────────────
    #[error("Failed to connect to MongoDB: {0}")]
    Connection(String),

    #[error("Data store query failed: {0}")]
    Store(#[from] mongodb::error::Error),
}
