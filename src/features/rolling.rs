use crate::error::PredictError;
use crate::store::models::GameLogEntry;

/// Default trailing-window length in games.
pub const DEFAULT_WINDOW: usize = 5;

/// Per-game box-score statistics averaged over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingStats {
    pub points: f64,
    pub minutes_played: f64,
    pub field_goal_attempts: f64,
    pub free_throw_attempts: f64,
    pub three_point_attempts: f64,
    pub total_rebounds: f64,
    pub assists: f64,
}

/// Average the trailing `window` games of a chronological history.
///
/// Histories shorter than the window are padded by repeating the most
/// recent game until the window is full. Repeat-last padding biases a short
/// history toward the latest performance; zero-padding would dilute it.
pub fn rolling_averages(
    games: &[GameLogEntry],
    window: usize,
) -> Result<RollingStats, PredictError> {
    let last = games.last().ok_or(PredictError::NoRecentGames)?;

    let take = games.len().min(window);
    let recent = &games[games.len() - take..];
    let pad = (window - take) as f64;

    let mean = |stat: fn(&GameLogEntry) -> f64| -> f64 {
        let observed: f64 = recent.iter().map(stat).sum();
        (observed + pad * stat(last)) / window as f64
    };

    Ok(RollingStats {
        points: mean(|g| g.points),
        minutes_played: mean(|g| g.minutes_played),
        field_goal_attempts: mean(|g| g.field_goal_attempts),
        free_throw_attempts: mean(|g| g.free_throw_attempts),
        three_point_attempts: mean(|g| g.three_point_attempts),
        total_rebounds: mean(|g| g.total_rebounds),
        assists: mean(|g| g.assists),
    })
}
