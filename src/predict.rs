//! End-to-end orchestration: request parsing, schedule resolution, feature
//! assembly, inference, and result packaging.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PredictError;
use crate::features::{advanced_features, rolling_averages};
use crate::model::Predictor;
use crate::schedule::{self, NextGame};
use crate::store::models::GameLogEntry;
use crate::store::GameStore;

/// Top-level request envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub player_data: PlayerData,
}

/// The caller-supplied player context.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub player_id: String,
    /// Chronological recent game logs
    pub recent_games: Vec<GameLogEntry>,
    /// Known next game; resolved from the schedule when absent
    #[serde(default)]
    pub next_game: Option<NextGame>,
}

/// The one-line success payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub prediction: f64,
    pub game_date: String,
    pub opponent: String,
    pub is_home: bool,
}

/// Parse the raw request document.
pub fn parse_request(raw: &str) -> Result<PredictionRequest, PredictError> {
    serde_json::from_str(raw).map_err(|e| PredictError::InvalidJson(e.to_string()))
}

/// Run one end-to-end prediction: resolve, aggregate, featurize, infer.
pub async fn run_prediction(
    store: &dyn GameStore,
    model: &dyn Predictor,
    window: usize,
    request: PredictionRequest,
) -> Result<PredictionResult, PredictError> {
    let player_data = request.player_data;

    let player = store
        .find_player(&player_data.player_id)
        .await?
        .ok_or(PredictError::PlayerNotFound)?;

    // A missing nextGame is recovered locally by consulting the schedule;
    // if that also fails, the wrapped error surfaces.
    let next_game = match player_data.next_game {
        Some(game) => game,
        None => schedule::resolve_next_game(store, &player_data.player_id)
            .await
            .map_err(|e| PredictError::NextGameResolution(Box::new(e)))?,
    };
    debug!(
        "Next game: {} vs {} ({})",
        next_game.game_date,
        next_game.opponent,
        if next_game.is_home { "home" } else { "away" }
    );

    let rolling = rolling_averages(&player_data.recent_games, window)?;

    let tid = player.tid.ok_or(PredictError::MissingTeamId)?;
    let team = store
        .find_team(tid)
        .await?
        .ok_or(PredictError::TeamNotFound)?;
    let opponent_tid = schedule::opponent_team_id(store, &next_game).await?;
    let opponent = store
        .find_team(opponent_tid)
        .await?
        .ok_or(PredictError::TeamNotFound)?;

    let features = advanced_features(&rolling, &team.stats(), &opponent.stats());
    let prediction = model.predict(&features)?;
    info!(
        "Predicted {:.2} points for {} on {}",
        prediction,
        player.name.as_deref().unwrap_or(&player_data.player_id),
        next_game.game_date
    );

    Ok(PredictionResult {
        prediction,
        game_date: next_game.game_date,
        opponent: next_game.opponent,
        is_home: next_game.is_home,
    })
}
