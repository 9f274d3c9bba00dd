//! Next-game resolution against the league schedule.
//!
//! Given a player, find the earliest still-scheduled game of their team
//! dated strictly after the most recent game in their log. The schedule and
//! the game logs use different date formats, both inherited from the
//! upstream data feed.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PredictError;
use crate::store::models::ScheduledGame;
use crate::store::GameStore;

/// Date format of game-log entries, e.g. "15-Jan-25".
pub const GAME_LOG_DATE_FMT: &str = "%d-%b-%y";
/// Date format of schedule entries, e.g. "Sat, Jan 18, 2025".
pub const SCHEDULE_DATE_FMT: &str = "%a, %b %d, %Y";

/// The resolved (or caller-supplied) next game for a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextGame {
    pub game_date: String,
    /// Opponent team abbreviation, e.g. "BOS"
    pub opponent: String,
    pub is_home: bool,
}

fn parse_date(raw: &str, fmt: &str) -> Result<NaiveDate, PredictError> {
    NaiveDate::parse_from_str(raw, fmt).map_err(|_| PredictError::InvalidDate(raw.to_string()))
}

/// Resolve the next scheduled game for the given player's team.
pub async fn resolve_next_game(
    store: &dyn GameStore,
    player_id: &str,
) -> Result<NextGame, PredictError> {
    let player = store
        .find_player(player_id)
        .await?
        .ok_or(PredictError::PlayerNotFound)?;
    let tid = player.tid.ok_or(PredictError::MissingTeamId)?;
    let team = store
        .find_team(tid)
        .await?
        .ok_or(PredictError::MissingTeamAbbrev)?;
    let team_abbrev = team.abbrev.ok_or(PredictError::MissingTeamAbbrev)?;

    if player.game_logs.is_empty() {
        return Err(PredictError::NoGameLogs);
    }
    let last_played = player
        .game_logs
        .iter()
        .filter_map(|g| g.game_date.as_deref())
        .map(|raw| parse_date(raw, GAME_LOG_DATE_FMT))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .max()
        .ok_or(PredictError::NoGameLogs)?;

    let mut upcoming = store
        .scheduled_games(&team_abbrev)
        .await?
        .into_iter()
        .map(|g| Ok((parse_date(&g.game_date, SCHEDULE_DATE_FMT)?, g)))
        .collect::<Result<Vec<(NaiveDate, ScheduledGame)>, PredictError>>()?;
    // Stable sort: games on the same date keep their store order
    upcoming.sort_by_key(|(date, _)| *date);

    let (date, game) = upcoming
        .into_iter()
        .find(|(date, _)| *date > last_played)
        .ok_or(PredictError::NoUpcomingGame)?;

    let is_home = game.home_team == team_abbrev;
    let opponent = if is_home { game.away_team } else { game.home_team };
    debug!(
        "Next game for {}: {} vs {} on {} ({})",
        player_id,
        team_abbrev,
        opponent,
        date,
        if is_home { "home" } else { "away" }
    );

    Ok(NextGame {
        game_date: game.game_date,
        opponent,
        is_home,
    })
}

/// Map the next game's opponent abbreviation to its team id.
///
/// The abbreviation map is rebuilt from the full team table on every call;
/// abbreviations are only unique within the active season.
pub async fn opponent_team_id(
    store: &dyn GameStore,
    next_game: &NextGame,
) -> Result<i64, PredictError> {
    if next_game.opponent.is_empty() {
        return Err(PredictError::MissingOpponent);
    }

    let abbrev_to_tid: HashMap<String, i64> = store
        .list_teams()
        .await?
        .into_iter()
        .filter_map(|t| Some((t.abbrev?, t.tid)))
        .collect();

    abbrev_to_tid
        .get(&next_game.opponent)
        .copied()
        .ok_or_else(|| PredictError::UnknownOpponent(next_game.opponent.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::models::{GameLogEntry, GameStatus, PlayerRecord, TeamRecord};

    fn log_entry(date: &str) -> GameLogEntry {
        GameLogEntry {
            game_date: Some(date.to_string()),
            points: 20.0,
            minutes_played: 30.0,
            ..Default::default()
        }
    }

    fn team(tid: i64, abbrev: &str) -> TeamRecord {
        TeamRecord {
            tid,
            abbrev: Some(abbrev.to_string()),
            off_rtg: 110.0,
            def_rtg: 110.0,
            pace: 100.0,
        }
    }

    fn scheduled(date: &str, home: &str, away: &str) -> ScheduledGame {
        ScheduledGame {
            game_date: date.to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            status: GameStatus::Scheduled,
        }
    }

    fn store_with_player(games: Vec<ScheduledGame>) -> MemoryStore {
        MemoryStore {
            players: vec![PlayerRecord {
                player_id: "curry01".to_string(),
                tid: Some(9),
                name: Some("Stephen Curry".to_string()),
                game_logs: vec![log_entry("12-Jan-25"), log_entry("15-Jan-25")],
            }],
            teams: vec![team(9, "GSW"), team(3, "BOS"), team(14, "LAL")],
            games,
        }
    }

    #[tokio::test]
    async fn picks_earliest_game_after_last_played() {
        let store = store_with_player(vec![
            scheduled("Wed, Jan 22, 2025", "LAL", "GSW"),
            scheduled("Sat, Jan 18, 2025", "GSW", "BOS"),
        ]);
        let next = resolve_next_game(&store, "curry01").await.unwrap();
        assert_eq!(next.game_date, "Sat, Jan 18, 2025");
        assert_eq!(next.opponent, "BOS");
        assert!(next.is_home);
    }

    #[tokio::test]
    async fn away_game_flips_home_flag() {
        let store = store_with_player(vec![scheduled("Wed, Jan 22, 2025", "LAL", "GSW")]);
        let next = resolve_next_game(&store, "curry01").await.unwrap();
        assert_eq!(next.opponent, "LAL");
        assert!(!next.is_home);
    }

    #[tokio::test]
    async fn skips_games_on_or_before_last_played() {
        // Last played 15-Jan-25; same-day and earlier schedule entries must
        // not be returned
        let store = store_with_player(vec![
            scheduled("Wed, Jan 15, 2025", "GSW", "BOS"),
            scheduled("Mon, Jan 13, 2025", "GSW", "LAL"),
            scheduled("Sat, Jan 18, 2025", "GSW", "BOS"),
        ]);
        let next = resolve_next_game(&store, "curry01").await.unwrap();
        assert_eq!(next.game_date, "Sat, Jan 18, 2025");
    }

    #[tokio::test]
    async fn no_future_games_is_an_error() {
        let store = store_with_player(vec![scheduled("Mon, Jan 13, 2025", "GSW", "BOS")]);
        let err = resolve_next_game(&store, "curry01").await.unwrap_err();
        assert!(matches!(err, PredictError::NoUpcomingGame));
    }

    #[tokio::test]
    async fn empty_schedule_is_an_error() {
        let store = store_with_player(vec![]);
        let err = resolve_next_game(&store, "curry01").await.unwrap_err();
        assert!(matches!(err, PredictError::NoUpcomingGame));
    }

    #[tokio::test]
    async fn completed_games_are_ignored() {
        let mut final_game = scheduled("Sat, Jan 18, 2025", "GSW", "BOS");
        final_game.status = GameStatus::Final;
        let store = store_with_player(vec![final_game]);
        let err = resolve_next_game(&store, "curry01").await.unwrap_err();
        assert!(matches!(err, PredictError::NoUpcomingGame));
    }

    #[tokio::test]
    async fn unknown_player_is_an_error() {
        let store = store_with_player(vec![]);
        let err = resolve_next_game(&store, "nobody").await.unwrap_err();
        assert!(matches!(err, PredictError::PlayerNotFound));
    }

    #[tokio::test]
    async fn player_without_team_is_an_error() {
        let mut store = store_with_player(vec![]);
        store.players[0].tid = None;
        let err = resolve_next_game(&store, "curry01").await.unwrap_err();
        assert!(matches!(err, PredictError::MissingTeamId));
    }

    #[tokio::test]
    async fn player_without_logs_is_an_error() {
        let mut store = store_with_player(vec![scheduled("Sat, Jan 18, 2025", "GSW", "BOS")]);
        store.players[0].game_logs.clear();
        let err = resolve_next_game(&store, "curry01").await.unwrap_err();
        assert!(matches!(err, PredictError::NoGameLogs));
    }

    #[tokio::test]
    async fn unparseable_schedule_date_is_an_error() {
        let store = store_with_player(vec![scheduled("2025-01-18", "GSW", "BOS")]);
        let err = resolve_next_game(&store, "curry01").await.unwrap_err();
        assert!(matches!(err, PredictError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn opponent_abbreviation_resolves_to_team_id() {
        let store = store_with_player(vec![]);
        let next = NextGame {
            game_date: "Sat, Jan 18, 2025".to_string(),
            opponent: "BOS".to_string(),
            is_home: true,
        };
        assert_eq!(opponent_team_id(&store, &next).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unknown_opponent_is_an_error_not_a_default() {
        let store = store_with_player(vec![]);
        let next = NextGame {
            game_date: "Sat, Jan 18, 2025".to_string(),
            opponent: "SEA".to_string(),
            is_home: true,
        };
        let err = opponent_team_id(&store, &next).await.unwrap_err();
        match err {
            PredictError::UnknownOpponent(abbrev) => assert_eq!(abbrev, "SEA"),
            other => panic!("expected UnknownOpponent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_opponent_is_an_error() {
        let store = store_with_player(vec![]);
        let next = NextGame {
            game_date: "Sat, Jan 18, 2025".to_string(),
            opponent: String::new(),
            is_home: true,
        };
        let err = opponent_team_id(&store, &next).await.unwrap_err();
        assert!(matches!(err, PredictError::MissingOpponent));
    }
}
