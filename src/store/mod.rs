//! Read-only access to the NBA document store.
//!
//! Three collections back the pipeline: `players` (with embedded game
//! logs), `teams` (season ratings), and `games` (the schedule). The store
//! sits behind the [`GameStore`] trait so unit tests can swap in an
//! in-memory implementation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::debug;

use crate::error::PredictError;

pub mod models;
use models::{PlayerRecord, ScheduledGame, TeamRecord};

/// The read-only lookups the prediction pipeline needs from the data source.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Fetch a player document by external player id.
    async fn find_player(&self, player_id: &str) -> Result<Option<PlayerRecord>, PredictError>;

    /// Fetch a team document by team id.
    async fn find_team(&self, tid: i64) -> Result<Option<TeamRecord>, PredictError>;

    /// All team documents, for abbreviation-to-id resolution.
    async fn list_teams(&self) -> Result<Vec<TeamRecord>, PredictError>;

    /// All still-scheduled games in which the given team plays home or away.
    async fn scheduled_games(&self, team_abbrev: &str)
        -> Result<Vec<ScheduledGame>, PredictError>;
}

/// MongoDB-backed store over the `players`, `teams`, and `games` collections.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to the cluster and select the stats database.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, PredictError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| PredictError::Connection(e.to_string()))?;
        debug!("Connected to MongoDB, using database '{}'", database);
        Ok(MongoStore {
            db: client.database(database),
        })
    }
}

#[async_trait]
impl GameStore for MongoStore {
    async fn find_player(&self, player_id: &str) -> Result<Option<PlayerRecord>, PredictError> {
        let players = self.db.collection::<PlayerRecord>("players");
        Ok(players.find_one(doc! { "playerId": player_id }).await?)
    }

    async fn find_team(&self, tid: i64) -> Result<Option<TeamRecord>, PredictError> {
        let teams = self.db.collection::<TeamRecord>("teams");
        Ok(teams.find_one(doc! { "tid": tid }).await?)
    }

    async fn list_teams(&self) -> Result<Vec<TeamRecord>, PredictError> {
        let teams = self.db.collection::<TeamRecord>("teams");
        Ok(teams.find(doc! {}).await?.try_collect().await?)
    }

    async fn scheduled_games(
        &self,
        team_abbrev: &str,
    ) -> Result<Vec<ScheduledGame>, PredictError> {
        let games = self.db.collection::<ScheduledGame>("games");
        let filter = doc! {
            "$or": [
                { "homeTeam": team_abbrev },
                { "awayTeam": team_abbrev },
            ],
            "status": "Scheduled",
        };
        Ok(games.find(filter).await?.try_collect().await?)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory store for unit tests.

    use super::*;
    use super::models::GameStatus;

    #[derive(Default)]
    pub struct MemoryStore {
        pub players: Vec<PlayerRecord>,
        pub teams: Vec<TeamRecord>,
        pub games: Vec<ScheduledGame>,
    }

    #[async_trait]
    impl GameStore for MemoryStore {
        async fn find_player(
            &self,
            player_id: &str,
        ) -> Result<Option<PlayerRecord>, PredictError> {
            Ok(self
                .players
                .iter()
                .find(|p| p.player_id == player_id)
                .cloned())
        }

        async fn find_team(&self, tid: i64) -> Result<Option<TeamRecord>, PredictError> {
            Ok(self.teams.iter().find(|t| t.tid == tid).cloned())
        }

        async fn list_teams(&self) -> Result<Vec<TeamRecord>, PredictError> {
            Ok(self.teams.clone())
        }

        async fn scheduled_games(
            &self,
            team_abbrev: &str,
        ) -> Result<Vec<ScheduledGame>, PredictError> {
            Ok(self
                .games
                .iter()
                .filter(|g| {
                    g.status == GameStatus::Scheduled
                        && (g.home_team == team_abbrev || g.away_team == team_abbrev)
                })
                .cloned()
                .collect())
        }
    }
}
