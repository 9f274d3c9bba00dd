use serde::{Deserialize, Serialize};

/// A player document from the `players` collection.
///
/// The upstream documents carry extra presentation fields (position, image
/// URLs, season aggregates) which are ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub player_id: String,
    /// Team identifier; absent for unsigned players
    #[serde(default)]
    pub tid: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Chronological game-by-game history
    #[serde(default)]
    pub game_logs: Vec<GameLogEntry>,
}

/// One game of box-score statistics.
///
/// Full box scores have many more columns (steals, blocks, plus-minus, …);
/// only the seven the model consumes are kept, and any missing field
/// defaults to 0 at this boundary so downstream code never sees gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogEntry {
    /// Game date in `%d-%b-%y` form, e.g. "15-Jan-25"
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub minutes_played: f64,
    #[serde(default)]
    pub field_goal_attempts: f64,
    #[serde(default)]
    pub free_throw_attempts: f64,
    #[serde(default)]
    pub three_point_attempts: f64,
    #[serde(default)]
    pub total_rebounds: f64,
    #[serde(default)]
    pub assists: f64,
}

/// A team document from the `teams` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub tid: i64,
    /// Abbreviation, e.g. "LAL"; unique within an active season
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub off_rtg: f64,
    #[serde(default)]
    pub def_rtg: f64,
    #[serde(default)]
    pub pace: f64,
}

impl TeamRecord {
    /// Project the rating fields shared by a team and its opponent.
    pub fn stats(&self) -> TeamStats {
        TeamStats {
            off_rtg: self.off_rtg,
            def_rtg: self.def_rtg,
            pace: self.pace,
        }
    }
}

/// Offensive/defensive efficiency and pace for one side of a matchup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamStats {
    /// Points scored per 100 possessions
    pub off_rtg: f64,
    /// Points allowed per 100 possessions
    pub def_rtg: f64,
    /// Possessions per game
    pub pace: f64,
}

/// A game from the `games` collection (schedule plus results).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    /// Game date in `%a, %b %d, %Y` form, e.g. "Sat, Jan 18, 2025"
    pub game_date: String,
    /// Home team abbreviation
    pub home_team: String,
    /// Away team abbreviation
    pub away_team: String,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Final,
}
