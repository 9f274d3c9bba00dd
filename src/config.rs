use std::path::PathBuf;

use clap::Parser;

use crate::features::DEFAULT_WINDOW;

/// NBA player points prediction CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "pointcast", version, about)]
pub struct Config {
    /// Prediction request as a JSON document (reads stdin when omitted)
    pub input: Option<String>,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    /// MongoDB database holding the players/teams/games collections
    #[arg(long, env = "MONGO_DATABASE", default_value = "NBA-stats")]
    pub mongo_database: String,

    /// Path to the trained points-regression ONNX artifact
    #[arg(
        long,
        env = "MODEL_PATH",
        default_value = "models/nba_points_model.onnx"
    )]
    pub model_path: PathBuf,

    /// Rolling-average window in games
    #[arg(long, env = "ROLLING_WINDOW", default_value_t = DEFAULT_WINDOW)]
    pub rolling_window: usize,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rolling_window == 0 {
            anyhow::bail!("rolling_window must be at least 1");
        }
        if self.mongo_uri.is_empty() {
            anyhow::bail!("mongo_uri must not be empty");
        }
        Ok(())
    }
}
