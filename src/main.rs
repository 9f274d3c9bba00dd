use std::io::Read;

use clap::Parser;
use serde_json::json;
use tracing::error;

mod config;
mod error;
mod features;
mod model;
mod predict;
mod schedule;
mod store;

use config::Config;
use error::PredictError;
use model::PointsModel;
use predict::PredictionResult;
use store::MongoStore;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Log to stderr; stdout carries exactly one JSON line per invocation
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    match run(&config).await {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result).expect("serialize result"));
        }
        Err(err) => {
            error!("Prediction failed: {}", err);
            println!("{}", json!({ "error": err.to_string() }));
            std::process::exit(1);
        }
    }
}

async fn run(config: &Config) -> Result<PredictionResult, PredictError> {
    config
        .validate()
        .map_err(|e| PredictError::Config(e.to_string()))?;

    // Model problems are startup failures, surfaced before any input is read
    let model = PointsModel::load(&config.model_path)?;

    let raw = match &config.input {
        Some(arg) => arg.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request = predict::parse_request(&raw)?;

    let store = MongoStore::connect(&config.mongo_uri, &config.mongo_database).await?;
    predict::run_prediction(&store, &model, config.rolling_window, request).await
}
