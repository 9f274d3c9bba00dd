//! Feature engineering: rolling box-score averages plus the derived
//! matchup features the regression model consumes.

pub mod advanced;
pub mod rolling;

pub use advanced::{advanced_features, FeatureVector, FEATURE_NAMES};
pub use rolling::{rolling_averages, RollingStats, DEFAULT_WINDOW};
