//! Derived matchup features.
//!
//! Eight features go to the model, in the exact column order it was trained
//! on. The model has no schema: a reordered vector produces silently wrong
//! predictions, so the order lives in one place ([`FeatureVector::to_array`])
//! and is locked by tests.

use tracing::debug;

use crate::features::rolling::RollingStats;
use crate::store::models::TeamStats;

/// Guard against division by zero; never material for non-degenerate inputs.
pub const EPSILON: f64 = 1e-8;

/// Feature labels, in vector order.
pub const FEATURE_NAMES: [&str; 8] = [
    "log_fga",
    "points_rolling5",
    "effective_fg_pct",
    "three_point_ratio",
    "net_rtg_diff",
    "pace_boost",
    "usage_rate",
    "star_boost",
];

/// The eight model inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub log_fga: f64,
    pub points_rolling5: f64,
    pub effective_fg_pct: f64,
    pub three_point_ratio: f64,
    pub net_rtg_diff: f64,
    pub pace_boost: f64,
    pub usage_rate: f64,
    pub star_boost: f64,
}

impl FeatureVector {
    pub const LEN: usize = 8;

    /// The vector in training-time column order. Never reorder.
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.log_fga,
            self.points_rolling5,
            self.effective_fg_pct,
            self.three_point_ratio,
            self.net_rtg_diff,
            self.pace_boost,
            self.usage_rate,
            self.star_boost,
        ]
    }
}

/// Combine rolling averages with both teams' ratings into the model input.
pub fn advanced_features(
    rolling: &RollingStats,
    team: &TeamStats,
    opp: &TeamStats,
) -> FeatureVector {
    let fga = rolling.field_goal_attempts;
    // FGA + 0.44·FTA estimates true shooting possessions
    let true_attempts = fga + 0.44 * rolling.free_throw_attempts;

    let usage_rate = if rolling.minutes_played > 0.0 {
        true_attempts / (rolling.minutes_played + EPSILON)
    } else {
        0.0
    };

    let effective_fg_pct = unit_interval(rolling.points / (2.0 * true_attempts + EPSILON));
    let three_point_ratio = unit_interval(rolling.three_point_attempts / (fga + EPSILON));

    // The usage-rate sample set is currently just this window's value, so
    // the percentile gate is degenerate and every input qualifies as a
    // star. Kept as-is for model compatibility; feeding a player-population
    // sample set here is the intended upgrade path.
    let usage_samples = [usage_rate];
    let is_star = usage_rate >= percentile(&usage_samples, 85.0);
    let star_boost = if is_star {
        (1.0 + (opp.def_rtg - 105.0) / 100.0).clamp(0.8, 1.2)
    } else {
        0.0
    };

    let features = FeatureVector {
        log_fga: fga.ln_1p(),
        points_rolling5: rolling.points,
        effective_fg_pct,
        three_point_ratio,
        net_rtg_diff: team.off_rtg - opp.def_rtg,
        pace_boost: (team.pace * opp.pace / 100.0).clamp(0.7, 1.3),
        usage_rate,
        star_boost,
    };

    for (name, value) in FEATURE_NAMES.iter().zip(features.to_array()) {
        debug!("feature {} = {:.4}", name, value);
    }

    features
}

/// Map non-finite values to 0, then clamp into [0, 1].
fn unit_interval(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Percentile with linear interpolation between order statistics.
fn percentile(samples: &[f64], pct: f64) -> f64 {
    debug_assert!(!samples.is_empty(), "percentile of empty sample set");
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
