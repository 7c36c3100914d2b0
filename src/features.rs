//! Fixed-shape feature vectors for the match classifier.

use ordinalizer::Ordinal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::EnumCount;
use strum_macros::{Display, EnumCount, EnumIter};
use tracing::debug;

use crate::standings::TeamStanding;
use crate::strength::{RosterScores, ROSTER_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Ordinal, EnumCount, EnumIter, Display)]
pub enum Feature {
    Wins,
    Losses,
    AvgPoints,
    Roster1,
    Roster2,
    Roster3,
    Roster4,
    Roster5,
    Roster6,
    Roster7,
    Roster8,
    Roster9,
}

pub const FEATURE_COUNT: usize = Feature::COUNT;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Builds the vector `[wins, losses, avg points, roster...]`. A team without a standing
/// contributes zero wins and losses.
pub fn feature_vector(
    standing: Option<&TeamStanding>,
    avg_points: f64,
    roster: &RosterScores,
) -> FeatureVector {
    let mut features = [0.; FEATURE_COUNT];
    if let Some(standing) = standing {
        features[Feature::Wins.ordinal()] = standing.wins as f64;
        features[Feature::Losses.ordinal()] = standing.losses as f64;
    }
    features[Feature::AvgPoints.ordinal()] = avg_points;
    let first = Feature::Roster1.ordinal();
    features[first..first + ROSTER_SIZE].copy_from_slice(roster.scores());
    features
}

/// A team's season averages, as sourced from the team-performance collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonPerformance {
    pub team: String,
    pub points: Value,
}

impl SeasonPerformance {
    pub fn points(&self) -> Option<f64> {
        match &self.points {
            Value::Number(number) => number.as_f64(),
            Value::String(string) => string.trim().parse().ok(),
            _ => None,
        }
        .filter(|points: &f64| points.is_finite())
    }
}

/// Average points per game by team name as it appears in the season collections (trimmed).
#[derive(Debug, Clone, Default)]
pub struct AveragePoints {
    by_team: FxHashMap<String, f64>,
}

impl AveragePoints {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a SeasonPerformance>) -> Self {
        let mut by_team = FxHashMap::default();
        for record in records {
            match record.points() {
                Some(points) => {
                    by_team.insert(record.team.trim().to_string(), points);
                }
                None => debug!("no usable points for {}: {:?}", record.team, record.points),
            }
        }
        Self { by_team }
    }

    pub fn get(&self, team: &str) -> Option<f64> {
        self.by_team.get(team).copied()
    }

    /// Average points for `team`, or zero if unknown.
    pub fn get_or_zero(&self, team: &str) -> f64 {
        self.get(team).unwrap_or(0.)
    }

    pub fn len(&self) -> usize {
        self.by_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }
}
