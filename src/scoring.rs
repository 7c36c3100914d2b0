//! Position-weighted player scores.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::player::{PlayerRecord, Position, PositionIndex, Stat};

/// A signed weight for every [Stat], indexed by the stat's ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable([f64; Stat::COUNT]);

impl WeightTable {
    pub fn weight(&self, stat: Stat) -> f64 {
        self.0[stat.ordinal()]
    }
}

//                                   pts  all   2pt  3pt  ft   reb  ast  stl  blk  tov   pf
const GUARD: WeightTable = WeightTable([1.0, 0.8, 0.6, 1.0, 0.7, 0.5, 1.2, 1.0, 0.3, -0.8, -0.5]);
const FORWARD: WeightTable = WeightTable([1.0, 0.8, 0.7, 0.6, 0.6, 1.0, 0.6, 0.7, 0.8, -0.7, -0.6]);
const CENTER: WeightTable = WeightTable([0.8, 0.7, 0.8, 0.3, 0.5, 1.2, 0.4, 0.4, 1.0, -0.6, -0.7]);

pub fn weights(position: Position) -> &'static WeightTable {
    match position {
        Position::Guard => &GUARD,
        Position::Forward => &FORWARD,
        Position::Center => &CENTER,
    }
}

/// Weighted sum of the player's statistics under the table for `position`. A statistic that
/// is missing or non-numeric contributes nothing.
pub fn score(player: &PlayerRecord, position: Position) -> f64 {
    let weights = weights(position);
    Stat::iter()
        .filter_map(|stat| player.stat(stat).map(|value| weights.weight(stat) * value))
        .sum()
}

/// The box-score formula `0.5·points + 0.3·rebounds + 0.2·assists`, with missing values taken
/// as zero.
pub fn basic_score(player: &PlayerRecord) -> f64 {
    [(Stat::Points, 0.5), (Stat::Rebounds, 0.3), (Stat::Assists, 0.2)]
        .into_iter()
        .map(|(stat, weight)| weight * player.stat(stat).unwrap_or(0.))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringScheme {
    /// [score] under the player's position.
    #[default]
    Positional,
    /// [basic_score], ignoring position.
    Basic,
}

impl ScoringScheme {
    pub fn score(&self, player: &PlayerRecord, positions: &PositionIndex) -> f64 {
        match self {
            ScoringScheme::Positional => score(player, positions.position_of(player)),
            ScoringScheme::Basic => basic_score(player),
        }
    }
}
