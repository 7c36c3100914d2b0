//! Per-player statistics as sourced from the league's player-performance collections.

use std::collections::BTreeMap;

use ordinalizer::Ordinal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumCount, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Position {
    Guard,
    Forward,
    Center,
}

impl Position {
    /// Interprets a position label, such as `"G"`, `"Forward"`, `"C-F"` or `"後衛"`. Hybrid
    /// labels take their leading position.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        match label.chars().next()? {
            'G' | 'g' | '後' => Some(Position::Guard),
            'F' | 'f' | '前' => Some(Position::Forward),
            'C' | 'c' | '中' => Some(Position::Center),
            _ => None,
        }
    }
}

/// The statistics that feed a player's score. The string form is the field name in the source
/// collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, IntoStaticStr)]
pub enum Stat {
    #[strum(serialize = "points")]
    Points,
    #[strum(serialize = "All_goals_pct")]
    AllGoalsPct,
    #[strum(serialize = "field_goals_two_pct")]
    FieldGoalsTwoPct,
    #[strum(serialize = "field_goals_three_pct")]
    FieldGoalsThreePct,
    #[strum(serialize = "free_throws_pct")]
    FreeThrowsPct,
    #[strum(serialize = "rebounds")]
    Rebounds,
    #[strum(serialize = "assists")]
    Assists,
    #[strum(serialize = "steals")]
    Steals,
    #[strum(serialize = "blocks")]
    Blocks,
    #[strum(serialize = "turnovers")]
    Turnovers,
    #[strum(serialize = "fouls")]
    Fouls,
}

impl Stat {
    pub fn field_name(&self) -> &'static str {
        (*self).into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: String,
    pub team: String,
    #[serde(default)]
    pub position: Option<String>,
    /// Everything else in the record, statistics included. Values may be numbers or numeric
    /// strings.
    #[serde(flatten)]
    pub stats: BTreeMap<String, Value>,
}

impl PlayerRecord {
    pub fn new(player: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            position: None,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_stat(mut self, stat: Stat, value: f64) -> Self {
        self.stats.insert(stat.field_name().to_string(), Value::from(value));
        self
    }

    pub fn with_raw(mut self, field: impl Into<String>, value: Value) -> Self {
        self.stats.insert(field.into(), value);
        self
    }

    /// The numeric value of `stat`, or `None` if it is absent or not a finite number.
    pub fn stat(&self, stat: Stat) -> Option<f64> {
        let value = match self.stats.get(stat.field_name())? {
            Value::Number(number) => number.as_f64()?,
            Value::String(string) => string.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn labelled_position(&self) -> Option<Position> {
        self.position.as_deref().and_then(Position::from_label)
    }
}

/// Player positions by player name. Where a player appears in several collections, the
/// last labelled record wins.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    positions: FxHashMap<String, Position>,
}

impl PositionIndex {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PlayerRecord>) -> Self {
        let mut positions = FxHashMap::default();
        for record in records {
            if let Some(position) = record.labelled_position() {
                positions.insert(record.player.trim().to_string(), position);
            }
        }
        Self { positions }
    }

    /// The indexed position of the player, falling back to the record's own label and then to
    /// [Position::Guard].
    pub fn position_of(&self, record: &PlayerRecord) -> Position {
        self.positions
            .get(record.player.trim())
            .copied()
            .or_else(|| record.labelled_position())
            .unwrap_or(Position::Guard)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn position_from_label() {
        assert_eq!(Some(Position::Guard), Position::from_label("G"));
        assert_eq!(Some(Position::Forward), Position::from_label(" forward"));
        assert_eq!(Some(Position::Center), Position::from_label("C-F"));
        assert_eq!(Some(Position::Center), Position::from_label("中鋒"));
        assert_eq!(None, Position::from_label(""));
        assert_eq!(None, Position::from_label("X"));
    }

    #[test]
    fn deserialise_with_mixed_stat_types() {
        let record: PlayerRecord = serde_json::from_value(json!({
            "player": "林書豪",
            "team": "高雄17直播鋼鐵人",
            "position": "G",
            "points": 18.5,
            "rebounds": "4.2",
            "assists": "-",
            "All_goals_pct": null,
        }))
        .unwrap();
        assert_eq!(Some(Position::Guard), record.labelled_position());
        assert_eq!(Some(18.5), record.stat(Stat::Points));
        assert_eq!(Some(4.2), record.stat(Stat::Rebounds));
        assert_eq!(None, record.stat(Stat::Assists));
        assert_eq!(None, record.stat(Stat::AllGoalsPct));
        assert_eq!(None, record.stat(Stat::Steals));
    }

    #[test]
    fn stat_field_names() {
        assert_eq!("All_goals_pct", Stat::AllGoalsPct.field_name());
        assert_eq!("field_goals_three_pct", Stat::FieldGoalsThreePct.to_string());
        assert_eq!(0, Stat::Points.ordinal());
    }

    #[test]
    fn position_index_prefers_later_labels() {
        let records = [
            PlayerRecord::new("A", "X").with_position("F"),
            PlayerRecord::new("A", "X").with_position("C"),
            PlayerRecord::new("B", "X"),
        ];
        let index = PositionIndex::from_records(&records);
        assert_eq!(1, index.len());
        assert_eq!(Position::Center, index.position_of(&PlayerRecord::new("A", "Y")));
        assert_eq!(Position::Guard, index.position_of(&records[2]));
        assert_eq!(
            Position::Forward,
            index.position_of(&PlayerRecord::new("C", "Y").with_position("F"))
        );
    }
}
