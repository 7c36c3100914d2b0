//! Testing helpers and fixtures.

use assert_float_eq::*;

use crate::context::{Snapshot, Sources};
use crate::features::SeasonPerformance;
use crate::player::{PlayerRecord, Stat};
use crate::standings::RawStanding;
use crate::team::AliasTable;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

pub fn standing(team: &str, wins: u32, losses: u32, pct: &str) -> RawStanding {
    RawStanding {
        team_name: team.to_string(),
        wins,
        losses,
        pct: pct.to_string(),
    }
}

pub fn player(
    name: &str,
    team: &str,
    position: &str,
    points: f64,
    rebounds: f64,
    assists: f64,
) -> PlayerRecord {
    PlayerRecord::new(name, team)
        .with_position(position)
        .with_stat(Stat::Points, points)
        .with_stat(Stat::Rebounds, rebounds)
        .with_stat(Stat::Assists, assists)
}

fn season(team: &str, points: f64) -> SeasonPerformance {
    SeasonPerformance {
        team: team.to_string(),
        points: points.into(),
    }
}

/// Two league seasons with a handful of players each.
///
/// Positional scores: Lin 29.2, Chen 24.2, Wang 21.6 (Kings); Lee 27.9, Kao 19.8 (Braves,
/// listed under the alias 勇士); Wu 13.6 (Pilots); Ho 10.0 and Tsai 33.4 (GhostHawks, Ho
/// filed under the wrong season); Huang 24.0 (DEA).
pub fn sample_sources() -> Sources {
    let pleague = Snapshot {
        label: "P. League+ 2023".to_string(),
        standings: vec![
            standing("新北國王", 30, 10, "75.0%"),
            standing("臺北富邦勇士", 20, 20, "50.0%"),
            standing("桃園璞園領航猿", 12, 28, "30.0%"),
            standing("高雄鋼鐵人", 18, 22, "45.0%"),
        ],
        players: vec![
            player("Lin", "新北國王", "G", 20.0, 4.0, 6.0),
            player("Chen", "新北國王", "F", 15.0, 8.0, 2.0),
            player("Wang", "新北國王", "C", 10.0, 11.0, 1.0),
            player("Lee", "勇士", "G", 18.0, 3.0, 7.0),
            player("Kao", "勇士", "F", 12.0, 6.0, 3.0),
            player("Wu", "桃園璞園領航猿", "G", 9.0, 2.0, 3.0),
            player("Ho", "臺南台鋼獵鷹", "G", 10.0, 0.0, 0.0),
        ],
    };
    let t1 = Snapshot {
        label: "T1 League 2023".to_string(),
        standings: vec![
            standing("臺南台鋼獵鷹", 26, 4, "86.7%"),
            standing("新北中信特攻", 20, 10, "66.7%"),
            standing("臺北戰神", 15, 15, "50.0%"),
            standing("高雄全家海神", 5, 25, "16.7%"),
        ],
        players: vec![
            player("Tsai", "臺南台鋼獵鷹", "F", 22.0, 9.0, 4.0),
            player("Huang", "新北中信特攻", "C", 14.0, 10.0, 2.0),
        ],
    };
    Sources {
        snapshots: vec![pleague, t1],
        season: vec![
            season("新北國王", 91.5),
            season("臺北富邦勇士", 88.0),
            season("臺南台鋼獵鷹", 95.2),
        ],
        aliases: AliasTable::default(),
    }
}
