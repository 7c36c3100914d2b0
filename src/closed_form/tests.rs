use super::*;
use crate::resolve::UnresolvedTeam;
use crate::strength::WeightedStrength;
use crate::team::AliasTable;
use assert_float_eq::*;

const KINGS: &str = "新北國王";
const BRAVES: &str = "臺北富邦勇士";
const PILOTS: &str = "桃園璞園領航猿";

fn fixture(strengths: &[(&str, f64)]) -> (Resolver, Strengths) {
    let resolver = Resolver::new(
        AliasTable::default(),
        [KINGS, BRAVES, PILOTS].map(TeamIdentity::from),
    );
    let strengths = strengths
        .iter()
        .map(|&(team, strength)| (TeamIdentity::from(team), WeightedStrength(strength)))
        .collect();
    (resolver, strengths)
}

#[test]
fn equal_strengths_are_even() {
    assert_eq!(50.0, win_probability(0., 0.));
    assert_eq!(50.0, win_probability(1234.5, 1234.5));
    assert_eq!(50.0, win_probability(-80., -80.));
}

#[test]
fn win_probability_is_monotonic() {
    let mut last = 0.;
    for a in (-5_000..=5_000).step_by(250) {
        let prob = win_probability(a as f64, 300.);
        assert!(prob > last, "{prob} at {a} not above {last}");
        assert!((0.0..=100.0).contains(&prob));
        last = prob;
    }
}

#[test]
fn win_probability_at_one_scale_unit() {
    assert_float_absolute_eq!(73.10585786300049, win_probability(1000., 0.), 1e-9);
    assert_float_absolute_eq!(26.894142136999513, win_probability(0., 1000.), 1e-9);
}

#[test]
fn score_band_for_even_teams() {
    assert_eq!(ScoreRange { min: 85, max: 95 }, simulate_score(500., 500.));
}

#[test]
fn score_band_rounds_half_to_even() {
    // base = 90 + 90·50/1000 = 94.5
    assert_eq!(ScoreRange { min: 90, max: 100 }, simulate_score(50., 0.));
    // base = 90 + 90·150/1000 = 103.5
    assert_eq!(ScoreRange { min: 98, max: 108 }, simulate_score(150., 0.));
}

#[test]
fn score_band_is_never_negative() {
    for offence in [-1e9, -5_000., -1_000., 0., 1_000., 1e9] {
        let range = simulate_score(offence, 1_000.);
        assert!(range.min <= range.max, "{range:?}");
    }
    assert_eq!(ScoreRange { min: 0, max: 0 }, simulate_score(-1e9, 0.));
    assert_eq!(ScoreRange { min: 0, max: 0 }, simulate_score(0., 2_000.));
    assert_eq!(ScoreRange { min: 0, max: 4 }, simulate_score(0., 1_010.));
}

#[test]
fn venue_parsing() {
    assert_eq!(Ok(Venue::AHome), "yes".parse());
    assert_eq!(Ok(Venue::AHome), " YES ".parse());
    assert_eq!(Ok(Venue::BHome), "no".parse());
    assert_eq!(Ok(Venue::Neutral), "neutral".parse());
    assert_eq!(
        Err(ParseVenueError("maybe".to_string())),
        "maybe".parse::<Venue>()
    );
    assert_eq!("neutral", Venue::Neutral.to_string());
}

#[test]
fn home_boost_breaks_a_tie() {
    let (resolver, strengths) = fixture(&[(KINGS, 1000.), (BRAVES, 1000.)]);
    let predictor = ClosedFormPredictor::new(&resolver, &strengths);

    let forecast = predictor.predict(KINGS, BRAVES, Venue::AHome).unwrap();
    assert!(forecast.a.win_probability > 50.);
    assert_float_absolute_eq!(1050., forecast.a.strength, 1e-9);
    assert_float_absolute_eq!(
        100.,
        forecast.a.win_probability + forecast.b.win_probability,
        1e-9
    );

    let forecast = predictor.predict(KINGS, BRAVES, Venue::BHome).unwrap();
    assert!(forecast.b.win_probability > 50.);
    assert!(forecast.b.home);
    assert!(!forecast.a.home);

    let forecast = predictor.predict(KINGS, BRAVES, Venue::Neutral).unwrap();
    assert_eq!(50., forecast.a.win_probability);
    assert_eq!(50., forecast.b.win_probability);
    assert_eq!(forecast.a.score, forecast.b.score);
}

#[test]
fn aliases_and_missing_strengths() {
    let (resolver, strengths) = fixture(&[(BRAVES, 400.)]);
    let predictor = ClosedFormPredictor::new(&resolver, &strengths);
    let forecast = predictor.predict("領航猿", "勇士", Venue::Neutral).unwrap();
    assert_eq!(PILOTS, forecast.a.team.as_str());
    assert_eq!(BRAVES, forecast.b.team.as_str());
    assert_eq!(0., forecast.a.strength);
    assert!(forecast.b.win_probability > forecast.a.win_probability);
    assert_eq!(ScoreRange { min: 49, max: 59 }, forecast.a.score);
    assert_eq!(ScoreRange { min: 121, max: 131 }, forecast.b.score);
}

#[test]
fn unknown_team_is_reported() {
    let (resolver, strengths) = fixture(&[]);
    let predictor = ClosedFormPredictor::new(&resolver, &strengths);
    let err = predictor
        .predict(KINGS, "Springfield Isotopes", Venue::AHome)
        .unwrap_err();
    assert!(
        matches!(&err, PredictError::TeamNotFound(UnresolvedTeam { input, .. }) if input == "Springfield Isotopes"),
        "{err:?}"
    );
    assert!(err.to_string().starts_with("team 'Springfield Isotopes' not found"));
}

#[test]
fn report_lists_home_side_first() {
    let (resolver, strengths) = fixture(&[(KINGS, 1000.), (BRAVES, 1000.)]);
    let predictor = ClosedFormPredictor::new(&resolver, &strengths);
    let forecast = predictor.predict(KINGS, BRAVES, Venue::BHome).unwrap();
    let report = forecast.to_string();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(2, lines.len());
    assert_eq!(
        format!(
            "{BRAVES} (home) win probability: 51.25%, {KINGS} (away) win probability: 48.75%"
        ),
        lines[0]
    );
    assert_eq!(
        format!("expected score: {KINGS} 80 ~ 90 - {BRAVES} 90 ~ 100"),
        lines[1]
    );
}
