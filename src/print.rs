//! Console tables for the context's lookup tables.

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::standings::Standings;
use crate::strength::{Rosters, Strengths, ROSTER_SIZE};

fn name_col() -> Col {
    Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left))
}

fn number_col(width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(width)).with(HAlign::Right))
}

/// Merged standings, with each team's weighted strength where one is known.
pub fn tabulate_standings(standings: &Standings, strengths: &Strengths) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            name_col(),
            number_col(5),
            number_col(5),
            number_col(7),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(10))
                    .with(HAlign::Right),
            ),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Team".into(),
                "W".into(),
                "L".into(),
                "Pct".into(),
                "Strength".into(),
            ],
        ));

    for (team, standing) in standings.iter() {
        let strength = strengths
            .get(team.as_str())
            .map(|strength| strength.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.to_string().into(),
                standing.wins.to_string().into(),
                standing.losses.to_string().into(),
                format!("{:.3}", standing.pct).into(),
                strength.into(),
            ],
        ));
    }
    table
}

/// Top roster scores by team, best first.
pub fn tabulate_rosters(rosters: &Rosters) -> Table {
    let mut cols = vec![name_col()];
    cols.extend((0..ROSTER_SIZE).map(|_| number_col(6)));
    let mut header_cells: Vec<Cell> = vec!["Team".into()];
    header_cells.extend((1..=ROSTER_SIZE).map(|rank| format!("#{rank}").into()));
    let mut table = Table::default()
        .with_cols(cols)
        .with_row(Row::new(Styles::default().with(Header(true)), header_cells));

    let mut teams: Vec<_> = rosters.iter().collect();
    teams.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (team, roster) in teams {
        let mut row_cells: Vec<Cell> = vec![team.into()];
        row_cells.extend(
            roster
                .scores()
                .iter()
                .map(|score| format!("{score:.1}").into()),
        );
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::context::{Context, ContextOptions};
    use crate::testing::sample_sources;

    #[test]
    fn standings_table() {
        let context = Context::build(&sample_sources(), &ContextOptions::default()).unwrap();
        let rendered = Console::default()
            .render(&tabulate_standings(context.standings(), context.strengths()))
            .to_string();
        assert!(rendered.contains("Strength"));
        assert!(rendered.contains("新北國王"));
        assert!(rendered.contains("29.0"));
        assert!(rendered.contains("0.750"));
        assert!(rendered.contains("高雄17直播鋼鐵人"));
    }

    #[test]
    fn rosters_table() {
        let context = Context::build(&sample_sources(), &ContextOptions::default()).unwrap();
        let rendered = Console::default()
            .render(&tabulate_rosters(context.rosters()))
            .to_string();
        assert!(rendered.contains("#9"));
        assert!(rendered.contains("勇士"));
        assert!(rendered.contains("33.4"));
    }
}
