// Normalized comparison widget: every category scaled to 0..1 across teams,
// one line per team over the category axis.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use boxtally_core::category::DISPLAY_ORDER;

use crate::ViewState;

const TEAM_COLORS: [Color; 8] = [
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
    Color::Gray,
];

/// `(team, points)` per team; x is the category column, y the scaled value.
pub fn normalized_series(state: &ViewState) -> Vec<(String, Vec<(f64, f64)>)> {
    state
        .normalized
        .iter()
        .map(|row| {
            let points = row
                .values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
                .collect();
            (row.team.clone(), points)
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Normalized Stat Comparison Across Teams");

    let series = normalized_series(state);
    if series.is_empty() {
        let paragraph = Paragraph::new("  No team stats in snapshot").block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, (team, points))| {
            Dataset::default()
                .name(team.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(TEAM_COLORS[i % TEAM_COLORS.len()]))
                .data(points)
        })
        .collect();

    let x_labels: Vec<&str> = DISPLAY_ORDER.iter().map(|c| c.abbrev()).collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (DISPLAY_ORDER.len() - 1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 1.0])
                .labels(vec!["0", "0.5", "1"]),
        );
    frame.render_widget(chart, area);
}
