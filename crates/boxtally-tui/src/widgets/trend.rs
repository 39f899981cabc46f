// Trend widget: the selected category as a line across teams, ordered from
// best to worst. Teams without a value are left off the line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use boxtally_core::present::format_value;

use crate::ViewState;

/// Ranked team names and `(rank, value)` points for the selected category.
pub fn trend_points(state: &ViewState) -> (Vec<String>, Vec<(f64, f64)>) {
    let category = state.selected_category();
    let mut teams = Vec::new();
    let mut points = Vec::new();
    for row in state.view.rank_by(category) {
        if let Some(value) = row.value(category) {
            points.push((teams.len() as f64, value));
            teams.push(row.team.clone());
        }
    }
    (teams, points)
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let category = state.selected_category();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{category} across Teams (best to worst)"));

    let (teams, points) = trend_points(state);
    if points.is_empty() {
        let paragraph = Paragraph::new(format!("  No {category} values in snapshot")).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let low = points.iter().map(|p| p.1).fold(0.0, f64::min);
    let high = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let high = if high > low { high } else { low + 1.0 };
    let last_x = (teams.len().saturating_sub(1)).max(1) as f64;

    let x_labels = match (teams.first(), teams.last()) {
        (Some(first), Some(last)) if teams.len() > 1 => vec![first.clone(), last.clone()],
        (Some(only), _) => vec![only.clone()],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .name(category.abbrev())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([low, high])
                .labels(vec![format_value(category, low), format_value(category, high)]),
        );
    frame.render_widget(chart, area);
}
