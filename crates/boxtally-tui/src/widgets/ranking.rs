// Ranking widget: bar chart of every team for the selected category, best
// first. ERA and WHIP rank ascending.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use boxtally_core::category::StatCategory;
use boxtally_core::present::format_value;

use crate::ViewState;

/// One bar: team label, bar height, and the formatted value shown on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedBar {
    pub team: String,
    pub height: u64,
    pub label: String,
}

/// Bars take integer heights, so rate categories are scaled by 1000.
pub fn bar_height(category: StatCategory, value: f64) -> u64 {
    let scaled = if category.is_rate() {
        value * 1000.0
    } else {
        value
    };
    scaled.round().max(0.0) as u64
}

pub fn ranked_bars(state: &ViewState) -> Vec<RankedBar> {
    let category = state.selected_category();
    state
        .view
        .rank_by(category)
        .into_iter()
        .map(|row| {
            let value = row.get(category);
            RankedBar {
                team: row.team.clone(),
                height: bar_height(category, value),
                label: format_value(category, value),
            }
        })
        .collect()
}

fn title(category: StatCategory) -> String {
    if category.lower_is_better() {
        format!("{category} by Team (lower is better)")
    } else {
        format!("{category} by Team")
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let category = state.selected_category();
    let block = Block::default().borders(Borders::ALL).title(title(category));

    let ranked = ranked_bars(state);
    if ranked.is_empty() {
        let paragraph = Paragraph::new("  No team stats in snapshot").block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar> = ranked
        .iter()
        .map(|r| {
            Bar::default()
                .value(r.height)
                .label(Line::from(r.team.clone()))
                .text_value(r.label.clone())
                .style(Style::default().fg(Color::LightRed))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let slot = inner_width / u16::try_from(bars.len()).unwrap_or(u16::MAX).max(1);
    let bar_width = slot.saturating_sub(1).clamp(3, 14);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(Color::LightRed));
    frame.render_widget(chart, area);
}
