// Screen layout for the stats dashboard:
//
// +--------------------------------------------------+
// | Title Bar (1 row)                                 |
// +--------------------------------------------------+
// | Stats Table (fill)                                |
// +--------------------------------------------------+
// | Chart (45%)                                       |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone)]
pub struct DashboardLayout {
    pub title_bar: Rect,
    pub stats_table: Rect,
    pub chart: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> DashboardLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Percentage(45),
            Constraint::Length(1),
        ])
        .split(area);

    DashboardLayout {
        title_bar: vertical[0],
        stats_table: vertical[1],
        chart: vertical[2],
        help_bar: vertical[3],
    }
}
