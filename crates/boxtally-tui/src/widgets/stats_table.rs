// Stats table widget: one row per team, one column per category in display
// order. Rate categories show three decimals, counting categories none.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use boxtally_core::category::DISPLAY_ORDER;
use boxtally_core::present::format_value;

use crate::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let selected = state.selected_category();

    let header_cells = std::iter::once(Cell::from("Team")).chain(DISPLAY_ORDER.iter().map(|c| {
        let style = if *c == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Cell::from(c.abbrev()).style(style)
    }));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if state.view.is_empty() {
        vec![Row::new(vec![Cell::from("  No team stats in snapshot")])]
    } else {
        state
            .view
            .rows
            .iter()
            .map(|row| {
                let cells = std::iter::once(Cell::from(row.team.clone())).chain(
                    DISPLAY_ORDER
                        .iter()
                        .map(|c| Cell::from(format_value(*c, row.get(*c)))),
                );
                Row::new(cells)
            })
            .collect()
    };

    let widths = std::iter::once(Constraint::Min(16))
        .chain(DISPLAY_ORDER.iter().map(|_| Constraint::Length(7)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Team Stats"));
    frame.render_widget(table, area);
}
