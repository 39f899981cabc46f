// Terminal dashboard over the team_stats.json snapshot: a formatted stats
// table plus one of three charts (category ranking, category trend across
// teams, normalized comparison of every category).

pub mod input;
pub mod layout;
pub mod widgets;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::debug;

use boxtally_core::category::{StatCategory, DISPLAY_ORDER};
use boxtally_core::present::{DisplayView, NormalizedRow};

use input::{handle_key, KeyAction};
use layout::{build_layout, DashboardLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which chart fills the lower panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    Ranking,
    Trend,
    Normalized,
}

impl ChartTab {
    pub fn label(self) -> &'static str {
        match self {
            ChartTab::Ranking => "Ranking",
            ChartTab::Trend => "Trend",
            ChartTab::Normalized => "Normalized",
        }
    }
}

/// Everything the dashboard renders from.
pub struct ViewState {
    pub view: DisplayView,
    /// Min-max scaled copy of `view`, computed once at load.
    pub normalized: Vec<NormalizedRow>,
    /// Where the snapshot was loaded from, shown in the title bar.
    pub source: String,
    pub chart: ChartTab,
    selected: usize,
}

impl ViewState {
    pub fn new(view: DisplayView, source: String) -> Self {
        let normalized = view.normalized();
        Self {
            view,
            normalized,
            source,
            chart: ChartTab::Ranking,
            selected: 0,
        }
    }

    pub fn selected_category(&self) -> StatCategory {
        DISPLAY_ORDER[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % DISPLAY_ORDER.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + DISPLAY_ORDER.len() - 1) % DISPLAY_ORDER.len();
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    render_title_bar(frame, &layout, state);
    widgets::stats_table::render(frame, layout.stats_table, state);
    match state.chart {
        ChartTab::Ranking => widgets::ranking::render(frame, layout.chart, state),
        ChartTab::Trend => widgets::trend::render(frame, layout.chart, state),
        ChartTab::Normalized => widgets::normalized::render(frame, layout.chart, state),
    }
    render_help_bar(frame, &layout);
}

fn render_title_bar(frame: &mut Frame, layout: &DashboardLayout, state: &ViewState) {
    let text = format!(
        " Accumulated Team Stats | {} teams | {} | Chart: {}",
        state.view.rows.len(),
        state.source,
        state.chart.label()
    );
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.title_bar);
}

fn render_help_bar(frame: &mut Frame, layout: &DashboardLayout) {
    let text = " q:Quit | ←/→:Category | 1:Ranking 2:Trend 3:Normalized";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the dashboard until the user quits.
pub async fn run(mut state: ViewState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints a panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut events = EventStream::new();
    let result = loop {
        if let Err(e) = terminal.draw(|frame| render_frame(frame, &state)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Ok(Event::Key(key_event))) => match handle_key(key_event, &mut state) {
                KeyAction::Quit => break Ok(()),
                KeyAction::Redraw | KeyAction::Ignore => {}
            },
            Some(Ok(Event::Resize(w, h))) => debug!("terminal resized to {w}x{h}"),
            Some(Ok(_)) => {}
            Some(Err(e)) => break Err(e.into()),
            None => break Ok(()),
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use boxtally_core::snapshot::Snapshot;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::BTreeMap;

    fn sample_view() -> DisplayView {
        let mut a = BTreeMap::new();
        a.insert(StatCategory::R, 412.0);
        a.insert(StatCategory::ERA, 3.642);
        let mut b = BTreeMap::new();
        b.insert(StatCategory::R, 398.0);
        b.insert(StatCategory::ERA, 4.010);

        let mut teams = BTreeMap::new();
        teams.insert("Aces High".to_string(), a);
        teams.insert("Bash Brothers".to_string(), b);
        DisplayView::from_snapshot(&Snapshot { teams })
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn select_wraps_both_ways() {
        let mut state = ViewState::new(DisplayView::default(), String::new());
        state.select_prev();
        assert_eq!(state.selected_category(), StatCategory::WHIP);
        state.select_next();
        assert_eq!(state.selected_category(), StatCategory::R);
    }

    #[test]
    fn render_frame_empty_does_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::new(DisplayView::default(), "team_stats.json".into());
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
        assert!(buffer_text(&terminal).contains("Accumulated Team Stats"));
    }

    #[test]
    fn render_frame_shows_teams() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::new(sample_view(), "team_stats.json".into());
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Aces High"));
        assert!(text.contains("Bash Brothers"));
        assert!(text.contains("3.642"));
    }

    #[test]
    fn every_chart_tab_renders() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ViewState::new(sample_view(), "team_stats.json".into());

        for (tab, title) in [
            (ChartTab::Ranking, "R by Team"),
            (ChartTab::Trend, "R across Teams"),
            (ChartTab::Normalized, "Normalized Stat Comparison"),
        ] {
            state.chart = tab;
            terminal.draw(|frame| render_frame(frame, &state)).unwrap();
            let text = buffer_text(&terminal);
            assert!(text.contains(title), "{tab:?} should show {title:?}");
            assert!(text.contains(tab.label()));
        }
    }

    #[test]
    fn normalized_rows_follow_view() {
        let state = ViewState::new(sample_view(), String::new());
        assert_eq!(state.normalized.len(), 2);
        assert_eq!(state.normalized[0].team, "Aces High");
        assert_eq!(state.normalized[0].values[StatCategory::R.index()], Some(1.0));
        assert_eq!(state.normalized[1].values[StatCategory::R.index()], Some(0.0));
    }
}
