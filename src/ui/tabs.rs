use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::games::session::Phase;

const ACCENT: Color = Color::Rgb(255, 220, 80);
const MUTED: Color = Color::Rgb(120, 120, 140);

/// Run state of the open game, shown after its tab title.
fn phase_marker(phase: Option<Phase>) -> Option<Span<'static>> {
    match phase? {
        Phase::Running => Some(Span::styled("● ", Style::default().fg(Color::Green))),
        Phase::Over => Some(Span::styled("✕ ", Style::default().fg(Color::Red))),
        Phase::Idle | Phase::TornDown => None,
    }
}

fn tab_title(tab: Tab, app: &App) -> Line<'static> {
    if tab != app.current_tab {
        return Line::styled(tab.title(), Style::default().fg(MUTED));
    }
    let mut spans = vec![Span::styled(tab.title(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))];
    spans.extend(phase_marker(app.phase()));
    Line::from(spans)
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|&t| tab_title(t, app)).collect();

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🥚 Eggcade ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.current_tab.index())
        .highlight_style(Style::default().fg(ACCENT))
        .divider(Span::styled("│", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
