pub mod home;
pub mod tabs;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::games::session::Phase;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Home => home::render_home(frame, chunks[1], app.selected_game),
        _ => render_game(frame, chunks[1], app),
    }
}

/// Largest rect inside `area` that keeps a `width`×`height` surface's
/// proportions, taking terminal cells as twice as tall as they are wide.
pub fn fit_canvas(area: Rect, width: f32, height: f32) -> Rect {
    let aspect = width / height * 2.0;
    let mut w = area.width;
    let mut h = (w as f32 / aspect) as u16;
    if h > area.height {
        h = area.height;
        w = ((h as f32 * aspect) as u16).min(area.width);
    }
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn render_game(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(session) = app.session.as_ref() else { return };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(6),    // Canvas
            Constraint::Length(1), // Help
        ])
        .split(area);

    let status = Line::from(vec![
        Span::styled(format!(" {} ", session.title()), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Score: {} ", app.scoreboard.score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(session.status(), Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let surface = session.surface();
    let canvas_area = fit_canvas(chunks[1], surface.width(), surface.height());
    let border = if app.scoreboard.game_over() {
        Color::Rgb(220, 80, 80)
    } else {
        Color::Rgb(60, 150, 200)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    app.canvas_area = block.inner(canvas_area);
    surface.paint(frame, canvas_area, block);

    let gray = Style::default().fg(Color::DarkGray);
    let sep = Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60)));
    let controls = match app.current_tab {
        Tab::Snake => " ←↑↓→ Steer ",
        Tab::Arkanoid => " Mouse Move Paddle ",
        _ => " SPACE/↑ Jump ",
    };
    let help = match session.phase() {
        Phase::Over => Line::from(vec![
            Span::styled(" Game Over! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(format!("Score: {} ", app.scoreboard.score()), Style::default().fg(Color::Yellow)),
            sep,
            Span::styled("ENTER Play Again ", Style::default().fg(Color::Gray)),
        ]),
        Phase::Idle | Phase::TornDown => Line::from(vec![
            Span::styled(" ▶ ENTER Start Game ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            sep,
            Span::styled(controls, gray),
        ]),
        Phase::Running => Line::from(vec![
            Span::styled(controls, gray),
            sep.clone(),
            Span::styled("R Restart ", gray),
            sep,
            Span::styled("Esc Menu", gray),
        ]),
    };
    frame.render_widget(Paragraph::new(help), chunks[2]);
}
