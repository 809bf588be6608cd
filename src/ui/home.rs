use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::GAME_COUNT;

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════════╗
 ║  ███████╗ ██████╗  ██████╗  ██████╗ █████╗ ██████╗ ███████╗   ║
 ║  ██╔════╝██╔════╝ ██╔════╝ ██╔════╝██╔══██╗██╔══██╗██╔════╝   ║
 ║  █████╗  ██║  ███╗██║  ███╗██║     ███████║██║  ██║█████╗     ║
 ║  ██╔══╝  ██║   ██║██║   ██║██║     ██╔══██║██║  ██║██╔══╝     ║
 ║  ███████╗╚██████╔╝╚██████╔╝╚██████╗██║  ██║██████╔╝███████╗   ║
 ║  ╚══════╝ ╚═════╝  ╚═════╝  ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝   ║
 ╚═══════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    controls: &'static [(&'static str, &'static str)],
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; GAME_COUNT] = [
    GameTile {
        key: "1",
        icon: "🐍",
        name: "Snake",
        desc: "Eat, grow, and\ndon't bite yourself!",
        controls: &[("↑ ↓ ← →", "Steer (no U-turns)")],
        color: Color::Rgb(52, 211, 153),
        border_color: Color::Rgb(20, 110, 80),
    },
    GameTile {
        key: "2",
        icon: "🧱",
        name: "Arkanoid",
        desc: "Clear all 40\nbricks to win!",
        controls: &[("Mouse", "Move paddle"), ("Paddle edge", "Angle the ball")],
        color: Color::Rgb(59, 130, 246),
        border_color: Color::Rgb(30, 70, 130),
    },
    GameTile {
        key: "3",
        icon: "🦖",
        name: "Dino Run",
        desc: "Jump the rocks,\nit keeps speeding up!",
        controls: &[("Space / ↑", "Jump")],
        color: Color::Rgb(249, 115, 22),
        border_color: Color::Rgb(130, 60, 15),
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];

    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };
    for desc_line in tile.desc.split('\n') {
        lines.push(Line::styled(desc_line, Style::default().fg(desc_color)));
    }

    if selected {
        lines.push(Line::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn control_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {key:<17}"), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(action.to_string(), Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn heading(text: &str) -> Line<'static> {
    Line::styled(
        format!("  {text}"),
        Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
    )
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(7),  // Game tiles
            Constraint::Min(6),     // Controls area
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::styled(
        "  🥚 You found the easter egg 🥚  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games — ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); GAME_COUNT])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    let nav = Paragraph::new(vec![
        Line::from(""),
        heading("🔧 Navigation"),
        control_line("Tab / Shift+Tab", "Switch games"),
        control_line("1-3", "Open game"),
        control_line("Esc", "Back to Home"),
        control_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        heading("🎮 Common"),
        control_line("Enter", "Start / Play again"),
        control_line("R", "Restart run"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(nav, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_COUNT - 1)];
    let mut game_lines = vec![Line::from(""), heading(&format!("{} {}", tile.icon, tile.name))];
    game_lines.extend(tile.controls.iter().map(|(k, a)| control_line(k, a)));
    let game_ctrl = Paragraph::new(game_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(tile.border_color))
            .title(format!(" 🎮 {} Control ", tile.name))
            .title_style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);
}
