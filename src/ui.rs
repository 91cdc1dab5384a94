pub mod chat;
pub mod crisis;
pub mod dashboard;
pub mod leaderboard;
pub mod login;
pub mod mood;
pub mod quiz;
pub mod screen;

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use time_humanize::{Accuracy, HumanTime, Tense};

use crate::app::App;
use crate::view::View;

use self::screen::current_screen;

pub const APP_TITLE: &str = "MindWell";

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

/// Draws the whole frame: header, the active screen, footer and the crisis overlay
pub fn draw(app: &App, f: &mut Frame) {
    let area = f.area();
    let show_header = app.controller.session().is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_header { HEADER_HEIGHT } else { 0 }),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    if show_header {
        render_header(app, f, chunks[0]);
    }

    let screen = current_screen(app.view());
    screen.render(app, f, chunks[1]);

    let footer = match &app.status {
        Some(status) => Paragraph::new(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        None => Paragraph::new(Span::styled(
            screen.help(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    f.render_widget(footer.alignment(Alignment::Center), chunks[2]);

    if app.controller.crisis_alert_visible() {
        crisis::render_crisis_alert(f, area);
    }
}

/// "in an hour", "in 5 minutes"; empty once the session is over
pub fn remaining_label(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return String::new();
    }
    HumanTime::from(Duration::from_millis(remaining_ms as u64))
        .to_text_en(Accuracy::Rough, Tense::Future)
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let Some(session) = app.controller.session() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(44)])
        .split(inner);

    if session.has_completed_quiz {
        let titles: Vec<Line> = View::NAV
            .iter()
            .map(|v| Line::from(v.to_string()))
            .collect();
        let selected = View::NAV.iter().position(|v| *v == app.view());
        let tabs = Tabs::new(titles)
            .block(Block::default().title(Span::styled(
                format!(" {APP_TITLE} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )))
            .select(selected.unwrap_or(0))
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("|");
        f.render_widget(tabs, cols[0]);
    } else {
        let title = Paragraph::new(Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(title, cols[0]);
    }

    let remaining = remaining_label(session.remaining_ms(app.now_millis()));
    let mut lines = vec![Line::from(Span::styled(
        session.display_name().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !remaining.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("session ends {remaining} · ctrl+o logout"),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Right), cols[1]);
}

/// A rect of the given percentage size centered inside `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::App;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use crate::session::LoginRequest;
    use crate::store::MemorySessionStore;

    pub const NOW: i64 = 1_734_000_000_000;

    pub fn app() -> (App, ManualClock) {
        let clock = ManualClock::new(NOW);
        let app = App::new(
            Box::new(MemorySessionStore::new()),
            Arc::new(clock.clone()),
            Config::default(),
            PathBuf::from("unused"),
        );
        (app, clock)
    }

    pub fn signed_in_app() -> (App, ManualClock) {
        let (mut app, clock) = app();
        app.controller
            .login(LoginRequest::email("sam@example.org").with_completed_quiz(true));
        (app, clock)
    }

    pub fn render(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| super::draw(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }
}
