use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::chat::{ChatMessage, Sender};
use crate::clock::to_local;

const INPUT_HEIGHT: u16 = 3;

fn stamp(millis: i64) -> String {
    to_local(millis)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

fn message_lines(msg: &ChatMessage) -> [Line<'_>; 3] {
    let (who, color) = match msg.sender {
        Sender::User => ("You", Color::Cyan),
        Sender::Assistant => ("Counselor", Color::Green),
    };
    let body_style = if msg.is_crisis {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let mut header = vec![
        Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" · {}", stamp(msg.created_at)),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    if msg.is_crisis {
        header.push(Span::styled(
            "  ⚠ Crisis detected",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    [
        Line::from(header),
        Line::from(Span::styled(msg.content.as_str(), body_style)),
        Line::default(),
    ]
}

/// Rows a line occupies once word-wrapped to `width` columns.
///
/// Follows the paragraph wrapper: words move to the next row when they do not
/// fit, words wider than a row are split, and whitespace never starts a row.
fn wrapped_rows(line: &Line, width: u16) -> usize {
    let width = usize::from(width.max(1));
    let mut rows = 1;
    let mut col = 0;
    for span in &line.spans {
        for word in span.content.split_inclusive(char::is_whitespace) {
            let body = word.trim_end_matches(char::is_whitespace);
            let body_width = body.width();
            if col > 0 && col + body_width > width {
                rows += 1;
                col = 0;
            }
            col += body_width;
            if col > width {
                rows += (col - 1) / width;
                col = (col - 1) % width + 1;
            }
            col = (col + word[body.len()..].width()).min(width);
        }
    }
    rows
}

pub fn render_chat(app: &App, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(INPUT_HEIGHT)])
        .split(area);

    let mut lines: Vec<Line> = app
        .chat
        .messages()
        .iter()
        .flat_map(message_lines)
        .collect();
    if app.chat.is_busy() {
        lines.push(Line::from(Span::styled(
            "Counselor is typing…",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" AI Wellness Counselor ")
        .title_bottom(Span::styled(
            " Not a substitute for professional care. In an emergency call 911. ",
            Style::default().add_modifier(Modifier::DIM),
        ));
    let inner = block.inner(chunks[0]);
    // lay out only the newest lines that fill the viewport, bottom aligned
    let height = usize::from(inner.height);
    let mut rows = 0usize;
    let mut start = lines.len();
    while start > 0 && rows < height {
        start -= 1;
        rows = rows.saturating_add(wrapped_rows(&lines[start], inner.width));
    }
    let visible = lines.split_off(start);
    let scroll = u16::try_from(rows.saturating_sub(height)).unwrap_or(u16::MAX);

    let history = Paragraph::new(visible)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(history, chunks[0]);

    let (title, border) = if app.chat.is_busy() {
        (" Waiting for reply… ", Style::default().fg(Color::DarkGray))
    } else {
        (" Share what's on your mind ", Style::default().fg(Color::Cyan))
    };
    let input = Paragraph::new(app.chat_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    f.render_widget(input, chunks[1]);

    if !app.controller.crisis_alert_visible() {
        let rect = chunks[1];
        let max = rect.width.saturating_sub(3);
        let x = rect.x + 1 + (app.chat_input.width() as u16).min(max);
        f.set_cursor_position((x, rect.y + 1));
    }
}
