use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::mood::MoodLevel;

fn mood_color(mood: MoodLevel) -> Color {
    match mood {
        MoodLevel::VeryLow => Color::Red,
        MoodLevel::Low => Color::LightRed,
        MoodLevel::Neutral => Color::Yellow,
        MoodLevel::Good => Color::LightGreen,
        MoodLevel::Excellent => Color::Green,
    }
}

pub fn render_mood(app: &App, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // picker
            Constraint::Length(3), // notes
            Constraint::Length(1), // summary
            Constraint::Min(3),    // history
        ])
        .split(area);

    let selected = app.mood_form.selected;
    let mut spans = Vec::new();
    for mood in MoodLevel::ALL {
        let style = if selected == Some(mood) {
            Style::default()
                .fg(Color::Black)
                .bg(mood_color(mood))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(mood_color(mood))
        };
        spans.push(Span::styled(
            format!(" {} {} ", mood.emoji(), mood.label()),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    let picker = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" How are you feeling today? "),
        );
    f.render_widget(picker, chunks[0]);

    let notes = Paragraph::new(app.mood_form.notes.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Notes (optional) "),
    );
    f.render_widget(notes, chunks[1]);

    let summary = Paragraph::new(Line::from(vec![
        Span::styled("Average mood ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(
            app.mood_journal.average_label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Streak ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(
            format!("{} days", app.mood_journal.streak(app.today())),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Entries ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(
            app.mood_journal.len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(summary, chunks[2]);

    let history_block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Entries ");
    if app.mood_journal.is_empty() {
        let empty = Paragraph::new("No entries yet. Pick a mood above to start your journal.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .alignment(Alignment::Center)
            .block(history_block);
        f.render_widget(empty, chunks[3]);
        return;
    }

    let rows: Vec<Row> = app
        .mood_journal
        .entries()
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.date.format("%b %d, %Y").to_string()),
                Cell::from(format!("{} {}", entry.mood.emoji(), entry.mood.label()))
                    .style(Style::default().fg(mood_color(entry.mood))),
                Cell::from(entry.notes.as_str()),
            ])
        })
        .collect();
    let header = Row::new(vec!["Date", "Mood", "Notes"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(history_block);
    f.render_widget(table, chunks[3]);
}
