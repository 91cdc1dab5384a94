use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

const QUICK_ACTIONS: [(char, &str, &str); 3] = [
    ('c', "Talk to AI Counselor", "Get support any time you need it"),
    ('m', "Track Your Mood", "Log how you feel and spot patterns"),
    ('l', "Community", "See how the community is doing"),
];

fn stat_tile<'a>(title: &'a str, value: String, color: Color) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(title))
}

pub fn render_dashboard(app: &App, f: &mut Frame, area: Rect) {
    let name = app
        .controller
        .session()
        .map_or("friend", |s| s.display_name());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // greeting
            Constraint::Length(3), // stats
            Constraint::Min(5),    // quick actions
        ])
        .split(area);

    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome back, {name}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "How are you taking care of yourself today?",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]);
    f.render_widget(greeting, chunks[0]);

    let stats = app.dashboard_stats();
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    f.render_widget(
        stat_tile("Day Streak", stats.day_streak.to_string(), Color::Green),
        tiles[0],
    );
    f.render_widget(
        stat_tile("Mood Entries", stats.mood_entries.to_string(), Color::Blue),
        tiles[1],
    );
    f.render_widget(
        stat_tile("Messages Sent", stats.messages_sent.to_string(), Color::Magenta),
        tiles[2],
    );
    f.render_widget(
        stat_tile("Wellness Score", stats.wellness_score.to_string(), Color::Yellow),
        tiles[3],
    );

    let actions: Vec<Line> = QUICK_ACTIONS
        .iter()
        .flat_map(|(key, title, blurb)| {
            [
                Line::from(vec![
                    Span::styled(
                        format!("({key}) "),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("    {blurb}"),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(actions).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Quick Actions "),
        ),
        chunks[2],
    );
}
