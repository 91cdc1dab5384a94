use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::leaderboard::{medal, RankingPeriod, PRIVACY_NOTICE, SCORING_RULES};
use crate::util::ordinal;

pub fn render_leaderboard(app: &App, f: &mut Frame, area: Rect) {
    let board = &app.leaderboard;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(board.entries().len() as u16 + 3),
            Constraint::Min(6),
        ])
        .split(area);

    let selected = RankingPeriod::ALL
        .iter()
        .position(|p| *p == board.period())
        .unwrap_or(0);
    let tabs = Tabs::new(RankingPeriod::ALL.iter().map(|p| p.to_string()))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");
    f.render_widget(tabs, chunks[0]);

    let rows: Vec<Row> = board
        .entries()
        .iter()
        .map(|entry| {
            let rank = medal(entry.rank)
                .map(str::to_string)
                .unwrap_or_else(|| ordinal(entry.rank));
            let row = Row::new(vec![
                Cell::from(rank),
                Cell::from(entry.username),
                Cell::from(entry.score.to_string()),
                Cell::from(format!("{} days", entry.streak)),
                Cell::from(entry.entries.to_string()),
            ]);
            if entry.is_you() {
                row.style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(vec!["Rank", "User", "Score", "Streak", "Entries"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(16),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Community Wellness Rankings ({}) ", board.period())),
    );
    f.render_widget(table, chunks[1]);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(you) = board.you() {
        lines.push(Line::from(Span::styled(
            format!(
                "You are {} with {} points and a {} day streak",
                ordinal(you.rank),
                you.score,
                you.streak
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "How scores work",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(SCORING_RULES.iter().map(|r| Line::from(format!("  • {r}"))));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        PRIVACY_NOTICE,
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
    )));
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        chunks[2],
    );
}
