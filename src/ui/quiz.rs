use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

use super::centered_rect;

pub fn render_quiz(app: &App, f: &mut Frame, area: Rect) {
    let quiz = &app.quiz;
    let question = quiz.current_question();
    let panel = centered_rect(80, 90, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // progress
            Constraint::Length(3), // prompt
            Constraint::Min(7),    // options
        ])
        .split(panel);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Wellness Assessment "),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(quiz.progress().min(100))
        .label(format!(
            "Question {} of {}",
            quiz.current_index() + 1,
            quiz.len()
        ));
    f.render_widget(gauge, chunks[0]);

    let prompt = Paragraph::new(Span::styled(
        question.prompt,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[1]);

    let answered = quiz.current_answer();
    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if answered == Some(option.value) { "●" } else { "○" };
            let pointer = if idx == quiz.cursor() { "›" } else { " " };
            let style = if idx == quiz.cursor() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{pointer} {marker} {}", option.label),
                style,
            ))
        })
        .collect();

    let action = if quiz.is_last() { "Complete Assessment" } else { "Next" };
    let options = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" (enter) {action} ")),
    );
    f.render_widget(options, chunks[2]);
}

#[cfg(test)]
mod tests {
    use crate::session::LoginRequest;
    use crate::ui::test_support::{app, render};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn shows_progress_and_options() {
        let (mut app, _) = app();
        app.controller.login(LoginRequest::anonymous());
        let rendered = render(&app, 100, 30);
        assert!(rendered.contains("Question 1 of 5"));
        assert!(rendered.contains("Wellness Assessment"));
        assert!(rendered.contains("›"));
    }

    #[test]
    fn last_question_offers_completion() {
        let (mut app, _) = app();
        app.controller.login(LoginRequest::anonymous());
        for _ in 0..4 {
            app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        }
        let rendered = render(&app, 100, 30);
        assert!(rendered.contains("Question 5 of 5"));
        assert!(rendered.contains("Complete Assessment"));
    }
}
