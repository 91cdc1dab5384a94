use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, LoginField, LoginMode};

use super::{centered_rect, APP_TITLE};

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

pub fn render_login(app: &App, f: &mut Frame, area: Rect) {
    let form = &app.login_form;
    let panel = centered_rect(60, 80, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(3), // anonymous
            Constraint::Min(0),    // privacy note
        ])
        .split(panel);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            match form.mode {
                LoginMode::SignIn => "Sign in to your wellness companion",
                LoginMode::SignUp => "Create your wellness account",
            },
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let email = Paragraph::new(form.email.as_str())
        .block(field_block("Email", form.focus == LoginField::Email));
    f.render_widget(email, chunks[1]);

    let masked = "•".repeat(form.password.chars().count());
    let password = Paragraph::new(masked.as_str())
        .block(field_block("Password", form.focus == LoginField::Password));
    f.render_widget(password, chunks[2]);

    let anon_style = if form.focus == LoginField::Anonymous {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let anonymous = Paragraph::new(Span::styled(" Continue Anonymously ", anon_style))
        .alignment(Alignment::Center)
        .block(field_block("", form.focus == LoginField::Anonymous));
    f.render_widget(anonymous, chunks[3]);

    let toggle = match form.mode {
        LoginMode::SignIn => "Don't have an account? (ctrl+n) sign up",
        LoginMode::SignUp => "Already have an account? (ctrl+n) sign in",
    };
    let note = Paragraph::new(vec![
        Line::from(Span::styled(toggle, Style::default().fg(Color::Cyan))),
        Line::default(),
        Line::from(Span::styled(
            "Anonymous sessions keep no email. Your password is never stored. Sessions last one hour.",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(note, chunks[4]);

    let cursor_field = match form.focus {
        LoginField::Email => Some((chunks[1], form.email.width())),
        LoginField::Password => Some((chunks[2], masked.width())),
        LoginField::Anonymous => None,
    };
    if let Some((rect, offset)) = cursor_field {
        let max = rect.width.saturating_sub(2);
        let x = rect.x + 1 + (offset as u16).min(max.saturating_sub(1));
        f.set_cursor_position((x, rect.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use crate::ui::test_support::{app, render};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn password_is_masked() {
        let (mut app, _) = app();
        for c in "me@x.org".chars() {
            app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.on_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        for c in "hunter2".chars() {
            app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("me@x.org"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("•••••••"));
        assert!(rendered.contains("Continue Anonymously"));
    }

    #[test]
    fn mode_toggle_changes_copy() {
        let (mut app, _) = app();
        let rendered = render(&app, 100, 30);
        assert!(rendered.contains("Sign in to your wellness companion"));
        assert!(rendered.contains("sign up"));

        app.on_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        let rendered = render(&app, 100, 30);
        assert!(rendered.contains("Create your wellness account"));
        assert!(rendered.contains("Already have an account?"));
    }
}
