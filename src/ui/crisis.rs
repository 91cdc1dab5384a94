use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::crisis::{ContactKind, CRISIS_CONTACTS, LIFELINE_URL};

use super::centered_rect;

fn kind_label(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Call => "call",
        ContactKind::Text => "text",
        ContactKind::Emergency => "emergency",
    }
}

/// Modal with crisis resources; drawn over whatever screen is active
pub fn render_crisis_alert(f: &mut Frame, area: Rect) {
    let rect = centered_rect(70, 70, area);
    f.render_widget(Clear, rect);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            "It sounds like you're going through something really hard.",
            bold,
        )),
        Line::from("You don't have to face this alone. Please reach out to one of these:"),
        Line::default(),
    ];
    for contact in CRISIS_CONTACTS {
        lines.push(Line::from(vec![
            Span::styled(contact.name, bold),
            Span::raw(format!(" ({}) ", kind_label(contact.kind))),
            Span::styled(contact.number, bold.fg(Color::Red)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", contact.description),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("(enter) I understand", bold.fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(format!("(o) open {LIFELINE_URL}"), bold),
    ]));

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(" You're not alone ", bold.fg(Color::Red))),
        );
    f.render_widget(modal, rect);
}

#[cfg(test)]
mod tests {
    use crate::ui::test_support::{render, signed_in_app};

    #[test]
    fn lists_every_contact() {
        let (mut app, _) = signed_in_app();
        app.controller.raise_crisis_alert();
        let rendered = render(&app, 140, 40);
        assert!(rendered.contains("Crisis Text Line"));
        assert!(rendered.contains("741741"));
        assert!(rendered.contains("911"));
        assert!(rendered.contains("You're not alone"));
    }
}
