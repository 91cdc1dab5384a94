use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use mindwell::app::App;
use mindwell::chat::Sender as Author;
use mindwell::clock::ManualClock;
use mindwell::config::Config;
use mindwell::runtime::{AppEvent, ChannelEventSource, Runner};
use mindwell::session::SESSION_DURATION_MS;
use mindwell::store::{FileSessionStore, SessionStore};
use mindwell::view::View;

const NOW: i64 = 1_734_000_000_000;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_text(tx: &Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

fn file_app(dir: &Path, clock: &ManualClock) -> App {
    App::new(
        Box::new(FileSessionStore::in_dir(dir)),
        Arc::new(clock.clone()),
        Config::default(),
        dir.to_path_buf(),
    )
}

/// Mirrors the binary's loop: handle the event, then advance timers
fn drain(app: &mut App, runner: &Runner<ChannelEventSource>, steps: u32) {
    for _ in 0..steps {
        if let AppEvent::Key(k) = runner.step() {
            app.on_key(k);
        }
        app.on_tick();
    }
}

// Headless integration using the runtime + App without a TTY.
// Walks sign-in, the quiz and a crisis message end to end.
#[test]
fn headless_crisis_flow_alerts_after_reply() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(NOW);
    let mut app = file_app(dir.path(), &clock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(1));

    // focus wraps from the email box back to the anonymous button
    tx.send(key(KeyCode::BackTab)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    for _ in 0..5 {
        tx.send(key(KeyCode::Enter)).unwrap();
    }
    tx.send(key(KeyCode::Char('c'))).unwrap();
    send_text(&tx, "Honestly I can't go on");
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut app, &runner, 40);

    assert_eq!(app.view(), View::Chat);
    assert!(app.controller.session().unwrap().has_completed_quiz);
    let user = app.chat.messages().last().unwrap();
    assert_eq!(user.sender, Author::User);
    assert!(user.is_crisis);
    assert!(!app.controller.crisis_alert_visible());

    clock.advance(1500);
    drain(&mut app, &runner, 1);
    let reply = app.chat.messages().last().unwrap();
    assert_eq!(reply.sender, Author::Assistant);
    assert!(reply.content.contains("immediate help"));
    assert!(!app.controller.crisis_alert_visible());

    clock.advance(1999);
    drain(&mut app, &runner, 1);
    assert!(!app.controller.crisis_alert_visible());
    clock.advance(1);
    drain(&mut app, &runner, 1);
    assert!(app.controller.crisis_alert_visible());

    // keys other than dismissal do nothing while the alert is up
    tx.send(key(KeyCode::Tab)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    drain(&mut app, &runner, 2);
    assert_eq!(app.view(), View::Chat);
    assert!(!app.controller.crisis_alert_visible());
    assert!(!app.should_quit());
}

#[test]
fn session_survives_restart_until_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(NOW);
    {
        let mut app = file_app(dir.path(), &clock);
        app.controller
            .login(mindwell::session::LoginRequest::email("a@b.co"));
        app.controller.complete_quiz();
    }

    let record = dir.path().join("mentalHealthUser.json");
    let raw = std::fs::read_to_string(&record).unwrap();
    assert!(raw.contains("\"hasCompletedQuiz\":true"));
    assert!(raw.contains("\"sessionExpiry\""));

    clock.advance(SESSION_DURATION_MS - 1);
    let app = file_app(dir.path(), &clock);
    assert_eq!(app.view(), View::Dashboard);
    assert_eq!(
        app.controller.session().unwrap().email.as_deref(),
        Some("a@b.co")
    );

    clock.advance(1);
    let app = file_app(dir.path(), &clock);
    assert_eq!(app.view(), View::Login);
    assert!(!record.exists());
}

#[test]
fn restart_mid_quiz_resumes_quiz() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(NOW);
    file_app(dir.path(), &clock)
        .controller
        .login(mindwell::session::LoginRequest::anonymous());

    let app = file_app(dir.path(), &clock);
    assert_eq!(app.view(), View::Quiz);
    assert!(app.controller.session().unwrap().is_anonymous);
}

#[test]
fn malformed_record_starts_at_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::in_dir(dir.path());
    std::fs::write(store.path(), "{ not json").unwrap();

    let app = file_app(dir.path(), &ManualClock::new(NOW));
    assert_eq!(app.view(), View::Login);
    assert!(app.controller.session().is_none());
    assert!(store.load().is_err());
}

#[test]
fn logout_removes_record() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(NOW);
    let mut app = file_app(dir.path(), &clock);
    app.controller
        .login(mindwell::session::LoginRequest::anonymous().with_completed_quiz(true));
    let store = FileSessionStore::in_dir(dir.path());
    assert!(store.load().unwrap().is_some());

    app.on_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL));
    assert_eq!(app.view(), View::Login);
    assert!(store.load().unwrap().is_none());
}

#[test]
fn overlapping_messages_are_answered_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(NOW);
    let mut app = file_app(dir.path(), &clock);
    app.controller
        .login(mindwell::session::LoginRequest::anonymous().with_completed_quiz(true));

    // the engine queues a second submission even though the input is locked
    app.chat.submit("I feel so stressed");
    clock.advance(200);
    app.chat.submit("and sad");
    clock.advance(5000);
    app.on_tick();

    let contents: Vec<(Author, &str)> = app
        .chat
        .messages()
        .iter()
        .skip(1)
        .map(|m| (m.sender, m.content.as_str()))
        .collect();
    assert_eq!(contents.len(), 4);
    assert_eq!(contents[0], (Author::User, "I feel so stressed"));
    assert_eq!(contents[1].0, Author::User);
    assert_eq!(contents[2].0, Author::Assistant);
    assert!(contents[2].1.contains("overwhelming"));
    assert!(contents[3].1.contains("sorry"));
}
