use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};
use webbrowser::Browser;

use crate::chat::ChatEngine;
use crate::clock::{to_local, Clock};
use crate::config::Config;
use crate::controller::SessionController;
use crate::crisis::{CrisisLexicon, LIFELINE_URL};
use crate::leaderboard::Leaderboard;
use crate::mood::{MoodForm, MoodJournal};
use crate::quiz::{QuizState, QuizStep};
use crate::session::LoginRequest;
use crate::store::SessionStore;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    Anonymous,
}

impl LoginField {
    fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Anonymous,
            LoginField::Anonymous => LoginField::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            LoginField::Email => LoginField::Anonymous,
            LoginField::Password => LoginField::Email,
            LoginField::Anonymous => LoginField::Password,
        }
    }
}

/// Whether the email form reads as signing in or creating an account.
/// Both start the same kind of session; there is no account store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum LoginMode {
    #[default]
    #[strum(serialize = "sign in")]
    SignIn,
    #[strum(serialize = "sign up")]
    SignUp,
}

impl LoginMode {
    pub fn toggled(self) -> Self {
        match self {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        }
    }
}

/// Sign-in form. The password is only checked for presence and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub mode: LoginMode,
}

impl LoginForm {
    fn validate(&self) -> Result<LoginRequest, &'static str> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Please enter a valid email address");
        }
        if self.password.is_empty() {
            return Err("Please enter your password");
        }
        Ok(LoginRequest::email(email))
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            LoginField::Email => Some(&mut self.email),
            LoginField::Password => Some(&mut self.password),
            LoginField::Anonymous => None,
        }
    }
}

/// Numbers shown on the dashboard tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub day_streak: u32,
    pub mood_entries: usize,
    pub messages_sent: usize,
    pub wellness_score: u32,
}

pub struct App {
    pub controller: SessionController,
    pub chat: ChatEngine,
    pub quiz: QuizState,
    pub mood_journal: MoodJournal,
    pub mood_form: MoodForm,
    pub leaderboard: Leaderboard,
    pub login_form: LoginForm,
    pub chat_input: String,
    pub status: Option<String>,
    config: Config,
    clock: Arc<dyn Clock>,
    data_dir: PathBuf,
    should_quit: bool,
}

impl App {
    /// Builds the app and restores any persisted session
    pub fn new(
        store: Box<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        config: Config,
        data_dir: PathBuf,
    ) -> Self {
        let mut controller = SessionController::new(store, clock.clone());
        controller.restore_session();
        let chat = ChatEngine::new(clock.clone(), CrisisLexicon::default(), config.chat_timings());

        Self {
            controller,
            chat,
            quiz: QuizState::default(),
            mood_journal: MoodJournal::new(),
            mood_form: MoodForm::default(),
            leaderboard: Leaderboard::default(),
            login_form: LoginForm::default(),
            chat_input: String::new(),
            status: None,
            config,
            clock,
            data_dir,
            should_quit: false,
        }
    }

    pub fn view(&self) -> View {
        self.controller.view()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn today(&self) -> NaiveDate {
        to_local(self.clock.now_millis())
            .map(|dt| dt.date_naive())
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            day_streak: self.mood_journal.streak(self.today()),
            mood_entries: self.mood_journal.len(),
            messages_sent: self.chat.user_message_count(),
            wellness_score: self.leaderboard.you().map_or(0, |e| e.score),
        }
    }

    /// Advances timers: session expiry and pending chat work
    pub fn on_tick(&mut self) {
        if self.config.recheck_expiry && self.controller.enforce_expiry() {
            self.reset_user_state();
            self.status = Some("Your session expired. Please sign in again.".to_string());
        }
        self.chat.poll(&mut self.controller);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.controller.crisis_alert_visible() {
            self.on_crisis_key(key);
            return;
        }

        self.status = None;
        match self.view() {
            View::Login => self.on_login_key(key, ctrl),
            View::Quiz => self.on_quiz_key(key, ctrl),
            view => self.on_nav_key(view, key, ctrl),
        }
    }

    pub fn logout(&mut self) {
        self.controller.logout();
        self.reset_user_state();
    }

    fn reset_user_state(&mut self) {
        self.chat.reset();
        self.chat_input.clear();
        self.quiz = QuizState::default();
        self.mood_journal = MoodJournal::new();
        self.mood_form = MoodForm::default();
        self.login_form = LoginForm::default();
    }

    fn on_crisis_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('i') => {
                self.controller.dismiss_crisis_alert();
            }
            KeyCode::Char('o') => {
                if Browser::is_available() {
                    if let Err(e) = webbrowser::open(LIFELINE_URL) {
                        warn!(error = %e, "could not open browser");
                    }
                } else {
                    self.status = Some(format!("Visit {LIFELINE_URL} or call 988"));
                }
            }
            _ => {}
        }
    }

    fn on_login_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.login_form.focus = self.login_form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => {
                self.login_form.focus = self.login_form.focus.prev()
            }
            KeyCode::Enter => match self.login_form.focus {
                LoginField::Anonymous => self.login(LoginRequest::anonymous()),
                LoginField::Email | LoginField::Password => match self.login_form.validate() {
                    Ok(request) => self.login(request),
                    Err(msg) => self.status = Some(msg.to_string()),
                },
            },
            KeyCode::Backspace => {
                if let Some(text) = self.login_form.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char('n') if ctrl => {
                self.login_form.mode = self.login_form.mode.toggled();
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.login_form.focused_text() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn login(&mut self, request: LoginRequest) {
        debug!(mode = %self.login_form.mode, "login form submitted");
        self.login_form = LoginForm::default();
        self.quiz = QuizState::default();
        self.controller.login(request);
    }

    fn on_quiz_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('o') if ctrl => self.logout(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.quiz.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.quiz.cursor_down(),
            KeyCode::Char(' ') => self.quiz.select(),
            KeyCode::Right => {
                self.quiz.next();
            }
            KeyCode::Left => {
                self.quiz.previous();
            }
            KeyCode::Enter => {
                if self.quiz.confirm() == QuizStep::Submitted {
                    self.controller.complete_quiz();
                }
            }
            _ => {}
        }
    }

    fn on_nav_key(&mut self, view: View, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('o') if ctrl => {
                self.logout();
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.go_to(view.next_nav());
                return;
            }
            KeyCode::BackTab => {
                self.go_to(view.prev_nav());
                return;
            }
            _ => {}
        }

        match view {
            View::Dashboard => match key.code {
                KeyCode::Char('c') => self.go_to(View::Chat),
                KeyCode::Char('m') => self.go_to(View::Mood),
                KeyCode::Char('l') => self.go_to(View::Leaderboard),
                _ => {}
            },
            View::Chat => self.on_chat_key(key, ctrl),
            View::Mood => self.on_mood_key(key, ctrl),
            View::Leaderboard => match key.code {
                KeyCode::Right => self.leaderboard.next_period(),
                KeyCode::Left => self.leaderboard.prev_period(),
                _ => {}
            },
            View::Login | View::Quiz => {}
        }
    }

    /// The controller trusts its caller, so gated views are checked here
    fn go_to(&mut self, target: View) {
        let quiz_done = self
            .controller
            .session()
            .is_some_and(|s| s.has_completed_quiz);
        if target.requires_quiz() && !quiz_done {
            debug!(%target, "navigation blocked until the quiz is done");
            self.status = Some("Finish the wellness check-in first".to_string());
            return;
        }
        self.controller.navigate(target);
    }

    fn on_chat_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Enter => {
                // the input is disabled while a reply is on its way
                if self.chat.is_busy() {
                    return;
                }
                if self.chat.submit(&self.chat_input).is_some() {
                    self.chat_input.clear();
                }
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.chat_input.push(c),
            _ => {}
        }
    }

    fn on_mood_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Right => self.mood_form.select_next(),
            KeyCode::Left => self.mood_form.select_prev(),
            KeyCode::Enter => {
                let today = self.today();
                if !self.mood_form.save(&mut self.mood_journal, today) {
                    self.status = Some("Pick a mood with ←/→ first".to_string());
                }
            }
            KeyCode::Char('e') if ctrl => self.export_moods(),
            KeyCode::Backspace => {
                self.mood_form.notes.pop();
            }
            KeyCode::Char(c) if !ctrl => self.mood_form.notes.push(c),
            _ => {}
        }
    }

    fn export_moods(&mut self) {
        self.status = Some(match self.mood_journal.export_to_dir(&self.data_dir) {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => {
                warn!(error = %e, "mood export failed");
                format!("Export failed: {e}")
            }
        });
        debug!(status = ?self.status, "mood export");
    }
}
