use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::view::View;

use super::{
    chat::render_chat, dashboard::render_dashboard, leaderboard::render_leaderboard,
    login::render_login, mood::render_mood, quiz::render_quiz,
};

/// A UI Screen boundary: renders one view into the body area and names its keys
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect);
    /// One-line key help shown in the footer
    fn help(&self) -> &'static str {
        "(esc) quit"
    }
}

pub struct LoginScreen;

impl Screen for LoginScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        render_login(app, f, area);
    }

    fn help(&self) -> &'static str {
        "(tab) next field | (enter) submit | (ctrl+n) sign in/up | (esc) quit"
    }
}

pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        render_quiz(app, f, area);
    }

    fn help(&self) -> &'static str {
        "↑/↓ choose | (space) select | (enter) answer | ←/→ back/forward | (ctrl+o) logout | (esc) quit"
    }
}

pub struct DashboardScreen;

impl Screen for DashboardScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        render_dashboard(app, f, area);
    }

    fn help(&self) -> &'static str {
        "(c)hat (m)ood (l)eaderboard | (tab) switch view | (ctrl+o) logout | (esc) quit"
    }
}

pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        render_chat(app, f, area);
    }

    fn help(&self) -> &'static str {
        "(enter) send | (tab) switch view | (ctrl+o) logout | (esc) quit"
    }
}

pub struct MoodScreen;

impl Screen for MoodScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        render_mood(app, f, area);
    }

    fn help(&self) -> &'static str {
        "←/→ mood | (enter) save | (ctrl+e) export csv | (tab) switch view | (esc) quit"
    }
}

pub struct LeaderboardScreen;

impl Screen for LeaderboardScreen {
    fn render(&self, app: &App, f: &mut Frame, area: Rect) {
        render_leaderboard(app, f, area);
    }

    fn help(&self) -> &'static str {
        "←/→ period | (tab) switch view | (ctrl+o) logout | (esc) quit"
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Login => Box::new(LoginScreen),
        View::Quiz => Box::new(QuizScreen),
        View::Dashboard => Box::new(DashboardScreen),
        View::Chat => Box::new(ChatScreen),
        View::Mood => Box::new(MoodScreen),
        View::Leaderboard => Box::new(LeaderboardScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_has_a_screen_with_help() {
        for view in [
            View::Login,
            View::Quiz,
            View::Dashboard,
            View::Chat,
            View::Mood,
            View::Leaderboard,
        ] {
            assert!(current_screen(view).help().contains("quit"));
        }
    }

    #[test]
    fn quiz_help_lists_answer_keys() {
        let help = current_screen(View::Quiz).help();
        assert!(help.contains("(space) select"));
        assert!(help.contains("(enter) answer"));
    }
}
