/// The single active screen of the navigation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum View {
    #[strum(serialize = "Sign In")]
    Login,
    #[strum(serialize = "Wellness Assessment")]
    Quiz,
    #[strum(serialize = "Dashboard")]
    Dashboard,
    #[strum(serialize = "AI Counselor")]
    Chat,
    #[strum(serialize = "Mood Tracker")]
    Mood,
    #[strum(serialize = "Community")]
    Leaderboard,
}

impl View {
    /// Views reachable from the header once the quiz is done, in display order
    pub const NAV: [View; 4] = [View::Dashboard, View::Chat, View::Mood, View::Leaderboard];

    /// Whether the view is only meaningful after the quiz has been completed
    pub fn requires_quiz(self) -> bool {
        !matches!(self, View::Login | View::Quiz)
    }

    /// Next header entry, wrapping around; views outside the nav bar land on the dashboard
    pub fn next_nav(self) -> View {
        match Self::NAV.iter().position(|v| *v == self) {
            Some(i) => Self::NAV[(i + 1) % Self::NAV.len()],
            None => View::Dashboard,
        }
    }

    pub fn prev_nav(self) -> View {
        match Self::NAV.iter().position(|v| *v == self) {
            Some(i) => Self::NAV[(i + Self::NAV.len() - 1) % Self::NAV.len()],
            None => View::Dashboard,
        }
    }
}
