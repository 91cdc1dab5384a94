use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chat::CrisisListener;
use crate::clock::Clock;
use crate::session::{LoginRequest, Session};
use crate::store::SessionStore;
use crate::view::View;

/// Owns the session record, the active view and the crisis-alert flag.
///
/// Every operation is total: missing preconditions turn into no-ops and
/// persistence failures are logged, never returned.
pub struct SessionController {
    store: Box<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    session: Option<Session>,
    view: View,
    crisis_alert_visible: bool,
}

impl SessionController {
    pub fn new(store: Box<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            session: None,
            view: View::Login,
            crisis_alert_visible: false,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn crisis_alert_visible(&self) -> bool {
        self.crisis_alert_visible
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Restores a persisted, unexpired session. Called once at startup.
    pub fn restore_session(&mut self) {
        let persisted = match self.store.load() {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session record");
                None
            }
        };

        let Some(session) = persisted else {
            debug!("no persisted session");
            return;
        };

        let now = self.clock.now_millis();
        if session.is_valid_at(now) {
            self.view = if session.has_completed_quiz {
                View::Dashboard
            } else {
                View::Quiz
            };
            info!(view = %self.view, anonymous = session.is_anonymous, "restored session");
            self.session = Some(session);
        } else {
            info!(
                expired_ms_ago = now.saturating_sub(session.session_expiry),
                "discarding expired session"
            );
            self.clear_persisted();
        }
    }

    /// Starts a new session, overwriting any persisted record
    pub fn login(&mut self, request: LoginRequest) {
        let session = Session::start(&request, self.clock.now_millis());
        self.persist(&session);
        self.view = if session.has_completed_quiz {
            View::Dashboard
        } else {
            View::Quiz
        };
        info!(anonymous = session.is_anonymous, view = %self.view, "logged in");
        self.session = Some(session);
    }

    /// Marks the quiz done and moves to the dashboard; no-op without a session
    pub fn complete_quiz(&mut self) {
        let Some(mut session) = self.session.take() else {
            debug!("complete_quiz without a session; ignoring");
            return;
        };
        session.has_completed_quiz = true;
        self.persist(&session);
        self.session = Some(session);
        self.view = View::Dashboard;
        info!("quiz completed");
    }

    /// Plain view assignment; the caller only offers reachable targets
    pub fn navigate(&mut self, target: View) {
        debug!(from = %self.view, to = %target, "navigate");
        self.view = target;
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.clear_persisted();
        self.view = View::Login;
        self.crisis_alert_visible = false;
        info!("logged out");
    }

    pub fn raise_crisis_alert(&mut self) {
        self.crisis_alert_visible = true;
    }

    pub fn dismiss_crisis_alert(&mut self) {
        self.crisis_alert_visible = false;
    }

    /// Logs out a session that has expired while the app was running.
    ///
    /// Returns true when a logout happened.
    pub fn enforce_expiry(&mut self) -> bool {
        let now = self.clock.now_millis();
        match &self.session {
            Some(session) if !session.is_valid_at(now) => {
                info!("session expired mid-run");
                self.logout();
                true
            }
            _ => false,
        }
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(session) {
            warn!(error = %e, "failed to persist session record");
        }
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to delete session record");
        }
    }
}

impl CrisisListener for SessionController {
    fn on_crisis_detected(&mut self) {
        info!("crisis detected; raising alert");
        self.raise_crisis_alert();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::SESSION_DURATION_MS;
    use crate::store::MemorySessionStore;

    const NOW: i64 = 1_700_000_000_000;

    fn persona(completed: bool, expiry: i64) -> Session {
        Session {
            id: "p-1".into(),
            email: Some("p@example.org".into()),
            is_anonymous: false,
            has_completed_quiz: completed,
            session_expiry: expiry,
        }
    }

    fn controller(store: &MemorySessionStore, clock: &ManualClock) -> SessionController {
        SessionController::new(Box::new(store.clone()), Arc::new(clock.clone()))
    }

    #[test]
    fn starts_logged_out_on_login_view() {
        let c = controller(&MemorySessionStore::new(), &ManualClock::new(NOW));
        assert!(c.session().is_none());
        assert_eq!(c.view(), View::Login);
        assert!(!c.crisis_alert_visible());
    }

    #[test]
    fn restore_discards_expired_records() {
        let clock = ManualClock::new(NOW);
        for (completed, expiry) in [(false, NOW), (true, NOW - 1), (true, 0)] {
            let store = MemorySessionStore::with_session(&persona(completed, expiry));
            let mut c = controller(&store, &clock);
            c.restore_session();
            assert!(c.session().is_none());
            assert_eq!(c.view(), View::Login);
            assert_eq!(store.raw(), None, "expired record must be deleted");
        }
    }

    #[test]
    fn restore_survives_extreme_expiry_values() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let clock = ManualClock::new(NOW);

            let store = MemorySessionStore::with_raw(
                r#"{"id":"x","isAnonymous":true,"hasCompletedQuiz":false,"sessionExpiry":-9223372036854775808}"#,
            );
            let mut c = controller(&store, &clock);
            c.restore_session();
            assert!(c.session().is_none());
            assert_eq!(c.view(), View::Login);
            assert_eq!(store.raw(), None);

            let store = MemorySessionStore::with_session(&persona(true, i64::MAX));
            let mut c = controller(&store, &clock);
            c.restore_session();
            assert_eq!(c.view(), View::Dashboard);
            assert_eq!(c.session().unwrap().remaining_ms(NOW), i64::MAX - NOW);
        });
    }

    #[test]
    fn restore_live_record_picks_view_from_quiz_flag() {
        let clock = ManualClock::new(NOW);
        for (completed, view) in [(false, View::Quiz), (true, View::Dashboard)] {
            let p = persona(completed, NOW + 1);
            let store = MemorySessionStore::with_session(&p);
            let mut c = controller(&store, &clock);
            c.restore_session();
            assert_eq!(c.session(), Some(&p));
            assert_eq!(c.view(), view);
        }
    }

    #[test]
    fn restore_tolerates_malformed_record() {
        let store = MemorySessionStore::with_raw("{\"id\": 12");
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.restore_session();
        assert!(c.session().is_none());
        assert_eq!(c.view(), View::Login);
    }

    #[test]
    fn login_persists_and_goes_to_quiz() {
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.login(LoginRequest::email("me@x.io"));

        let session = c.session().unwrap().clone();
        assert_eq!(session.session_expiry, NOW + 3_600_000);
        assert_eq!(c.view(), View::Quiz);
        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn login_with_known_completion_goes_to_dashboard() {
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.login(LoginRequest::anonymous().with_completed_quiz(true));
        assert_eq!(c.view(), View::Dashboard);
    }

    #[test]
    fn login_overwrites_previous_record() {
        let old = persona(true, NOW + 10);
        let store = MemorySessionStore::with_session(&old);
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.login(LoginRequest::anonymous());
        let saved = store.load().unwrap().unwrap();
        assert_ne!(saved.id, old.id);
        assert!(saved.is_anonymous);
    }

    #[test]
    fn complete_quiz_is_idempotent() {
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.login(LoginRequest::anonymous());

        c.complete_quiz();
        let first = c.session().cloned();
        c.complete_quiz();

        assert_eq!(c.session().cloned(), first);
        assert!(c.session().unwrap().has_completed_quiz);
        assert_eq!(c.view(), View::Dashboard);
        assert!(store.load().unwrap().unwrap().has_completed_quiz);
    }

    #[test]
    fn complete_quiz_without_session_is_noop() {
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.complete_quiz();
        assert!(c.session().is_none());
        assert_eq!(c.view(), View::Login);
        assert_eq!(store.raw(), None);
    }

    #[test]
    fn navigate_does_not_persist() {
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.login(LoginRequest::anonymous());
        let before = store.raw();
        c.navigate(View::Mood);
        assert_eq!(c.view(), View::Mood);
        assert_eq!(store.raw(), before);
    }

    #[test]
    fn logout_clears_everything() {
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &ManualClock::new(NOW));
        c.login(LoginRequest::email("a@b.c"));
        c.raise_crisis_alert();

        c.logout();
        assert!(c.session().is_none());
        assert_eq!(store.raw(), None);
        assert_eq!(c.view(), View::Login);
        assert!(!c.crisis_alert_visible());
    }

    #[test]
    fn crisis_alert_only_clears_on_dismiss() {
        let clock = ManualClock::new(NOW);
        let mut c = controller(&MemorySessionStore::new(), &clock);
        c.on_crisis_detected();
        clock.advance(10 * 60 * 1000);
        assert!(c.crisis_alert_visible());
        c.dismiss_crisis_alert();
        assert!(!c.crisis_alert_visible());
    }

    #[test]
    fn enforce_expiry_logs_out_stale_session() {
        let clock = ManualClock::new(NOW);
        let store = MemorySessionStore::new();
        let mut c = controller(&store, &clock);
        c.login(LoginRequest::anonymous());

        clock.advance(SESSION_DURATION_MS - 1);
        assert!(!c.enforce_expiry());
        assert!(c.session().is_some());

        clock.advance(1);
        assert!(c.enforce_expiry());
        assert!(c.session().is_none());
        assert_eq!(c.view(), View::Login);
        assert_eq!(store.raw(), None);
    }
}
