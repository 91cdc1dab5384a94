use std::collections::BTreeMap;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOption {
    pub value: u8,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub prompt: &'static str,
    pub options: [QuizOption; 5],
}

const fn options(labels: [&'static str; 5]) -> [QuizOption; 5] {
    [
        QuizOption { value: 1, label: labels[0] },
        QuizOption { value: 2, label: labels[1] },
        QuizOption { value: 3, label: labels[2] },
        QuizOption { value: 4, label: labels[3] },
        QuizOption { value: 5, label: labels[4] },
    ]
}

pub const QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        prompt: "How would you describe your current stress level?",
        options: options(["Very Low", "Low", "Moderate", "High", "Very High"]),
    },
    Question {
        id: 2,
        prompt: "How often do you experience anxiety?",
        options: options(["Never", "Rarely", "Sometimes", "Often", "Daily"]),
    },
    Question {
        id: 3,
        prompt: "How well do you sleep at night?",
        options: options(["Excellent", "Good", "Fair", "Poor", "Very Poor"]),
    },
    Question {
        id: 4,
        prompt: "How connected do you feel to others?",
        options: options([
            "Very Connected",
            "Connected",
            "Neutral",
            "Disconnected",
            "Very Disconnected",
        ]),
    },
    Question {
        id: 5,
        prompt: "What's your primary goal for mental wellness?",
        options: options([
            "Stress Management",
            "Better Sleep",
            "Emotional Balance",
            "Social Connection",
            "Overall Well-being",
        ]),
    },
];

/// What a quiz key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    Stay,
    Submitted,
}

/// Progress through the wellness assessment
#[derive(Debug, Clone)]
pub struct QuizState {
    questions: &'static [Question],
    current: usize,
    /// Highlighted option index for the current question
    cursor: usize,
    answers: BTreeMap<u8, u8>,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new(&QUESTIONS)
    }
}

impl QuizState {
    pub fn new(questions: &'static [Question]) -> Self {
        Self {
            questions,
            current: 0,
            cursor: 0,
            answers: BTreeMap::new(),
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// Completion in percent, counting the question on screen
    pub fn progress(&self) -> u16 {
        (((self.current + 1) as f64 / self.questions.len() as f64) * 100.0).round() as u16
    }

    pub fn answer_for(&self, question_id: u8) -> Option<u8> {
        self.answers.get(&question_id).copied()
    }

    pub fn current_answer(&self) -> Option<u8> {
        self.answer_for(self.current_question().id)
    }

    pub fn answers(&self) -> &BTreeMap<u8, u8> {
        &self.answers
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let max = self.current_question().options.len() - 1;
        self.cursor = (self.cursor + 1).min(max);
    }

    /// Records the highlighted option as the answer to the current question
    pub fn select(&mut self) {
        let q = self.current_question();
        let (id, value) = (q.id, q.options[self.cursor].value);
        self.answers.insert(id, value);
    }

    /// Moves forward once the current question has an answer
    pub fn next(&mut self) -> bool {
        if self.current_answer().is_none() || self.is_last() {
            return false;
        }
        self.current += 1;
        self.sync_cursor();
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.sync_cursor();
        true
    }

    pub fn can_submit(&self) -> bool {
        self.is_last() && self.current_answer().is_some()
    }

    /// Enter: answer the highlighted option, then advance or submit
    pub fn confirm(&mut self) -> QuizStep {
        self.select();
        if self.can_submit() {
            debug!(answers = ?self.answers, "quiz submitted");
            QuizStep::Submitted
        } else {
            self.next();
            QuizStep::Stay
        }
    }

    fn sync_cursor(&mut self) {
        self.cursor = self
            .current_answer()
            .and_then(|v| {
                self.current_question()
                    .options
                    .iter()
                    .position(|o| o.value == v)
            })
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_five_questions_of_five_options() {
        assert_eq!(QUESTIONS.len(), 5);
        for q in QUESTIONS {
            let values: Vec<u8> = q.options.iter().map(|o| o.value).collect();
            assert_eq!(values, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn next_requires_an_answer() {
        let mut quiz = QuizState::default();
        assert!(!quiz.next());
        assert_eq!(quiz.current_index(), 0);

        quiz.cursor_down();
        quiz.select();
        assert_eq!(quiz.current_answer(), Some(2));
        assert!(quiz.next());
        assert_eq!(quiz.current_index(), 1);
        assert_eq!(quiz.cursor(), 0);
    }

    #[test]
    fn previous_restores_cursor_to_answer() {
        let mut quiz = QuizState::default();
        quiz.cursor_down();
        quiz.cursor_down();
        quiz.select();
        quiz.next();
        assert!(quiz.previous());
        assert_eq!(quiz.cursor(), 2);
        assert!(!quiz.previous());
    }

    #[test]
    fn cursor_is_clamped() {
        let mut quiz = QuizState::default();
        quiz.cursor_up();
        assert_eq!(quiz.cursor(), 0);
        for _ in 0..10 {
            quiz.cursor_down();
        }
        assert_eq!(quiz.cursor(), 4);
    }

    #[test]
    fn confirm_walks_to_submission() {
        let mut quiz = QuizState::default();
        for i in 0..4 {
            assert_eq!(quiz.confirm(), QuizStep::Stay);
            assert_eq!(quiz.current_index(), i + 1);
        }
        assert!(quiz.is_last());
        assert!(!quiz.can_submit());
        assert_eq!(quiz.confirm(), QuizStep::Submitted);
        assert_eq!(quiz.answers().len(), 5);
    }

    #[test]
    fn progress_counts_current_question() {
        let mut quiz = QuizState::default();
        assert_eq!(quiz.progress(), 20);
        quiz.confirm();
        quiz.confirm();
        assert_eq!(quiz.progress(), 60);
    }
}
