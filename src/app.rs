use crate::achievements::ACHIEVEMENTS;
use crate::config::Config;
use crate::grade::Grade;
use crate::randomizer::Randomizer;
use crate::session::{Notification, Phase, Session};
use crate::topic::{Catalogue, TopicId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(2);
const MAX_TOASTS: usize = 3;

/// Which screen is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Grades,
    Topics,
    Question,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Correct,
    Wrong,
    Achievement,
    TimeUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    remaining: Duration,
}

impl Toast {
    fn new(kind: ToastKind, text: String) -> Self {
        Self {
            kind,
            text,
            remaining: TOAST_TTL,
        }
    }
}

impl From<Notification> for Toast {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::AchievementUnlocked(u) => Toast::new(
                ToastKind::Achievement,
                format!("{} Новое достижение: {}", u.icon, u.title),
            ),
            Notification::Toast { correct: true, text } => Toast::new(ToastKind::Correct, text),
            Notification::Toast { correct: false, text } => Toast::new(ToastKind::Wrong, text),
            Notification::TimeUp(result) => Toast::new(
                ToastKind::TimeUp,
                format!("⏰ Время вышло! Правильно: {}", result.correct),
            ),
        }
    }
}

/// Terminal front end state: the session plus menu cursors and overlays
pub struct App {
    pub session: Session,
    pub catalogue: Catalogue,
    rng: Box<dyn Randomizer>,
    pub cursor: usize,
    /// Grade menu reopened from the topic menu
    pub picking_grade: bool,
    pub show_achievements: bool,
    pub toasts: Vec<Toast>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, catalogue: Catalogue, rng: Box<dyn Randomizer>) -> Self {
        Self {
            session: Session::new(config),
            catalogue,
            rng,
            cursor: 0,
            picking_grade: false,
            show_achievements: false,
            toasts: Vec::new(),
            should_quit: false,
        }
    }

    pub fn view(&self) -> View {
        match self.session.phase() {
            Phase::GradeSelect => View::Grades,
            Phase::TopicSelect if self.picking_grade => View::Grades,
            Phase::TopicSelect => View::Topics,
            Phase::AwaitingAnswer | Phase::ShowingFeedback => View::Question,
            Phase::SessionEnd => View::Summary,
        }
    }

    /// Apply command line preselections
    pub fn start(&mut self, grade: Option<Grade>, topic: Option<TopicId>, timer: bool) {
        if let Some(grade) = grade {
            self.session.select_grade(grade);
        }
        match (topic, timer) {
            (Some(topic), timer_mode) => {
                if !self.session.select_topic(topic, timer_mode, self.rng.as_mut()) {
                    tracing::warn!(%topic, "topic not offered for grade, showing menu");
                }
            }
            (None, true) => self.session.restart_timer(self.rng.as_mut()),
            (None, false) => {}
        }
    }

    /// Entries in the current menu
    pub fn menu_len(&self) -> usize {
        match self.view() {
            View::Grades => Grade::ALL.len(),
            View::Topics => self.session.available_topics().len(),
            View::Question | View::Summary => 0,
        }
    }

    pub fn highlighted_topic(&self) -> Option<TopicId> {
        self.session.available_topics().get(self.cursor).copied()
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.toasts.retain_mut(|toast| {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
            !toast.remaining.is_zero()
        });
        let notifications = self.session.on_elapsed(elapsed, self.rng.as_mut());
        self.notify(notifications);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.show_achievements {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('a')) {
                self.show_achievements = false;
            }
            return;
        }

        match self.view() {
            View::Grades => self.on_grade_key(key.code),
            View::Topics => self.on_topic_key(key.code),
            View::Question => self.on_question_key(key.code),
            View::Summary => self.on_summary_key(key.code),
        }
    }

    fn on_grade_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                if self.picking_grade {
                    self.picking_grade = false;
                    self.cursor = 0;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(grade) = c.to_digit(10).and_then(|d| Grade::new(d as u8)) {
                    self.choose_grade(grade);
                }
            }
            KeyCode::Enter => {
                if let Some(grade) = Grade::ALL.get(self.cursor).copied() {
                    self.choose_grade(grade);
                }
            }
            KeyCode::Char('a') => self.show_achievements = true,
            code => self.move_cursor(code),
        }
    }

    fn on_topic_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('g') => {
                self.picking_grade = true;
                self.cursor = self
                    .session
                    .grade()
                    .map(|g| usize::from(g.level() - 1))
                    .unwrap_or(0);
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter => {
                if let Some(topic) = self.highlighted_topic() {
                    self.session.select_topic(topic, false, self.rng.as_mut());
                }
            }
            KeyCode::Char('t') => self.session.restart_timer(self.rng.as_mut()),
            KeyCode::Char('a') => self.show_achievements = true,
            code => self.move_cursor(code),
        }
    }

    fn on_question_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    let notifications = self.session.submit_answer(digit as usize - 1);
                    self.notify(notifications);
                }
            }
            KeyCode::Char('h') => self.session.request_hint(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') => {
                self.session.request_next(self.rng.as_mut())
            }
            KeyCode::Char('a') => self.show_achievements = true,
            KeyCode::Esc => self.back_to_topics(),
            _ => {}
        }
    }

    fn on_summary_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('r') | KeyCode::Enter => self.session.restart_timer(self.rng.as_mut()),
            KeyCode::Char('a') => self.show_achievements = true,
            KeyCode::Esc => self.back_to_topics(),
            _ => {}
        }
    }

    fn choose_grade(&mut self, grade: Grade) {
        self.session.select_grade(grade);
        self.picking_grade = false;
        self.cursor = 0;
    }

    fn back_to_topics(&mut self) {
        self.session.exit_to_topics();
        self.cursor = 0;
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let len = self.menu_len();
        if len == 0 {
            return;
        }
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = (self.cursor + len - 1) % len;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1) % len;
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len - 1,
            _ => {}
        }
    }

    fn notify(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.toasts.push(Toast::from(notification));
        }
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
    }

    /// (unlocked, total) achievement counts for the header
    pub fn achievement_progress(&self) -> (usize, usize) {
        (
            self.session.achievements().unlocked_count(),
            ACHIEVEMENTS.len(),
        )
    }
}
