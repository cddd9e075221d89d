//! Practice session state machine.
//!
//! A [`Session`] walks through grade selection, topic selection, answering
//! and feedback. Timed drills add a countdown and an automatic advance after
//! every answer. Time never comes from a clock here: the runtime feeds
//! [`Session::on_elapsed`] (or [`Session::on_tick`] directly), so every run
//! can be replayed with a scripted randomizer.

use crate::achievements::{AchievementTracker, AchievementUnlocked, Progress};
use crate::config::Config;
use crate::generator;
use crate::grade::Grade;
use crate::question::Question;
use crate::randomizer::Randomizer;
use crate::timer::{Countdown, CountdownStatus, Deferred};
use crate::topic::TopicId;
use serde::Serialize;
use std::time::Duration;

pub const CORRECT_TOAST: &str = "🎉 Правильно!";
pub const WRONG_TOAST: &str = "😊 Попробуй ещё раз!";

/// Final tally of a timed drill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimerResult {
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
}

/// Where the session is, derived from its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Phase {
    GradeSelect,
    TopicSelect,
    AwaitingAnswer,
    ShowingFeedback,
    SessionEnd,
}

/// Something the shell should announce to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    AchievementUnlocked(AchievementUnlocked),
    Toast { correct: bool, text: String },
    TimeUp(TimerResult),
}

/// Every input the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SelectGrade(Grade),
    SelectTopic { topic: TopicId, timer_mode: bool },
    SubmitAnswer(usize),
    RequestHint,
    RequestNext,
    Tick,
    Elapsed(Duration),
    RestartTimer,
    ExitToTopics,
}

/// Serializable summary of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub grade: Option<Grade>,
    pub topic: Option<TopicId>,
    pub score: u32,
    pub total_attempts: u32,
    pub streak: u32,
    pub total_correct: u32,
    pub is_timer_mode: bool,
    pub remaining_seconds: u32,
    pub timer_result: Option<TimerResult>,
    pub achievements_unlocked: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    selected_grade: Option<Grade>,
    selected_topic: Option<TopicId>,
    current_question: Option<Question>,
    score: u32,
    total_attempts: u32,
    selected_answer: Option<usize>,
    show_explanation: bool,
    show_hint: bool,
    is_timer_mode: bool,
    countdown: Countdown,
    auto_advance: Deferred,
    timer_result: Option<TimerResult>,
    /// Streak and cumulative counters survive topic and grade changes
    progress: Progress,
    achievements: AchievementTracker,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            selected_grade: None,
            selected_topic: None,
            current_question: None,
            score: 0,
            total_attempts: 0,
            selected_answer: None,
            show_explanation: false,
            show_hint: false,
            is_timer_mode: false,
            countdown: Countdown::default(),
            auto_advance: Deferred::default(),
            timer_result: None,
            progress: Progress::default(),
            achievements: AchievementTracker::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.timer_result.is_some() {
            Phase::SessionEnd
        } else if self.selected_topic.is_none() || self.current_question.is_none() {
            if self.selected_grade.is_none() {
                Phase::GradeSelect
            } else {
                Phase::TopicSelect
            }
        } else if self.selected_answer.is_some() {
            Phase::ShowingFeedback
        } else {
            Phase::AwaitingAnswer
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grade(&self) -> Option<Grade> {
        self.selected_grade
    }

    pub fn topic(&self) -> Option<TopicId> {
        self.selected_topic
    }

    pub fn question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn show_explanation(&self) -> bool {
        self.show_explanation
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    pub fn is_timer_mode(&self) -> bool {
        self.is_timer_mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn is_advance_pending(&self) -> bool {
        self.auto_advance.is_pending()
    }

    pub fn timer_result(&self) -> Option<TimerResult> {
        self.timer_result
    }

    pub fn streak(&self) -> u32 {
        self.progress.streak
    }

    pub fn total_correct(&self) -> u32 {
        self.progress.total_correct
    }

    pub fn achievements(&self) -> &AchievementTracker {
        &self.achievements
    }

    /// Whether the last submitted answer was right
    pub fn last_answer_correct(&self) -> Option<bool> {
        let question = self.current_question.as_ref()?;
        self.selected_answer.map(|i| question.is_correct(i))
    }

    /// Topics offered for the selected grade (or the default grade)
    pub fn available_topics(&self) -> Vec<TopicId> {
        TopicId::available_for(self.effective_grade())
    }

    fn effective_grade(&self) -> Grade {
        self.selected_grade.unwrap_or(self.config.default_grade)
    }

    pub fn select_grade(&mut self, grade: Grade) {
        tracing::debug!(%grade, "grade selected");
        self.selected_grade = Some(grade);
        self.leave_topic();
        self.score = 0;
        self.total_attempts = 0;
    }

    /// Start practising `topic`. Returns false, changing nothing, when the
    /// topic is not offered for the current grade.
    pub fn select_topic(
        &mut self,
        topic: TopicId,
        timer_mode: bool,
        rng: &mut dyn Randomizer,
    ) -> bool {
        let grade = self.effective_grade();
        if !topic.is_available_for(grade) {
            tracing::debug!(%topic, %grade, "topic not offered for grade");
            return false;
        }
        tracing::debug!(%topic, %grade, timer_mode, "topic selected");

        self.selected_grade = Some(grade);
        self.selected_topic = Some(topic);
        self.score = 0;
        self.total_attempts = 0;
        self.timer_result = None;
        self.auto_advance.cancel();
        self.is_timer_mode = timer_mode;
        if timer_mode {
            self.countdown.start(self.config.drill_secs());
            self.progress.timer_correct = 0;
        } else {
            self.countdown.cancel();
        }
        self.next_question(topic, grade, rng);
        true
    }

    /// Record an answer. The follow-up question is drawn later, by
    /// [`Session::request_next`] or the timed auto-advance.
    pub fn submit_answer(&mut self, index: usize) -> Vec<Notification> {
        let phase = self.phase();
        if phase != Phase::AwaitingAnswer {
            tracing::debug!(%phase, index, "answer ignored");
            return Vec::new();
        }
        let Some(question) = self.current_question.as_ref() else {
            return Vec::new();
        };
        if index >= question.options.len() {
            tracing::debug!(index, "answer index out of range");
            return Vec::new();
        }

        let correct = question.is_correct(index);
        let right_option = question.correct_option().to_string();
        self.selected_answer = Some(index);
        self.total_attempts += 1;
        if correct {
            self.score += 1;
            self.progress.total_correct += 1;
            self.progress.streak += 1;
            if self.is_timer_mode {
                self.progress.timer_correct += 1;
            }
        } else {
            self.progress.streak = 0;
        }
        tracing::debug!(
            correct,
            score = self.score,
            attempts = self.total_attempts,
            streak = self.progress.streak,
            "answer submitted"
        );

        let mut notifications: Vec<Notification> = self
            .achievements
            .check(&self.progress)
            .into_iter()
            .map(Notification::AchievementUnlocked)
            .collect();

        if self.is_timer_mode {
            let text = if correct {
                CORRECT_TOAST.to_string()
            } else {
                format!("{WRONG_TOAST} Правильный ответ: {right_option}")
            };
            notifications.push(Notification::Toast { correct, text });
            self.auto_advance.schedule(self.config.auto_advance());
        } else {
            self.show_explanation = true;
        }
        notifications
    }

    /// Reveal the hint, only after a wrong answer
    pub fn request_hint(&mut self) {
        if self.last_answer_correct() == Some(false) && self.timer_result.is_none() {
            self.show_hint = true;
        }
    }

    /// Move on after reading the explanation. Timed drills advance by themselves.
    pub fn request_next(&mut self, rng: &mut dyn Randomizer) {
        if self.is_timer_mode || self.phase() != Phase::ShowingFeedback {
            return;
        }
        self.advance(rng);
    }

    /// One second of the drill countdown
    pub fn on_tick(&mut self) -> Vec<Notification> {
        match self.countdown.tick() {
            CountdownStatus::Expired => {
                let result = TimerResult {
                    correct: self.score,
                    wrong: self.total_attempts - self.score,
                    total: self.total_attempts,
                };
                self.timer_result = Some(result);
                self.auto_advance.cancel();
                tracing::info!(
                    correct = result.correct,
                    wrong = result.wrong,
                    total = result.total,
                    "timed drill finished"
                );
                vec![Notification::TimeUp(result)]
            }
            CountdownStatus::Running(_) | CountdownStatus::Idle => Vec::new(),
        }
    }

    /// Feed wall time in: fires due countdown seconds, then a due auto-advance
    pub fn on_elapsed(&mut self, elapsed: Duration, rng: &mut dyn Randomizer) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for _ in 0..self.countdown.due_seconds(elapsed) {
            notifications.extend(self.on_tick());
        }
        if self.auto_advance.advance(elapsed) {
            self.advance(rng);
        }
        notifications
    }

    /// Start another mixed drill
    pub fn restart_timer(&mut self, rng: &mut dyn Randomizer) {
        self.select_topic(TopicId::Mixed, true, rng);
    }

    /// Back to the topic menu, keeping the grade
    pub fn exit_to_topics(&mut self) {
        tracing::debug!("back to topics");
        self.leave_topic();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            grade: self.selected_grade,
            topic: self.selected_topic,
            score: self.score,
            total_attempts: self.total_attempts,
            streak: self.progress.streak,
            total_correct: self.progress.total_correct,
            is_timer_mode: self.is_timer_mode,
            remaining_seconds: self.countdown.remaining_secs(),
            timer_result: self.timer_result,
            achievements_unlocked: self.achievements.unlocked_count(),
        }
    }

    pub fn dispatch(&mut self, event: SessionEvent, rng: &mut dyn Randomizer) -> Vec<Notification> {
        match event {
            SessionEvent::SelectGrade(grade) => self.select_grade(grade),
            SessionEvent::SelectTopic { topic, timer_mode } => {
                self.select_topic(topic, timer_mode, rng);
            }
            SessionEvent::SubmitAnswer(index) => return self.submit_answer(index),
            SessionEvent::RequestHint => self.request_hint(),
            SessionEvent::RequestNext => self.request_next(rng),
            SessionEvent::Tick => return self.on_tick(),
            SessionEvent::Elapsed(elapsed) => return self.on_elapsed(elapsed, rng),
            SessionEvent::RestartTimer => self.restart_timer(rng),
            SessionEvent::ExitToTopics => self.exit_to_topics(),
        }
        Vec::new()
    }

    fn leave_topic(&mut self) {
        self.selected_topic = None;
        self.current_question = None;
        self.selected_answer = None;
        self.show_explanation = false;
        self.show_hint = false;
        self.is_timer_mode = false;
        self.timer_result = None;
        self.countdown.cancel();
        self.auto_advance.cancel();
    }

    fn advance(&mut self, rng: &mut dyn Randomizer) {
        if let Some(topic) = self.selected_topic {
            let grade = self.effective_grade();
            self.next_question(topic, grade, rng);
        }
    }

    fn next_question(&mut self, topic: TopicId, grade: Grade, rng: &mut dyn Randomizer) {
        self.selected_answer = None;
        self.show_explanation = false;
        self.show_hint = false;
        self.current_question = Some(generator::generate(topic, grade, rng));
    }
}

/// By-value form of [`Session::dispatch`]
pub fn transition(
    mut session: Session,
    event: SessionEvent,
    rng: &mut dyn Randomizer,
) -> (Session, Vec<Notification>) {
    let notifications = session.dispatch(event, rng);
    (session, notifications)
}
