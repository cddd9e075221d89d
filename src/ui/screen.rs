use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::{App, View},
    session::Phase,
    ui::{menus, overlays, practice},
};

/// A UI Screen boundary: one per [`View`], rendering the body between
/// the header and the key legend
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
    fn legend(&self, app: &App) -> &'static str;
}

pub struct GradeScreen;

impl Screen for GradeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        menus::render_grade_menu(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "(1-4) класс / (↑↓ enter) выбор / (a) достижения / (esc) выход"
    }
}

pub struct TopicScreen;

impl Screen for TopicScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        menus::render_topic_menu(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "(↑↓) тема / (enter) начать / (t) игра на время / (g) класс / (a) достижения / (q) выход"
    }
}

pub struct QuestionScreen;

impl Screen for QuestionScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        practice::render_question(app, area, buf);
    }

    fn legend(&self, app: &App) -> &'static str {
        let session = &app.session;
        match (session.phase(), session.is_timer_mode()) {
            (Phase::ShowingFeedback, false) if session.last_answer_correct() == Some(false) => {
                "(enter) дальше / (h) подсказка / (esc) к темам"
            }
            (Phase::ShowingFeedback, false) => "(enter) дальше / (esc) к темам",
            _ => "(1-4) ответ / (esc) к темам",
        }
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        practice::render_summary(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "(r) ещё раз / (a) достижения / (esc) к темам"
    }
}

/// Achievements popup, drawn over whatever screen is current
pub struct AchievementsScreen;

impl Screen for AchievementsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        overlays::render_achievements(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "(a / esc) закрыть"
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Grades => Box::new(GradeScreen),
        View::Topics => Box::new(TopicScreen),
        View::Question => Box::new(QuestionScreen),
        View::Summary => Box::new(SummaryScreen),
    }
}
