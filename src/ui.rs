pub mod menus;
pub mod overlays;
pub mod practice;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::App;
use screen::{current_screen, AchievementsScreen, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub(crate) fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub(crate) fn highlight_style() -> Style {
    bold_style().fg(Color::Yellow)
}

/// `m:ss`
pub(crate) fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1), // padding
                Constraint::Min(1),    // body
                Constraint::Length(1), // legend
            ])
            .split(area);

        header(self).render(chunks[0], buf);

        let screen = current_screen(self.view());
        screen.render(self, chunks[2], buf);

        let legend = if self.show_achievements {
            AchievementsScreen.legend(self)
        } else {
            screen.legend(self)
        };
        Paragraph::new(Span::styled(legend, italic_style()))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if self.show_achievements {
            AchievementsScreen.render(self, area, buf);
        }
        overlays::render_toasts(&self.toasts, area, buf);
    }
}

fn header(app: &App) -> Paragraph<'static> {
    let (unlocked, total) = app.achievement_progress();
    let mut spans = vec![Span::styled(
        "Математика — это весело! 🎓",
        bold_style().fg(Color::Magenta),
    )];
    if let Some(grade) = app.session.grade() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(grade.label(), bold_style()));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("🏆 {unlocked}/{total}"),
        dim_style().patch(bold_style()),
    ));
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::app::App;
    use crate::config::Config;
    use crate::randomizer::SeededRandomizer;
    use crate::topic::Catalogue;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    pub fn app() -> App {
        App::new(
            Config::default(),
            Catalogue::embedded().unwrap(),
            Box::new(SeededRandomizer::new(11)),
        )
    }

    pub fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| f.render_widget(app, f.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Buffer rows joined with newlines
    pub fn text(buf: &Buffer) -> String {
        let width = buf.area().width as usize;
        buf.content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
