use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    achievements::ACHIEVEMENTS,
    app::{App, Toast, ToastKind},
    ui::{bold_style, dim_style, italic_style},
};

const TOAST_MAX_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Correct => Color::Green,
        ToastKind::Wrong => Color::Red,
        ToastKind::Achievement => Color::Yellow,
        ToastKind::TimeUp => Color::Cyan,
    }
}

/// Stack toasts in the top-right corner, newest at the bottom
pub fn render_toasts(toasts: &[Toast], area: Rect, buf: &mut Buffer) {
    let mut y = area.y;
    for toast in toasts {
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let width = (toast.text.width() as u16 + 4)
            .min(TOAST_MAX_WIDTH)
            .min(area.width);
        let rect = Rect::new(area.right() - width, y, width, TOAST_HEIGHT);
        let color = toast_color(toast.kind);

        Clear.render(rect, buf);
        Paragraph::new(Span::styled(toast.text.clone(), bold_style().fg(color)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .render(rect, buf);
        y += TOAST_HEIGHT;
    }
}

/// Centered popup listing every achievement and whether it is unlocked
pub fn render_achievements(app: &App, area: Rect, buf: &mut Buffer) {
    let tracker = app.session.achievements();
    let width = area.width.saturating_sub(4).min(70);
    let height = (ACHIEVEMENTS.len() as u16 * 2 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let lines: Vec<Line> = tracker
        .overview()
        .flat_map(|(achievement, unlocked)| {
            let (mark, title_style) = if unlocked {
                let when = tracker
                    .unlocked_at(achievement.id)
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default();
                (format!("✅ {when}"), bold_style().fg(Color::Yellow))
            } else {
                ("🔒".to_string(), dim_style())
            };
            [
                Line::from(vec![
                    Span::raw(format!("{} ", achievement.icon)),
                    Span::styled(achievement.title, title_style),
                    Span::raw("  "),
                    Span::raw(mark),
                ]),
                Line::from(Span::styled(
                    format!("   {}", achievement.description),
                    italic_style(),
                )),
            ]
        })
        .collect();

    let (unlocked, total) = app.achievement_progress();
    Clear.render(rect, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" 🏆 Достижения {unlocked}/{total} "),
                    bold_style(),
                ))
                .title_alignment(Alignment::Center),
        )
        .wrap(Wrap { trim: false })
        .render(rect, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::topic::TopicId;
    use crate::ui::test_support::{app, draw, text};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_achievement_toast_is_drawn() {
        let mut app = app();
        app.start(Grade::new(1), Some(TopicId::Logic), false);
        let correct = app.session.question().unwrap().correct_answer;
        app.on_key(KeyEvent::new(
            KeyCode::Char(char::from(b'1' + correct as u8)),
            KeyModifiers::NONE,
        ));

        let rendered = text(&draw(&app, 120, 30));
        assert!(rendered.contains("Новое достижение"));
    }

    #[test]
    fn test_panel_marks_unlocked() {
        let mut app = app();
        app.start(Grade::new(1), Some(TopicId::Addition), false);
        let correct = app.session.question().unwrap().correct_answer;
        app.on_key(KeyEvent::new(
            KeyCode::Char(char::from(b'1' + correct as u8)),
            KeyModifiers::NONE,
        ));
        app.show_achievements = true;
        app.toasts.clear();

        let rendered = text(&draw(&app, 100, 30));
        assert!(rendered.contains("Достижения 1/7"));
        assert!(rendered.contains("Первый шаг"));
        assert!(rendered.contains("Молния"));
    }

    #[test]
    fn test_toasts_clip_to_tiny_area() {
        let toasts = vec![Toast::from(crate::session::Notification::Toast {
            correct: true,
            text: "🎉 Правильно!".into(),
        })];
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        render_toasts(&toasts, area, &mut buf);
        assert_eq!(buf.area, area);
    }
}
