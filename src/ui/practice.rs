use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    session::Phase,
    ui::{bold_style, dim_style, format_clock, italic_style},
};

pub fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let Some(question) = session.question() else {
        return;
    };

    let green_bold_style = bold_style().fg(Color::Green);
    let red_bold_style = bold_style().fg(Color::Red);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Length(1),
            Constraint::Length(3), // question
            Constraint::Length(1),
            Constraint::Length(question.options.len() as u16), // options
            Constraint::Length(1),
            Constraint::Min(0), // feedback
        ])
        .split(area);

    let topic = session
        .topic()
        .map(|t| app.catalogue.title(t))
        .unwrap_or_default();
    let mut status = vec![
        Span::styled(topic, bold_style()),
        Span::raw("   "),
        Span::styled(
            format!("⭐ {} из {}", session.score(), session.total_attempts()),
            bold_style().fg(Color::Yellow),
        ),
    ];
    if session.streak() >= 2 {
        status.push(Span::raw("   "));
        status.push(Span::styled(
            format!("🔥 {} подряд", session.streak()),
            bold_style().fg(Color::LightRed),
        ));
    }
    if session.is_timer_mode() {
        status.push(Span::raw("   "));
        status.push(Span::styled(
            format!("⏱ {}", format_clock(session.remaining_seconds())),
            bold_style().fg(Color::Cyan),
        ));
    }
    Paragraph::new(Line::from(status))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(question.question.clone(), bold_style()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let options: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let style = match session.selected_answer() {
                Some(_) if question.is_correct(idx) => green_bold_style,
                Some(picked) if picked == idx => red_bold_style,
                Some(_) => dim_style(),
                None => Style::default(),
            };
            Line::from(Span::styled(format!("{}) {option}", idx + 1), style))
        })
        .collect();
    Paragraph::new(options)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    if session.phase() != Phase::ShowingFeedback {
        return;
    }
    let mut feedback = Vec::new();
    match session.last_answer_correct() {
        Some(true) => feedback.push(Line::from(Span::styled("🎉 Правильно!", green_bold_style))),
        Some(false) => feedback.push(Line::from(Span::styled(
            format!("😊 Попробуй ещё раз! Ответ: {}", question.correct_option()),
            red_bold_style,
        ))),
        None => {}
    }
    if session.show_explanation() {
        feedback.push(Line::from(Span::raw(question.explanation.clone())));
    }
    if session.show_hint() {
        feedback.push(Line::from(Span::styled(
            format!("💡 {}", question.hint),
            italic_style().fg(Color::Cyan),
        )));
    }
    Paragraph::new(feedback)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[6], buf);
}

pub fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.session.timer_result() else {
        return;
    };
    let praise = match result.correct {
        0 => "Попробуй ещё раз, у тебя получится!",
        1..=9 => "Хорошая работа! 👍",
        10..=19 => "Отлично! Ты настоящий знаток! 🌟",
        _ => "Невероятно! Ты молния! ⚡",
    };

    let lines = vec![
        Line::from(Span::styled("⏰ Время вышло!", bold_style().fg(Color::Yellow))),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("Правильно: {}", result.correct), bold_style().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(format!("Ошибок: {}", result.wrong), bold_style().fg(Color::Red)),
            Span::raw("   "),
            Span::styled(format!("Всего: {}", result.total), bold_style()),
        ]),
        Line::default(),
        Line::from(Span::styled(praise, italic_style())),
    ];

    let vertical_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(vertical_pad), Constraint::Min(0)])
        .split(area);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}
