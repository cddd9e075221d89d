use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    grade::Grade,
    ui::{bold_style, dim_style, highlight_style, italic_style},
};

const MARKER: &str = "▶ ";
const NO_MARKER: &str = "  ";

fn menu_line(text: String, selected: bool) -> Line<'static> {
    if selected {
        Line::from(vec![
            Span::styled(MARKER, highlight_style()),
            Span::styled(text, highlight_style()),
        ])
    } else {
        Line::from(vec![Span::raw(NO_MARKER), Span::raw(text)])
    }
}

pub fn render_grade_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled("Выбери свой класс", bold_style())),
        Line::default(),
    ];
    lines.extend(
        Grade::ALL
            .iter()
            .enumerate()
            .map(|(i, grade)| menu_line(grade.label(), i == app.cursor)),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Решай задачки, зарабатывай звёздочки и становись гением математики! ⭐",
        italic_style(),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

pub fn render_topic_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let topics = app.session.available_topics();
    let mut lines = vec![
        Line::from(Span::styled("Выбери тему", bold_style())),
        Line::default(),
    ];
    lines.extend(
        topics
            .iter()
            .enumerate()
            .map(|(i, topic)| menu_line(app.catalogue.title(*topic), i == app.cursor)),
    );
    Paragraph::new(lines).render(chunks[0], buf);

    let (title, theory) = match app.highlighted_topic().and_then(|t| app.catalogue.info(t)) {
        Some(info) => (info.title.clone(), info.theory.clone()),
        None => (String::new(), String::new()),
    };
    Paragraph::new(Span::styled(theory, Style::default()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(dim_style())
                .title(Span::styled(format!(" 📖 {title} "), bold_style())),
        )
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}
