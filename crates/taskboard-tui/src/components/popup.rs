use crate::form::Form;
use crate::theme::{focused_border, highlight_text, label_text, normal_text, popup_bg};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use taskboard_domain::Language;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn render_popup_with_block(
    frame: &mut Frame,
    title: &str,
    width_percent: u16,
    height_percent: u16,
) -> Rect {
    let area = centered_rect(width_percent, height_percent, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    inner
}

pub fn render_input_popup(frame: &mut Frame, title: &str, label: &str, input_text: &str, cursor_pos: usize) {
    let inner = render_popup_with_block(frame, title, 60, 30);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(label.to_string()).style(highlight_text()), chunks[0]);

    let input = Paragraph::new(input_text.to_string())
        .style(normal_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, chunks[1]);

    frame.set_cursor_position((chunks[1].x + cursor_pos as u16 + 1, chunks[1].y + 1));
}

/// Draw every field of `form` stacked inside `area`, with the cursor in
/// the focused one.
pub fn render_form(frame: &mut Frame, area: Rect, form: &Form, language: Language) {
    let count = form.fields().count();
    let mut constraints = vec![Constraint::Length(3); count];
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, (label, field)) in form.fields().enumerate() {
        let focused = idx == form.focus();
        let block = Block::default()
            .title(language.t(label))
            .borders(Borders::ALL)
            .border_style(if focused { focused_border() } else { label_text() });
        frame.render_widget(
            Paragraph::new(field.display()).style(normal_text()).block(block),
            chunks[idx],
        );
        if focused {
            frame.set_cursor_position((
                chunks[idx].x + field.cursor_column() as u16 + 1,
                chunks[idx].y + 1,
            ));
        }
    }
}
