use crate::app::{App, AppMode, Focus};
use crate::components::*;
use crate::theme::*;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use taskboard_domain::{
    format_timestamp, Dashboard, Language, Route, StatusView, Task, TaskStatus, Text,
};

const NOTES_PREVIEW_CHARS: usize = 40;

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    match (app.route, app.dashboard.as_ref()) {
        (Route::Dashboard, Some(dashboard)) => {
            render_dashboard(app, dashboard, frame, chunks[0]);
            render_footer(app, frame, chunks[1]);
            render_dashboard_popup(app, dashboard, frame);
        }
        _ => {
            render_auth_screen(app, frame, chunks[0]);
            render_footer(app, frame, chunks[1]);
        }
    }
}

fn render_auth_screen(app: &App, frame: &mut Frame, area: Rect) {
    let lang = app.language;
    let (title, form, switch) = match app.route {
        Route::Signup => (Text::Signup, &app.signup_form, Text::HaveAccount),
        _ => (Text::Login, &app.login_form, Text::NoAccount),
    };

    let outer = centered_rect(60, 70, area);
    let block = Block::default()
        .title(format!(" {} | {} ", lang.t(Text::AppName), lang.t(title)))
        .borders(Borders::ALL)
        .border_style(focused_border());
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    render_form(frame, chunks[0], form, lang);

    let hint = Line::from(vec![
        Span::styled(format!("{} ", lang.t(switch)), label_text()),
        Span::styled("Ctrl+N", highlight_text()),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[1]);
}

fn render_dashboard(app: &App, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_top_bar(app, dashboard, frame, chunks[0]);

    let body = if app.sidebar_collapsed {
        chunks[1]
    } else {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(0)])
            .split(chunks[1]);
        render_sidebar(app, dashboard, frame, split[0]);
        split[1]
    };

    render_columns(app, dashboard, frame, body);
    render_filter_line(app, dashboard, frame, chunks[2]);
}

fn render_top_bar(app: &App, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
    let lang = app.language;
    let mut spans = vec![Span::styled(lang.t(Text::AppName), bold_highlight())];
    if let Some(profile) = dashboard.profile() {
        if let Some(initials) = profile.initials() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("[{}]", initials), active_item()));
        }
        spans.push(Span::styled(
            format!(" {}", profile.display_name()),
            normal_text(),
        ));
    }
    spans.push(Span::styled(
        format!("  {}: {}", lang.t(Text::Language), lang.native_name()),
        label_text(),
    ));
    if !dashboard.is_loaded() {
        spans.push(Span::styled(
            format!("  {}...", lang.t(Text::LoadingTasks)),
            label_text(),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(unfocused_border()),
    );
    frame.render_widget(bar, area);
}

fn view_label(view: StatusView, lang: Language) -> &'static str {
    match view {
        StatusView::All => lang.t(Text::Tasks),
        StatusView::Only(status) => lang.t(status.into()),
    }
}

fn render_sidebar(app: &App, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
    let lang = app.language;
    let focused = app.focus == Focus::Sidebar;
    let active = dashboard.view();

    let items: Vec<ListItem> = StatusView::SIDEBAR
        .iter()
        .enumerate()
        .map(|(idx, view)| {
            let marker = if *view == active { "> " } else { "  " };
            let mut style = if *view == active {
                active_item()
            } else {
                normal_text()
            };
            if app.sidebar.get() == Some(idx) {
                style = style.patch(selected_item(focused));
            }
            ListItem::new(format!("{}{}", marker, view_label(*view, lang))).style(style)
        })
        .collect();

    let block = Block::default()
        .title(lang.t(Text::Dashboard))
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border()
        } else {
            unfocused_border()
        });
    frame.render_widget(List::new(items).block(block), area);
}

fn render_columns(app: &App, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
    let columns = dashboard.columns();
    if columns.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let lang = app.language;
    let offset = dashboard.options().display_offset_minutes;
    let board_focused = app.focus == Focus::Board && app.mode != AppMode::Dragging;

    for (col_idx, column) in columns.iter().enumerate() {
        let is_selected_column = col_idx == app.column;
        let drag_target = app
            .drag
            .filter(|d| d.target.status == column.status)
            .map(|d| d.target.index);

        let border_style = if drag_target.is_some() {
            drag_border()
        } else if is_selected_column && board_focused {
            focused_border()
        } else {
            unfocused_border()
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(lang.t(column.status.into()), status_style(column.status)),
                Span::styled(format!(" ({})", column.len()), label_text()),
            ]))
            .borders(Borders::ALL)
            .border_style(border_style);

        if column.is_empty() && drag_target.is_none() {
            let empty = Paragraph::new(lang.t(Text::NoTasks))
                .style(label_text())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[col_idx]);
            continue;
        }

        let mut items: Vec<ListItem> = Vec::with_capacity(column.len() + 1);
        for (idx, task) in column.tasks.iter().enumerate() {
            if drag_target == Some(idx) {
                items.push(drop_marker());
            }
            let selected = is_selected_column && app.card.get() == Some(idx);
            let dragged = app
                .drag
                .is_some_and(|d| d.source.status == column.status && d.source.index == idx);
            items.push(card_item(task, lang, offset, selected, board_focused, dragged));
        }
        if drag_target.is_some_and(|idx| idx >= column.len()) {
            items.push(drop_marker());
        }

        frame.render_widget(List::new(items).block(block), chunks[col_idx]);
    }
}

fn drop_marker() -> ListItem<'static> {
    ListItem::new(Line::styled("  ---- drop here ----", drag_border()))
}

fn card_item(
    task: &Task,
    lang: Language,
    offset: i32,
    selected: bool,
    focused: bool,
    dragged: bool,
) -> ListItem<'static> {
    let title_style = if dragged {
        drag_border()
    } else {
        bold_highlight()
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(task.title.clone(), title_style),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", lang.t(task.priority.into())),
                priority_style(task.priority),
            ),
        ]),
        Line::styled(notes_preview(&task.notes, lang), normal_text()),
        Line::styled(
            format!(
                "{}: {}",
                lang.t(Text::Created),
                format_timestamp(task.created_at, offset)
            ),
            label_text(),
        ),
    ];
    lines.push(Line::raw(""));

    let item = ListItem::new(lines);
    if selected {
        item.style(selected_item(focused))
    } else {
        item
    }
}

fn notes_preview(notes: &str, lang: Language) -> String {
    if notes.chars().count() <= NOTES_PREVIEW_CHARS {
        return notes.to_string();
    }
    let head: String = notes.chars().take(NOTES_PREVIEW_CHARS).collect();
    format!("{}... ({})", head.trim_end(), lang.t(Text::ReadMore))
}

fn render_filter_line(app: &App, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
    let lang = app.language;
    let filters = &dashboard.filters;
    let priority = filters
        .priority
        .map(|p| lang.t(p.into()))
        .unwrap_or_else(|| lang.t(Text::AllPriorities));
    let mut spans = vec![
        Span::styled(format!("{}: ", lang.t(Text::Priority)), label_text()),
        Span::styled(priority, normal_text()),
    ];
    if !filters.search.is_empty() {
        spans.push(Span::styled(
            format!("  {}: ", lang.t(Text::Search)),
            label_text(),
        ));
        spans.push(Span::styled(filters.search.clone(), highlight_text()));
    }
    if let Some(date) = filters.created_on {
        spans.push(Span::styled(
            format!("  {}: ", lang.t(Text::Created)),
            label_text(),
        ));
        spans.push(Span::styled(
            date.format("%Y-%m-%d").to_string(),
            highlight_text(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn help_text(app: &App) -> &'static str {
    match (app.route, app.mode) {
        (Route::Login, _) => "Tab: next field | Enter: login | Ctrl+N: sign up | Ctrl+L: language | Esc: quit",
        (Route::Signup, _) => "Tab: next field | Enter: sign up | Ctrl+N: login | Ctrl+L: language | Esc: back",
        (_, AppMode::CreateTask | AppMode::EditTask) => "Tab: next field | Enter: save | Esc: cancel",
        (_, AppMode::Search) => "type to filter | Enter/Esc: done",
        (_, AppMode::DateFilter) => "YYYY-MM-DD, empty clears | Enter: apply | Esc: cancel",
        (_, AppMode::TaskDetail) => "e: edit | d: delete | 1/2/3: status | Esc: close",
        (_, AppMode::Dragging) => "h/l: column | j/k: position | Space/Enter: drop | Esc: cancel",
        (_, AppMode::Normal) => match app.focus {
            Focus::Sidebar => "j/k: select | Enter: show | Tab: board | b: hide sidebar | q: quit",
            Focus::Board => "n: new | Enter: open | e: edit | d: delete | Space: drag | /: search | p: priority | D: date | c: clear | L: language | o: logout | q: quit",
        },
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let line = match app.current_notice() {
        Some(notice) => Line::styled(notice.message.clone(), notice_style(notice.level)),
        None => Line::styled(help_text(app), label_text()),
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_dashboard_popup(app: &App, dashboard: &Dashboard, frame: &mut Frame) {
    let lang = app.language;
    match app.mode {
        AppMode::TaskDetail => {
            if let Some(task) = dashboard.detail() {
                render_task_detail(task, lang, dashboard.options().display_offset_minutes, frame);
            }
        }
        AppMode::CreateTask | AppMode::EditTask => {
            if let Some(task) = dashboard.detail() {
                render_task_detail(task, lang, dashboard.options().display_offset_minutes, frame);
            }
            render_task_form(app, frame);
        }
        AppMode::Search => render_input_popup(
            frame,
            lang.t(Text::Search),
            &format!("{} / {}", lang.t(Text::Title), lang.t(Text::Notes)),
            app.filter_input.as_str(),
            app.filter_input.cursor_column(),
        ),
        AppMode::DateFilter => render_input_popup(
            frame,
            lang.t(Text::DatePlaceholder),
            "YYYY-MM-DD",
            app.filter_input.as_str(),
            app.filter_input.cursor_column(),
        ),
        AppMode::Normal | AppMode::Dragging => {}
    }
}

fn render_task_form(app: &App, frame: &mut Frame) {
    let lang = app.language;
    let title = if app.mode == AppMode::EditTask {
        lang.t(Text::Edit)
    } else {
        lang.t(Text::CreateTask)
    };
    let inner = render_popup_with_block(frame, title, 60, 50);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    render_form(frame, chunks[0], &app.task_form, lang);
    let hint = format!(
        "{}: high | medium | low   Enter: {}   Esc: {}",
        lang.t(Text::Priority),
        lang.t(Text::Save),
        lang.t(Text::Cancel)
    );
    frame.render_widget(Paragraph::new(hint).style(label_text()), chunks[1]);
}

fn render_task_detail(task: &Task, lang: Language, offset: i32, frame: &mut Frame) {
    let inner = render_popup_with_block(frame, &task.title, 70, 60);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", lang.t(Text::Priority)), label_text()),
            Span::styled(lang.t(task.priority.into()), priority_style(task.priority)),
            Span::raw("   "),
            Span::styled(lang.t(task.status.into()), status_style(task.status)),
        ]),
        Line::raw(""),
        Line::styled(task.notes.clone(), normal_text()),
        Line::raw(""),
        Line::styled(
            format!(
                "{}: {}",
                lang.t(Text::Created),
                format_timestamp(task.created_at, offset)
            ),
            label_text(),
        ),
    ];
    if let Some(updated) = task.updated_at {
        lines.push(Line::styled(
            format!(
                "{}: {}",
                lang.t(Text::Updated),
                format_timestamp(updated, offset)
            ),
            label_text(),
        ));
    }
    lines.push(Line::raw(""));

    let mut actions = vec![
        Span::styled(format!("[e] {}  ", lang.t(Text::Edit)), highlight_text()),
        Span::styled(format!("[d] {}  ", lang.t(Text::Delete)), highlight_text()),
    ];
    for (idx, status) in TaskStatus::ALL.iter().enumerate() {
        if task.status.transitions().any(|s| s == *status) {
            actions.push(Span::styled(
                format!("[{}] {}  ", idx + 1, lang.t((*status).into())),
                status_style(*status),
            ));
        }
    }
    actions.push(Span::styled(
        format!("[Esc] {}", lang.t(Text::Close)),
        label_text(),
    ));
    lines.push(Line::from(actions));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
