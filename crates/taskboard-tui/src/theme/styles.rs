use super::colors::*;
use ratatui::style::{Modifier, Style};
use taskboard_core::NoticeLevel;
use taskboard_domain::{Priority, TaskStatus};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn drag_border() -> Style {
    Style::default()
        .fg(DRAG_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default()
    }
}

pub fn active_item() -> Style {
    Style::default()
        .fg(ACTIVE_ITEM)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => PRIORITY_HIGH,
        Priority::Medium => PRIORITY_MEDIUM,
        Priority::Low => PRIORITY_LOW,
    };
    Style::default().fg(color)
}

pub fn status_style(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Todo => STATUS_TODO,
        TaskStatus::InProgress => STATUS_IN_PROGRESS,
        TaskStatus::Completed => STATUS_COMPLETED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn notice_style(level: NoticeLevel) -> Style {
    let color = match level {
        NoticeLevel::Success => NOTICE_SUCCESS,
        NoticeLevel::Info => NOTICE_INFO,
        NoticeLevel::Error => ERROR_COLOR,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
