use crate::app::{App, AppMode};
use crate::dialog::{handle_dialog_input, DialogAction};
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use taskboard_core::Notice;
use taskboard_domain::{TaskDraft, Text};

impl App {
    pub async fn handle_task_dialog(&mut self, key_code: KeyCode) {
        match handle_dialog_input(self.task_form.focused_mut(), key_code) {
            DialogAction::Cancel => self.close_task_dialog(),
            DialogAction::NextField => self.task_form.focus_next(),
            DialogAction::PrevField => self.task_form.focus_prev(),
            DialogAction::Confirm => self.submit_task_form().await,
            DialogAction::None => {}
        }
    }

    async fn submit_task_form(&mut self) {
        let draft = TaskDraft::new(
            self.task_form.value(Text::Title),
            self.task_form.value(Text::Notes),
            self.task_form.value(Text::Priority),
        );
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        let result = match &self.editing {
            Some(id) => dashboard.edit_task(id, &draft).await,
            None => dashboard.create_task(&draft).await,
        };
        // On failure the dialog stays open so nothing typed is lost.
        if result.is_ok() {
            self.close_task_dialog();
            self.clamp_selection();
        }
    }

    fn close_task_dialog(&mut self) {
        self.task_form.clear();
        self.editing = None;
        let in_detail = self
            .dashboard
            .as_ref()
            .is_some_and(|d| d.detail().is_some());
        self.mode = if in_detail {
            AppMode::TaskDetail
        } else {
            AppMode::Normal
        };
    }

    /// Search applies on every keystroke.
    pub fn handle_search_dialog(&mut self, key_code: KeyCode) {
        match handle_dialog_input(&mut self.filter_input, key_code) {
            DialogAction::Cancel | DialogAction::Confirm => {
                self.filter_input.clear();
                self.mode = AppMode::Normal;
            }
            _ => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.filters.search = self.filter_input.as_str().to_string();
                }
            }
        }
        self.clamp_selection();
    }

    pub fn handle_date_dialog(&mut self, key_code: KeyCode) {
        match handle_dialog_input(&mut self.filter_input, key_code) {
            DialogAction::Cancel => {
                self.filter_input.clear();
                self.mode = AppMode::Normal;
            }
            DialogAction::Confirm => {
                let raw = self.filter_input.as_str().trim().to_string();
                let parsed = if raw.is_empty() {
                    Ok(None)
                } else {
                    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map(Some)
                };
                let Some(dashboard) = self.dashboard.as_mut() else {
                    return;
                };
                match parsed {
                    Ok(date) => {
                        dashboard.filters.created_on = date;
                        self.filter_input.clear();
                        self.mode = AppMode::Normal;
                    }
                    Err(_) => dashboard.notices_mut().push(Notice::error(format!(
                        "Invalid date '{}', expected YYYY-MM-DD",
                        raw
                    ))),
                }
                self.clamp_selection();
            }
            _ => {}
        }
    }
}
