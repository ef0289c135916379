use crate::app::{App, AppMode, DragState, Focus};
use crate::form::Form;
use crossterm::event::{KeyCode, KeyEvent};
use taskboard_domain::{DragSource, DropTarget, StatusView, TaskStatus, Text};

impl App {
    pub async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Normal => self.handle_normal_key(key.code).await,
            AppMode::Dragging => self.handle_drag_key(key.code),
            AppMode::TaskDetail => self.handle_detail_key(key.code).await,
            AppMode::CreateTask | AppMode::EditTask => self.handle_task_dialog(key.code).await,
            AppMode::Search => self.handle_search_dialog(key.code),
            AppMode::DateFilter => self.handle_date_dialog(key.code),
        }
    }

    async fn handle_normal_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Board if !self.sidebar_collapsed => Focus::Sidebar,
                    _ => Focus::Board,
                };
            }
            KeyCode::Char('b') => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                if self.sidebar_collapsed {
                    self.focus = Focus::Board;
                }
            }
            KeyCode::Char('L') => self.toggle_language().await,
            KeyCode::Char('r') => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    let _ = dashboard.refresh().await;
                }
                self.clamp_selection();
            }
            KeyCode::Char('o') => self.logout().await,
            KeyCode::Char('n') => {
                self.task_form = Form::task();
                self.editing = None;
                self.mode = AppMode::CreateTask;
            }
            KeyCode::Char('/') => {
                let current = self
                    .dashboard
                    .as_ref()
                    .map(|d| d.filters.search.clone())
                    .unwrap_or_default();
                self.filter_input.set(current);
                self.mode = AppMode::Search;
            }
            KeyCode::Char('p') => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.filters.cycle_priority();
                }
                self.clamp_selection();
            }
            KeyCode::Char('D') => {
                let current = self
                    .dashboard
                    .as_ref()
                    .and_then(|d| d.filters.created_on)
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                self.filter_input.set(current);
                self.mode = AppMode::DateFilter;
            }
            KeyCode::Char('c') => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.filters.clear();
                }
                self.clamp_selection();
            }
            other => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(other).await,
                Focus::Board => self.handle_board_key(other).await,
            },
        }
    }

    async fn handle_sidebar_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('j') | KeyCode::Down => self.sidebar.next(StatusView::SIDEBAR.len()),
            KeyCode::Char('k') | KeyCode::Up => self.sidebar.prev(),
            KeyCode::Enter => {
                let view = self.selected_view();
                if let Some(dashboard) = self.dashboard.as_mut() {
                    let _ = dashboard.set_status_view(view).await;
                }
                self.column = 0;
                self.card.clear();
                self.clamp_selection();
                self.focus = Focus::Board;
            }
            _ => {}
        }
    }

    async fn handle_board_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('h') | KeyCode::Left => {
                self.column = self.column.saturating_sub(1);
                self.clamp_selection();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.column + 1 < self.visible_statuses().len() {
                    self.column += 1;
                }
                self.clamp_selection();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.column_len(self.selected_status());
                self.card.next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.column_len(self.selected_status()) > 0 {
                    self.card.prev();
                }
            }
            KeyCode::Enter => self.open_selected_detail(),
            KeyCode::Char('e') => self.open_edit_dialog(),
            KeyCode::Char('d') => self.delete_selected().await,
            KeyCode::Char(c @ '1'..='3') => self.set_selected_status(c).await,
            KeyCode::Char(' ') => self.start_drag(),
            _ => {}
        }
    }

    async fn handle_detail_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.close_detail();
                }
                self.mode = AppMode::Normal;
            }
            KeyCode::Char('e') => self.open_edit_dialog(),
            KeyCode::Char('d') => {
                self.delete_selected().await;
                if self.dashboard.as_ref().and_then(|d| d.detail()).is_none() {
                    self.mode = AppMode::Normal;
                }
            }
            KeyCode::Char(c @ '1'..='3') => self.set_selected_status(c).await,
            _ => {}
        }
    }

    fn open_selected_detail(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        if let Some(dashboard) = self.dashboard.as_mut() {
            if dashboard.open_detail(&id).is_ok() {
                self.mode = AppMode::TaskDetail;
            }
        }
    }

    fn open_edit_dialog(&mut self) {
        let Some(task) = self.focused_task().cloned() else {
            return;
        };
        let mut form = Form::task();
        form.set_value(Text::Title, task.title.clone());
        form.set_value(Text::Notes, task.notes.clone());
        form.set_value(Text::Priority, task.priority.as_str());
        self.task_form = form;
        self.editing = Some(task.id);
        self.mode = AppMode::EditTask;
    }

    /// The task open in the detail view, else the selected card.
    fn focused_task(&self) -> Option<&taskboard_domain::Task> {
        self.dashboard
            .as_ref()
            .and_then(|d| d.detail())
            .or_else(|| self.selected_task())
    }

    async fn delete_selected(&mut self) {
        let Some(id) = self.focused_task().map(|t| t.id.clone()) else {
            return;
        };
        if let Some(dashboard) = self.dashboard.as_mut() {
            let _ = dashboard.delete_task(&id).await;
        }
        self.clamp_selection();
    }

    /// `1`, `2`, `3` pick a status in board order; the current one is ignored.
    async fn set_selected_status(&mut self, key: char) {
        let Some(status) = key
            .to_digit(10)
            .and_then(|n| TaskStatus::ALL.get(n as usize - 1).copied())
        else {
            return;
        };
        let Some(task) = self.focused_task() else {
            return;
        };
        if !task.status.transitions().any(|s| s == status) {
            return;
        }
        let id = task.id.clone();
        if let Some(dashboard) = self.dashboard.as_mut() {
            let _ = dashboard.set_status(&id, status).await;
        }
        self.clamp_selection();
    }

    fn start_drag(&mut self) {
        let Some(index) = self.card.get() else {
            return;
        };
        if self.selected_task().is_none() {
            return;
        }
        let status = self.selected_status();
        self.drag = Some(DragState {
            source: DragSource { status, index },
            target: DropTarget { status, index },
        });
        self.mode = AppMode::Dragging;
    }

    fn handle_drag_key(&mut self, key_code: KeyCode) {
        let Some(mut drag) = self.drag else {
            self.mode = AppMode::Normal;
            return;
        };
        let statuses = self.visible_statuses();
        let column = statuses
            .iter()
            .position(|s| *s == drag.target.status)
            .unwrap_or(0);

        match key_code {
            KeyCode::Char('h') | KeyCode::Left => {
                if column > 0 {
                    drag.target.status = statuses[column - 1];
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if column + 1 < statuses.len() {
                    drag.target.status = statuses[column + 1];
                }
            }
            KeyCode::Char('j') | KeyCode::Down => drag.target.index += 1,
            KeyCode::Char('k') | KeyCode::Up => {
                drag.target.index = drag.target.index.saturating_sub(1)
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.finish_drag(drag, true);
                return;
            }
            KeyCode::Esc => {
                self.finish_drag(drag, false);
                return;
            }
            _ => {}
        }

        // A card may land after the last one in another column, but not
        // past its own slot in its own column.
        let len = self.column_len(drag.target.status);
        let max = if drag.target.status == drag.source.status {
            len.saturating_sub(1)
        } else {
            len
        };
        drag.target.index = drag.target.index.min(max);
        self.drag = Some(drag);
    }

    fn finish_drag(&mut self, drag: DragState, dropped: bool) {
        self.drag = None;
        self.mode = AppMode::Normal;
        let target = dropped.then_some(drag.target);
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        if let Ok(Some(pending)) = dashboard.begin_drop(drag.source, target) {
            self.pending_move = Some(pending);
            if let Some(column) = self
                .visible_statuses()
                .iter()
                .position(|s| *s == drag.target.status)
            {
                self.column = column;
            }
        }
        self.clamp_selection();
    }
}
