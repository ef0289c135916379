//! Grouping of filtered tasks into status columns.

use crate::filter::{TaskFilter, TaskFilters};
use crate::{Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taskboard_core::TaskboardError;

/// Which status the sidebar has selected. Also narrows the remote query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusView {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusView {
    pub const SIDEBAR: [StatusView; 4] = [
        StatusView::All,
        StatusView::Only(TaskStatus::Todo),
        StatusView::Only(TaskStatus::InProgress),
        StatusView::Only(TaskStatus::Completed),
    ];

    pub fn status(&self) -> Option<TaskStatus> {
        match self {
            StatusView::All => None,
            StatusView::Only(status) => Some(*status),
        }
    }

    /// Columns rendered for this view, in board order.
    pub fn columns(&self) -> Vec<TaskStatus> {
        match self {
            StatusView::All => TaskStatus::ALL.to_vec(),
            StatusView::Only(status) => vec![*status],
        }
    }

    pub fn next(&self) -> StatusView {
        let idx = Self::SIDEBAR.iter().position(|v| v == self).unwrap_or(0);
        Self::SIDEBAR[(idx + 1) % Self::SIDEBAR.len()]
    }

    pub fn prev(&self) -> StatusView {
        let idx = Self::SIDEBAR.iter().position(|v| v == self).unwrap_or(0);
        Self::SIDEBAR[(idx + Self::SIDEBAR.len() - 1) % Self::SIDEBAR.len()]
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusView::All => f.write_str("all"),
            StatusView::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusView {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusView::All);
        }
        s.parse().map(StatusView::Only)
    }
}

/// One rendered column of the board.
#[derive(Debug, Clone)]
pub struct StatusColumn<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

impl StatusColumn<'_> {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Apply the filters and split the survivors by status, keeping list order.
pub fn group_into_columns<'a>(
    tasks: &'a [Task],
    filters: &TaskFilters,
    view: StatusView,
) -> Vec<StatusColumn<'a>> {
    let predicate = filters.to_filter();
    let visible: Vec<&Task> = tasks.iter().filter(|t| predicate.matches(t)).collect();

    view.columns()
        .into_iter()
        .map(|status| StatusColumn {
            status,
            tasks: visible
                .iter()
                .copied()
                .filter(|t| t.status == status)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Priority, TaskId};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn task(id: &str, title: &str, status: TaskStatus, age_mins: i64) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            notes: "n".to_string(),
            priority: Priority::Medium,
            status,
            user_id: Uuid::nil(),
            created_at: Utc::now() - Duration::minutes(age_mins),
            updated_at: None,
        }
    }

    #[test]
    fn test_all_view_has_three_columns_in_order() {
        let tasks = vec![
            task("1", "a", TaskStatus::Completed, 1),
            task("2", "b", TaskStatus::Todo, 2),
            task("3", "c", TaskStatus::Todo, 3),
            task("4", "d", TaskStatus::InProgress, 4),
        ];
        let columns = group_into_columns(&tasks, &TaskFilters::default(), StatusView::All);

        let statuses: Vec<_> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, TaskStatus::ALL.to_vec());
        let todo: Vec<_> = columns[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo, vec!["2", "3"]);
        assert_eq!(columns[1].len(), 1);
        assert_eq!(columns[2].len(), 1);
    }

    #[test]
    fn test_single_status_view() {
        let tasks = vec![
            task("1", "a", TaskStatus::Completed, 1),
            task("2", "b", TaskStatus::Todo, 2),
        ];
        let columns = group_into_columns(
            &tasks,
            &TaskFilters::default(),
            StatusView::Only(TaskStatus::Completed),
        );
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].status, TaskStatus::Completed);
        assert_eq!(columns[0].tasks[0].id.as_str(), "1");
    }

    #[test]
    fn test_filters_apply_before_grouping() {
        let tasks = vec![
            task("1", "Buy milk", TaskStatus::Todo, 1),
            task("2", "Walk dog", TaskStatus::Todo, 2),
        ];
        let filters = TaskFilters {
            search: "milk".into(),
            ..TaskFilters::default()
        };
        let columns = group_into_columns(&tasks, &filters, StatusView::All);
        assert_eq!(columns[0].len(), 1);
        assert_eq!(columns[0].tasks[0].title, "Buy milk");
    }

    #[test]
    fn test_status_view_parse_and_cycle() {
        assert_eq!("all".parse::<StatusView>().unwrap(), StatusView::All);
        assert_eq!(
            "in-progress".parse::<StatusView>().unwrap(),
            StatusView::Only(TaskStatus::InProgress)
        );
        assert_eq!(StatusView::All.prev(), StatusView::Only(TaskStatus::Completed));
        assert_eq!(StatusView::Only(TaskStatus::Completed).next(), StatusView::All);
    }
}
