//! Drag-and-drop resolution.
//!
//! Columns are identified by status, positions by index within the
//! rendered (filtered) column.

use crate::TaskStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSource {
    pub status: TaskStatus,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub status: TaskStatus,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped outside any column, or back where it started.
    Ignored,
    /// Persist `status` for the dragged task.
    Move { status: TaskStatus },
}

impl DropOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, DropOutcome::Ignored)
    }
}

pub fn resolve_drop(source: DragSource, target: Option<DropTarget>) -> DropOutcome {
    match target {
        None => DropOutcome::Ignored,
        Some(target) if target.status == source.status && target.index == source.index => {
            DropOutcome::Ignored
        }
        Some(target) => DropOutcome::Move {
            status: target.status,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_outside_is_ignored() {
        let source = DragSource {
            status: TaskStatus::Todo,
            index: 0,
        };
        assert!(resolve_drop(source, None).is_ignored());
    }

    #[test]
    fn test_drop_in_place_is_ignored() {
        let source = DragSource {
            status: TaskStatus::InProgress,
            index: 2,
        };
        let target = DropTarget {
            status: TaskStatus::InProgress,
            index: 2,
        };
        assert_eq!(resolve_drop(source, Some(target)), DropOutcome::Ignored);
    }

    #[test]
    fn test_drop_in_other_column_moves() {
        let source = DragSource {
            status: TaskStatus::Todo,
            index: 0,
        };
        let target = DropTarget {
            status: TaskStatus::Completed,
            index: 0,
        };
        assert_eq!(
            resolve_drop(source, Some(target)),
            DropOutcome::Move {
                status: TaskStatus::Completed
            }
        );
    }

    #[test]
    fn test_drop_at_other_position_same_column_persists_status() {
        let source = DragSource {
            status: TaskStatus::Todo,
            index: 0,
        };
        let target = DropTarget {
            status: TaskStatus::Todo,
            index: 3,
        };
        assert_eq!(
            resolve_drop(source, Some(target)),
            DropOutcome::Move {
                status: TaskStatus::Todo
            }
        );
    }
}
