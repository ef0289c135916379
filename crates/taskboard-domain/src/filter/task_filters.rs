//! Filter settings held by the dashboard.

use super::task_filter::{CompositeFilter, CreatedOnFilter, PriorityFilter, SearchFilter};
use crate::Priority;
use chrono::NaiveDate;

/// Client-side filter settings (what to filter by). Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub search: String,
    pub priority: Option<Priority>,
    pub created_on: Option<NaiveDate>,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.priority.is_some() || self.created_on.is_some()
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.priority = None;
        self.created_on = None;
    }

    /// Build the predicate for the current settings.
    pub fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if !self.search.is_empty() {
            filter = filter.with_filter(Box::new(SearchFilter::new(self.search.clone())));
        }
        if let Some(priority) = self.priority {
            filter = filter.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        if let Some(date) = self.created_on {
            filter = filter.with_filter(Box::new(CreatedOnFilter::new(date)));
        }
        filter
    }

    /// Step the priority filter: none -> high -> medium -> low -> none.
    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::Low),
            Some(Priority::Low) => None,
        };
    }
}
