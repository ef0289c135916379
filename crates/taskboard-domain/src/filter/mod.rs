//! Task filtering.
//!
//! Filters are independent predicates over a single task, combined with AND.

pub mod task_filter;
pub mod task_filters;

pub use task_filter::{CompositeFilter, CreatedOnFilter, PriorityFilter, SearchFilter, TaskFilter};
pub use task_filters::TaskFilters;
