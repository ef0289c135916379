pub mod auth;
pub mod board;
pub mod dashboard;
pub mod drag;
pub mod filter;
pub mod format;
pub mod i18n;
pub mod mutation;
pub mod profile;
pub mod repository;
pub mod route;
pub mod session;
pub mod task;
pub mod timestamp;

pub use auth::{AuthFlow, SignUpOutcome};
pub use board::{group_into_columns, StatusColumn, StatusView};
pub use dashboard::{Dashboard, DashboardOptions, PendingMove};
pub use drag::{resolve_drop, DragSource, DropOutcome, DropTarget};
pub use filter::{
    CompositeFilter, CreatedOnFilter, PriorityFilter, SearchFilter, TaskFilter, TaskFilters,
};
pub use format::format_timestamp;
pub use i18n::{Language, Text};
pub use mutation::{MutationId, MutationKind, MutationLedger, MutationState};
pub use profile::Profile;
pub use repository::{AuthProvider, ProfileRepository, SignUpResponse, TaskQuery, TaskRepository};
pub use route::Route;
pub use session::{Credentials, Session, SignUpForm, User, UserId};
pub use task::{NewTask, Priority, Task, TaskDraft, TaskFields, TaskId, TaskPatch, TaskStatus};
