use crate::cli::{TaskAction, TaskEditArgs, TaskListArgs};
use crate::context::CliContext;
use crate::handlers::surfaced;
use crate::output::{self, TaskView};
use chrono::NaiveDate;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    Dashboard, Priority, StatusView, TaskDraft, TaskFilter, TaskId, TaskStatus,
};

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    let mut dashboard = ctx.dashboard(list_view(&action)?).await?;
    let offset = dashboard.options().display_offset_minutes;

    match action {
        TaskAction::List(args) => {
            apply_list_args(&mut dashboard, &args)?;
            let filter = dashboard.filters.to_filter();
            let items: Vec<_> = dashboard
                .tasks()
                .iter()
                .filter(|task| filter.matches(task))
                .map(|task| TaskView::new(task, offset))
                .collect();
            output::output_list(items);
        }
        TaskAction::Get { id } => {
            let id = TaskId::new(id);
            match dashboard.task(&id) {
                Some(task) => output::output_success(TaskView::new(task, offset)),
                None => return Err(TaskboardError::NotFound(format!("task {}", id)).into()),
            }
        }
        TaskAction::Create {
            title,
            notes,
            priority,
        } => {
            let draft = TaskDraft::new(title, notes, priority);
            let result = dashboard.create_task(&draft).await;
            let task = result.map_err(|e| surfaced(dashboard.notices(), e))?;
            output::output_success(TaskView::new(&task, offset));
        }
        TaskAction::Edit(args) => {
            let id = TaskId::new(args.id.clone());
            let draft = edit_draft(&dashboard, &id, &args)?;
            let result = dashboard.edit_task(&id, &draft).await;
            let task = result.map_err(|e| surfaced(dashboard.notices(), e))?;
            output::output_success(TaskView::new(&task, offset));
        }
        TaskAction::Status { id, status } => {
            let status: TaskStatus = status.parse()?;
            let result = dashboard.set_status(&TaskId::new(id), status).await;
            let task = result.map_err(|e| surfaced(dashboard.notices(), e))?;
            output::output_success(TaskView::new(&task, offset));
        }
        TaskAction::Move { id, status } => {
            let status: TaskStatus = status.parse()?;
            let result = dashboard.move_task(&TaskId::new(id), status).await;
            let task = result.map_err(|e| surfaced(dashboard.notices(), e))?;
            output::output_success(TaskView::new(&task, offset));
        }
        TaskAction::Delete { id } => {
            let id = TaskId::new(id);
            let result = dashboard.delete_task(&id).await;
            result.map_err(|e| surfaced(dashboard.notices(), e))?;
            output::output_success(serde_json::json!({ "deleted": id.as_str() }));
        }
    }
    Ok(())
}

/// The status view to fetch; only `list --status` narrows it.
fn list_view(action: &TaskAction) -> TaskboardResult<StatusView> {
    match action {
        TaskAction::List(TaskListArgs {
            status: Some(status),
            ..
        }) => status.parse(),
        _ => Ok(StatusView::All),
    }
}

fn apply_list_args(dashboard: &mut Dashboard, args: &TaskListArgs) -> TaskboardResult<()> {
    if let Some(search) = &args.search {
        dashboard.filters.search = search.clone();
    }
    if let Some(priority) = &args.priority {
        dashboard.filters.priority = Some(priority.parse::<Priority>()?);
    }
    if let Some(date) = &args.date {
        dashboard.filters.created_on = Some(parse_date(date)?);
    }
    Ok(())
}

fn parse_date(raw: &str) -> TaskboardResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        TaskboardError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

/// Start from the stored task and overlay whichever fields were given.
fn edit_draft(dashboard: &Dashboard, id: &TaskId, args: &TaskEditArgs) -> TaskboardResult<TaskDraft> {
    let task = dashboard
        .task(id)
        .ok_or_else(|| TaskboardError::NotFound(format!("task {}", id)))?;
    let mut draft = TaskDraft::from_task(task);
    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if let Some(notes) = &args.notes {
        draft.notes = notes.clone();
    }
    if let Some(priority) = &args.priority {
        draft.priority = priority.clone();
    }
    Ok(draft)
}
