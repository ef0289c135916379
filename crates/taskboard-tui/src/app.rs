use crate::events::{Event, EventHandler};
use crate::form::{Form, TextField};
use crate::selection::SelectionState;
use crate::ui;
use chrono::{DateTime, Utc};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use taskboard_core::{Notice, TaskboardError};
use taskboard_domain::{
    AuthFlow, Dashboard, DashboardOptions, DragSource, DropTarget, Language, PendingMove, Route,
    Session, StatusView, Task, TaskId, TaskStatus,
};
use taskboard_remote::{Backend, ClientState, ClientStateStore};

const TICK_RATE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    CreateTask,
    EditTask,
    Search,
    DateFilter,
    TaskDetail,
    Dragging,
}

/// A card picked up with the keyboard and the slot it would land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub source: DragSource,
    pub target: DropTarget,
}

pub struct App {
    pub should_quit: bool,
    pub route: Route,
    pub mode: AppMode,
    pub language: Language,
    pub auth: AuthFlow,
    pub dashboard: Option<Dashboard>,
    pub login_form: Form,
    pub signup_form: Form,
    pub task_form: Form,
    pub editing: Option<TaskId>,
    pub filter_input: TextField,
    pub focus: Focus,
    pub sidebar: SelectionState,
    pub sidebar_collapsed: bool,
    pub column: usize,
    pub card: SelectionState,
    pub drag: Option<DragState>,
    pub(crate) pending_move: Option<PendingMove>,
    backend: Backend,
    state_store: ClientStateStore,
    options: DashboardOptions,
    saved_session: Option<Session>,
}

impl App {
    pub fn new(
        backend: Backend,
        state_store: ClientStateStore,
        state: ClientState,
        options: DashboardOptions,
    ) -> Self {
        let mut sidebar = SelectionState::new();
        sidebar.set(Some(0));
        Self {
            should_quit: false,
            route: Route::Login,
            mode: AppMode::Normal,
            language: state.language,
            auth: backend.auth_flow().with_language(state.language),
            dashboard: None,
            login_form: Form::login(),
            signup_form: Form::signup(),
            task_form: Form::task(),
            editing: None,
            filter_input: TextField::new(),
            focus: Focus::Board,
            sidebar,
            sidebar_collapsed: false,
            column: 0,
            card: SelectionState::new(),
            drag: None,
            pending_move: None,
            backend,
            state_store,
            options,
            saved_session: state.session,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Resume a persisted session, refreshing it if needed.
    pub async fn start(&mut self) {
        let Some(saved) = self.saved_session.take() else {
            self.route = Route::Login;
            return;
        };
        match self.auth.ensure_fresh(&saved, Utc::now()).await {
            Ok(session) => self.enter_dashboard(session).await,
            Err(e) if is_session_rejected(&e) => {
                tracing::warn!("Stored session is no longer valid: {}", e);
                self.forget_session().await;
                self.route = Route::Login;
            }
            Err(e) => {
                // Kept on disk so the next start can try again.
                tracing::warn!("Could not refresh stored session: {}", e);
                self.auth.notices_mut().push(Notice::error(e.user_message()));
                self.saved_session = Some(saved);
                self.route = Route::Login;
            }
        }
    }

    /// Refresh the dashboard session if it expires at `now`.
    ///
    /// A rejected refresh signs the user out; a transient failure keeps the
    /// old session and leaves a notice.
    pub async fn ensure_session(&mut self, now: DateTime<Utc>) {
        let Some(current) = self.dashboard.as_ref().map(|d| d.session().clone()) else {
            return;
        };
        if !current.is_expired(now) {
            return;
        }
        match self.auth.ensure_fresh(&current, now).await {
            Ok(fresh) => {
                if let Err(e) = self.state_store.set_session(Some(fresh.clone())).await {
                    tracing::warn!("Could not persist session: {}", e);
                }
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.replace_session(fresh);
                }
                tracing::debug!("Dashboard session refreshed");
            }
            Err(e) if is_session_rejected(&e) => {
                tracing::warn!("Session refresh rejected: {}", e);
                let message = e.user_message();
                self.logout().await;
                self.auth.notices_mut().push(Notice::error(message));
            }
            Err(e) => {
                tracing::warn!("Could not refresh session: {}", e);
                if let Some(dashboard) = self.dashboard.as_mut() {
                    dashboard.notices_mut().push(Notice::error(e.user_message()));
                }
            }
        }
    }

    /// Move to `route`, redirecting to login if it needs a session.
    pub fn navigate(&mut self, route: Route) {
        self.route = route.guard(self.dashboard.is_some());
        self.mode = AppMode::Normal;
        tracing::debug!("Navigated to {}", self.route);
    }

    pub(crate) async fn enter_dashboard(&mut self, session: Session) {
        if let Err(e) = self.state_store.set_session(Some(session.clone())).await {
            tracing::warn!("Could not persist session: {}", e);
        }
        let mut dashboard = self
            .backend
            .dashboard(session, self.options.clone())
            .with_language(self.language);
        // Failures surface as notices on the dashboard itself.
        let _ = dashboard.load().await;
        self.dashboard = Some(dashboard);
        self.column = 0;
        self.card.clear();
        self.clamp_selection();
        self.navigate(Route::Dashboard);
    }

    pub(crate) async fn logout(&mut self) {
        if let Some(dashboard) = self.dashboard.take() {
            self.auth.sign_out(dashboard.session()).await;
        }
        self.forget_session().await;
        self.drag = None;
        self.login_form.clear();
        self.navigate(Route::Login);
    }

    async fn forget_session(&mut self) {
        if let Err(e) = self.state_store.set_session(None).await {
            tracing::warn!("Could not clear stored session: {}", e);
        }
    }

    pub(crate) async fn toggle_language(&mut self) {
        let language = self.language.toggle();
        self.language = language;
        self.auth.set_language(language);
        if let Some(dashboard) = self.dashboard.as_mut() {
            dashboard.set_language(language);
        }
        if let Err(e) = self.state_store.set_language(language).await {
            tracing::warn!("Could not persist language: {}", e);
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        let ttl = self.options.notice_ttl;
        self.auth.notices_mut().expire(now, ttl);
        if let Some(dashboard) = self.dashboard.as_mut() {
            dashboard.expire_notices(now);
        }
    }

    /// Most recent notice for the current screen.
    pub fn current_notice(&self) -> Option<&Notice> {
        match (self.route, &self.dashboard) {
            (Route::Dashboard, Some(dashboard)) => dashboard.notices().latest(),
            _ => self.auth.notices().latest(),
        }
    }

    pub fn visible_statuses(&self) -> Vec<TaskStatus> {
        self.dashboard
            .as_ref()
            .map(|d| d.view().columns())
            .unwrap_or_else(|| TaskStatus::ALL.to_vec())
    }

    pub fn selected_status(&self) -> TaskStatus {
        let statuses = self.visible_statuses();
        statuses
            .get(self.column)
            .copied()
            .unwrap_or(TaskStatus::Todo)
    }

    pub fn column_len(&self, status: TaskStatus) -> usize {
        self.dashboard
            .as_ref()
            .and_then(|d| d.columns().into_iter().find(|c| c.status == status))
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let dashboard = self.dashboard.as_ref()?;
        let index = self.card.get()?;
        dashboard.task_at(DragSource {
            status: self.selected_status(),
            index,
        })
    }

    pub fn selected_view(&self) -> StatusView {
        self.sidebar
            .get()
            .and_then(|idx| StatusView::SIDEBAR.get(idx).copied())
            .unwrap_or_default()
    }

    pub(crate) fn clamp_selection(&mut self) {
        let columns = self.visible_statuses().len();
        if self.column >= columns {
            self.column = columns.saturating_sub(1);
        }
        let len = self.column_len(self.selected_status());
        self.card.clamp(len);
    }

    /// Persist a move that has already been drawn.
    pub async fn process_pending(&mut self) {
        if self.pending_move.is_some() {
            self.ensure_session(Utc::now()).await;
        }
        if let (Some(pending), Some(dashboard)) = (self.pending_move.take(), self.dashboard.as_mut()) {
            let _ = dashboard.finish_move(pending).await;
            self.clamp_selection();
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new(TICK_RATE);

        self.start().await;
        let result = self.event_loop(&mut terminal, &mut events).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
    ) -> anyhow::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            if self.pending_move.is_some() {
                self.process_pending().await;
                continue;
            }

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key).await,
                Some(Event::Tick) => self.tick(Utc::now()),
                None => break,
            }
        }
        Ok(())
    }
}

/// The provider refused the session itself, as opposed to being unreachable.
fn is_session_rejected(err: &TaskboardError) -> bool {
    matches!(
        err,
        TaskboardError::Auth { .. } | TaskboardError::Unauthorized(_)
    )
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
