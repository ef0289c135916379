//! Per-mutation state machine.
//!
//! Every remote write is recorded as `Pending` when issued and settles into
//! `Committed` or `Failed`. Optimistic writes keep the pre-write row so a
//! failure can restore it.

use crate::{Task, TaskId, TaskStatus};
use std::collections::VecDeque;

pub type MutationId = u64;

const SETTLED_HISTORY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Edit,
    SetStatus(TaskStatus),
    Move(TaskStatus),
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Committed,
    Failed { rolled_back: bool },
}

#[derive(Debug, Clone)]
pub struct Mutation {
    pub id: MutationId,
    pub task_id: Option<TaskId>,
    pub kind: MutationKind,
    pub state: MutationState,
    /// Row as it was before an optimistic local change.
    before: Option<Task>,
}

#[derive(Debug, Default)]
pub struct MutationLedger {
    next_id: MutationId,
    pending: Vec<Mutation>,
    settled: VecDeque<Mutation>,
}

impl MutationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write that has not been applied locally.
    pub fn begin(&mut self, task_id: Option<TaskId>, kind: MutationKind) -> MutationId {
        self.push(task_id, kind, None)
    }

    /// Record a write whose effect was already applied locally; `before`
    /// is restored if it fails.
    pub fn begin_optimistic(&mut self, before: Task, kind: MutationKind) -> MutationId {
        self.push(Some(before.id.clone()), kind, Some(before))
    }

    fn push(&mut self, task_id: Option<TaskId>, kind: MutationKind, before: Option<Task>) -> MutationId {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!("mutation {} pending: {:?} {:?}", id, kind, task_id);
        self.pending.push(Mutation {
            id,
            task_id,
            kind,
            state: MutationState::Pending,
            before,
        });
        id
    }

    pub fn commit(&mut self, id: MutationId) {
        if let Some(mut mutation) = self.take(id) {
            mutation.state = MutationState::Committed;
            mutation.before = None;
            self.settle(mutation);
        }
    }

    /// Mark a mutation failed and hand back the row to restore, if any.
    pub fn fail(&mut self, id: MutationId) -> Option<Task> {
        let mut mutation = self.take(id)?;
        let rollback = mutation.before.take();
        mutation.state = MutationState::Failed {
            rolled_back: rollback.is_some(),
        };
        self.settle(mutation);
        rollback
    }

    pub fn state(&self, id: MutationId) -> Option<MutationState> {
        self.pending
            .iter()
            .chain(self.settled.iter())
            .find(|m| m.id == id)
            .map(|m| m.state)
    }

    pub fn is_pending(&self, task_id: &TaskId) -> bool {
        self.pending
            .iter()
            .any(|m| m.task_id.as_ref() == Some(task_id))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn settled(&self) -> impl Iterator<Item = &Mutation> {
        self.settled.iter()
    }

    fn take(&mut self, id: MutationId) -> Option<Mutation> {
        let idx = self.pending.iter().position(|m| m.id == id)?;
        Some(self.pending.remove(idx))
    }

    fn settle(&mut self, mutation: Mutation) {
        tracing::debug!("mutation {} settled: {:?}", mutation.id, mutation.state);
        if self.settled.len() == SETTLED_HISTORY {
            self.settled.pop_front();
        }
        self.settled.push_back(mutation);
    }
}
