//! Board mutations with optimistic updates and rollback.
//!
//! Every operation follows the same discipline:
//!
//! 1. validate locally; validation failures never reach the repository,
//! 2. apply the optimistic change to the cached list (delete, move, assign;
//!    create is not optimistic because the server assigns the id),
//! 3. run the repository call on a spawned task,
//! 4. on failure, undo exactly what step 2 changed and surface the error.
//!
//! Step 3 runs detached from the caller: dropping the returned future does
//! not cancel an in-flight request, the list is still reconciled when the
//! response arrives and the outcome is published to subscribers, who may
//! well have gone away by then.

use super::error::{BoardError, BoardResult, Operation, ValidationError};
use super::store::TaskStore;
use crate::api::TaskRepository;
use crate::libs::task::{Comment, Member, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

const EVENT_CAPACITY: usize = 64;

/// Change notification published after the cached list changes.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    Loaded(usize),
    Created(Task),
    Removed(TaskId),
    Changed(Task),
    /// An optimistic change was undone after the repository call failed.
    RolledBack(Operation),
}

/// Applies user-initiated changes to one project's board.
pub struct BoardMutator<R: TaskRepository + ?Sized> {
    repository: Arc<R>,
    project_id: Arc<str>,
    store: Arc<TaskStore>,
    events: broadcast::Sender<BoardEvent>,
}

impl<R: TaskRepository + ?Sized> Clone for BoardMutator<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            project_id: Arc::clone(&self.project_id),
            store: Arc::clone(&self.store),
            events: self.events.clone(),
        }
    }
}

impl<R: TaskRepository + ?Sized + 'static> BoardMutator<R> {
    pub fn new(repository: Arc<R>, project_id: &str) -> Self {
        Self::with_tasks(repository, project_id, Vec::new())
    }

    /// Starts from an already fetched task list.
    pub fn with_tasks(repository: Arc<R>, project_id: &str, tasks: Vec<Task>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            repository,
            project_id: Arc::from(project_id),
            store: Arc::new(TaskStore::new(tasks)),
            events,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Current cached list, in board order of arrival.
    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        self.store.snapshot()
    }

    pub fn task(&self, task_id: &str) -> Option<Task> {
        self.store.get(task_id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Replaces the cached list with the repository's.
    pub async fn load(&self) -> BoardResult<usize> {
        let this = self.clone();
        self.detached(Operation::Load, async move {
            let tasks = this
                .repository
                .list(&this.project_id)
                .await
                .map_err(|source| BoardError::repository(Operation::Load, source))?;
            let count = tasks.len();
            this.store.replace(tasks);
            debug!(project_id = %this.project_id, count, "board loaded");
            this.notify(BoardEvent::Loaded(count));
            Ok(count)
        })
        .await
    }

    /// Creates a task and appends the server's copy to the list.
    ///
    /// Nothing is inserted before the server answers, so a failed create
    /// leaves no trace on the board.
    pub async fn create(&self, draft: TaskDraft) -> BoardResult<Task> {
        let draft = draft.validated()?;
        let this = self.clone();
        self.detached(Operation::Create, async move {
            match this.repository.create(&this.project_id, &draft).await {
                Ok(task) => {
                    this.store.update(|tasks| tasks.push(task.clone()));
                    debug!(project_id = %this.project_id, task_id = %task.id, "task created");
                    this.notify(BoardEvent::Created(task.clone()));
                    Ok(task)
                }
                Err(source) => {
                    warn!(project_id = %this.project_id, error = %source, "task creation failed");
                    Err(BoardError::repository(Operation::Create, source))
                }
            }
        })
        .await
    }

    /// Removes a task immediately and restores it at its original position
    /// if the repository refuses the delete.
    pub async fn delete(&self, task_id: &str) -> BoardResult<()> {
        let removed = self.store.update(|tasks| {
            let index = tasks.iter().position(|task| task.id == task_id)?;
            Some((index, tasks.remove(index)))
        });
        let Some((index, task)) = removed else {
            return Err(BoardError::NotFound(task_id.to_owned()));
        };
        self.notify(BoardEvent::Removed(task.id.clone()));

        let operation = Operation::Delete(task.id.clone());
        let this = self.clone();
        self.detached(operation.clone(), async move {
            match this.repository.remove(&this.project_id, &task.id).await {
                Ok(()) => {
                    debug!(project_id = %this.project_id, task_id = %task.id, "task deleted");
                    Ok(())
                }
                Err(source) => {
                    warn!(project_id = %this.project_id, task_id = %task.id, error = %source, "delete failed, restoring task");
                    this.store.update(|tasks| {
                        if !tasks.iter().any(|existing| existing.id == task.id) {
                            tasks.insert(index.min(tasks.len()), task);
                        }
                    });
                    this.notify(BoardEvent::RolledBack(operation.clone()));
                    Err(BoardError::repository(operation, source))
                }
            }
        })
        .await
    }

    /// Moves a task to another column. Only the `status` field changes.
    pub async fn move_task(&self, task_id: &str, status: TaskStatus) -> BoardResult<Task> {
        if !status.is_known() {
            return Err(ValidationError::UnknownStatus(status.to_string()).into());
        }
        self.patch(Operation::Move(task_id.to_owned()), task_id, TaskPatch::status(status)).await
    }

    /// Sets the assignee, or clears it with `None`.
    pub async fn assign(&self, task_id: &str, member: Option<Member>) -> BoardResult<Task> {
        self.patch(Operation::Assign(task_id.to_owned()), task_id, TaskPatch::assignee(member)).await
    }

    /// Applies `patch` locally, sends it, and reverts the patched fields on failure.
    ///
    /// Returns the task as the board now shows it. The server's echo is not
    /// merged back, so fields outside the patch stay exactly as cached.
    async fn patch(&self, operation: Operation, task_id: &str, patch: TaskPatch) -> BoardResult<Task> {
        let applied = self.store.update(|tasks| {
            let task = tasks.iter_mut().find(|task| task.id == task_id)?;
            let previous = task.clone();
            patch.apply(task);
            Some((previous, task.clone()))
        });
        let Some((previous, updated)) = applied else {
            return Err(BoardError::NotFound(task_id.to_owned()));
        };
        self.notify(BoardEvent::Changed(updated.clone()));

        let this = self.clone();
        self.detached(operation.clone(), async move {
            match this.repository.update(&this.project_id, &updated.id, &patch).await {
                Ok(remote) => {
                    debug!(project_id = %this.project_id, task_id = %remote.id, status = %remote.status, "task updated");
                    Ok(updated)
                }
                Err(source) => {
                    warn!(project_id = %this.project_id, task_id = %updated.id, error = %source, "update failed, reverting");
                    let reverted = this.store.update(|tasks| {
                        let task = tasks.iter_mut().find(|task| task.id == updated.id)?;
                        patch.revert(task, &previous);
                        Some(task.clone())
                    });
                    if let Some(task) = reverted {
                        this.notify(BoardEvent::Changed(task));
                    }
                    this.notify(BoardEvent::RolledBack(operation.clone()));
                    Err(BoardError::repository(operation, source))
                }
            }
        })
        .await
    }

    pub async fn comments(&self, task_id: &str) -> BoardResult<Vec<Comment>> {
        let operation = Operation::ListComments(task_id.to_owned());
        self.repository
            .list_comments(&self.project_id, task_id)
            .await
            .map_err(|source| BoardError::repository(operation, source))
    }

    pub async fn add_comment(&self, task_id: &str, text: &str) -> BoardResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyComment.into());
        }
        let operation = Operation::AddComment(task_id.to_owned());
        let (this, task_id, text) = (self.clone(), task_id.to_owned(), text.to_owned());
        self.detached(operation.clone(), async move {
            this.repository
                .add_comment(&this.project_id, &task_id, &text)
                .await
                .map_err(|source| BoardError::repository(operation, source))
        })
        .await
    }

    pub async fn remove_comment(&self, task_id: &str, comment_id: &str) -> BoardResult<()> {
        let operation = Operation::RemoveComment {
            task_id: task_id.to_owned(),
            comment_id: comment_id.to_owned(),
        };
        let (this, task_id, comment_id) = (self.clone(), task_id.to_owned(), comment_id.to_owned());
        self.detached(operation.clone(), async move {
            this.repository
                .remove_comment(&this.project_id, &task_id, &comment_id)
                .await
                .map_err(|source| BoardError::repository(operation, source))
        })
        .await
    }

    fn notify(&self, event: BoardEvent) {
        // No subscribers is fine: the view went away and the event is dropped.
        let _ = self.events.send(event);
    }

    /// Runs `work` on its own task so the caller going away cannot cancel it.
    ///
    /// Only a runtime shutdown stops `work` early. That surfaces as
    /// [`BoardError::Interrupted`] and leaves any optimistic change in place.
    async fn detached<T, F>(&self, operation: Operation, work: F) -> BoardResult<T>
    where
        T: Send + 'static,
        F: Future<Output = BoardResult<T>> + Send + 'static,
    {
        match tokio::spawn(work).await {
            Ok(result) => result,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => Err(BoardError::Interrupted(operation)),
        }
    }
}
