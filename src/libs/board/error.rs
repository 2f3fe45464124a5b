//! Error taxonomy for board operations.

use crate::api::RepositoryError;
use crate::libs::task::TaskId;
use std::fmt;
use thiserror::Error;

/// Bad local input. Raised before any request is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("unknown task status '{0}', expected todo, in-progress or done")]
    UnknownStatus(String),

    #[error("unknown priority '{0}', expected low, medium or high")]
    UnknownPriority(String),

    #[error("comment text must not be empty")]
    EmptyComment,

    #[error("project name must not be empty")]
    EmptyProjectName,

    #[error("at least one email address is required")]
    NoInviteEmails,
}

/// Identity of the board operation that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Delete(TaskId),
    Move(TaskId),
    Assign(TaskId),
    ListComments(TaskId),
    AddComment(TaskId),
    RemoveComment { task_id: TaskId, comment_id: String },
}

impl Operation {
    /// Task the operation targeted, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Operation::Load | Operation::Create => None,
            Operation::Delete(id)
            | Operation::Move(id)
            | Operation::Assign(id)
            | Operation::ListComments(id)
            | Operation::AddComment(id)
            | Operation::RemoveComment { task_id: id, .. } => Some(id),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "loading tasks"),
            Operation::Create => write!(f, "creating task"),
            Operation::Delete(id) => write!(f, "deleting task {}", id),
            Operation::Move(id) => write!(f, "moving task {}", id),
            Operation::Assign(id) => write!(f, "assigning task {}", id),
            Operation::ListComments(id) => write!(f, "loading comments of task {}", id),
            Operation::AddComment(id) => write!(f, "commenting on task {}", id),
            Operation::RemoveComment { task_id, comment_id } => {
                write!(f, "deleting comment {} of task {}", comment_id, task_id)
            }
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The repository call failed. Any optimistic change has been rolled back.
    #[error("{operation} failed: {source}")]
    Repository {
        operation: Operation,
        #[source]
        source: RepositoryError,
    },

    #[error("task {0} is not on the board")]
    NotFound(TaskId),

    /// The runtime shut down before the repository call completed.
    ///
    /// No rollback happens on this path. The optimistic change stays in the
    /// cache, whose outcome on the server is unknown; reload before trusting it.
    #[error("{0} was interrupted")]
    Interrupted(Operation),
}

impl BoardError {
    pub fn repository(operation: Operation, source: RepositoryError) -> Self {
        BoardError::Repository { operation, source }
    }

    pub fn operation(&self) -> Option<&Operation> {
        match self {
            BoardError::Repository { operation, .. } | BoardError::Interrupted(operation) => Some(operation),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            BoardError::Repository {
                source: RepositoryError::Unauthorized,
                ..
            }
        )
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
