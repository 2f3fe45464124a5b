//! Task-board view-model.
//!
//! - [`projector`] derives the three-column layout from a flat task list.
//! - [`mutator`] applies create/delete/move/assign against the cached list
//!   and reconciles it with the remote [`TaskRepository`](crate::api::TaskRepository).
//! - [`store`] holds the cached list behind an atomic snapshot swap.
//!
//! ```rust,no_run
//! use projectstack::libs::board::{project, BoardMutator};
//! # async fn demo(api: std::sync::Arc<projectstack::api::ApiClient>) -> anyhow::Result<()> {
//! let board = BoardMutator::new(api, "p-1");
//! board.load().await?;
//! let snapshot = board.snapshot();
//! let columns = project(Some(snapshot.as_slice()));
//! println!("{} tasks to do", columns.todo().len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mutator;
pub mod projector;
pub mod store;

pub use error::{BoardError, BoardResult, Operation, ValidationError};
pub use mutator::{BoardEvent, BoardMutator};
pub use projector::{project, Board};
pub use store::TaskStore;
