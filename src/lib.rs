//! # projectstack
//!
//! Command line client for the ProjectStack project management backend:
//! projects, member invitations, kanban task boards and task comments.
//!
//! The interesting part is [`libs::board`]. It derives the three-column board
//! from a project's task list and applies create, delete, move and assign
//! optimistically against a [`api::TaskRepository`], rolling back when the
//! backend disagrees. [`api::ApiClient`] is the HTTP implementation of that
//! repository.

pub mod api;
pub mod commands;
pub mod libs;
