//! Core library of the ProjectStack CLI.
//!
//! - [`board`]: the task board view-model (projection and optimistic mutation)
//! - [`task`], [`project`]: records exchanged with the backend
//! - [`config`], [`data_storage`], [`secret`], [`session`]: local state
//! - [`messages`], [`view`]: terminal output

pub mod board;
pub mod config;
pub mod data_storage;
pub mod messages;
pub mod metadata;
pub mod project;
pub mod secret;
pub mod session;
pub mod task;
pub mod view;
