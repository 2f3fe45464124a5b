//! User-facing messages.
//!
//! [`Message`] is the catalogue of everything the CLI says; the `msg_*!`
//! macros in [`macros`] decide whether it goes to the terminal or, in debug
//! mode, through `tracing`.
//!
//! ```rust
//! use projectstack::libs::messages::Message;
//! use projectstack::msg_success;
//!
//! msg_success!(Message::TaskRemoved("t-1".to_string()));
//! ```

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
