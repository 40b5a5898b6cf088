//! Comment view core (commentview)
//!
//! Presentation logic for a single issue/PR comment inside a scrolling
//! conversation: projection into renderable items, collapse/expand,
//! content-addressed measurement caches, optimistic reactions with rollback
//! and thread-position layout.
//!
//! The crate follows a Pure Core / Impure Shell split: `model`,
//! `view_state` and `state` never perform I/O; `config`, `logging` and
//! `plan` do.

pub mod config;
pub mod logging;
pub mod model;
pub mod plan;
pub mod state;
pub mod view_state;

pub use model::error::{AppError, InputError};
pub use state::{CommentController, ControllerConfig, HostEffect};
