//! Controller state (pure core plus the channel seam to async work).
//!
//! Everything here runs on the render thread. Asynchronous completions
//! arrive as [`ControllerEvent`]s and are applied by
//! [`CommentController::pump`].

pub mod controller;
pub mod events;
pub mod mutation;
pub mod overlay;
pub mod selection;

// Re-export for convenience
pub use controller::{CommentController, CommentDelegate, ControllerConfig};
pub use events::{ControllerEvent, HostEffect, MeasuredContent, MeasurementReport, MeasurementSink};
pub use mutation::{ImmediateClient, MutationOutcome, ReactionClient, ReactionRequest, Responder};
pub use overlay::{
    apply_local, MutationTicket, PendingReaction, ReactionOverlay, ReactionOverlayState, Resolution,
};
pub use selection::on_select;
