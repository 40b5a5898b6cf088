//! Reaction mutation submission.
//!
//! The core never talks to the network. It hands a [`ReactionRequest`] and
//! a [`Responder`] to the host's [`ReactionClient`]; the client completes the
//! responder from whatever thread its transport finishes on, and the outcome
//! is marshalled back onto the render thread through the controller's event
//! channel.

use super::events::ControllerEvent;
use super::overlay::MutationTicket;
use crate::model::{CommentId, ReactionContent};
use std::sync::mpsc::Sender;
use tracing::trace;

/// A reaction add/remove to submit for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRequest {
    /// Comment the reaction applies to.
    pub subject: CommentId,
    /// Reaction being toggled.
    pub content: ReactionContent,
    /// `true` to add, `false` to remove.
    pub is_add: bool,
}

/// Result of a submitted mutation. There is no partial-result payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the mutation.
    Succeeded,
    /// The mutation failed; the overlay rolls back silently.
    Failed,
}

/// One-shot completion handle for a submitted mutation.
///
/// `Send`, so transports may complete it from a worker thread. Completing
/// after the controller was released is a silent no-op.
#[derive(Debug)]
#[must_use = "a dropped responder leaves its mutation in flight forever"]
pub struct Responder {
    ticket: MutationTicket,
    tx: Sender<ControllerEvent>,
}

impl Responder {
    pub(crate) fn new(ticket: MutationTicket, tx: Sender<ControllerEvent>) -> Self {
        Self { ticket, tx }
    }

    /// Ticket of the mutation this responder completes.
    pub fn ticket(&self) -> MutationTicket {
        self.ticket
    }

    /// Report the outcome.
    pub fn complete(self, outcome: MutationOutcome) {
        let event = ControllerEvent::MutationCompleted {
            ticket: self.ticket,
            outcome,
        };
        if self.tx.send(event).is_err() {
            trace!(seq = self.ticket.seq(), "controller gone, mutation outcome dropped");
        }
    }

    /// Report success.
    pub fn succeed(self) {
        self.complete(MutationOutcome::Succeeded);
    }

    /// Report failure.
    pub fn fail(self) {
        self.complete(MutationOutcome::Failed);
    }
}

/// Host-supplied transport for reaction mutations.
pub trait ReactionClient {
    /// Start submitting `request`. Must eventually complete `responder`,
    /// on any thread. Must not block the render thread.
    fn submit(&self, request: ReactionRequest, responder: Responder);
}

/// Client that completes every submission immediately with a fixed outcome.
///
/// Used by the command-line shell and handy in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateClient(pub MutationOutcome);

impl ReactionClient for ImmediateClient {
    fn submit(&self, request: ReactionRequest, responder: Responder) {
        trace!(subject = %request.subject, content = %request.content, "immediate submission");
        responder.complete(self.0);
    }
}
