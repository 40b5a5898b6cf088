//! Optimistic reaction overlay with single-level rollback.
//!
//! A local reaction edit is shown immediately by layering a
//! [`ReactionOverlayState`] over the canonical summary while the mutation is
//! in flight. A failed mutation puts back the overlay that was showing when
//! that edit was applied. Rollback is one level deep: a failing second edit
//! reverts to the first edit's result, not to canonical data.

use super::mutation::MutationOutcome;
use crate::model::{ReactionContent, ReactionSummary};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// The edit an overlay is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReaction {
    /// Reaction being toggled.
    pub content: ReactionContent,
    /// `true` to add, `false` to remove.
    pub is_add: bool,
}

/// Optimistic reaction summary shown in place of canonical data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionOverlayState {
    summary: ReactionSummary,
    previous: Option<ReactionSummary>,
    pending: PendingReaction,
}

impl ReactionOverlayState {
    /// Summary the user currently sees.
    pub fn summary(&self) -> &ReactionSummary {
        &self.summary
    }

    /// Summary shown just before this edit.
    pub fn previous(&self) -> Option<&ReactionSummary> {
        self.previous.as_ref()
    }

    /// The edit this overlay represents.
    pub fn pending(&self) -> PendingReaction {
        self.pending
    }

    /// Whether `canonical` already agrees with the pending edit.
    pub fn is_reflected_by(&self, canonical: &ReactionSummary) -> bool {
        canonical.get(self.pending.content).viewer_reacted == self.pending.is_add
    }
}

/// Compute the overlay for one local edit.
///
/// Starts from `prior`'s summary when an overlay is already showing, so
/// consecutive edits compound; otherwise from the canonical `summary`. The
/// starting value becomes `previous`.
pub fn apply_local(
    summary: &ReactionSummary,
    prior: Option<&ReactionOverlayState>,
    content: ReactionContent,
    is_add: bool,
) -> ReactionOverlayState {
    let base = prior.map_or(summary, |prior| &prior.summary);
    ReactionOverlayState {
        summary: base.with_edit(content, is_add),
        previous: Some(base.clone()),
        pending: PendingReaction { content, is_add },
    }
}

/// Identifies one submitted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MutationTicket {
    seq: u64,
    epoch: u64,
}

impl MutationTicket {
    /// Submission order within the controller.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What resolving a mutation did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Success: the overlay stays until canonical data supersedes it.
    Kept,
    /// Failure: the overlay was rolled back; the host must re-render.
    RolledBack,
    /// The ticket belongs to an overlay already superseded by canonical
    /// data, or was resolved twice.
    Ignored,
}

/// Overlay owner for one controller: current state plus in-flight tickets.
#[derive(Debug, Clone, Default)]
pub struct ReactionOverlay {
    current: Option<ReactionOverlayState>,
    // canonical summary the overlay was last reconciled with
    base: Option<ReactionSummary>,
    epoch: u64,
    next_seq: u64,
    // ticket seq -> overlay to restore if that mutation fails
    in_flight: BTreeMap<u64, Option<ReactionOverlayState>>,
}

impl ReactionOverlay {
    /// No overlay, nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active overlay, if any.
    pub fn current(&self) -> Option<&ReactionOverlayState> {
        self.current.as_ref()
    }

    /// Number of submitted mutations without an outcome.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Apply a local edit on top of `canonical` (or the active overlay) and
    /// return the ticket the submission must carry.
    pub fn apply(
        &mut self,
        canonical: &ReactionSummary,
        content: ReactionContent,
        is_add: bool,
    ) -> MutationTicket {
        let next = apply_local(canonical, self.current.as_ref(), content, is_add);
        let restore = self.current.replace(next);
        self.base = Some(canonical.clone());

        let ticket = MutationTicket {
            seq: self.next_seq,
            epoch: self.epoch,
        };
        self.next_seq += 1;
        self.in_flight.insert(ticket.seq, restore);

        debug!(seq = ticket.seq, %content, is_add, "optimistic reaction applied");
        ticket
    }

    /// Apply the outcome of the mutation identified by `ticket`.
    pub fn resolve(&mut self, ticket: MutationTicket, outcome: MutationOutcome) -> Resolution {
        let Some(restore) = self.in_flight.remove(&ticket.seq) else {
            return Resolution::Ignored;
        };
        if ticket.epoch != self.epoch {
            debug!(seq = ticket.seq, ?outcome, "outcome for superseded overlay ignored");
            return Resolution::Ignored;
        }
        match outcome {
            MutationOutcome::Succeeded => Resolution::Kept,
            MutationOutcome::Failed => {
                debug!(seq = ticket.seq, "reaction mutation failed, rolling back");
                self.current = restore;
                Resolution::RolledBack
            }
        }
    }

    /// Reconcile with canonical data delivered again for the same comment.
    ///
    /// Re-delivery of the summary the overlay was built on is stale and
    /// keeps the overlay. Newer data clears it once nothing is in flight any
    /// more, or right away when it already reflects the pending edit.
    /// Outcomes of tickets issued before the clear are ignored afterwards.
    /// Returns whether the overlay was cleared.
    pub fn supersede(&mut self, canonical: &ReactionSummary) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        if self.base.as_ref() == Some(canonical) {
            trace!("canonical summary unchanged, overlay kept");
            return false;
        }
        if !self.in_flight.is_empty() && !current.is_reflected_by(canonical) {
            // newer, but the pending edit is not in it yet
            self.base = Some(canonical.clone());
            return false;
        }
        debug!(in_flight = self.in_flight.len(), "overlay superseded by canonical data");
        self.clear();
        true
    }

    /// Drop the overlay and orphan every in-flight ticket.
    pub fn clear(&mut self) {
        self.current = None;
        self.base = None;
        self.in_flight.clear();
        self.epoch += 1;
    }
}
