//! Per-comment controller: the host-facing surface of the crate.
//!
//! Owns the collapse state, reaction overlay, measurement caches and render
//! contexts for one comment slot. All methods run on the render thread.
//! Asynchronous work (reaction submission, content measurement) reports back
//! through an internal channel that the host drains with
//! [`CommentController::pump`].

use super::events::{
    push_effect, ControllerEvent, HostEffect, MeasuredContent, MeasurementReport, MeasurementSink,
};
use super::mutation::{ReactionClient, ReactionRequest, Responder};
use super::overlay::{ReactionOverlay, Resolution};
use super::selection;
use crate::model::{BodySegment, Comment, CommentId, IssueRef, ReactionContent};
use crate::view_state::collapse::is_marker_item;
use crate::view_state::height_cache::CacheStats;
use crate::view_state::sizing;
use crate::view_state::{
    project, Borders, CellId, CollapseController, CollapseState, CollapseTransition,
    ContextHandle, Insets, LayoutWidth, MeasurementCaches, RenderContexts, RenderableItem, Size,
    SizingError, SizingMetrics, ThreadInsets,
};
use std::rc::{Rc, Weak};
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::{debug, trace};

/// Callbacks to the screen hosting the comment. Held weakly.
pub trait CommentDelegate {
    /// The comment was edited by the viewer.
    fn did_edit(&self, id: &CommentId);

    /// The viewer tapped a reference to another issue.
    fn did_tap_issue(&self, issue: &IssueRef);
}

/// Layout constants injected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerConfig {
    /// Fixed heights, fallbacks and text metrics.
    pub metrics: SizingMetrics,
    /// Section insets per thread position.
    pub insets: ThreadInsets,
}

/// Controller for one comment slot.
pub struct CommentController {
    comment: Comment,
    items: Vec<RenderableItem>,
    collapse: CollapseController,
    overlay: ReactionOverlay,
    caches: MeasurementCaches,
    contexts: RenderContexts,
    config: ControllerConfig,
    container_width: Option<LayoutWidth>,
    client: Rc<dyn ReactionClient>,
    delegate: Option<Weak<dyn CommentDelegate>>,
    tx: Sender<ControllerEvent>,
    // dropped on release so late sends fail
    rx: Option<Receiver<ControllerEvent>>,
}

impl CommentController {
    /// Create a controller showing `comment`, collapsed.
    pub fn new(comment: Comment, config: ControllerConfig, client: Rc<dyn ReactionClient>) -> Self {
        let (tx, rx) = channel();
        let mut controller = Self {
            comment,
            items: Vec::new(),
            collapse: CollapseController::new(),
            overlay: ReactionOverlay::new(),
            caches: MeasurementCaches::new(&config.metrics),
            contexts: RenderContexts::new(),
            config,
            container_width: None,
            client,
            delegate: None,
            tx,
            rx: Some(rx),
        };
        controller.reproject();
        controller
    }

    /// Attach a delegate. Only a weak reference is kept.
    pub fn with_delegate(mut self, delegate: &Rc<dyn CommentDelegate>) -> Self {
        self.delegate = Some(Rc::downgrade(delegate));
        self
    }

    /// Deliver fresh canonical data.
    ///
    /// The same comment keeps its collapse state, and its overlay unless the
    /// new data supersedes it. A different comment starts over collapsed
    /// with no overlay. Measurement caches survive either way.
    pub fn bind(&mut self, comment: Comment) -> Vec<HostEffect> {
        if self.is_released() {
            return Vec::new();
        }
        if comment.id() == self.comment.id() {
            let _ = self.overlay.supersede(comment.reactions());
        } else {
            debug!(from = %self.comment.id(), to = %comment.id(), "controller rebound to another comment");
            self.overlay.clear();
            self.collapse = CollapseController::new();
        }
        self.comment = comment;
        self.reproject();
        vec![HostEffect::Render]
    }

    /// Comment currently bound.
    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// Ordered renderable list for the current state.
    pub fn project(&self) -> &[RenderableItem] {
        &self.items
    }

    /// Current collapse state.
    pub fn collapse_state(&self) -> CollapseState {
        self.collapse.state()
    }

    /// Reaction overlay, for inspection.
    pub fn overlay(&self) -> &ReactionOverlay {
        &self.overlay
    }

    /// Counters of the markup and image caches, in that order.
    pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
        (self.caches.markup.stats(), self.caches.images.stats())
    }

    /// Set the width items are laid out at.
    pub fn set_container_width(&mut self, width: LayoutWidth) {
        self.container_width = Some(width);
    }

    /// Size of the item at `index`.
    ///
    /// # Errors
    ///
    /// [`SizingError::MissingContainerWidth`] before a width was set (also a
    /// debug assertion), [`SizingError::IndexOutOfRange`] for a bad index.
    pub fn size_for(&mut self, index: usize) -> Result<Size, SizingError> {
        debug_assert!(
            self.container_width.is_some(),
            "container width must be set before sizing items"
        );
        let width = self
            .container_width
            .ok_or(SizingError::MissingContainerWidth)?;
        let item = self.items.get(index).ok_or(SizingError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })?;

        let marker = self.comment.collapse();
        let preview = marker
            .filter(|_| self.collapse.is_collapsed() && is_marker_item(item, marker))
            .map(|marker| marker.preview_height);

        Ok(sizing::size_for(
            item,
            width,
            preview,
            &self.config.metrics,
            &mut self.caches,
        ))
    }

    /// Whether the cell at `index` shows the collapsed-preview affordance.
    pub fn affordance_visible(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| self.collapse.affordance_visible(item, self.comment.collapse()))
    }

    /// Route a tap on the item at `index`.
    pub fn on_select(&mut self, index: usize) -> Vec<HostEffect> {
        if self.is_released() {
            return Vec::new();
        }
        let Some(item) = self.items.get(index) else {
            debug!(index, len = self.items.len(), "tap outside projected list ignored");
            return Vec::new();
        };
        match selection::on_select(item, &mut self.collapse) {
            CollapseTransition::Unchanged => Vec::new(),
            CollapseTransition::Expanded => {
                // affordances must leave visible cells before the longer list renders
                self.reproject();
                vec![HostEffect::ClearCollapseAffordances, HostEffect::Render]
            }
        }
    }

    /// Toggle a reaction optimistically and submit the mutation.
    pub fn react(&mut self, content: ReactionContent, is_add: bool) -> Vec<HostEffect> {
        if self.is_released() {
            return Vec::new();
        }
        let ticket = self
            .overlay
            .apply(self.comment.reactions(), content, is_add);
        self.reproject();

        let request = ReactionRequest {
            subject: self.comment.id().clone(),
            content,
            is_add,
        };
        self.client
            .submit(request, Responder::new(ticket, self.tx.clone()));
        vec![HostEffect::Render]
    }

    /// Record that `cell` now displays the item at `index`.
    ///
    /// Returns `None` for an index outside the projected list.
    pub fn attach_context(&mut self, cell: CellId, index: usize) -> Option<ContextHandle> {
        let key = self.items.get(index)?.key();
        Some(self.contexts.attach(cell, key))
    }

    /// Record that the cell behind `handle` stopped displaying its item.
    /// A no-op if the cell was already recycled.
    pub fn detach_context(&mut self, handle: ContextHandle) {
        if self.contexts.is_attached(handle) {
            self.contexts.detach(handle.cell());
        }
    }

    /// Handle renderers use to report measurements from any thread.
    pub fn measurement_sink(&self) -> MeasurementSink {
        MeasurementSink::new(self.tx.clone())
    }

    /// Apply every queued asynchronous result. Call on the render thread.
    pub fn pump(&mut self) -> Vec<HostEffect> {
        let Some(rx) = &self.rx else {
            return Vec::new();
        };
        let events: Vec<ControllerEvent> = rx.try_iter().collect();

        let mut effects = Vec::new();
        for event in events {
            match event {
                ControllerEvent::MutationCompleted { ticket, outcome } => {
                    if self.overlay.resolve(ticket, outcome) == Resolution::RolledBack {
                        self.reproject();
                        push_effect(&mut effects, HostEffect::Render);
                    }
                }
                ControllerEvent::Measured(report) => {
                    if !self.measures_item(&report) {
                        trace!(item = ?report.context.item(), "measurement for other content dropped");
                        continue;
                    }
                    let changed = match report.content {
                        MeasuredContent::Markup(key) => self
                            .caches
                            .markup
                            .record_from(&self.contexts, report.context, key, report.size)
                            .is_some(),
                        MeasuredContent::Image(key) => self
                            .caches
                            .images
                            .record_from(&self.contexts, report.context, key, report.size)
                            .is_some(),
                    };
                    if changed {
                        push_effect(
                            &mut effects,
                            HostEffect::InvalidateLayout(report.context.item()),
                        );
                    }
                }
            }
        }
        effects
    }

    /// Section inset for the comment's thread position.
    pub fn inset(&self) -> Insets {
        self.config.insets.resolve(self.comment.thread_position())
    }

    /// Border visibility for the comment's thread position.
    pub fn borders(&self) -> Borders {
        crate::view_state::thread_position::borders(self.comment.thread_position())
    }

    /// Shareable link to the comment, when its issue is known.
    pub fn permalink(&self) -> Option<String> {
        self.comment.permalink()
    }

    /// Forward a tap on an issue reference to the delegate, if still alive.
    pub fn did_tap_issue(&self, issue: &IssueRef) {
        match self.delegate.as_ref().and_then(Weak::upgrade) {
            Some(delegate) => delegate.did_tap_issue(issue),
            None => trace!(%issue, "issue tap without delegate"),
        }
    }

    /// Tear down: drop the overlay, caches and contexts. Every queued and
    /// future event is discarded and later calls produce no effects.
    pub fn release(&mut self) {
        let Some(rx) = self.rx.take() else {
            return;
        };
        self.overlay.clear();
        self.caches.markup.clear();
        self.caches.images.clear();
        self.contexts.clear();
        let dropped = rx.try_iter().count();
        debug!(id = %self.comment.id(), dropped, "controller released");
    }

    /// Whether [`release`](Self::release) was called.
    pub fn is_released(&self) -> bool {
        self.rx.is_none()
    }

    /// Whether `report` measured the content of the item its context shows.
    fn measures_item(&self, report: &MeasurementReport) -> bool {
        let item_key = report.context.item();
        let Some(RenderableItem::Body { segment, .. }) =
            self.items.iter().find(|item| item.key() == item_key)
        else {
            return false;
        };
        match (&report.content, segment) {
            (MeasuredContent::Markup(key), BodySegment::Markup { html }) => key.0 == *html,
            (MeasuredContent::Image(key), BodySegment::Image { url, width_hint }) => {
                key.url == *url
                    && self.container_width.is_some_and(|container| {
                        key.width == sizing::image_render_width(*width_hint, container)
                    })
            }
            _ => false,
        }
    }

    fn reproject(&mut self) {
        self.items = project(&self.comment, self.collapse.state(), self.overlay.current());
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
