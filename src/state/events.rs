//! Events marshalled onto the render thread, and effects handed back to the host.

use super::mutation::MutationOutcome;
use super::overlay::MutationTicket;
use crate::view_state::{ContextHandle, ImageKey, ItemKey, MarkupKey, Size};
use std::sync::mpsc::Sender;
use tracing::trace;

/// Asynchronous completion waiting to be applied on the render thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A reaction mutation finished.
    MutationCompleted {
        /// Which submission finished.
        ticket: MutationTicket,
        /// How it finished.
        outcome: MutationOutcome,
    },
    /// An external renderer finished measuring content.
    Measured(MeasurementReport),
}

/// Which cache a measurement belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasuredContent {
    /// Markup laid out by the markup renderer.
    Markup(MarkupKey),
    /// Image laid out once loaded.
    Image(ImageKey),
}

/// A measurement reported by a rendering context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementReport {
    /// Context that requested the measurement.
    pub context: ContextHandle,
    /// What was measured.
    pub content: MeasuredContent,
    /// Measured size.
    pub size: Size,
}

/// Cloneable, `Send` handle renderers use to report measurements.
#[derive(Debug, Clone)]
pub struct MeasurementSink {
    tx: Sender<ControllerEvent>,
}

impl MeasurementSink {
    pub(crate) fn new(tx: Sender<ControllerEvent>) -> Self {
        Self { tx }
    }

    /// Queue a measurement for the render thread.
    pub fn report(&self, context: ContextHandle, content: MeasuredContent, size: Size) {
        let report = MeasurementReport {
            context,
            content,
            size,
        };
        if self.tx.send(ControllerEvent::Measured(report)).is_err() {
            trace!("controller gone, measurement dropped");
        }
    }

    /// Queue a markup measurement.
    pub fn report_markup(&self, context: ContextHandle, html: impl Into<String>, size: Size) {
        self.report(context, MeasuredContent::Markup(MarkupKey(html.into())), size);
    }

    /// Queue an image measurement laid out at `width`.
    pub fn report_image(&self, context: ContextHandle, url: impl Into<String>, width: u32, size: Size) {
        self.report(context, MeasuredContent::Image(ImageKey::new(url, width)), size);
    }
}

/// Work the host must do after a controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    /// Re-project and redraw the comment.
    Render,
    /// Relayout one item whose size changed.
    InvalidateLayout(ItemKey),
    /// Remove collapsed-preview affordances from visible cells before the
    /// next render.
    ClearCollapseAffordances,
}

/// Append `effect` unless it is already queued.
pub(crate) fn push_effect(effects: &mut Vec<HostEffect>, effect: HostEffect) {
    if !effects.contains(&effect) {
        effects.push(effect);
    }
}
