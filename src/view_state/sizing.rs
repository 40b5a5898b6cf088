//! Item sizing.
//!
//! Details and reactions rows have fixed heights. Text is measured locally by
//! wrapping on display width. Markup and images are answered from their
//! measurement caches. The collapse marker segment uses the comment's
//! collapsed preview height while collapsed.

use super::height_cache::{ImageHeightCache, ImageKey, MarkupHeightCache, MarkupKey};
use super::projector::RenderableItem;
use super::types::{LayoutWidth, Size};
use crate::model::BodySegment;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Errors from sizing requests. Both are programmer errors at the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Sizing was requested before the host supplied a container width.
    #[error("Container width must be set before sizing items")]
    MissingContainerWidth,

    /// Sizing was requested for an index outside the projected list.
    #[error("Item index {index} out of range (list has {len} items)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the projected list.
        len: usize,
    },
}

/// Fixed heights and text metrics, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingMetrics {
    /// Height of the details row.
    pub details_height: u32,
    /// Height of the reactions row.
    pub reactions_height: u32,
    /// Height answered for unmeasured markup.
    pub markup_fallback_height: u32,
    /// Height answered for unmeasured images.
    pub image_fallback_height: u32,
    /// Height of one line of body text.
    pub text_line_height: u32,
    /// Advance of one display column of body text.
    pub text_column_width: u32,
    /// Padding around text on each horizontal edge.
    pub text_horizontal_padding: u32,
    /// Padding around text on each vertical edge.
    pub text_vertical_padding: u32,
}

impl Default for SizingMetrics {
    fn default() -> Self {
        Self {
            // row spacing x3 + avatar
            details_height: 8 * 3 + 30,
            reactions_height: 40,
            markup_fallback_height: 55,
            image_fallback_height: 200,
            text_line_height: 20,
            text_column_width: 8,
            text_horizontal_padding: 15,
            text_vertical_padding: 8,
        }
    }
}

/// The two measurement caches owned by one controller.
#[derive(Debug, Clone)]
pub struct MeasurementCaches {
    /// Markup-keyed cache.
    pub markup: MarkupHeightCache,
    /// Image-keyed cache.
    pub images: ImageHeightCache,
}

impl MeasurementCaches {
    /// Empty caches using the fallbacks from `metrics`.
    pub fn new(metrics: &SizingMetrics) -> Self {
        Self {
            markup: MarkupHeightCache::new("markup", metrics.markup_fallback_height),
            images: ImageHeightCache::new("image", metrics.image_fallback_height),
        }
    }
}

/// Width an image segment is laid out at: its natural width when known and
/// narrower than the container, otherwise the container width.
pub fn image_render_width(width_hint: Option<u32>, container: LayoutWidth) -> u32 {
    width_hint
        .filter(|hint| *hint > 0)
        .map_or(container.get(), |hint| hint.min(container.get()))
}

/// Height of plain text wrapped at `width`.
pub fn text_height(text: &str, width: LayoutWidth, metrics: &SizingMetrics) -> u32 {
    let usable = width
        .get()
        .saturating_sub(metrics.text_horizontal_padding.saturating_mul(2))
        .max(1);
    let columns = (usable / metrics.text_column_width.max(1)).max(1) as usize;

    let lines: usize = text
        .split('\n')
        .map(|line| line.width().div_ceil(columns).max(1))
        .sum();

    let lines = u32::try_from(lines).unwrap_or(u32::MAX);
    lines
        .saturating_mul(metrics.text_line_height)
        .saturating_add(metrics.text_vertical_padding.saturating_mul(2))
}

/// Size of `item` at `width`.
///
/// `collapsed_preview` is the preview height when `item` is the collapse
/// marker segment of a collapsed comment; it overrides any measurement.
pub fn size_for(
    item: &RenderableItem,
    width: LayoutWidth,
    collapsed_preview: Option<u32>,
    metrics: &SizingMetrics,
    caches: &mut MeasurementCaches,
) -> Size {
    let height = match (item, collapsed_preview) {
        (RenderableItem::Body { .. }, Some(preview)) => preview,
        (RenderableItem::Details(_), _) => metrics.details_height,
        (RenderableItem::Reactions(_), _) => metrics.reactions_height,
        (RenderableItem::Body { segment, .. }, None) => match segment {
            BodySegment::Text { text } => text_height(text, width, metrics),
            BodySegment::Markup { html } => caches.markup.lookup(&MarkupKey(html.clone())),
            BodySegment::Image { url, width_hint } => caches.images.lookup(&ImageKey::new(
                url.clone(),
                image_render_width(*width_hint, width),
            )),
        },
    };
    Size::new(width.get(), height)
}
