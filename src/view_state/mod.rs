//! View-state layer - projection, collapse, measurement caches and sizing
//!
//! This module turns one comment into the ordered list of items the host
//! renders, and answers the size of each item.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (LayoutWidth, Size, Insets, Borders)
//! - `projector`: RenderableItem, ItemKey and the `project` function
//! - `collapse`: CollapseController - monotonic collapse/expand state machine
//! - `height_cache`: HeightCache - content-addressed measured sizes
//! - `context`: RenderContexts - generation-checked host cell handles
//! - `sizing`: per-item sizing over the caches and fixed metrics
//! - `thread_position`: thread position to inset/border mapping

pub mod collapse;
pub mod context;
pub mod height_cache;
pub mod projector;
pub mod sizing;
pub mod thread_position;
pub mod types;

pub use collapse::{CollapseController, CollapseState, CollapseTransition};
pub use context::{CellId, ContextHandle, RenderContexts};
pub use height_cache::{HeightCache, ImageKey, Invalidation, MarkupKey};
pub use projector::{project, ItemKey, RenderableItem};
pub use sizing::{MeasurementCaches, SizingError, SizingMetrics};
pub use thread_position::ThreadInsets;
pub use types::{Borders, Insets, LayoutWidth, Size};
