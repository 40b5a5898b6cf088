//! Command-line shell helpers (impure: file I/O).
//!
//! Loads a canonical comment from JSON, replays simulated interactions
//! against a [`CommentController`] and renders the resulting layout plan as
//! plain text.

use crate::model::error::{AppError, InputError};
use crate::model::{Comment, ReactionContent, ThreadPosition};
use crate::state::{CommentController, HostEffect};
use crate::view_state::{RenderableItem, SizingError};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Read and decode a comment document.
///
/// # Errors
///
/// [`InputError::FileNotFound`] for a missing file, [`InputError::Io`] for
/// read failures and [`InputError::Malformed`] for invalid JSON.
pub fn load_comment(path: &Path) -> Result<Comment, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    let comment: Comment =
        serde_json::from_str(&contents).map_err(|source| InputError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    info!(id = %comment.id(), segments = comment.body().len(), "comment loaded");
    Ok(comment)
}

/// A user interaction to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Tap the item at this index of the current list.
    Tap(usize),
    /// Add or remove a reaction.
    React {
        /// Reaction to toggle.
        content: ReactionContent,
        /// `true` to add, `false` to remove.
        is_add: bool,
    },
}

/// Replay `interactions` in order, pumping completions after each one.
/// Returns every effect the host would have received.
///
/// # Errors
///
/// [`AppError::NoSuchItem`] when a tap targets an index outside the list.
pub fn replay(
    controller: &mut CommentController,
    interactions: &[Interaction],
) -> Result<Vec<HostEffect>, AppError> {
    let mut effects = Vec::new();
    for interaction in interactions {
        match *interaction {
            Interaction::Tap(index) => {
                let len = controller.project().len();
                if index >= len {
                    return Err(AppError::NoSuchItem { index, len });
                }
                effects.extend(controller.on_select(index));
            }
            Interaction::React { content, is_add } => {
                effects.extend(controller.react(content, is_add));
            }
        }
        effects.extend(controller.pump());
        debug!(?interaction, effects = effects.len(), "interaction replayed");
    }
    Ok(effects)
}

fn position_name(position: ThreadPosition) -> &'static str {
    match position {
        ThreadPosition::Single => "single",
        ThreadPosition::Neck => "neck",
        ThreadPosition::Tail => "tail",
    }
}

/// Render the current layout plan: a header with thread layout, then one
/// line per renderable item with its size.
///
/// # Errors
///
/// Propagates [`SizingError`] when no container width was set.
pub fn render_plan(controller: &mut CommentController) -> Result<String, SizingError> {
    let mut out = String::new();
    let comment = controller.comment();
    let state = if controller.collapse_state() == crate::view_state::CollapseState::Collapsed {
        "collapsed"
    } else {
        "expanded"
    };
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "{} by {} ({}, {})",
        comment.id(),
        comment.author(),
        position_name(comment.thread_position()),
        state
    );

    let inset = controller.inset();
    let borders = controller.borders();
    let _ = writeln!(
        out,
        "inset {} {} {} {} | borders details={} reactions={}",
        inset.top, inset.left, inset.bottom, inset.right, borders.details, borders.reactions
    );
    if let Some(link) = controller.permalink() {
        let _ = writeln!(out, "link {link}");
    }

    let items: Vec<RenderableItem> = controller.project().to_vec();
    for (index, item) in items.iter().enumerate() {
        let size = controller.size_for(index)?;
        let mut line = format!("{index:>2} {:<9} {:>4}x{:<4}", item.kind(), size.width, size.height);
        match item {
            RenderableItem::Details(details) => {
                let _ = write!(line, " {} {}", details.author, details.created_at.format("%Y-%m-%d"));
            }
            RenderableItem::Body { .. } if controller.affordance_visible(index) => {
                line.push_str(" [show more]");
            }
            RenderableItem::Body { .. } => {}
            RenderableItem::Reactions(summary) => {
                let _ = write!(line, " {summary}");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}
