//! Rendering contexts (host cells) attached to renderable items.
//!
//! Hosts recycle cells: by the time an asynchronous measurement completes,
//! the cell that requested it may be showing different content. Every attach
//! bumps the cell's generation, so a [`ContextHandle`] taken before a recycle
//! no longer resolves afterwards.

use super::projector::ItemKey;
use std::collections::HashMap;

/// Host-side identifier of a reusable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

/// Non-owning reference to a cell as it was attached at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle {
    cell: CellId,
    generation: u64,
    item: ItemKey,
}

impl ContextHandle {
    /// The referenced cell.
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// The item the cell displayed when the handle was taken.
    pub fn item(&self) -> ItemKey {
        self.item
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    item: Option<ItemKey>,
}

/// Registry of which cell currently displays which item.
#[derive(Debug, Clone, Default)]
pub struct RenderContexts {
    slots: HashMap<CellId, Slot>,
}

impl RenderContexts {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `cell` now displays `item`, invalidating older handles.
    pub fn attach(&mut self, cell: CellId, item: ItemKey) -> ContextHandle {
        let slot = self.slots.entry(cell).or_insert(Slot {
            generation: 0,
            item: None,
        });
        slot.generation = slot.generation.wrapping_add(1);
        slot.item = Some(item);
        ContextHandle {
            cell,
            generation: slot.generation,
            item,
        }
    }

    /// Record that `cell` no longer displays anything.
    ///
    /// The generation is bumped as well, so a handle from before the detach
    /// stays dead even if the same item is reattached later.
    pub fn detach(&mut self, cell: CellId) {
        if let Some(slot) = self.slots.get_mut(&cell) {
            slot.generation = slot.generation.wrapping_add(1);
            slot.item = None;
        }
    }

    /// Item still shown through `handle`, or `None` if the cell was recycled
    /// or detached since the handle was taken.
    pub fn resolve(&self, handle: ContextHandle) -> Option<ItemKey> {
        self.slots
            .get(&handle.cell)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.item)
    }

    /// Whether the cell behind `handle` still shows the item it was
    /// attached for.
    pub fn is_attached(&self, handle: ContextHandle) -> bool {
        self.resolve(handle) == Some(handle.item)
    }

    /// Forget every cell.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
