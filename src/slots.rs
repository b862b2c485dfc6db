use crate::pool::{ChipId, OptionPool};

/// One drop target: a blank in a fill sentence, or the slot beside a
/// matching pair's left item. Holds at most one chip.
#[derive(Debug, Clone, Default)]
pub struct DropTarget {
    held: Option<ChipId>,
}

impl DropTarget {
    pub fn occupied(&self) -> bool {
        self.held.is_some()
    }

    pub fn held(&self) -> Option<ChipId> {
        self.held
    }
}

/// A user gesture against the slot board, in dispatchable form. The TUI (or
/// any other frontend) translates raw input into these commands; the engine
/// applies them, so the state transitions stay testable without a terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotCommand {
    /// Drop a pool chip onto a slot.
    PlaceChip { chip: ChipId, slot: usize },
    /// Drag one slot's content onto another slot (swap or move).
    DragBetween { from: usize, to: usize },
    /// Click a filled slot, or drag it out and drop on nothing.
    Remove { slot: usize },
}

/// What a dispatched command actually did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotChange {
    Placed { slot: usize },
    /// An occupied target gave its chip back to the pool before taking the
    /// new one.
    Replaced { slot: usize },
    Swapped { a: usize, b: usize },
    Moved { from: usize, to: usize },
    Removed { slot: usize },
    Rejected,
}

#[derive(Debug, Clone)]
pub struct SlotBoard {
    slots: Vec<DropTarget>,
}

impl SlotBoard {
    pub fn new(slot_count: usize) -> Self {
        SlotBoard {
            slots: vec![DropTarget::default(); slot_count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> &DropTarget {
        &self.slots[index]
    }

    pub fn all_occupied(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|s| s.occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied()).count()
    }

    /// Empty every slot and return every chip to the pool.
    pub fn reset(&mut self, pool: &mut OptionPool) {
        for slot in &mut self.slots {
            slot.held = None;
        }
        pool.show_all();
    }

    pub fn apply(&mut self, pool: &mut OptionPool, command: SlotCommand) -> SlotChange {
        match command {
            SlotCommand::PlaceChip { chip, slot } => self.place(pool, chip, slot),
            SlotCommand::DragBetween { from, to } => self.transfer(from, to),
            SlotCommand::Remove { slot } => self.remove(pool, slot),
        }
    }

    fn place(&mut self, pool: &mut OptionPool, chip: ChipId, slot: usize) -> SlotChange {
        if slot >= self.slots.len() || chip >= pool.len() || !pool.is_visible(chip) {
            return SlotChange::Rejected;
        }
        let evicted = self.slots[slot].held.take();
        if let Some(old) = evicted {
            pool.show(old);
        }
        pool.hide(chip);
        self.slots[slot].held = Some(chip);
        if evicted.is_some() {
            SlotChange::Replaced { slot }
        } else {
            SlotChange::Placed { slot }
        }
    }

    fn transfer(&mut self, from: usize, to: usize) -> SlotChange {
        if from >= self.slots.len() || to >= self.slots.len() || from == to {
            return SlotChange::Rejected;
        }
        match (self.slots[from].held, self.slots[to].held) {
            (Some(a), Some(b)) => {
                self.slots[from].held = Some(b);
                self.slots[to].held = Some(a);
                SlotChange::Swapped { a: from, b: to }
            }
            (Some(chip), None) => {
                self.slots[from].held = None;
                self.slots[to].held = Some(chip);
                SlotChange::Moved { from, to }
            }
            (None, _) => SlotChange::Rejected,
        }
    }

    fn remove(&mut self, pool: &mut OptionPool, slot: usize) -> SlotChange {
        if slot >= self.slots.len() {
            return SlotChange::Rejected;
        }
        match self.slots[slot].held.take() {
            Some(chip) => {
                pool.show(chip);
                SlotChange::Removed { slot }
            }
            None => SlotChange::Rejected,
        }
    }
}
